use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use derivative::Derivative;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::app::UploadWorkflow;
use crate::upload::{OddsService, Resolution, Submission};

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Runs submissions off the UI thread and hands their results back over a
/// channel that the UI drains once per frame.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct SubmissionRunner {
    #[derivative(Debug = "ignore")]
    runtime: Runtime,
    #[derivative(Debug = "ignore")]
    service: Arc<dyn OddsService>,
    #[derivative(Debug = "ignore")]
    waker: Option<Waker>,
    sender: Sender<Resolution>,
    receiver: Receiver<Resolution>,
}

impl SubmissionRunner {
    pub fn new(service: Arc<dyn OddsService>) -> std::io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("odds-submit")
            .enable_all()
            .build()?;
        let (sender, receiver) = channel();

        Ok(Self {
            runtime,
            service,
            waker: None,
            sender,
            receiver,
        })
    }

    /// Called after every resolution is queued, e.g. to request a repaint.
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }

    pub fn spawn(&self, submission: Submission) {
        let service = Arc::clone(&self.service);
        let sender = self.sender.clone();
        let waker = self.waker.clone();

        self.runtime.spawn(async move {
            let Submission { token, file } = submission;
            let outcome = service.compute_odds(&file).await;
            if sender.send(Resolution { token, outcome }).is_err() {
                debug!("Resolution for {:?} dropped, receiver gone", token);
            }
            if let Some(waker) = waker {
                waker();
            }
        });
    }

    /// Applies every queued resolution. Returns whether the state changed.
    pub fn drain(&self, workflow: &mut UploadWorkflow) -> bool {
        let mut changed = false;
        while let Ok(resolution) = self.receiver.try_recv() {
            changed |= workflow.resolve(resolution);
        }
        changed
    }

    /// Checks the service in the background; the answer arrives on the
    /// returned receiver.
    pub fn check_reachability(&self) -> Receiver<bool> {
        let (sender, receiver) = channel();
        let service = Arc::clone(&self.service);
        let waker = self.waker.clone();

        self.runtime.spawn(async move {
            if sender.send(service.is_reachable().await).is_err() {
                debug!("Reachability result dropped, receiver gone");
            }
            if let Some(waker) = waker {
                waker();
            }
        });

        receiver
    }
}
