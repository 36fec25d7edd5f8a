mod state;
mod ui;

use crate::config::Config;
use crate::upload::{selector, FileSelection, SubmissionRunner, Validator};
use eframe::{egui, App};
pub use state::{UploadWorkflow, WorkflowState};
use std::sync::mpsc::Receiver;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceHealth {
    Checking,
    Online,
    Offline,
}

pub struct OddsCalculator {
    workflow: UploadWorkflow,
    runner: SubmissionRunner,
    endpoint: String,
    health: ServiceHealth,
    health_receiver: Option<Receiver<bool>>,
}

impl OddsCalculator {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &Config,
        runner: SubmissionRunner,
    ) -> Self {
        info!("Initializing Millennium Falcon Odds Calculator");
        let ctx = cc.egui_ctx.clone();
        let runner = runner.with_waker(move || ctx.request_repaint());
        let health_receiver = Some(runner.check_reachability());

        Self {
            workflow: UploadWorkflow::new(Validator::new(config.max_file_bytes)),
            runner,
            endpoint: config.endpoint.to_string(),
            health: ServiceHealth::Checking,
            health_receiver,
        }
    }

    pub fn handle_selection(&mut self, selection: FileSelection) {
        if let Some(submission) = self.workflow.select(selection) {
            self.runner.spawn(submission);
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if let Some(receiver) = &self.health_receiver {
            if let Ok(online) = receiver.try_recv() {
                self.health = if online {
                    ServiceHealth::Online
                } else {
                    ServiceHealth::Offline
                };
                self.health_receiver = None;
            }
        }

        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if !dropped.is_empty() {
            self.handle_selection(selector::from_dropped(&dropped));
        }

        if self.runner.drain(&mut self.workflow) {
            ctx.request_repaint();
        }
    }
}

impl App for OddsCalculator {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
