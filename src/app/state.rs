use tracing::{debug, info, warn};

use crate::classify::{classify, Classification, Probability};
use crate::error::WorkflowError;
use crate::upload::{
    FileSelection, Resolution, SelectedFile, Submission, SubmissionToken, Validator,
};

/// The single source of truth for what the window shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Validating,
    Submitting {
        token: SubmissionToken,
    },
    Succeeded {
        probability: Probability,
    },
    Failed {
        message: String,
    },
}

impl WorkflowState {
    pub fn is_busy(&self) -> bool {
        matches!(self, WorkflowState::Submitting { .. })
    }

    pub fn classification(&self) -> Classification {
        match self {
            WorkflowState::Succeeded { probability } => classify(Some(*probability)),
            _ => classify(None),
        }
    }
}

/// Select → Validate → Submit → Classify, one submission at a time.
#[derive(Debug)]
pub struct UploadWorkflow {
    state: WorkflowState,
    validator: Validator,
    selected_name: Option<String>,
    selected_size: Option<u64>,
    last_token: u64,
}

impl UploadWorkflow {
    pub fn new(validator: Validator) -> Self {
        Self {
            state: WorkflowState::Idle,
            validator,
            selected_name: None,
            selected_size: None,
            last_token: 0,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected_name.as_deref()
    }

    pub fn selected_size(&self) -> Option<u64> {
        self.selected_size
    }

    /// Starts a fresh cycle for a new selection, superseding anything in
    /// flight. Returns the submission to send when the file passes
    /// validation.
    pub fn select(&mut self, selection: FileSelection) -> Option<Submission> {
        match selection {
            FileSelection::Cancelled => None,
            FileSelection::Unreadable { name, error } => {
                self.selected_name = Some(name);
                self.selected_size = None;
                self.fail(error);
                None
            }
            FileSelection::Picked(file) => self.begin(file),
        }
    }

    fn begin(&mut self, file: SelectedFile) -> Option<Submission> {
        if let WorkflowState::Submitting { token } = &self.state {
            debug!("Selection of '{}' supersedes submission {:?}", file.name, token);
        }

        self.selected_name = Some(file.name.clone());
        self.selected_size = Some(file.size());
        self.state = WorkflowState::Validating;

        if let Err(error) = self.validator.validate(&file) {
            self.fail(error);
            return None;
        }

        self.last_token += 1;
        let token = SubmissionToken(self.last_token);
        info!("Submitting '{}' as {:?}", file.name, token);
        self.state = WorkflowState::Submitting { token };
        Some(Submission { token, file })
    }

    /// Applies a finished request if it belongs to the current submission.
    /// Stale resolutions are dropped and `false` is returned.
    pub fn resolve(&mut self, resolution: Resolution) -> bool {
        let Resolution { token, outcome } = resolution;
        match self.state {
            WorkflowState::Submitting { token: active } if active == token => {}
            _ => {
                debug!("Discarding stale response for {:?}", token);
                return false;
            }
        }

        match outcome {
            Ok(probability) => {
                info!(
                    "Submission {:?} succeeded with {} ({} tier)",
                    token,
                    probability,
                    classify(Some(probability)).tier.name()
                );
                self.state = WorkflowState::Succeeded { probability };
            }
            Err(error) => self.fail(error),
        }
        true
    }

    /// Clears an error banner. Only meaningful in `Failed`.
    pub fn dismiss(&mut self) {
        if matches!(self.state, WorkflowState::Failed { .. }) {
            self.state = WorkflowState::Idle;
        }
    }

    fn fail(&mut self, error: WorkflowError) {
        if error.is_validation() {
            info!("Selection rejected: {}", error);
        } else {
            warn!("Odds computation failed: {}", error);
        }
        self.state = WorkflowState::Failed {
            message: error.user_message(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Tier;
    use crate::error::{INVALID_TYPE_MESSAGE, RETRY_MESSAGE, UNREADABLE_MESSAGE};

    fn workflow() -> UploadWorkflow {
        UploadWorkflow::new(Validator::new(1024))
    }

    fn pick(name: &str) -> FileSelection {
        FileSelection::Picked(SelectedFile::new(name, b"{\"countdown\": 7}".to_vec()))
    }

    fn odds(token: SubmissionToken, value: i64) -> Resolution {
        Resolution {
            token,
            outcome: Probability::try_from(value),
        }
    }

    #[test]
    fn starts_idle_with_neutral_classification() {
        let wf = workflow();
        assert_eq!(wf.state(), &WorkflowState::Idle);
        assert_eq!(wf.state().classification().tier, Tier::Neutral);
        assert_eq!(wf.selected_name(), None);
    }

    #[test]
    fn wrong_extension_fails_without_submission() {
        let mut wf = workflow();
        assert!(wf.select(pick("plan.txt")).is_none());
        assert_eq!(
            wf.state(),
            &WorkflowState::Failed {
                message: INVALID_TYPE_MESSAGE.to_string()
            }
        );
        assert_eq!(wf.selected_name(), Some("plan.txt"));
    }

    #[test]
    fn valid_file_moves_to_submitting() {
        let mut wf = workflow();
        let submission = wf.select(pick("plan.json")).unwrap();
        assert_eq!(submission.file.name, "plan.json");
        assert_eq!(
            wf.state(),
            &WorkflowState::Submitting {
                token: submission.token
            }
        );
        assert!(wf.state().is_busy());
    }

    #[test]
    fn cancelled_selection_changes_nothing() {
        let mut wf = workflow();
        let submission = wf.select(pick("plan.json")).unwrap();
        assert!(wf.select(FileSelection::Cancelled).is_none());
        assert_eq!(
            wf.state(),
            &WorkflowState::Submitting {
                token: submission.token
            }
        );

        assert!(wf.resolve(odds(submission.token, 42)));
        let before = wf.state().clone();
        wf.select(FileSelection::Cancelled);
        assert_eq!(wf.state(), &before);
    }

    #[test]
    fn results_map_to_tiers() {
        for (value, tier) in [(0, Tier::Failure), (100, Tier::Success), (42, Tier::Caution)] {
            let mut wf = workflow();
            let submission = wf.select(pick("plan.json")).unwrap();
            assert!(wf.resolve(odds(submission.token, value)));
            assert_eq!(wf.state().classification().tier, tier);
        }
    }

    #[test]
    fn service_failure_shows_generic_message() {
        let mut wf = workflow();
        let submission = wf.select(pick("plan.json")).unwrap();
        assert!(wf.resolve(Resolution {
            token: submission.token,
            outcome: Err(WorkflowError::Service { status: 500 }),
        }));
        assert_eq!(
            wf.state(),
            &WorkflowState::Failed {
                message: RETRY_MESSAGE.to_string()
            }
        );
        assert_eq!(wf.state().classification().tier, Tier::Neutral);
    }

    #[test]
    fn out_of_range_result_is_a_failure() {
        let mut wf = workflow();
        let submission = wf.select(pick("plan.json")).unwrap();
        assert!(wf.resolve(odds(submission.token, 250)));
        assert!(matches!(wf.state(), WorkflowState::Failed { .. }));
    }

    #[test]
    fn late_response_for_superseded_submission_is_ignored() {
        let mut wf = workflow();
        let first = wf.select(pick("plan.json")).unwrap();
        let second = wf.select(pick("plan2.json")).unwrap();
        assert!(second.token > first.token);

        assert!(wf.resolve(odds(second.token, 100)));
        assert!(!wf.resolve(odds(first.token, 0)));
        assert_eq!(wf.state().classification().tier, Tier::Success);
        assert_eq!(wf.selected_name(), Some("plan2.json"));
    }

    #[test]
    fn early_stale_response_does_not_end_the_newer_submission() {
        let mut wf = workflow();
        let first = wf.select(pick("plan.json")).unwrap();
        let second = wf.select(pick("plan2.json")).unwrap();

        assert!(!wf.resolve(Resolution {
            token: first.token,
            outcome: Err(WorkflowError::Service { status: 502 }),
        }));
        assert_eq!(
            wf.state(),
            &WorkflowState::Submitting {
                token: second.token
            }
        );
    }

    #[test]
    fn invalid_selection_supersedes_in_flight_submission() {
        let mut wf = workflow();
        let first = wf.select(pick("plan.json")).unwrap();
        assert!(wf.select(pick("notes.txt")).is_none());

        assert!(!wf.resolve(odds(first.token, 100)));
        assert_eq!(
            wf.state(),
            &WorkflowState::Failed {
                message: INVALID_TYPE_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn new_selection_discards_previous_result() {
        let mut wf = workflow();
        let first = wf.select(pick("plan.json")).unwrap();
        wf.resolve(odds(first.token, 100));

        let second = wf.select(pick("plan.json")).unwrap();
        assert_eq!(
            wf.state(),
            &WorkflowState::Submitting {
                token: second.token
            }
        );
        assert!(!wf.resolve(odds(first.token, 100)));
    }

    #[test]
    fn unreadable_file_records_name_and_fails() {
        let mut wf = workflow();
        let error = WorkflowError::Unreadable {
            path: "/tmp/locked.json".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(wf
            .select(FileSelection::Unreadable {
                name: "locked.json".into(),
                error,
            })
            .is_none());
        assert_eq!(wf.selected_name(), Some("locked.json"));
        assert_eq!(
            wf.state(),
            &WorkflowState::Failed {
                message: UNREADABLE_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn dismiss_only_clears_failures() {
        let mut wf = workflow();
        let submission = wf.select(pick("plan.json")).unwrap();
        wf.dismiss();
        assert!(wf.state().is_busy());

        wf.resolve(Resolution {
            token: submission.token,
            outcome: Err(WorkflowError::Timeout(std::time::Duration::from_secs(1))),
        });
        wf.dismiss();
        assert_eq!(wf.state(), &WorkflowState::Idle);
        assert_eq!(wf.selected_name(), Some("plan.json"));
    }

    #[test]
    fn tokens_increase_monotonically() {
        let mut wf = workflow();
        let mut previous = None;
        for _ in 0..5 {
            let token = wf.select(pick("plan.json")).unwrap().token;
            if let Some(prev) = previous {
                assert!(token > prev);
            }
            previous = Some(token);
        }
    }
}
