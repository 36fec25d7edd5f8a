mod runner;
pub mod selector;
mod submitter;
mod types;
mod validator;

pub use runner::SubmissionRunner;
pub use selector::FileSelection;
pub use submitter::{parse_odds, HttpOddsService, OddsService};
pub use types::{Resolution, SelectedFile, Submission, SubmissionToken};
pub use validator::Validator;
