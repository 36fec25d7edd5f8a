pub mod app;
pub mod classify;
pub mod config;
pub mod error;
pub mod logging;
pub mod upload;
pub mod utils;

pub use app::{OddsCalculator, UploadWorkflow, WorkflowState};
pub use classify::{classify, Classification, Probability, Tier};
pub use config::Config;
pub use error::WorkflowError;
