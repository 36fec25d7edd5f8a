use derivative::Derivative;

use crate::classify::Probability;
use crate::error::WorkflowError;

/// A file chosen by the user. Replaced wholesale on every new selection.
#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct SelectedFile {
    pub name: String,
    #[derivative(Debug = "ignore")]
    pub content: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Identity of one submission. Later selections always get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionToken(pub u64);

/// A validated file paired with the token its response must carry back.
#[derive(Debug, Clone)]
pub struct Submission {
    pub token: SubmissionToken,
    pub file: SelectedFile,
}

/// Outcome of a finished request, tagged with the submission it belongs to.
#[derive(Debug)]
pub struct Resolution {
    pub token: SubmissionToken,
    pub outcome: Result<Probability, WorkflowError>,
}
