use crate::config::REQUIRED_EXTENSION;
use crate::error::WorkflowError;
use crate::upload::SelectedFile;

/// Checks a selection before anything is sent over the network.
#[derive(Debug, Clone)]
pub struct Validator {
    extension: &'static str,
    max_file_bytes: u64,
}

impl Validator {
    pub fn new(max_file_bytes: u64) -> Self {
        Self {
            extension: REQUIRED_EXTENSION,
            max_file_bytes,
        }
    }

    /// Case-sensitive suffix match on the file name, then the size limit.
    pub fn validate(&self, file: &SelectedFile) -> Result<(), WorkflowError> {
        if !file.name.ends_with(self.extension) {
            return Err(WorkflowError::InvalidExtension {
                name: file.name.clone(),
                expected: self.extension,
            });
        }

        if file.size() > self.max_file_bytes {
            return Err(WorkflowError::TooLarge {
                name: file.name.clone(),
                size: file.size(),
                limit: self.max_file_bytes,
            });
        }

        Ok(())
    }
}
