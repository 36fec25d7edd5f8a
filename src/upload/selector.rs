use std::fs;
use std::path::Path;

use eframe::egui::DroppedFile;
use rfd::FileDialog;
use tracing::{debug, warn};

use crate::error::WorkflowError;
use crate::upload::SelectedFile;

/// What came back from one attempt to choose a file.
#[derive(Debug)]
pub enum FileSelection {
    /// Dialog closed without a choice.
    Cancelled,
    Picked(SelectedFile),
    /// The user chose a file but its bytes could not be loaded.
    Unreadable { name: String, error: WorkflowError },
}

/// Opens the native file dialog, filtered on JSON files.
pub fn pick_file() -> FileSelection {
    match FileDialog::new()
        .set_title("Select Empire intelligence data")
        .add_filter("JSON", &["json"])
        .pick_file()
    {
        Some(path) => load_path(&path),
        None => {
            debug!("File dialog cancelled");
            FileSelection::Cancelled
        }
    }
}

pub fn load_path(path: &Path) -> FileSelection {
    let name = display_name(path);
    match fs::read(path) {
        Ok(content) => FileSelection::Picked(SelectedFile::new(name, content)),
        Err(source) => {
            warn!("Could not read {}: {}", path.display(), source);
            FileSelection::Unreadable {
                name,
                error: WorkflowError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                },
            }
        }
    }
}

/// Uses the first dropped file only; batch submission is not supported.
pub fn from_dropped(files: &[DroppedFile]) -> FileSelection {
    let Some(file) = files.first() else {
        return FileSelection::Cancelled;
    };
    if files.len() > 1 {
        debug!("{} files dropped, using the first", files.len());
    }

    if let Some(bytes) = &file.bytes {
        let name = if file.name.is_empty() {
            file.path.as_deref().map(display_name).unwrap_or_default()
        } else {
            file.name.clone()
        };
        return FileSelection::Picked(SelectedFile::new(name, bytes.to_vec()));
    }

    match &file.path {
        Some(path) => load_path(path),
        None => FileSelection::Cancelled,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
