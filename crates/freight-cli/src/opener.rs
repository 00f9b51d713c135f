//! Opening the export folder in the system file browser

use std::path::Path;
use tracing::debug;

/// Opens a folder for the user after an export
pub trait FolderOpener {
    fn open(&self, folder: &Path) -> std::io::Result<()>;
}

/// Uses the platform handler (`xdg-open`, `open`, `explorer`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl FolderOpener for SystemOpener {
    fn open(&self, folder: &Path) -> std::io::Result<()> {
        debug!(folder = %folder.display(), "Opening export folder");
        open::that(folder)
    }
}
