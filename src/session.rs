use std::path::{Path, PathBuf};
use tracing::info;

use crate::augmenter::{augment, AugmentReport};
use crate::document::Document;
use crate::error::Result;

/// One opened file: where it came from, the augmented document and what the
/// augment pass did to it.
pub struct Session {
    path: PathBuf,
    document: Document,
    report: AugmentReport,
}

impl Session {
    pub fn open(path: &Path) -> Result<Self> {
        let mut document = Document::load(path)?;
        let report = augment(&mut document)?;
        info!(
            path = %path.display(),
            items = document.items().map_or(0, Vec::len),
            filled = report.total_filled(),
            "session opened"
        );

        Ok(Self {
            path: path.to_path_buf(),
            document,
            report,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn report(&self) -> &AugmentReport {
        &self.report
    }

    pub fn has_changes(&self) -> bool {
        self.report.total_filled() > 0
    }

    /// Overwrites the file the session was opened from.
    pub fn save(&self) -> Result<()> {
        self.save_as(&self.path)
    }

    pub fn save_as(&self, target: &Path) -> Result<()> {
        self.document.save(target)?;
        info!(path = %target.display(), "session saved");
        Ok(())
    }
}
