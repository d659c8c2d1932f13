use crate::error::CoreError;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append-only text file holding one post title per line.
#[derive(Debug, Clone)]
pub struct TitleLog {
    path: PathBuf,
}

impl TitleLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends each title as its own line, in order, and returns the number
    /// of lines written. Creates the file but not its parent directory.
    pub fn append<S: AsRef<str>>(&self, titles: &[S]) -> Result<usize, CoreError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);

        for title in titles {
            writer.write_all(title.as_ref().as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        debug!("Appended {} titles to {}", titles.len(), self.path.display());
        Ok(titles.len())
    }
}
