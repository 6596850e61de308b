//! Saving export payloads into the download directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::filename::download_filename;
use crate::ExportFormat;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("{} is not a usable download directory: {source}", .dir.display())]
    Directory { dir: PathBuf, source: io::Error },
    #[error("could not write {filename}: {source}")]
    Write { filename: String, source: io::Error },
}

/// Writes each payload to `<dir>/<seed>-keywords.<ext>`.
///
/// Bytes land in a temporary sibling first and are renamed over the target,
/// so a reader never sees a half-written export and a repeated export of the
/// same seed replaces the earlier file.
#[derive(Debug, Clone)]
pub struct DownloadSaver {
    dir: PathBuf,
}

impl DownloadSaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn save(
        &self,
        seed: &str,
        format: ExportFormat,
        payload: &[u8],
    ) -> Result<PathBuf, PersistError> {
        prepare_dir(&self.dir)?;

        let filename = download_filename(seed, format.extension());
        let target = self.dir.join(&filename);
        let write_error = |source: io::Error| PersistError::Write {
            filename: filename.clone(),
            source,
        };

        let mut staged = NamedTempFile::new_in(&self.dir).map_err(write_error)?;
        staged.write_all(payload).map_err(write_error)?;
        staged.as_file_mut().sync_all().map_err(write_error)?;
        staged
            .persist(&target)
            .map_err(|err| write_error(err.error))?;
        Ok(target)
    }
}

fn prepare_dir(dir: &Path) -> Result<(), PersistError> {
    fs::create_dir_all(dir).map_err(|source| PersistError::Directory {
        dir: dir.to_path_buf(),
        source,
    })
}
