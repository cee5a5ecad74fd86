// Copyright (c) 2025 - Cowboy AI, Inc.
//! Zip extraction for provider archives

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;
use zip::ZipArchive;

use super::downloader::DownloadError;

/// Mode given to extracted files whose archive entry carries none
const DEFAULT_FILE_MODE: u32 = 0o755;

/// Extracts zip archives into a directory
///
/// Extraction is all-or-nothing. Entry names are validated before anything
/// is written, every file is staged next to its destination, and staged
/// files are only renamed to their final names once the whole archive has
/// been read. On failure the staged files are dropped, so no file from a
/// partially extracted archive is left under its final name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipDecompressor;

impl ZipDecompressor {
    /// Create a decompressor
    pub fn new() -> Self {
        Self
    }

    /// Extract `src` into the directory `dst`, creating it if needed
    ///
    /// Unix permissions stored in the archive are applied, minus the bits
    /// set in `umask`.
    pub fn decompress(&self, dst: &Path, src: &Path, umask: u32) -> Result<(), DownloadError> {
        fs::create_dir_all(dst)?;

        let mut archive = ZipArchive::new(File::open(src)?)?;

        let mut targets = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index)?;
            let Some(relative) = entry.enclosed_name() else {
                return Err(DownloadError::UnsafeArchiveEntry(entry.name().to_string()));
            };
            targets.push(dst.join(relative));
        }

        let mut staged: Vec<(NamedTempFile, PathBuf)> = Vec::with_capacity(targets.len());
        for (index, target) in targets.into_iter().enumerate() {
            let mut entry = archive.by_index(index)?;
            if entry.is_dir() {
                fs::create_dir_all(&target)?;
                continue;
            }

            let parent = target.parent().unwrap_or(dst);
            fs::create_dir_all(parent)?;

            let mode = entry.unix_mode().unwrap_or(DEFAULT_FILE_MODE) & 0o777 & !umask;
            let mut file = NamedTempFile::new_in(parent)?;
            io::copy(&mut entry, &mut file)?;
            set_mode(file.path(), mode)?;
            staged.push((file, target));
        }

        for (file, target) in staged {
            file.persist(&target)
                .map_err(|e| DownloadError::Io(e.error))?;
            debug!(path = %target.display(), "Extracted archive entry");
        }

        Ok(())
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}
