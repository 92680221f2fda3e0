use log::debug;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::errors::ArchiveError;
use crate::file_utils::FileManager;

// @module: Output bundling

/// Bundle every file directly inside `dir` into a zip archive at `zip_path`.
///
/// Entries are named by their base filename only, so the directory's absolute
/// path never leaks into the archive. Subdirectories are not descended into.
/// The entry set is whatever exists in the directory at archive time.
pub fn bundle_directory(dir: &Path, zip_path: &Path) -> Result<(), ArchiveError> {
    let file =
        File::create(zip_path).map_err(|e| ArchiveError::CreateFailed(e.to_string()))?;

    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let files =
        FileManager::list_files(dir).map_err(|e| ArchiveError::CreateFailed(e.to_string()))?;

    for path in files {
        let name = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default();

        let entry_failed = |e: String| ArchiveError::EntryFailed {
            name: name.clone(),
            message: e,
        };

        writer
            .start_file(name.clone(), options)
            .map_err(|e| entry_failed(e.to_string()))?;

        let bytes = FileManager::read_bytes(&path).map_err(|e| entry_failed(e.to_string()))?;
        writer
            .write_all(&bytes)
            .map_err(|e| entry_failed(e.to_string()))?;

        debug!("Archived entry '{}' ({} bytes)", name, bytes.len());
    }

    writer
        .finish()
        .map_err(|e| ArchiveError::CreateFailed(e.to_string()))?;

    Ok(())
}
