//! ZIP bundling of a run's generated files.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::Result;

/// Fixed file name of every run's archive.
pub const ARCHIVE_FILE_NAME: &str = "articles.zip";

/// Writes `files` into a deflated ZIP at `archive_path`.
///
/// Entries are named by file name only and keep the order given. An empty
/// `files` slice still produces a valid, empty archive.
pub fn write_archive<P: AsRef<Path>>(archive_path: &Path, files: &[P]) -> Result<()> {
    let file = File::create(archive_path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in files {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("not a file path: {}", path.display()))
            })?;

        zip.start_file(name, options)?;
        zip.write_all(&fs::read(path)?)?;
    }

    zip.finish()?;
    tracing::debug!(archive = %archive_path.display(), entries = files.len(), "archive written");
    Ok(())
}
