// Photo file storage — the filesystem half of photo attachment.
// Rows and files are not transactionally coupled: files go in before rows
// and come out before rows, and a failed file delete never blocks anything.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{GoNextError, Result};

/// Copy a source image into the managed photos folder under a unique
/// generated name. Returns the stored path.
pub fn import_photo(source: &Path, photos_dir: &Path) -> Result<PathBuf> {
    if source.file_name().is_none() {
        return Err(GoNextError::InvalidPath(format!(
            "No filename: {}",
            source.display()
        )));
    }

    fs::create_dir_all(photos_dir)?;

    let dest_path = photos_dir.join(unique_photo_name(source));
    fs::copy(source, &dest_path)?;

    // Preserve the source modification time so photos sort by capture-ish time
    if let Ok(source_meta) = fs::metadata(source) {
        if let Ok(modified) = source_meta.modified() {
            let _ = filetime::set_file_mtime(
                &dest_path,
                filetime::FileTime::from_system_time(modified),
            );
        }
    }

    Ok(dest_path)
}

/// Unique file name: UTC timestamp + short random suffix + source extension.
fn unique_photo_name(source: &Path) -> String {
    let stamp = Utc::now().format("%Y%m%d%H%M%S%3f");
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    match source.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stamp, &suffix[..8], ext.to_lowercase()),
        None => format!("{}_{}", stamp, &suffix[..8]),
    }
}

/// Best-effort file delete. A missing file is not an error; any other
/// failure is logged and swallowed so the row delete can proceed.
pub fn delete_photo_file(path: &str) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("Failed to delete photo file {}: {}", path, e),
    }
}
