use std::io::Write;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use crate::error::WriteError;

/// Encode an RGBA canvas as PNG bytes
///
/// Encoding settings are fixed, so identical pixels always give identical bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, WriteError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgba8)
        .map_err(|e| WriteError::EncodeFailed { reason: e.to_string() })?;
    Ok(bytes)
}

/// Write `img` as PNG to `path`, replacing any existing file only on success
///
/// The image is encoded in memory first, written to a temporary file next to
/// the destination, then renamed into place. An existing destination keeps its
/// permissions; a new file gets the usual umask-filtered mode. Returns the
/// number of bytes written.
pub fn write_png_atomic<P: AsRef<Path>>(path: P, img: &RgbaImage) -> Result<u64, WriteError> {
    let path = path.as_ref();
    let bytes = encode_png(img)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staging = staging_file(dir).map_err(|e| WriteError::CreateFailed {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let persist_failed = |reason: String| WriteError::PersistFailed {
        path: path.display().to_string(),
        reason,
    };

    if let Ok(existing) = std::fs::metadata(path) {
        staging
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| persist_failed(e.to_string()))?;
    }

    staging.write_all(&bytes).map_err(|e| persist_failed(e.to_string()))?;
    staging.flush().map_err(|e| persist_failed(e.to_string()))?;
    staging.persist(path).map_err(|e| persist_failed(e.error.to_string()))?;

    debug!("Wrote {} bytes to {:?}", bytes.len(), path);
    Ok(bytes.len() as u64)
}

/// Temporary file in `dir`, created with the mode a plain `File::create` would get
fn staging_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".thumbnail-").suffix(".png.tmp");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // The kernel applies the process umask to this
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    builder.tempfile_in(dir)
}
