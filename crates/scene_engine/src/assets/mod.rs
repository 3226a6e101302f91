//! Asset loading
//!
//! Texture decoding for sprite/tile resources. Paths handed in here are
//! expected to exist; a failure to open or decode is surfaced to the
//! caller, never defaulted.

use crate::foundation::files::ResourceError;
use crate::render::Texture;
use std::path::Path;

/// Load a PNG file into an RGBA8 [`Texture`]
pub fn load_texture(path: &Path) -> Result<Texture, ResourceError> {
    let image = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(source) => ResourceError::Open {
            path: path.display().to_string(),
            source,
        },
        other => ResourceError::Decode {
            path: path.display().to_string(),
            reason: other.to_string(),
        },
    })?;

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Texture::from_pixels(name, rgba.into_raw(), width, height).map_err(|e| ResourceError::Decode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
