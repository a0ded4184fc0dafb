/// Disk boundary: image decode, JPEG encode, export naming
///
/// All platform I/O failures are converted into `DiskError` values here;
/// nothing in this module panics on bad user files. CPU-bound work runs on
/// blocking tasks so the UI thread stays responsive.

use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, Rgb, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task;

/// Failures crossing the disk boundary
#[derive(Debug, Clone, thiserror::Error)]
pub enum DiskError {
    #[error("could not decode image: {0}")]
    Decode(String),
    #[error("could not write image: {0}")]
    Write(String),
}

/// Load and decode an image file, normalized to RGBA
pub async fn load_image(path: PathBuf) -> Result<RgbaImage, DiskError> {
    // Spawn blocking because decoding is CPU-intensive
    task::spawn_blocking(move || load_image_blocking(&path))
        .await
        .map_err(|e| DiskError::Decode(format!("task join error: {}", e)))?
}

fn load_image_blocking(path: &Path) -> Result<RgbaImage, DiskError> {
    if !path.exists() {
        return Err(DiskError::Decode(format!(
            "file not found: {}",
            path.display()
        )));
    }

    let decoded = image::open(path).map_err(|e| DiskError::Decode(e.to_string()))?;
    Ok(decoded.to_rgba8())
}

/// Encode a bitmap as a maximum-quality JPEG at the given path
pub async fn save_jpeg(image: Arc<RgbaImage>, path: PathBuf) -> Result<(), DiskError> {
    task::spawn_blocking(move || save_jpeg_blocking(&image, &path))
        .await
        .map_err(|e| DiskError::Write(format!("task join error: {}", e)))?
}

fn save_jpeg_blocking(image: &RgbaImage, path: &Path) -> Result<(), DiskError> {
    let file = File::create(path).map_err(|e| DiskError::Write(e.to_string()))?;
    let mut writer = BufWriter::new(file);

    // JPEG has no alpha channel, so flatten to RGB first
    let rgb: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let pixel = image.get_pixel(x, y);
            Rgb([pixel[0], pixel[1], pixel[2]])
        });

    let mut encoder = JpegEncoder::new_with_quality(&mut writer, 100);
    encoder
        .encode_image(&rgb)
        .map_err(|e| DiskError::Write(e.to_string()))
}

/// Resolve the display name of a file, e.g. "DSC_0001.jpg"
pub fn display_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

/// Insert text before the final extension: "pano.jpg" + "_edit" ->
/// "pano_edit.jpg". Names without an extension come back unchanged.
pub fn insert_before_extension(filename: &str, insert: &str) -> String {
    match filename.rsplit_once('.') {
        Some((base, extension)) if !extension.is_empty() => {
            format!("{}{}.{}", base, insert, extension)
        }
        _ => filename.to_string(),
    }
}
