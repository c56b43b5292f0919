//! Image file writing for rendered buffers.
//!
//! The renderer hands over linear radiance; this module owns the conversion
//! to files: plain-text PPM or 8-bit PNG, chosen by file extension.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::RgbImage;
use log::info;
use lux_renderer::{color_to_rgb, ImageBuffer};
use thiserror::Error;

/// Errors that can occur while writing a rendered image.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("image encode error: {0}")]
    Encode(String),

    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for image writing.
pub type WriteResult<T> = Result<T, WriteError>;

/// Write `frame` to `path`, dispatching on the file extension.
pub fn write_image(frame: &ImageBuffer, path: &Path) -> WriteResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ppm") => write_ppm(frame, path),
        Some("png") => write_png(frame, path),
        other => Err(WriteError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

/// Plain-text PPM: `P3` header, max channel 255, one RGB triple per pixel,
/// rows top to bottom.
fn write_ppm(frame: &ImageBuffer, path: &Path) -> WriteResult<()> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "P3")?;
    writeln!(file, "{} {}", frame.width, frame.height)?;
    writeln!(file, "255")?;

    for y in 0..frame.height {
        for x in 0..frame.width {
            let [r, g, b] = color_to_rgb(frame.get(x, y));
            writeln!(file, "{} {} {}", r, g, b)?;
        }
    }
    file.flush()?;

    info!("wrote {}", path.display());
    Ok(())
}

fn write_png(frame: &ImageBuffer, path: &Path) -> WriteResult<()> {
    let buffer = RgbImage::from_raw(frame.width, frame.height, frame.to_rgb8())
        .ok_or_else(|| WriteError::Encode("pixel buffer does not match dimensions".to_string()))?;
    buffer.save(path)?;

    info!("wrote {}", path.display());
    Ok(())
}
