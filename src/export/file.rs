//! PNG files in the destination folder

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use image::RgbaImage;

use crate::domain::FilePrefix;
use crate::error::PersistenceError;

/// Encode `image` as an 8-bit RGBA PNG
pub fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// `MeasuringStick_20250101_120000.png` style name
pub fn file_name(prefix: FilePrefix, time: &DateTime<Local>) -> String {
    format!("{}_{}.png", prefix.stem(), time.format("%Y%m%d_%H%M%S"))
}

/// First free path for `name` in `folder`. Two exports within the same
/// second get `_2`, `_3`, ... suffixes instead of overwriting each other.
fn unique_path(folder: &Path, name: &str) -> PathBuf {
    let candidate = folder.join(name);
    if !candidate.exists() {
        return candidate;
    }
    let stem = name.trim_end_matches(".png");
    (2..)
        .map(|n| folder.join(format!("{stem}_{n}.png")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Write `image` into `folder` and return the path written
pub fn save_png(
    image: &RgbaImage,
    folder: &Path,
    prefix: FilePrefix,
) -> Result<PathBuf, PersistenceError> {
    if folder.exists() && !folder.is_dir() {
        return Err(PersistenceError::NotADirectory(folder.to_path_buf()));
    }
    fs::create_dir_all(folder)?;

    let path = unique_path(folder, &file_name(prefix, &Local::now()));
    let file = File::create(&path)?;
    write_png(BufWriter::new(file), image)?;
    log::info!("Saved {}x{} screenshot to {}", image.width(), image.height(), path.display());
    Ok(path)
}
