// Save the frame on screen as a PNG named after the preset and the wall-clock second.
// Two saves within the same second write the same name; the later one wins.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use image::RgbImage;
use tracing::{error, info};

use crate::error::Error;
use crate::types::{FrameBuffer, Rgb};

/// `<art-name>_<YYYYMMDD_HHMMSS>.png`
pub fn file_name(art_name: &str, at: NaiveDateTime) -> String {
    format!("{art_name}_{}.png", at.format("%Y%m%d_%H%M%S"))
}

/// Write `screen` into `dir` with a timestamped name. Returns the written path.
pub fn save_png(screen: &FrameBuffer, dir: &Path, art_name: &str) -> Result<PathBuf, Error> {
    fs::create_dir_all(dir).map_err(|source| Error::OutputDir { path: dir.to_path_buf(), source })?;
    let path = dir.join(file_name(art_name, Local::now().naive_local()));
    write_png(screen, &path)?;
    Ok(path)
}

/// Save on the S key: success and failure both end up in the log, never in the frame loop.
pub fn save_frame(screen: &FrameBuffer, dir: &Path, art_name: &str) {
    match save_png(screen, dir, art_name) {
        Ok(path) => info!(path = %path.display(), "saved frame"),
        Err(e) => error!("{e}"),
    }
}

pub fn write_png(screen: &FrameBuffer, path: &Path) -> Result<(), Error> {
    let mut raw = Vec::with_capacity(screen.pixels.len() * 3);
    for &px in &screen.pixels {
        let c = Rgb::from_u32(px);
        raw.extend_from_slice(&[c.r, c.g, c.b]);
    }
    let img = RgbImage::from_raw(screen.width as u32, screen.height as u32, raw)
        .ok_or(Error::ExportBuffer { width: screen.width, height: screen.height })?;
    img.save(path).map_err(|source| Error::Export { path: path.to_path_buf(), source })
}
