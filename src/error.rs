// Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing the frame to the window failed
    #[error("Export error ({path}): {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    }, // Encoding/writing the PNG failed
    #[error("Export error: frame buffer of {width}x{height} does not match its pixel data")]
    ExportBuffer { width: usize, height: usize },
    #[error("Output directory error ({path}): {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
