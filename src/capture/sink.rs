//! Writing captured images to disk.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};

use crate::error::CaptureError;

/// `screen-<unix millis>.png`.
pub fn capture_file_name(timestamp_millis: i64) -> String {
    format!("screen-{}.png", timestamp_millis)
}

/// Encode `img` as PNG into `dir`, creating the directory if needed.
pub async fn write_png(dir: &Path, img: RgbaImage) -> Result<PathBuf, CaptureError> {
    let path = dir.join(capture_file_name(chrono::Utc::now().timestamp_millis()));

    let encoded = tokio::task::spawn_blocking(move || {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .map(|_| buf)
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| e.to_string())
    .and_then(|r| r)
    .map_err(|message| CaptureError::WriteFailed {
        path: path.clone(),
        message,
    })?;

    let write_failed = |e: std::io::Error| CaptureError::WriteFailed {
        path: path.clone(),
        message: e.to_string(),
    };
    tokio::fs::create_dir_all(dir).await.map_err(write_failed)?;
    tokio::fs::write(&path, encoded).await.map_err(write_failed)?;
    Ok(path)
}
