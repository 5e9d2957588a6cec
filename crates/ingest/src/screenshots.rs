use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::warn;
use walkdir::WalkDir;

use crate::types::IngestIssue;

pub const MAX_SCREENSHOTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    pub path: PathBuf,
    pub name: String,
    pub mime: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub name: String,
    pub mime: &'static str,
    pub base64: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScreenshotBatch {
    pub images: Vec<EncodedImage>,
    pub issues: Vec<IngestIssue>,
}

fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

/// Newest screenshots first, ordered by file name (collector names them by timestamp).
/// A missing directory yields nothing.
pub fn recent_screenshots(dir: &Path, limit: usize) -> Vec<Screenshot> {
    let mut shots: Vec<Screenshot> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let mime = image_mime(entry.path())?;
            Some(Screenshot {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
                mime,
            })
        })
        .collect();
    shots.sort_by(|a, b| b.name.cmp(&a.name));
    shots.truncate(limit);
    shots
}

pub fn encode_screenshots(shots: &[Screenshot]) -> ScreenshotBatch {
    let mut batch = ScreenshotBatch::default();
    for shot in shots {
        match fs::read(&shot.path) {
            Ok(bytes) => batch.images.push(EncodedImage {
                name: shot.name.clone(),
                mime: shot.mime,
                base64: STANDARD.encode(bytes),
            }),
            Err(err) => {
                warn!(file = %shot.path.display(), "could not read screenshot: {}", err);
                batch.issues.push(IngestIssue {
                    file_path: shot.path.to_string_lossy().into_owned(),
                    message: err.to_string(),
                });
            }
        }
    }
    batch
}
