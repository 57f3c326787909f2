//! Optical character recognition over upload-path image references.
//!
//! Resolves an `/uploads/…` reference to a file on disk, ships it to the
//! vision endpoint, and normalizes the no-text sentinel to an empty string.

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use mdlift_core::{LiftError, Recognizer};

use crate::mime::image_mime_type;
use crate::vision::{read_image_text, NO_TEXT_SENTINEL};

/// File-level OCR service backed by the GLM vision endpoint.
pub struct OcrService {
    api_base: String,
    api_key: Option<String>,
    model: String,
}

impl OcrService {
    pub fn new(
        api_base: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            api_key,
            model: model.into(),
        }
    }
}

/// Resolve an upload reference against a project root.
///
/// The host serves uploads from `public/`, so `<root>/public/<ref>` wins;
/// the reference taken as a plain path is accepted as a fallback.
pub fn resolve_upload_path(root: &Path, image_path: &str) -> Option<PathBuf> {
    let public = root.join("public").join(image_path.trim_start_matches('/'));
    if public.exists() {
        return Some(public);
    }
    let direct = PathBuf::from(image_path);
    if direct.exists() {
        Some(direct)
    } else {
        None
    }
}

fn normalize_recognized(text: String) -> String {
    if text == NO_TEXT_SENTINEL {
        String::new()
    } else {
        text
    }
}

#[async_trait]
impl Recognizer for OcrService {
    async fn recognize(&self, image_path: &str) -> Result<String> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let Some(full_path) = resolve_upload_path(&cwd, image_path) else {
            return Err(LiftError::MissingImage(image_path.to_string()).into());
        };
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LiftError::MissingCredential)?;

        let bytes = std::fs::read(&full_path)?;
        info!("Running OCR on image file: {}", full_path.display());
        let text = read_image_text(
            &self.api_base,
            api_key,
            &self.model,
            &bytes,
            image_mime_type(&full_path),
        )
        .await?;
        Ok(normalize_recognized(text))
    }
}
