use anyhow::Result;
use async_trait::async_trait;

/// A capability that can read the text content of an image on disk.
///
/// Implemented by the vision-backed OCR service; the substitution driver
/// only sees this seam, which keeps it testable without network access.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Recognize all text in the referenced image.
    ///
    /// Returns the recognized text (empty when the image holds none) or an
    /// error describing why recognition was impossible. Errors are values
    /// to report per image, never reasons to abort a batch.
    async fn recognize(&self, image_path: &str) -> Result<String>;
}
