use serde::{Deserialize, Serialize};

/// Per-image recognition outcome, accumulated in extraction order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageOutcome {
    /// The `/uploads/…` reference exactly as it appeared in the Markdown.
    pub image: String,
    /// Whether the recognition call itself succeeded.
    pub success: bool,
    /// Recognized text; empty on failure or when the image holds no text.
    pub text: String,
    /// Underlying error message when recognition failed.
    pub error: Option<String>,
}

/// Result of processing one content blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessReport {
    pub success: bool,
    /// The content with every image markup substituted away.
    pub processed_content: String,
    /// Total number of extracted references, duplicates included.
    pub images_count: usize,
    /// One outcome per extracted reference; omitted when no images matched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ImageOutcome>,
}
