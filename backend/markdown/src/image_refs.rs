use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Alt text is non-greedy; the path runs up to the first closing paren.
static IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[.*?\]\((/uploads/[^)]+)\)").unwrap()
});

/// Extract every `/uploads/…` image reference from Markdown content.
///
/// Returns the matched paths in document order, duplicates preserved.
/// Image markup pointing outside `/uploads/` is left alone.
pub fn extract_upload_images(content: &str) -> Vec<String> {
    IMAGE_RE
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Replace every image markup whose path equals `path` with `replacement`.
///
/// The replacement text is inserted literally, so recognized text containing
/// `$` or `\` survives unchanged. Markup for any other path is untouched.
pub fn replace_image_markup(content: &str, path: &str, replacement: &str) -> String {
    IMAGE_RE
        .replace_all(content, |caps: &Captures| {
            if &caps[1] == path {
                replacement.to_string()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}
