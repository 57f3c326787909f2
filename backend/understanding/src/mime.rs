//! MIME labeling for images embedded as data URLs.

use std::path::Path;

/// Label an image file's MIME type by extension.
///
/// Unknown extensions fall back to `image/jpeg`, which the vision endpoint
/// accepts for any raster payload.
pub fn image_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "png"          => "image/png",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "bmp"          => "image/bmp",
        "jpg" | "jpeg" => "image/jpeg",
        _              => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_common_extensions() {
        assert_eq!(image_mime_type(Path::new("a.png")), "image/png");
        assert_eq!(image_mime_type(Path::new("b.JPG")), "image/jpeg");
        assert_eq!(image_mime_type(Path::new("c.webp")), "image/webp");
    }

    #[test]
    fn unknown_extension_defaults_to_jpeg() {
        assert_eq!(image_mime_type(Path::new("noext")), "image/jpeg");
        assert_eq!(image_mime_type(Path::new("odd.tiff")), "image/jpeg");
    }
}
