//! Content processing: parse the incoming blob, OCR each referenced image,
//! and substitute recognized text back into the Markdown.

use serde_json::Value;
use tracing::{info, warn};

use markdown::{extract_upload_images, replace_image_markup};
use mdlift_core::{ImageOutcome, ProcessReport, Recognizer};

/// Marker substituted for an image whose text could not be recognized.
pub const FAILURE_MARKER: &str = "[图片识别失败]";

/// Outcome of the three-stage content parse.
///
/// The stages are tried strictly in order and nothing beyond them is
/// guessed: a well-formed envelope, an envelope repaired from the `\!`
/// shell-escaping artifact, or the raw input taken as literal Markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedContent {
    Envelope(String),
    Repaired(String),
    Literal(String),
}

impl ParsedContent {
    pub fn into_text(self) -> String {
        match self {
            ParsedContent::Envelope(s)
            | ParsedContent::Repaired(s)
            | ParsedContent::Literal(s) => s,
        }
    }
}

/// Parse a content blob that may be a JSON envelope with a `content` field.
pub fn parse_content(raw: &str) -> ParsedContent {
    if let Some(content) = envelope_content(raw) {
        return ParsedContent::Envelope(content);
    }
    // Shells that escape `!` inside double quotes leave a `\!` behind that
    // breaks the JSON; undo it and retry once.
    let repaired = raw.replace("\\!", "!");
    if let Some(content) = envelope_content(&repaired) {
        return ParsedContent::Repaired(content);
    }
    ParsedContent::Literal(raw.to_string())
}

fn envelope_content(raw: &str) -> Option<String> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let object = value.as_object()?;
    Some(
        object
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
    )
}

/// Run the recognition/substitution pass over one content blob.
///
/// Every extracted reference gets its own recognition call and outcome
/// record, duplicates included. Empty recognized text and recognition
/// failure both leave the failure marker in the content.
pub async fn process_content(recognizer: &dyn Recognizer, raw_content: &str) -> ProcessReport {
    let content = parse_content(raw_content).into_text();

    let images = extract_upload_images(&content);
    if images.is_empty() {
        return ProcessReport {
            success: true,
            processed_content: content,
            images_count: 0,
            results: Vec::new(),
        };
    }

    info!("Processing {} image reference(s)", images.len());

    let mut processed = content;
    let mut results = Vec::with_capacity(images.len());

    for image in &images {
        let (success, text, error) = match recognizer.recognize(image).await {
            Ok(text) => (true, text, None),
            Err(err) => {
                warn!("Recognition failed for {}: {:#}", image, err);
                (false, String::new(), Some(format!("{:#}", err)))
            }
        };

        let replacement = if text.is_empty() { FAILURE_MARKER } else { text.as_str() };
        processed = replace_image_markup(&processed, image, replacement);

        results.push(ImageOutcome {
            image: image.clone(),
            success,
            text,
            error,
        });
    }

    ProcessReport {
        success: true,
        processed_content: processed,
        images_count: images.len(),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FakeRecognizer {
        replies: HashMap<String, Result<String, String>>,
    }

    impl FakeRecognizer {
        fn new(replies: &[(&str, Result<&str, &str>)]) -> Self {
            let replies = replies
                .iter()
                .map(|(path, reply)| {
                    let reply = match reply {
                        Ok(text) => Ok(text.to_string()),
                        Err(msg) => Err(msg.to_string()),
                    };
                    (path.to_string(), reply)
                })
                .collect();
            Self { replies }
        }
    }

    #[async_trait]
    impl Recognizer for FakeRecognizer {
        async fn recognize(&self, image_path: &str) -> anyhow::Result<String> {
            match self.replies.get(image_path) {
                Some(Ok(text)) => Ok(text.clone()),
                Some(Err(msg)) => Err(anyhow::anyhow!("{}", msg)),
                None => Err(anyhow::anyhow!("unexpected image {}", image_path)),
            }
        }
    }

    #[test]
    fn well_formed_envelope_parses() {
        let parsed = parse_content(r#"{"content":"hello"}"#);
        assert_eq!(parsed, ParsedContent::Envelope("hello".to_string()));
    }

    #[test]
    fn envelope_without_content_field_is_empty() {
        let parsed = parse_content(r#"{"title":"x"}"#);
        assert_eq!(parsed, ParsedContent::Envelope(String::new()));
    }

    #[test]
    fn shell_escaped_envelope_is_repaired() {
        let parsed = parse_content(r#"{"content":"hey \!there"}"#);
        assert_eq!(parsed, ParsedContent::Repaired("hey !there".to_string()));
    }

    #[test]
    fn unparseable_input_is_literal() {
        let parsed = parse_content("just plain markdown");
        assert_eq!(
            parsed,
            ParsedContent::Literal("just plain markdown".to_string())
        );
    }

    #[test]
    fn non_object_json_is_literal() {
        let parsed = parse_content("123");
        assert_eq!(parsed, ParsedContent::Literal("123".to_string()));
    }

    #[tokio::test]
    async fn content_without_images_passes_through() {
        let recognizer = FakeRecognizer::new(&[]);
        let report = process_content(&recognizer, r#"{"content":"no images here"}"#).await;
        assert!(report.success);
        assert_eq!(report.processed_content, "no images here");
        assert_eq!(report.images_count, 0);
        assert!(report.results.is_empty());
    }

    #[tokio::test]
    async fn recognized_text_replaces_the_markup() {
        let recognizer = FakeRecognizer::new(&[("/uploads/a.png", Ok("第一段\n第二段"))]);
        let report =
            process_content(&recognizer, r#"{"content":"A ![x](/uploads/a.png) B"}"#).await;
        assert_eq!(report.processed_content, "A 第一段\n第二段 B");
        assert_eq!(report.images_count, 1);
        assert!(report.results[0].success);
        assert_eq!(report.results[0].error, None);
    }

    #[tokio::test]
    async fn failure_leaves_the_marker() {
        let recognizer = FakeRecognizer::new(&[("/uploads/a.png", Err("connection refused"))]);
        let report = process_content(&recognizer, r#"{"content":"A ![x](/uploads/a.png) B"}"#).await;
        assert_eq!(report.processed_content, format!("A {} B", FAILURE_MARKER));
        assert!(!report.results[0].success);
        assert_eq!(report.results[0].text, "");
        assert!(report.results[0]
            .error
            .as_deref()
            .unwrap()
            .contains("connection refused"));
    }

    #[tokio::test]
    async fn empty_text_counts_as_success_but_leaves_the_marker() {
        let recognizer = FakeRecognizer::new(&[("/uploads/a.png", Ok(""))]);
        let report = process_content(&recognizer, r#"{"content":"![x](/uploads/a.png)"}"#).await;
        assert_eq!(report.processed_content, FAILURE_MARKER);
        assert!(report.results[0].success);
        assert_eq!(report.results[0].text, "");
    }

    #[tokio::test]
    async fn paths_do_not_cross_contaminate() {
        let recognizer = FakeRecognizer::new(&[
            ("/uploads/a.png", Err("down")),
            ("/uploads/b.png", Ok("OK")),
        ]);
        let report = process_content(
            &recognizer,
            r#"{"content":"![a](/uploads/a.png) ![b](/uploads/b.png)"}"#,
        )
        .await;
        assert_eq!(
            report.processed_content,
            format!("{} OK", FAILURE_MARKER)
        );
        assert_eq!(report.images_count, 2);
        assert!(!report.results[0].success);
        assert!(report.results[1].success);
    }

    #[tokio::test]
    async fn duplicates_each_get_an_outcome() {
        let recognizer = FakeRecognizer::new(&[("/uploads/a.png", Ok("T"))]);
        let report = process_content(
            &recognizer,
            r#"{"content":"![x](/uploads/a.png) ![y](/uploads/a.png)"}"#,
        )
        .await;
        assert_eq!(report.processed_content, "T T");
        assert_eq!(report.images_count, 2);
        assert_eq!(report.results.len(), 2);
    }

    #[tokio::test]
    async fn no_markup_survives_successful_recognition() {
        let recognizer = FakeRecognizer::new(&[
            ("/uploads/a.png", Ok("one")),
            ("/uploads/b.jpg", Ok("two")),
        ]);
        let report = process_content(
            &recognizer,
            r#"{"content":"![a](/uploads/a.png) mid ![b](/uploads/b.jpg)"}"#,
        )
        .await;
        assert!(!report.processed_content.contains("!["));
        assert_eq!(report.processed_content, "one mid two");
    }
}
