/// Vision recognition: read text out of images using a GLM vision model.
use anyhow::{bail, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::info;

/// Fixed transcription instruction sent with every image.
pub const TRANSCRIBE_PROMPT: &str =
    "请识别图片中的所有文字内容，按原样输出，保留段落结构。如果图片中没有文字，请返回\"[无文字]\"。";

/// Sentinel the model returns when an image carries no text at all.
pub const NO_TEXT_SENTINEL: &str = "[无文字]";

/// Default chat-completions endpoint base.
pub const DEFAULT_API_BASE: &str = "https://open.bigmodel.cn/api/paas/v4";

/// Default vision model.
pub const DEFAULT_MODEL: &str = "glm-4v-flash";

/// Submit an image to the vision endpoint and return the completion text.
///
/// The image goes in as a base64 data URL followed by the transcription
/// prompt. No timeout beyond the client's own; no retries.
pub async fn read_image_text(
    api_base: &str,
    api_key: &str,
    model: &str,
    image_bytes: &[u8],
    mime_type: &str,
) -> Result<String> {
    let b64 = STANDARD.encode(image_bytes);
    info!("[Vision] Reading image text via {} ({} bytes)", model, image_bytes.len());
    let client = reqwest::Client::new();
    let body = serde_json::json!({
        "model": model,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "image_url",
                  "image_url": { "url": format!("data:{};base64,{}", mime_type, b64) } },
                { "type": "text", "text": TRANSCRIBE_PROMPT }
            ]
        }]
    });
    let resp = client
        .post(format!("{}/chat/completions", api_base))
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await?;
    if !resp.status().is_success() {
        bail!("GLM vision error: {}", resp.text().await.unwrap_or_default());
    }
    let json: serde_json::Value = resp.json().await?;
    Ok(json["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or("")
        .trim()
        .to_string())
}
