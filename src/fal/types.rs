//! Typed request and response shapes for the fal.ai model endpoints we call.

use serde::{Deserialize, Serialize};

/// Explicit output size for image models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// A file produced by a model (image or video).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct File {
    /// URL the produced media can be fetched from.
    pub url: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Output of the image models (`fal-ai/flux/dev` and its image-to-image variant).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageOutput {
    pub images: Vec<File>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Output of the video models (`fal-ai/fast-svd/text-to-video`, `fal-ai/fast-svd-lcm`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoOutput {
    pub video: File,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Error body returned by fal.ai on non-2xx responses.
///
/// `detail` is either a plain string or a list of validation errors, so it is
/// kept untyped and inspected in [`ErrorBody::message`].
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    /// Best human-readable message in the body, if any.
    pub(crate) fn message(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(serde_json::Value::Array(items)) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if !msgs.is_empty() {
                    return Some(msgs.join("; "));
                }
            }
            _ => {}
        }
        self.message.clone().filter(|m| !m.is_empty())
    }
}
