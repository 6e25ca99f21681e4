//! Errors produced while turning a user request into generated media.

use crate::fal::FalError;

/// Message shown to callers for failures whose detail must not leak.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate media";

/// Errors that can occur while validating, building or running a generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Prompt is required")]
    MissingPrompt,

    #[error("Source image is required for this media type")]
    MissingSourceImage,

    #[error("Unsupported media type")]
    UnsupportedMediaType(
        /// The value that was sent, kept for logging
        String,
    ),

    #[error("fal.ai credential not configured")]
    MissingCredential,

    #[error("No media URL in provider response")]
    MissingMediaUrl,

    #[error(transparent)]
    Provider(#[from] FalError),
}

impl GenerationError {
    /// Whether the caller sent something invalid (as opposed to a server-side failure).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GenerationError::MissingPrompt | GenerationError::MissingSourceImage
        )
    }

    /// The message reported to the caller.
    ///
    /// Configuration problems collapse to [`GENERIC_FAILURE_MESSAGE`];
    /// everything else reports its own message, provider errors included.
    pub fn public_message(&self) -> String {
        match self {
            GenerationError::MissingCredential => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}
