//! fal.ai integration module.
//!
//! Thin client over fal.ai's synchronous model endpoints plus the typed
//! output shapes of the image and video models this crate drives.

mod client;
mod types;

pub use client::{FalClient, FalError, DEFAULT_TIMEOUT, FAL_API_BASE_URL, FAL_API_KEY_ENV};
pub use types::{File, ImageOutput, ImageSize, VideoOutput};
