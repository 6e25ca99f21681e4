//! Request construction and prompt enhancement for image and video generation.
//!
//! A [`GenerateRequestBody`] arrives from the HTTP boundary or the CLI, is
//! validated into a [`GenerationRequest`], its prompt is enhanced, and the
//! builder turns it into a fal.ai model call.

mod builder;
mod error;
mod prompt;
mod request;
mod service;

pub use builder::{
    build_call, extract_media_url, model_for, ImageToImageInput, ImageToVideoInput, OutputKind,
    ProviderCall, ProviderInput, ProviderOutput, TextToImageInput, TextToVideoInput,
    GUIDANCE_SCALE, IMAGE_TO_IMAGE_MODEL, IMAGE_TO_IMAGE_STRENGTH, IMAGE_TO_VIDEO_MODEL,
    INFERENCE_STEPS, TEXT_TO_IMAGE_MODEL, TEXT_TO_VIDEO_MODEL, VIDEO_FPS,
};
pub use error::{GenerationError, GENERIC_FAILURE_MESSAGE};
pub use prompt::{enhance_prompt, motion_descriptor, style_descriptor, STYLE_DESCRIPTORS};
pub use request::{
    AspectRatio, GenerateRequestBody, GenerationRequest, MediaType, MotionStrength, SceneCount,
};
pub use service::GenerationService;
