//! Maps a validated request onto a fal.ai model call and reads back the media URL.

use serde::Serialize;

use super::error::GenerationError;
use super::request::{GenerationRequest, MediaType};
use crate::fal::{ImageOutput, ImageSize, VideoOutput};

pub const TEXT_TO_IMAGE_MODEL: &str = "fal-ai/flux/dev";
pub const IMAGE_TO_IMAGE_MODEL: &str = "fal-ai/flux/dev/image-to-image";
pub const TEXT_TO_VIDEO_MODEL: &str = "fal-ai/fast-svd/text-to-video";
pub const IMAGE_TO_VIDEO_MODEL: &str = "fal-ai/fast-svd-lcm";

pub const INFERENCE_STEPS: u32 = 28;
pub const GUIDANCE_SCALE: f32 = 3.5;
pub const IMAGE_TO_IMAGE_STRENGTH: f32 = 0.75;
pub const VIDEO_FPS: u32 = 24;

/// Input for `fal-ai/flux/dev`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextToImageInput {
    pub prompt: String,
    pub image_size: ImageSize,
    pub num_inference_steps: u32,
    pub guidance_scale: f32,
    pub num_images: u32,
}

/// Input for `fal-ai/flux/dev/image-to-image`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageToImageInput {
    pub prompt: String,
    pub image_url: String,
    pub image_size: ImageSize,
    pub num_inference_steps: u32,
    pub guidance_scale: f32,
    pub strength: f32,
    pub num_images: u32,
}

/// Input for `fal-ai/fast-svd/text-to-video`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextToVideoInput {
    pub prompt: String,
    pub video_size: &'static str,
    pub motion_bucket_id: u32,
    pub fps: u32,
}

/// Input for `fal-ai/fast-svd-lcm`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageToVideoInput {
    pub image_url: String,
    pub prompt: String,
    pub video_size: &'static str,
    pub motion_bucket_id: u32,
    pub fps: u32,
}

/// Provider input, one variant per mode. Serializes as the bare input object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProviderInput {
    TextToImage(TextToImageInput),
    ImageToImage(ImageToImageInput),
    TextToVideo(TextToVideoInput),
    ImageToVideo(ImageToVideoInput),
}

/// Which output shape a call produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Images,
    Video,
}

/// Typed provider output.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutput {
    Images(ImageOutput),
    Video(VideoOutput),
}

/// A fully-built model call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderCall {
    pub model: &'static str,
    pub input: ProviderInput,
}

impl ProviderCall {
    pub fn output_kind(&self) -> OutputKind {
        match self.input {
            ProviderInput::TextToImage(_) | ProviderInput::ImageToImage(_) => OutputKind::Images,
            ProviderInput::TextToVideo(_) | ProviderInput::ImageToVideo(_) => OutputKind::Video,
        }
    }
}

/// Model identifier used for a media type.
pub fn model_for(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::TextToImage => TEXT_TO_IMAGE_MODEL,
        MediaType::ImageToImage => IMAGE_TO_IMAGE_MODEL,
        MediaType::TextToVideo => TEXT_TO_VIDEO_MODEL,
        MediaType::ImageToVideo => IMAGE_TO_VIDEO_MODEL,
    }
}

/// Build the model call for `request`, sending `prompt` (already enhanced).
pub fn build_call(request: &GenerationRequest, prompt: &str) -> Result<ProviderCall, GenerationError> {
    let media_type = request.media_type();
    let ratio = request.aspect_ratio();
    let motion_bucket_id = request.motion_strength().unwrap_or_default().bucket_id();

    let source_image = || {
        request
            .source_image()
            .map(str::to_string)
            .ok_or(GenerationError::MissingSourceImage)
    };

    let input = match media_type {
        MediaType::TextToImage => ProviderInput::TextToImage(TextToImageInput {
            prompt: prompt.to_string(),
            image_size: ratio.dimensions(),
            num_inference_steps: INFERENCE_STEPS,
            guidance_scale: GUIDANCE_SCALE,
            num_images: 1,
        }),
        MediaType::ImageToImage => ProviderInput::ImageToImage(ImageToImageInput {
            prompt: prompt.to_string(),
            image_url: source_image()?,
            image_size: ratio.dimensions(),
            num_inference_steps: INFERENCE_STEPS,
            guidance_scale: GUIDANCE_SCALE,
            strength: IMAGE_TO_IMAGE_STRENGTH,
            num_images: 1,
        }),
        MediaType::TextToVideo => ProviderInput::TextToVideo(TextToVideoInput {
            prompt: prompt.to_string(),
            video_size: ratio.video_size_token(),
            motion_bucket_id,
            fps: VIDEO_FPS,
        }),
        MediaType::ImageToVideo => ProviderInput::ImageToVideo(ImageToVideoInput {
            image_url: source_image()?,
            prompt: prompt.to_string(),
            video_size: ratio.video_size_token(),
            motion_bucket_id,
            fps: VIDEO_FPS,
        }),
    };

    Ok(ProviderCall {
        model: model_for(media_type),
        input,
    })
}

/// Pull the produced media URL out of a provider output.
pub fn extract_media_url(output: ProviderOutput) -> Result<String, GenerationError> {
    let url = match output {
        ProviderOutput::Images(images) => images.images.into_iter().next().map(|f| f.url),
        ProviderOutput::Video(video) => Some(video.video.url),
    };
    url.filter(|u| !u.is_empty())
        .ok_or(GenerationError::MissingMediaUrl)
}
