//! Generation request types: the wire body and its validated form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::GenerationError;
use crate::fal::ImageSize;

/// Requested generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    TextToImage,
    ImageToImage,
    TextToVideo,
    ImageToVideo,
}

impl MediaType {
    pub const ALL: [MediaType; 4] = [
        MediaType::TextToImage,
        MediaType::ImageToImage,
        MediaType::TextToVideo,
        MediaType::ImageToVideo,
    ];

    /// Wire name, e.g. `text-to-image`.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::TextToImage => "text-to-image",
            MediaType::ImageToImage => "image-to-image",
            MediaType::TextToVideo => "text-to-video",
            MediaType::ImageToVideo => "image-to-video",
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, MediaType::TextToVideo | MediaType::ImageToVideo)
    }

    /// Image-conditioned modes need a source image.
    pub fn requires_source_image(&self) -> bool {
        matches!(self, MediaType::ImageToImage | MediaType::ImageToVideo)
    }

    /// Every mode except image-to-video needs a prompt.
    pub fn requires_prompt(&self) -> bool {
        !matches!(self, MediaType::ImageToVideo)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaType::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| GenerationError::UnsupportedMediaType(s.to_string()))
    }
}

/// Output frame proportions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    Square,
    Landscape,
    Portrait,
}

impl AspectRatio {
    /// Parse a ratio token (`1:1`, `16:9`, `9:16`). Anything else is square.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "16:9" => AspectRatio::Landscape,
            "9:16" => AspectRatio::Portrait,
            _ => AspectRatio::Square,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }

    /// Pixel dimensions used by the image models.
    pub fn dimensions(&self) -> ImageSize {
        match self {
            AspectRatio::Square => ImageSize {
                width: 1024,
                height: 1024,
            },
            AspectRatio::Landscape => ImageSize {
                width: 1344,
                height: 768,
            },
            AspectRatio::Portrait => ImageSize {
                width: 768,
                height: 1344,
            },
        }
    }

    /// Size token understood by the video models.
    pub fn video_size_token(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "landscape_16_9",
            AspectRatio::Portrait => "portrait_9_16",
            AspectRatio::Square => "square",
        }
    }
}

/// How much motion a video should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionStrength {
    Low,
    #[default]
    Medium,
    High,
}

impl MotionStrength {
    /// Parse a motion level. Unknown values fall back to medium.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "low" => MotionStrength::Low,
            "high" => MotionStrength::High,
            _ => MotionStrength::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MotionStrength::Low => "low",
            MotionStrength::Medium => "medium",
            MotionStrength::High => "high",
        }
    }

    /// Motion bucket id passed to the video models.
    pub fn bucket_id(&self) -> u32 {
        match self {
            MotionStrength::Low => 127,
            MotionStrength::Medium => 180,
            MotionStrength::High => 255,
        }
    }
}

/// Single continuous shot or several scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneCount {
    #[default]
    Single,
    Multi,
}

impl SceneCount {
    pub fn parse(s: &str) -> Self {
        if s.trim() == "multi" {
            SceneCount::Multi
        } else {
            SceneCount::Single
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneCount::Single => "single",
            SceneCount::Multi => "multi",
        }
    }
}

/// JSON body accepted at the HTTP boundary.
///
/// Everything is optional here so that validation can report the precise
/// problem instead of a generic deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequestBody {
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub motion_strength: Option<String>,
    #[serde(default)]
    pub scene_count: Option<String>,
    #[serde(default)]
    pub character_consistency: Option<bool>,
    #[serde(default)]
    pub loopable: Option<bool>,
    #[serde(default)]
    pub source_image: Option<String>,
}

/// A validated generation request.
///
/// Only obtainable through `TryFrom<GenerateRequestBody>`, so a source image
/// is always present for the image-conditioned modes.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    media_type: MediaType,
    prompt: String,
    aspect_ratio: AspectRatio,
    style: String,
    motion_strength: Option<MotionStrength>,
    scene_count: Option<SceneCount>,
    character_consistency: bool,
    loopable: bool,
    source_image: Option<String>,
}

impl GenerationRequest {
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn motion_strength(&self) -> Option<MotionStrength> {
        self.motion_strength
    }

    pub fn scene_count(&self) -> Option<SceneCount> {
        self.scene_count
    }

    pub fn character_consistency(&self) -> bool {
        self.character_consistency
    }

    pub fn loopable(&self) -> bool {
        self.loopable
    }

    pub fn source_image(&self) -> Option<&str> {
        self.source_image.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<GenerateRequestBody> for GenerationRequest {
    type Error = GenerationError;

    /// Checks run in a fixed order: prompt, source image, then media type.
    fn try_from(body: GenerateRequestBody) -> Result<Self, Self::Error> {
        let raw_media_type = body.media_type.unwrap_or_default();
        let raw_media_type = raw_media_type.trim();
        let prompt = non_blank(body.prompt);
        let source_image = non_blank(body.source_image);

        // Unknown modes still get the prompt check before being rejected.
        let parsed = raw_media_type.parse::<MediaType>();

        if prompt.is_none() && parsed.as_ref().map_or(true, |m| m.requires_prompt()) {
            return Err(GenerationError::MissingPrompt);
        }

        if source_image.is_none() && parsed.as_ref().is_ok_and(|m| m.requires_source_image()) {
            return Err(GenerationError::MissingSourceImage);
        }

        let media_type = parsed?;

        Ok(GenerationRequest {
            media_type,
            prompt: prompt.unwrap_or_default(),
            aspect_ratio: body
                .aspect_ratio
                .as_deref()
                .map(AspectRatio::parse)
                .unwrap_or_default(),
            style: body.style.unwrap_or_default().trim().to_string(),
            motion_strength: body.motion_strength.as_deref().map(MotionStrength::parse),
            scene_count: body.scene_count.as_deref().map(SceneCount::parse),
            character_consistency: body.character_consistency.unwrap_or(false),
            loopable: body.loopable.unwrap_or(false),
            source_image,
        })
    }
}
