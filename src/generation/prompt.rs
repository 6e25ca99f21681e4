//! Prompt enhancement: appends style and motion descriptors to a user prompt.

use super::request::{GenerationRequest, MotionStrength, SceneCount};

/// Style key → descriptor phrase.
pub const STYLE_DESCRIPTORS: &[(&str, &str)] = &[
    (
        "realistic",
        "photorealistic, highly detailed, natural lighting, sharp focus",
    ),
    (
        "anime",
        "anime style, vibrant colors, cel shading, detailed illustration",
    ),
    (
        "2d",
        "2D flat illustration, clean lines, bold colors, vector art style",
    ),
    (
        "3d",
        "3D render, octane render, volumetric lighting, highly detailed",
    ),
    (
        "cinematic",
        "cinematic shot, dramatic lighting, film grain, shallow depth of field",
    ),
    (
        "oil-painting",
        "oil painting, rich textures, visible brushstrokes, classical art style",
    ),
    (
        "watercolor",
        "watercolor painting, soft edges, flowing colors, paper texture",
    ),
];

pub const CHARACTER_CONSISTENCY_SUFFIX: &str = "consistent character appearance throughout";
pub const MULTI_SCENE_SUFFIX: &str = "multiple dynamic scenes, seamless transitions";
pub const LOOP_SUFFIX: &str = "seamless loop, continuous motion";

/// Look up the descriptor for a style key.
pub fn style_descriptor(style: &str) -> Option<&'static str> {
    STYLE_DESCRIPTORS
        .iter()
        .find(|(key, _)| *key == style)
        .map(|(_, descriptor)| *descriptor)
}

/// Motion phrase for video prompts. Absent strength reads as medium.
pub fn motion_descriptor(strength: Option<MotionStrength>) -> &'static str {
    match strength.unwrap_or_default() {
        MotionStrength::High => "dynamic motion, energetic movement",
        MotionStrength::Low => "subtle motion, gentle movement",
        MotionStrength::Medium => "smooth natural motion",
    }
}

/// Build the prompt actually sent to the model.
///
/// Suffixes are appended in a fixed order: style, motion (video modes only),
/// character consistency, multi-scene, loop. Parts are joined with ", " and
/// empty parts are skipped, so a non-empty prompt reads `prompt, descriptor, ...`
/// while an empty one (allowed for image-to-video) yields just the
/// descriptors, e.g. "smooth natural motion" rather than ", smooth natural motion".
pub fn enhance_prompt(request: &GenerationRequest) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(6);

    if !request.prompt().is_empty() {
        parts.push(request.prompt());
    }

    if let Some(descriptor) = style_descriptor(request.style()) {
        parts.push(descriptor);
    }

    if request.media_type().is_video() {
        parts.push(motion_descriptor(request.motion_strength()));
    }

    if request.character_consistency() {
        parts.push(CHARACTER_CONSISTENCY_SUFFIX);
    }

    if request.scene_count() == Some(SceneCount::Multi) {
        parts.push(MULTI_SCENE_SUFFIX);
    }

    if request.loopable() {
        parts.push(LOOP_SUFFIX);
    }

    parts.join(", ")
}
