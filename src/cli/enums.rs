//! CLI enum types for mode, aspect ratio, motion and scene options.

use clap::ValueEnum;

use crate::generation::{AspectRatio, MediaType, MotionStrength, SceneCount};

/// Generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    #[default]
    TextToImage,
    ImageToImage,
    TextToVideo,
    ImageToVideo,
}

impl From<Mode> for MediaType {
    fn from(m: Mode) -> Self {
        match m {
            Mode::TextToImage => MediaType::TextToImage,
            Mode::ImageToImage => MediaType::ImageToImage,
            Mode::TextToVideo => MediaType::TextToVideo,
            Mode::ImageToVideo => MediaType::ImageToVideo,
        }
    }
}

/// Output aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Ratio {
    #[default]
    #[value(name = "1:1")]
    Square,
    #[value(name = "16:9")]
    Landscape,
    #[value(name = "9:16")]
    Portrait,
}

impl From<Ratio> for AspectRatio {
    fn from(r: Ratio) -> Self {
        match r {
            Ratio::Square => AspectRatio::Square,
            Ratio::Landscape => AspectRatio::Landscape,
            Ratio::Portrait => AspectRatio::Portrait,
        }
    }
}

/// Motion strength for video modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Motion {
    Low,
    Medium,
    High,
}

impl From<Motion> for MotionStrength {
    fn from(m: Motion) -> Self {
        match m {
            Motion::Low => MotionStrength::Low,
            Motion::Medium => MotionStrength::Medium,
            Motion::High => MotionStrength::High,
        }
    }
}

/// Scene count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenes {
    Single,
    Multi,
}

impl From<Scenes> for SceneCount {
    fn from(s: Scenes) -> Self {
        match s {
            Scenes::Single => SceneCount::Single,
            Scenes::Multi => SceneCount::Multi,
        }
    }
}
