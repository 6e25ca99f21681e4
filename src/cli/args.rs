//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{Mode, Motion, Ratio, Scenes};

/// Generate images and short videos with fal.ai, from the terminal or over HTTP
#[derive(Parser, Debug)]
#[command(name = "fal-studio")]
#[command(version, about = "Image and video generation front-end for fal.ai", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Start the HTTP API on the configured address
    fal-studio serve

    # Generate a cinematic landscape image
    fal-studio generate --prompt \"lighthouse in a storm\" --style cinematic --aspect-ratio 16:9

    # Animate an existing image
    fal-studio generate --mode image-to-video --image https://example.com/cat.png --motion high

ENVIRONMENT:
    FAL_KEY     fal.ai API key (used when the config file has none)
    RUST_LOG    Log filter, e.g. debug or fal_studio=debug")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(long, short)]
        port: Option<u16>,
    },
    /// Run a single generation and print the media URL
    Generate(GenerateArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Generation mode
    #[arg(long, short, default_value = "text-to-image")]
    pub mode: Mode,

    /// Text prompt (optional for image-to-video)
    #[arg(long, short = 'P')]
    pub prompt: Option<String>,

    /// Output aspect ratio
    #[arg(long, short, default_value = "1:1")]
    pub aspect_ratio: Ratio,

    /// Style preset (realistic, anime, 2d, 3d, cinematic, oil-painting, watercolor)
    #[arg(long, short, default_value = "")]
    pub style: String,

    /// Motion strength for video modes
    #[arg(long)]
    pub motion: Option<Motion>,

    /// Single shot or multiple scenes
    #[arg(long)]
    pub scenes: Option<Scenes>,

    /// Keep the character's appearance consistent
    #[arg(long)]
    pub consistent: bool,

    /// Make the video loop seamlessly
    #[arg(long)]
    pub loopable: bool,

    /// Source image URL or data URL for image-to-* modes
    #[arg(long, short)]
    pub image: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
