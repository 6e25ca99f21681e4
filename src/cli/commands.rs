//! Subcommand handlers for serve, generate and config actions.

use std::net::SocketAddr;
use std::path::Path;

use super::args::{ConfigAction, GenerateArgs};
use crate::config::{default_path, Config, DEFAULT_CONFIG_TOML};
use crate::fal::{FalError, FAL_API_KEY_ENV};
use crate::generation::{
    AspectRatio, GenerateRequestBody, GenerationError, GenerationService, MediaType,
    MotionStrength, SceneCount,
};
use crate::server;

const MISSING_KEY_HELP: &str = "FAL_KEY environment variable is not set.\n\n\
    To use fal-studio, add your API key to a .env file:\n\
        echo 'FAL_KEY=your-api-key-here' >> .env\n\n\
    Or set it as an environment variable:\n\
        export FAL_KEY=\"your-api-key-here\"\n\n\
    Get your API key at: https://fal.ai/";

/// Build the generation service from config and the process environment.
///
/// A missing key is not an error here: the service starts unconfigured and
/// reports the problem per request.
pub fn build_service(config: &Config) -> Result<GenerationService, String> {
    let env_key = std::env::var(FAL_API_KEY_ENV).ok();
    let client = match config.fal.api_key(env_key) {
        Some(key) => Some(
            config
                .fal
                .build_client(key)
                .map_err(|e| format!("Failed to create fal.ai client: {}", e))?,
        ),
        None => None,
    };
    Ok(GenerationService::new(client))
}

/// Resolve the address to bind from config plus CLI overrides.
pub fn bind_address(
    config: &Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<SocketAddr, String> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    format!("{}:{}", host, port)
        .parse()
        .map_err(|e| format!("Invalid bind address '{}:{}': {}", host, port, e))
}

/// Convert CLI generate options into the same body the HTTP API accepts.
pub fn request_body(args: &GenerateArgs) -> GenerateRequestBody {
    GenerateRequestBody {
        media_type: Some(MediaType::from(args.mode).as_str().to_string()),
        prompt: args.prompt.clone(),
        aspect_ratio: Some(AspectRatio::from(args.aspect_ratio).as_str().to_string()),
        style: Some(args.style.clone()),
        motion_strength: args
            .motion
            .map(|m| MotionStrength::from(m).as_str().to_string()),
        scene_count: args.scenes.map(|s| SceneCount::from(s).as_str().to_string()),
        character_consistency: Some(args.consistent),
        loopable: Some(args.loopable),
        source_image: args.image.clone(),
    }
}

/// Start the HTTP API and block until it exits.
pub fn run_serve(config: &Config, host: Option<String>, port: Option<u16>) -> Result<(), String> {
    let addr = bind_address(config, host, port)?;
    let service = build_service(config)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to create async runtime: {}", e))?;

    rt.block_on(server::serve(addr, service, config.server.max_body_bytes))
        .map_err(|e| format!("Server error on {}: {}", addr, e))
}

/// Run one generation and print the resulting URL.
pub fn run_generate(config: &Config, args: &GenerateArgs) -> Result<(), String> {
    let service = build_service(config)?;
    if !service.is_configured() {
        return Err(MISSING_KEY_HELP.to_string());
    }

    let body = request_body(args);
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to create async runtime: {}", e))?;

    println!(
        "Generating {} ({})...",
        MediaType::from(args.mode),
        AspectRatio::from(args.aspect_ratio).as_str()
    );

    let url = rt.block_on(service.generate(body)).map_err(|e| match &e {
        GenerationError::Provider(FalError::RateLimit {
            retry_after_secs: Some(secs),
            ..
        }) => format!("{} (retry after {} seconds)", e, secs),
        _ => e.to_string(),
    })?;

    println!("{}", url);
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config_path: Option<&Path>) -> Result<(), String> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&path)).map_err(|e| e.to_string())?;
            let env_key = std::env::var(FAL_API_KEY_ENV).ok();
            let key_source = if config.fal.api_key.as_deref().is_some_and(|k| !k.trim().is_empty()) {
                "config file"
            } else if config.fal.api_key(env_key).is_some() {
                FAL_API_KEY_ENV
            } else {
                "not set"
            };

            println!("Current configuration:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Max request body: {} bytes", config.server.max_body_bytes);
            println!("  fal.ai endpoint: {}", config.fal.base_url);
            println!("  Timeout: {}s", config.fal.timeout_secs);
            println!("  API key: {}", key_source);
            println!();

            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found)", path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            if path.exists() {
                return Err(format!(
                    "Config file already exists: {}\nUse 'fal-studio config show' to view current settings.",
                    path.display()
                ));
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Error creating config directory: {}", e))?;
            }

            std::fs::write(&path, DEFAULT_CONFIG_TOML)
                .map_err(|e| format!("Error writing config file: {}", e))?;

            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}
