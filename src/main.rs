use std::path::Path;

use clap::Parser;

use fal_studio::cli::{handle_config_action, run_generate, run_serve, Args, Command};
use fal_studio::config::Config;
use fal_studio::fal::FAL_API_KEY_ENV;

fn load_env() {
    // Load .env file, don't override existing env vars
    // dotenv::dotenv() returns Err if .env doesn't exist, which is fine
    let _ = dotenv::dotenv();
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Load config for the commands that talk to fal.ai, warning when no key is available.
fn load_config(path: Option<&Path>) -> Result<Config, String> {
    let config = Config::load(path).map_err(|e| e.to_string())?;

    if config.fal.api_key(std::env::var(FAL_API_KEY_ENV).ok()).is_none() {
        log::warn!(
            "{} not set and no api_key in config; generation will be unavailable",
            FAL_API_KEY_ENV
        );
    }

    Ok(config)
}

fn main() {
    // Load .env file before anything else
    load_env();
    init_logging();

    let args = Args::parse();
    let config_path = args.config.as_deref();

    let result = match args.command {
        Command::Config { action } => handle_config_action(action, config_path),
        Command::Serve { host, port } => {
            load_config(config_path).and_then(|config| run_serve(&config, host, port))
        }
        Command::Generate(generate) => {
            load_config(config_path).and_then(|config| run_generate(&config, &generate))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
