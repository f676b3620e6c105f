//! CLI command implementations.

use anyhow::Result;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::config::ClientSettings;

use super::utils::{
    connect, format_surveys, load_settings, parse_params, release_quietly, typed_wrapper_hint,
};

/// Authenticate, list surveys, release the session
pub async fn surveys(config_path: Option<PathBuf>, user: Option<String>, json: bool) -> Result<()> {
    let settings = load_settings(config_path)?;
    let (username, password) = settings.credentials()?;
    let (mut client, ctx) = connect(&settings)?;

    client.authenticate(&ctx, username, password).await?;

    let listed = match user.as_deref() {
        Some(user) => client.list_surveys_for_user(&ctx, user).await,
        None => client.list_surveys(&ctx).await,
    };
    release_quietly(&mut client, &ctx).await;
    let surveys = listed?;

    info!("Listed {} surveys", surveys.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&surveys)?);
    } else {
        print!("{}", format_surveys(&surveys));
    }

    Ok(())
}

/// Authenticate and call an arbitrary method with the session key prepended
pub async fn call(config_path: Option<PathBuf>, method: String, params_json: Option<String>) -> Result<()> {
    let params = parse_params(params_json.as_deref())?;
    if let Some(hint) = typed_wrapper_hint(&method) {
        warn!("{}", hint);
    }
    let settings = load_settings(config_path)?;
    let (username, password) = settings.credentials()?;
    let (mut client, ctx) = connect(&settings)?;

    client.authenticate(&ctx, username, password).await?;

    info!("Calling {} via: {}", method, client.endpoint());
    let outcome = client.call_authenticated::<Value>(&ctx, &method, params).await;
    release_quietly(&mut client, &ctx).await;

    println!("{}", serde_json::to_string_pretty(&outcome?)?);
    Ok(())
}

/// Initialize default configuration
pub async fn init(force: bool) -> Result<()> {
    let config_path = ClientSettings::config_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let settings = ClientSettings::default();
    let toml_content = toml::to_string_pretty(&settings)?;
    std::fs::write(&config_path, toml_content)?;

    println!("✓ Configuration initialized at {:?}", config_path);
    Ok(())
}

/// Show or validate configuration
pub async fn config_command(config_path: Option<PathBuf>, show: bool, validate: bool) -> Result<()> {
    let settings = ClientSettings::load(config_path.as_deref())?;

    if show {
        let mut shown = settings.clone();
        if shown.password.is_some() {
            shown.password = Some("<redacted>".to_string());
        }
        println!("{}", toml::to_string_pretty(&shown)?);
    }

    if validate {
        match settings.validate() {
            Ok(()) => println!("✓ Configuration is valid"),
            Err(e) => error!("Configuration validation failed: {}", e),
        }
    }

    Ok(())
}

/// Show version information
pub async fn version() -> Result<()> {
    println!("limesurvey {}", env!("CARGO_PKG_VERSION"));
    println!("Built with Rust {}", rustc_version::version()?);
    Ok(())
}
