//! Shared setup for the saferoute binaries.

use std::path::Path;

use anyhow::{Context, Result};

use sr_core::SafetyConfig;

/// Log to stderr; `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();
}

/// Defaults, then the optional JSON config file, then the CLI override.
pub fn load_config(path: Option<&Path>, penalty_factor: Option<f64>) -> Result<SafetyConfig> {
    let mut cfg = match path {
        Some(p) => SafetyConfig::from_json_file(p)
            .with_context(|| format!("reading config {}", p.display()))?,
        None => SafetyConfig::default(),
    };
    if let Some(f) = penalty_factor {
        cfg = cfg.with_penalty_factor(f);
    }
    cfg.validate()?;
    Ok(cfg)
}
