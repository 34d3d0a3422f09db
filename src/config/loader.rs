use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::settings::Configuration;

lazy_static::lazy_static! {
    static ref ENV_REFERENCE: Regex = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}").expect("env reference pattern");
}

/// Load configuration from a YAML file, expanding `${VAR}` references first.
pub async fn file_to_config(path: &Path) -> Result<Configuration> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading config file {}", path.display()))?;

    let expanded = expand_env_vars(&content);
    parse_config(expanded)
}

pub fn parse_config(content: String) -> Result<Configuration> {
    let configuration: Configuration = serde_yaml::from_str(&content)
        .inspect_err(|e| error!("parse config error: {}", e))?;

    // credentials are validated at session generation, not here
    debug!("config parsed; token endpoint {}", configuration.token_endpoint());
    Ok(configuration)
}

/// `${VAR}` or `${VAR:default}`; unset variables without a default expand to "".
fn expand_env_vars(input: &str) -> String {
    ENV_REFERENCE.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
