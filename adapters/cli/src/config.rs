//! Optional TOML configuration of the command-line adapter.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use mazemap_system_obstacles::DEFAULT_MAX_TRACE_STEPS;
use serde::Deserialize;

/// Settings read from `--config`; every key is optional.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CliConfig {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    pub(crate) log_filter: String,
    /// Step limit of a single obstacle trace.
    pub(crate) max_trace_steps: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_owned(),
            max_trace_steps: DEFAULT_MAX_TRACE_STEPS,
        }
    }
}

impl CliConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    pub(crate) fn from_toml(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse configuration toml contents")?;
        if config.max_trace_steps == 0 {
            bail!("max_trace_steps must be at least 1");
        }
        if config.log_filter.trim().is_empty() {
            bail!("log_filter must not be empty");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::CliConfig;

    #[test]
    fn empty_file_uses_defaults() {
        let config = CliConfig::from_toml("").expect("empty config is valid");
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.max_trace_steps, 1000);
    }

    #[test]
    fn keys_override_defaults() {
        let config = CliConfig::from_toml(
            r#"
            log_filter = "mazemap_world=debug"
            max_trace_steps = 50
        "#,
        )
        .expect("valid config");
        assert_eq!(config.log_filter, "mazemap_world=debug");
        assert_eq!(config.max_trace_steps, 50);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = CliConfig::from_toml("tile_size = 8").expect_err("unknown key");
        assert!(
            format!("{error:#}").contains("tile_size"),
            "error should name the key: {error:#}"
        );
    }

    #[test]
    fn zero_step_limit_is_rejected() {
        assert!(CliConfig::from_toml("max_trace_steps = 0").is_err());
    }
}
