//! Configuration for writing converted datasets
//!
//! Settings come from defaults, then environment variables, then command
//! line flags (applied by the caller through the setters).

use squonk_common::{Result, SquonkError};
use std::path::{Path, PathBuf};

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Directory that relative output bases are resolved against
    pub output_dir: Option<PathBuf>,

    /// Pretty-print the JSON files
    pub pretty: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from environment variables
    ///
    /// - `SQUONK_OUTPUT_DIR`: directory for relative output bases
    /// - `SQUONK_PRETTY`: pretty-print JSON (true/false)
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();

        if let Ok(dir) = std::env::var("SQUONK_OUTPUT_DIR") {
            if !dir.trim().is_empty() {
                config.output_dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(val) = std::env::var("SQUONK_PRETTY") {
            config.pretty = parse_bool(&val).ok_or_else(|| {
                SquonkError::config(format!("SQUONK_PRETTY must be true or false, got '{}'", val))
            })?;
        }

        Ok(config)
    }

    pub fn set_output_dir(&mut self, dir: PathBuf) {
        self.output_dir = Some(dir);
    }

    pub fn set_pretty(&mut self, pretty: bool) {
        self.pretty = pretty;
    }

    /// Resolve an output base against `output_dir`
    ///
    /// Absolute bases are returned unchanged.
    pub fn resolve(&self, out_base: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) if out_base.is_relative() => dir.join(out_base),
            _ => out_base.to_path_buf(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::new();
        assert!(config.output_dir.is_none());
        assert!(!config.pretty);
    }

    // Single test touching the environment so parallel tests cannot race on it.
    #[test]
    fn test_config_from_env() {
        std::env::set_var("SQUONK_OUTPUT_DIR", "/tmp/squonk-out");
        std::env::set_var("SQUONK_PRETTY", "yes");

        let config = Config::from_env().unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/squonk-out")));
        assert!(config.pretty);

        std::env::set_var("SQUONK_PRETTY", "sometimes");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, SquonkError::Config(_)));

        std::env::remove_var("SQUONK_OUTPUT_DIR");
        std::env::remove_var("SQUONK_PRETTY");
    }

    #[test]
    fn test_resolve_output_base() {
        let mut config = Config::new();
        assert_eq!(config.resolve(Path::new("out/run1")), PathBuf::from("out/run1"));

        config.set_output_dir(PathBuf::from("/data"));
        assert_eq!(config.resolve(Path::new("run1")), PathBuf::from("/data/run1"));
        assert_eq!(config.resolve(Path::new("/abs/run1")), PathBuf::from("/abs/run1"));
    }
}
