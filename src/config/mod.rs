//! Configuration management module
//!
//! Handles loading, saving, and validation of the comparison run
//! configuration: which sibling runners to launch and how.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{PolybenchError, Result, APP_NAME, CONFIG_ENV, CONFIG_FILE};

/// Comparison run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Whether to run the native Rust suite first
    pub include_native: bool,
    /// Upper bound on each sibling runner (prepare step included)
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Sibling runners, launched in order
    pub runners: Vec<RunnerSpec>,
}

/// One sibling runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerSpec {
    /// Language tag expected in the runner's output
    pub language: String,
    /// Executable to launch
    pub program: String,
    /// Arguments passed to `program`
    #[serde(default)]
    pub args: Vec<String>,
    /// Working directory for both commands; defaults to the current one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
    /// Optional build step run before the runner (e.g. `javac`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepare: Option<CommandSpec>,
}

/// A plain command line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Executable to launch
    pub program: String,
    /// Arguments passed to `program`
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Build a command spec from string slices
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Command line for log messages
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl RunnerSpec {
    /// Create a runner spec with no prepare step
    pub fn new(language: &str, program: &str, args: &[&str]) -> Self {
        Self {
            language: language.to_string(),
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            working_dir: None,
            prepare: None,
        }
    }

    /// Set a build step to run first
    pub fn with_prepare(mut self, prepare: CommandSpec) -> Self {
        self.prepare = Some(prepare);
        self
    }

    /// Set the working directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    /// The runner command itself
    pub fn command(&self) -> CommandSpec {
        CommandSpec {
            program: self.program.clone(),
            args: self.args.clone(),
        }
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            include_native: true,
            timeout: Duration::from_secs(300),
            runners: vec![
                RunnerSpec::new("Python", "python3", &["benchmarks/python/benchmark.py"]),
                RunnerSpec::new("JavaScript", "node", &["benchmarks/javascript/benchmark.js"]),
                RunnerSpec::new("Java", "java", &["-cp", "benchmarks/java", "Benchmark"])
                    .with_prepare(CommandSpec::new("javac", &["benchmarks/java/Benchmark.java"])),
            ],
        }
    }
}

impl CompareConfig {
    /// Create a comparison configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that only runs the native suite
    pub fn native_only() -> Self {
        Self {
            runners: Vec::new(),
            ..Self::default()
        }
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(PolybenchError::ConfigError(
                "Timeout must be greater than 0".to_string()
            ));
        }

        const MAX_TIMEOUT: Duration = Duration::from_secs(3600); // 1 hour
        if self.timeout > MAX_TIMEOUT {
            return Err(PolybenchError::ConfigError(
                format!("Timeout too long: {}s (max: {}s)",
                    self.timeout.as_secs(), MAX_TIMEOUT.as_secs())
            ));
        }

        let mut seen: Vec<&str> = Vec::new();
        for runner in &self.runners {
            if runner.language.trim().is_empty() {
                return Err(PolybenchError::ConfigError(
                    "Runner language must not be empty".to_string()
                ));
            }
            if runner.program.trim().is_empty() {
                return Err(PolybenchError::ConfigError(
                    format!("Runner program for {} must not be empty", runner.language)
                ));
            }
            if let Some(prepare) = &runner.prepare {
                if prepare.program.trim().is_empty() {
                    return Err(PolybenchError::ConfigError(
                        format!("Prepare program for {} must not be empty", runner.language)
                    ));
                }
            }
            if seen.contains(&runner.language.as_str()) {
                return Err(PolybenchError::ConfigError(
                    format!("Duplicate runner language: {}", runner.language)
                ));
            }
            seen.push(&runner.language);
        }

        if !self.include_native && self.runners.is_empty() {
            return Err(PolybenchError::ConfigError(
                "Nothing to run: native suite disabled and no runners configured".to_string()
            ));
        }

        Ok(())
    }

    /// Load configuration from `$POLYBENCH_CONFIG` or the standard location.
    /// Returns default configuration if the file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| PolybenchError::ConfigError(
                format!("Failed to read config file {}: {}", path.display(), e)
            ))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| PolybenchError::ConfigError(
                format!("Failed to parse config file {}: {}", path.display(), e)
            ))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate and save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| PolybenchError::ConfigError(
                    format!("Failed to create config directory {}: {}", parent.display(), e)
                ))?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(path, content)
            .map_err(|e| PolybenchError::ConfigError(
                format!("Failed to write config file {}: {}", path.display(), e)
            ))?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/polybench/polybench.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PolybenchError::ConfigError(
                "Unable to determine config directory".to_string()
            ))?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

/// Serde adapter writing durations as humantime strings ("5m", "30s")
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CompareConfig::default();
        assert!(config.validate().is_ok());
        let languages: Vec<_> = config.runners.iter().map(|r| r.language.as_str()).collect();
        assert_eq!(languages, vec!["Python", "JavaScript", "Java"]);
        assert!(config.runners[2].prepare.is_some());
    }

    #[test]
    fn test_toml_serialization() {
        let config = CompareConfig::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize to TOML");
        assert!(toml_str.contains("timeout = \"5m\""));
        let deserialized: CompareConfig = toml::from_str(&toml_str).expect("Failed to deserialize from TOML");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
            timeout = "30s"

            [[runners]]
            language = "Ruby"
            program = "ruby"
            args = ["benchmarks/ruby/benchmark.rb"]
        "#;
        let config: CompareConfig = toml::from_str(toml_str).expect("parse");
        assert!(config.include_native);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.runners.len(), 1);
        assert_eq!(config.runners[0].command().display(), "ruby benchmarks/ruby/benchmark.rb");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CompareConfig::default();
        config.timeout = Duration::ZERO;
        assert!(config.validate().is_err());

        let mut config = CompareConfig::default();
        config.timeout = Duration::from_secs(7200);
        assert!(config.validate().is_err());

        let mut config = CompareConfig::default();
        config.runners.push(RunnerSpec::new("Python", "pypy3", &[]));
        assert!(matches!(config.validate(), Err(PolybenchError::ConfigError(msg)) if msg.contains("Duplicate")));

        let mut config = CompareConfig::native_only();
        config.runners.push(RunnerSpec::new("Go", " ", &[]));
        assert!(config.validate().is_err());

        let mut config = CompareConfig::native_only();
        config.include_native = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = CompareConfig::native_only();
        config.save_to(&path).expect("save");
        let loaded = CompareConfig::load_from(&path).expect("load");
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "timeout = \"soon\"").expect("write");
        let err = CompareConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_config_file_path() {
        if let Ok(path) = CompareConfig::config_file_path() {
            assert!(path.to_string_lossy().contains("polybench"));
            assert!(path.ends_with(Path::new(APP_NAME).join(CONFIG_FILE)));
        }
    }
}
