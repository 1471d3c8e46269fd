//! Configuration loading and resolution
//!
//! Bootstrap settings come from four tiers, highest priority first:
//! 1. Command-line argument
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default
//!
//! The `[matching]` table carries every threshold and metric weight used by the
//! matching engine. Its defaults reproduce the reference behavior exactly.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default HTTP bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5790;

/// Default corpus dataset location (relative to the working directory)
pub const DEFAULT_CORPUS_PATH: &str = "data/examples.json";

/// Environment variable naming an explicit config file
pub const ENV_CONFIG: &str = "WAZN_CONFIG";
/// Environment variable overriding the corpus path
pub const ENV_CORPUS: &str = "WAZN_CORPUS";
/// Environment variable overriding the bind address
pub const ENV_HOST: &str = "WAZN_HOST";
/// Environment variable overriding the port
pub const ENV_PORT: &str = "WAZN_PORT";

/// Bootstrap configuration loaded from a TOML file
///
/// Every field is optional; missing fields fall through to the compiled
/// defaults during [`ServiceConfig::resolve`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    /// HTTP bind address
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Path to the corpus JSON dataset
    #[serde(default)]
    pub corpus_path: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Matching engine thresholds and metric weights (optional)
    #[serde(default)]
    pub matching: MatchingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Matching engine configuration
///
/// Thresholds for the exact-match stage, the weight-profile fallback and the
/// final confidence gate, plus the combiner's metric weights.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Near-duplicate edit ratio that still counts as an exact match (strictly greater)
    pub exact_ratio_threshold: f64,

    /// Maximum compact-length difference for the near-duplicate check
    pub exact_length_slack: usize,

    /// Weight profiles are consulted only while the best example score is below this
    pub profile_gate: f64,

    /// Multiplier applied to weight-profile TF-IDF similarity
    pub profile_boost: f64,

    /// Scores below this are reported as not matched
    pub min_confidence: f64,

    /// Clamp the reported confidence to 1.0 (the boosted profile score can exceed it)
    pub clamp_confidence: bool,

    /// Combiner weight per metric
    pub weights: MetricWeights,

    /// Combiner enable flag per metric
    pub enabled: EnabledMetrics,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            exact_ratio_threshold: 0.95,
            exact_length_slack: 2,
            profile_gate: 0.9,
            profile_boost: 1.1,
            min_confidence: 0.3,
            clamp_confidence: true,
            weights: MetricWeights::default(),
            enabled: EnabledMetrics::default(),
        }
    }
}

impl MatchingConfig {
    /// Reject values that would make scores meaningless
    pub fn validate(&self) -> Result<()> {
        let unit_range = [
            ("exact_ratio_threshold", self.exact_ratio_threshold),
            ("profile_gate", self.profile_gate),
            ("min_confidence", self.min_confidence),
        ];
        for (name, value) in unit_range {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "matching.{} must be within [0.0, 1.0], got {}",
                    name, value
                )));
            }
        }

        if !self.profile_boost.is_finite() || self.profile_boost <= 0.0 {
            return Err(Error::Config(format!(
                "matching.profile_boost must be positive, got {}",
                self.profile_boost
            )));
        }

        for (name, value) in self.weights.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "matching.weights.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Per-metric combiner weights
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricWeights {
    pub levenshtein: f64,
    pub word_jaccard: f64,
    pub char_trigram_jaccard: f64,
    pub word_bigram_jaccard: f64,
    pub sequence: f64,
    pub syllabic: f64,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            levenshtein: 0.25,
            word_jaccard: 0.15,
            char_trigram_jaccard: 0.20,
            word_bigram_jaccard: 0.15,
            sequence: 0.15,
            syllabic: 0.10,
        }
    }
}

impl MetricWeights {
    fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("levenshtein", self.levenshtein),
            ("word_jaccard", self.word_jaccard),
            ("char_trigram_jaccard", self.char_trigram_jaccard),
            ("word_bigram_jaccard", self.word_bigram_jaccard),
            ("sequence", self.sequence),
            ("syllabic", self.syllabic),
        ]
    }
}

/// Per-metric enable flags
///
/// The syllabic metric is approximate and off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnabledMetrics {
    pub levenshtein: bool,
    pub word_jaccard: bool,
    pub char_trigram_jaccard: bool,
    pub word_bigram_jaccard: bool,
    pub sequence: bool,
    pub syllabic: bool,
}

impl Default for EnabledMetrics {
    fn default() -> Self {
        Self {
            levenshtein: true,
            word_jaccard: true,
            char_trigram_jaccard: true,
            word_bigram_jaccard: true,
            sequence: true,
            syllabic: false,
        }
    }
}

/// Values supplied on the command line (all optional)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub corpus: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub corpus_path: PathBuf,
    pub logging: LoggingConfig,
    pub matching: MatchingConfig,
    /// Config file that was actually read, if any
    pub config_file: Option<PathBuf>,
}

impl ServiceConfig {
    /// Resolve configuration from CLI → ENV → TOML → defaults
    ///
    /// A missing config file is not an error. An explicitly named config file
    /// (`--config` or `WAZN_CONFIG`) that does not exist is.
    pub fn resolve(overrides: &CliOverrides) -> Result<Self> {
        let config_file = locate_config_file(overrides.config.as_deref())?;
        let toml_config = match &config_file {
            Some(path) => load_toml_config(path)?,
            None => {
                info!("No config file found, using defaults");
                TomlConfig::default()
            }
        };

        toml_config.matching.validate()?;

        let host = overrides
            .host
            .clone()
            .or_else(|| env_string(ENV_HOST))
            .or(toml_config.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match overrides.port {
            Some(port) => port,
            None => match env_string(ENV_PORT) {
                Some(raw) => raw.parse::<u16>().map_err(|_| {
                    Error::Config(format!("{} is not a valid port: {:?}", ENV_PORT, raw))
                })?,
                None => toml_config.port.unwrap_or(DEFAULT_PORT),
            },
        };

        let corpus_path = overrides
            .corpus
            .clone()
            .or_else(|| env_string(ENV_CORPUS).map(PathBuf::from))
            .or(toml_config.corpus_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CORPUS_PATH));

        Ok(Self {
            host,
            port,
            corpus_path,
            logging: toml_config.logging,
            matching: toml_config.matching,
            config_file,
        })
    }

    /// `host:port` string suitable for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)?;
    info!("Loaded config file: {}", path.display());
    Ok(config)
}

/// Find the config file to read
///
/// Explicit paths (CLI, then `WAZN_CONFIG`) must exist. Otherwise the first
/// existing file among `./wazn.toml` and `<config dir>/wazn/config.toml` wins.
pub fn locate_config_file(cli_path: Option<&Path>) -> Result<Option<PathBuf>> {
    let explicit = cli_path
        .map(Path::to_path_buf)
        .or_else(|| env_string(ENV_CONFIG).map(PathBuf::from));

    if let Some(path) = explicit {
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let local = PathBuf::from("wazn.toml");
    let user = dirs::config_dir().map(|d| d.join("wazn").join("config.toml"));

    let found: Vec<PathBuf> = std::iter::once(local)
        .chain(user)
        .filter(|p| p.exists())
        .collect();

    if found.len() > 1 {
        warn!(
            "Multiple config files found, using {} (ignoring {})",
            found[0].display(),
            found[1].display()
        );
    }

    Ok(found.into_iter().next())
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
