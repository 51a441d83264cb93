//! Configuration file parsing and management.
//!
//! Settings are layered, lowest precedence first: built-in defaults, TOML
//! config files, `DH_*` environment variables, then CLI flags (applied by the
//! binary).

use crate::error::DomainHunterError;
use crate::types::HuntConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    /// Run settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hunt: Option<HuntSection>,

    /// Variation generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationConfig>,

    /// Lookup endpoints and timeouts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup: Option<LookupConfig>,
}

/// `[hunt]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HuntSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tlds: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,

    /// Pause after each check, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,

    /// Reserved, see [`HuntConfig::concurrency`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Results file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

/// `[generation]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affixes: Option<Vec<String>>,
}

/// `[lookup]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LookupConfig {
    /// e.g. "10s"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rdap_timeout: Option<String>,

    /// e.g. "5s"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_timeout: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rdap_base_url: Option<String>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to log which config files were picked up
    pub verbose: bool,
}

impl ConfigManager {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, DomainHunterError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainHunterError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainHunterError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content)?;
        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// XDG config, then the home directory, then the current directory; later
    /// files override earlier ones field by field. Files that fail to parse
    /// are skipped with a warning.
    pub fn discover_and_load(&self) -> Result<FileConfig, DomainHunterError> {
        let mut merged_config = FileConfig::default();

        let candidates = [
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        for path in candidates.into_iter().flatten() {
            match self.load_file(&path) {
                Ok(config) => {
                    if self.verbose {
                        info!(path = %path.display(), "Loaded config file");
                    }
                    merged_config = self.merge_configs(merged_config, config);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Ignoring config file"),
            }
        }

        Ok(merged_config)
    }

    fn get_local_config_path(&self) -> Option<PathBuf> {
        ["./domain-hunter.toml", "./.domain-hunter.toml"]
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    }

    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        [".domain-hunter.toml", "domain-hunter.toml"]
            .iter()
            .map(|c| Path::new(&home).join(c))
            .find(|p| p.exists())
    }

    /// Follows the XDG Base Directory Specification.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("domain-hunter").join("config.toml");
        path.exists().then_some(path)
    }

    /// Merge two configurations; values from `higher` win.
    pub fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            hunt: match (lower.hunt, higher.hunt) {
                (Some(mut lower), Some(higher)) => {
                    if higher.tlds.is_some() {
                        lower.tlds = higher.tlds;
                    }
                    if higher.batch_size.is_some() {
                        lower.batch_size = higher.batch_size;
                    }
                    if higher.delay_ms.is_some() {
                        lower.delay_ms = higher.delay_ms;
                    }
                    if higher.concurrency.is_some() {
                        lower.concurrency = higher.concurrency;
                    }
                    if higher.output.is_some() {
                        lower.output = higher.output;
                    }
                    Some(lower)
                }
                (lower, higher) => higher.or(lower),
            },
            generation: match (lower.generation, higher.generation) {
                (Some(mut lower), Some(higher)) => {
                    if higher.affixes.is_some() {
                        lower.affixes = higher.affixes;
                    }
                    Some(lower)
                }
                (lower, higher) => higher.or(lower),
            },
            lookup: match (lower.lookup, higher.lookup) {
                (Some(mut lower), Some(higher)) => {
                    if higher.rdap_timeout.is_some() {
                        lower.rdap_timeout = higher.rdap_timeout;
                    }
                    if higher.dns_timeout.is_some() {
                        lower.dns_timeout = higher.dns_timeout;
                    }
                    if higher.rdap_base_url.is_some() {
                        lower.rdap_base_url = higher.rdap_base_url;
                    }
                    Some(lower)
                }
                (lower, higher) => higher.or(lower),
            },
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), DomainHunterError> {
        if let Some(hunt) = &config.hunt {
            if hunt.batch_size == Some(0) {
                return Err(DomainHunterError::config("batch_size must be at least 1"));
            }

            if let Some(concurrency) = hunt.concurrency {
                if concurrency == 0 || concurrency > 100 {
                    return Err(DomainHunterError::config(
                        "concurrency must be between 1 and 100",
                    ));
                }
            }

            if let Some(tlds) = &hunt.tlds {
                validate_list("TLD", tlds)?;
            }
        }

        if let Some(affixes) = config.generation.as_ref().and_then(|g| g.affixes.as_ref()) {
            validate_list("affix", affixes)?;
        }

        if let Some(lookup) = &config.lookup {
            for timeout in [&lookup.rdap_timeout, &lookup.dns_timeout].into_iter().flatten() {
                if parse_timeout_string(timeout).is_none() {
                    return Err(DomainHunterError::config(format!(
                        "Invalid timeout '{}'. Use format like '5s', '30s', '2m' (1s to {}s)",
                        timeout, MAX_TIMEOUT_SECS
                    )));
                }
            }
        }

        Ok(())
    }
}

fn validate_list(kind: &str, items: &[String]) -> Result<(), DomainHunterError> {
    for item in items {
        if item.trim().is_empty() || item.trim().contains(' ') {
            return Err(DomainHunterError::config(format!("Invalid {} '{}'", kind, item)));
        }
    }
    Ok(())
}

impl FileConfig {
    /// Apply file values on top of `config`.
    pub fn apply_to(&self, mut config: HuntConfig) -> HuntConfig {
        if let Some(hunt) = &self.hunt {
            if let Some(tlds) = &hunt.tlds {
                config = config.with_tlds(tlds.clone());
            }
            if let Some(batch_size) = hunt.batch_size {
                config = config.with_batch_size(batch_size);
            }
            if let Some(delay_ms) = hunt.delay_ms {
                config = config.with_delay(Duration::from_millis(delay_ms));
            }
            if let Some(concurrency) = hunt.concurrency {
                config.concurrency = concurrency;
            }
            if let Some(output) = &hunt.output {
                config = config.with_output(output.clone());
            }
        }

        if let Some(affixes) = self.generation.as_ref().and_then(|g| g.affixes.clone()) {
            config = config.with_affixes(affixes);
        }

        if let Some(lookup) = &self.lookup {
            if let Some(secs) = lookup.rdap_timeout.as_deref().and_then(parse_timeout_string) {
                config = config.with_rdap_timeout(Duration::from_secs(secs));
            }
            if let Some(secs) = lookup.dns_timeout.as_deref().and_then(parse_timeout_string) {
                config = config.with_dns_timeout(Duration::from_secs(secs));
            }
            if let Some(url) = &lookup.rdap_base_url {
                config = config.with_rdap_base_url(url.clone());
            }
        }

        config
    }
}

/// Configuration values read from `DH_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub tlds: Option<Vec<String>>,
    pub affixes: Option<Vec<String>>,
    pub batch_size: Option<usize>,
    pub delay_ms: Option<u64>,
    pub concurrency: Option<usize>,
    pub rdap_timeout: Option<u64>,
    pub dns_timeout: Option<u64>,
    pub rdap_base_url: Option<String>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Load configuration from the process environment.
///
/// Invalid values are logged as warnings and ignored.
pub fn load_env_config() -> EnvConfig {
    load_env_config_from(|key| env::var(key).ok())
}

/// Same as [`load_env_config`] with an injectable variable source.
pub fn load_env_config_from<F>(get: F) -> EnvConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_config = EnvConfig::default();

    if let Some(val) = get("DH_TLDS") {
        env_config.tlds = parse_list(&val);
    }

    if let Some(val) = get("DH_AFFIXES") {
        env_config.affixes = parse_list(&val);
    }

    if let Some(val) = get("DH_BATCH_SIZE") {
        match val.trim().parse::<usize>() {
            Ok(n) if n > 0 => env_config.batch_size = Some(n),
            _ => warn!("Invalid DH_BATCH_SIZE='{}', must be a positive integer", val),
        }
    }

    if let Some(val) = get("DH_DELAY_MS") {
        match val.trim().parse::<u64>() {
            Ok(ms) => env_config.delay_ms = Some(ms),
            Err(_) => warn!("Invalid DH_DELAY_MS='{}', must be milliseconds", val),
        }
    }

    if let Some(val) = get("DH_CONCURRENCY") {
        match val.trim().parse::<usize>() {
            Ok(n) if n > 0 && n <= 100 => env_config.concurrency = Some(n),
            _ => warn!("Invalid DH_CONCURRENCY='{}', must be 1-100", val),
        }
    }

    if let Some(val) = get("DH_RDAP_TIMEOUT") {
        match parse_timeout_string(&val) {
            Some(secs) => env_config.rdap_timeout = Some(secs),
            None => warn!("Invalid DH_RDAP_TIMEOUT='{}', use 1s-{}s like '10s'", val, MAX_TIMEOUT_SECS),
        }
    }

    if let Some(val) = get("DH_DNS_TIMEOUT") {
        match parse_timeout_string(&val) {
            Some(secs) => env_config.dns_timeout = Some(secs),
            None => warn!("Invalid DH_DNS_TIMEOUT='{}', use 1s-{}s like '5s'", val, MAX_TIMEOUT_SECS),
        }
    }

    if let Some(val) = get("DH_RDAP_URL") {
        if !val.trim().is_empty() {
            env_config.rdap_base_url = Some(val.trim().to_string());
        }
    }

    if let Some(val) = get("DH_OUTPUT") {
        if !val.trim().is_empty() {
            env_config.output = Some(PathBuf::from(val.trim()));
        }
    }

    if let Some(val) = get("DH_CONFIG") {
        if !val.trim().is_empty() {
            env_config.config = Some(PathBuf::from(val.trim()));
        }
    }

    env_config
}

impl EnvConfig {
    /// Apply environment values on top of `config`.
    pub fn apply_to(&self, mut config: HuntConfig) -> HuntConfig {
        if let Some(tlds) = &self.tlds {
            config = config.with_tlds(tlds.clone());
        }
        if let Some(affixes) = &self.affixes {
            config = config.with_affixes(affixes.clone());
        }
        if let Some(batch_size) = self.batch_size {
            config = config.with_batch_size(batch_size);
        }
        if let Some(delay_ms) = self.delay_ms {
            config = config.with_delay(Duration::from_millis(delay_ms));
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(secs) = self.rdap_timeout {
            config = config.with_rdap_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.dns_timeout {
            config = config.with_dns_timeout(Duration::from_secs(secs));
        }
        if let Some(url) = &self.rdap_base_url {
            config = config.with_rdap_base_url(url.clone());
        }
        if let Some(output) = &self.output {
            config = config.with_output(output.clone());
        }
        config
    }
}

/// Comma-separated list; `None` if nothing is left after trimming.
fn parse_list(value: &str) -> Option<Vec<String>> {
    let items: Vec<String> = value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    (!items.is_empty()).then_some(items)
}

/// Longest lookup timeout accepted from config or environment, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
///
/// Returns `None` for malformed input and for values outside
/// 1..=[`MAX_TIMEOUT_SECS`].
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    let secs = if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.parse::<u64>().ok()
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.parse::<u64>().ok().and_then(|m| m.checked_mul(60))
    } else {
        // Assume seconds if no unit
        timeout_str.parse::<u64>().ok()
    }?;

    (1..=MAX_TIMEOUT_SECS).contains(&secs).then_some(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_parse_timeout_string() {
        assert_eq!(parse_timeout_string("5s"), Some(5));
        assert_eq!(parse_timeout_string("30s"), Some(30));
        assert_eq!(parse_timeout_string("2m"), Some(120));
        assert_eq!(parse_timeout_string("5"), Some(5));
        assert_eq!(parse_timeout_string("invalid"), None);
        assert_eq!(parse_timeout_string("60m"), Some(3600));
    }

    #[test]
    fn test_parse_timeout_string_rejects_out_of_range() {
        assert_eq!(parse_timeout_string("0s"), None);
        assert_eq!(parse_timeout_string("61m"), None);
        assert_eq!(parse_timeout_string("3601"), None);
        assert_eq!(parse_timeout_string("18446744073709551615m"), None);
        assert_eq!(parse_timeout_string("18446744073709551615s"), None);
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(
            r#"
[hunt]
tlds = ["com", ".io"]
batch_size = 50
delay_ms = 500

[generation]
affixes = ["hq", "app"]

[lookup]
rdap_timeout = "15s"
dns_timeout = "3s"
rdap_base_url = "https://rdap.example.net/"
"#,
        );

        let manager = ConfigManager::new(false);
        let file_config = manager.load_file(file.path()).unwrap();
        let config = file_config.apply_to(HuntConfig::default());

        assert_eq!(config.tlds, vec![".com", ".io"]);
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.delay, Duration::from_millis(500));
        assert_eq!(config.affixes, vec!["hq", "app"]);
        assert_eq!(config.rdap_timeout, Duration::from_secs(15));
        assert_eq!(config.dns_timeout, Duration::from_secs(3));
        assert_eq!(config.rdap_base_url, "https://rdap.example.net");
    }

    #[test]
    fn test_invalid_batch_size() {
        let file = write_config("[hunt]\nbatch_size = 0\n");
        let result = ConfigManager::new(false).load_file(file.path());
        assert!(matches!(result, Err(DomainHunterError::ConfigError { .. })));
    }

    #[test]
    fn test_invalid_timeout() {
        let file = write_config("[lookup]\nrdap_timeout = \"soon\"\n");
        assert!(ConfigManager::new(false).load_file(file.path()).is_err());
    }

    #[test]
    fn test_huge_timeout_rejected() {
        let file = write_config("[lookup]\nrdap_timeout = \"18446744073709551615s\"\n");
        let result = ConfigManager::new(false).load_file(file.path());
        assert!(matches!(result, Err(DomainHunterError::ConfigError { .. })));

        let file = write_config("[lookup]\ndns_timeout = \"18446744073709551615m\"\n");
        assert!(ConfigManager::new(false).load_file(file.path()).is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let file = write_config("[hunt\nbatch_size = ");
        let result = ConfigManager::new(false).load_file(file.path());
        assert!(matches!(result, Err(DomainHunterError::ConfigError { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigManager::new(false).load_file("/no/such/domain-hunter.toml");
        assert!(matches!(result, Err(DomainHunterError::FileError { .. })));
    }

    #[test]
    fn test_merge_configs() {
        let manager = ConfigManager::new(false);

        let lower = FileConfig {
            hunt: Some(HuntSection {
                batch_size: Some(100),
                delay_ms: Some(2000),
                ..Default::default()
            }),
            generation: Some(GenerationConfig {
                affixes: Some(vec!["hq".to_string()]),
            }),
            ..Default::default()
        };

        let higher = FileConfig {
            hunt: Some(HuntSection {
                batch_size: Some(25),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = manager.merge_configs(lower, higher);
        let hunt = merged.hunt.unwrap();
        assert_eq!(hunt.batch_size, Some(25)); // Higher wins
        assert_eq!(hunt.delay_ms, Some(2000)); // Lower preserved
        assert_eq!(
            merged.generation.unwrap().affixes,
            Some(vec!["hq".to_string()])
        );
    }

    #[test]
    fn test_env_config() {
        let vars: HashMap<&str, &str> = [
            ("DH_TLDS", "com, io ,"),
            ("DH_BATCH_SIZE", "75"),
            ("DH_DELAY_MS", "0"),
            ("DH_CONCURRENCY", "500"),
            ("DH_RDAP_TIMEOUT", "20s"),
            ("DH_OUTPUT", "out/today.csv"),
        ]
        .into_iter()
        .collect();

        let env_config = load_env_config_from(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(env_config.tlds, Some(vec!["com".to_string(), "io".to_string()]));
        assert_eq!(env_config.batch_size, Some(75));
        assert_eq!(env_config.delay_ms, Some(0));
        assert_eq!(env_config.concurrency, None); // out of range, ignored
        assert_eq!(env_config.rdap_timeout, Some(20));

        let config = env_config.apply_to(HuntConfig::default());
        assert_eq!(config.tlds, vec![".com", ".io"]);
        assert_eq!(config.batch_size, 75);
        assert_eq!(config.delay, Duration::ZERO);
        assert_eq!(config.rdap_timeout, Duration::from_secs(20));
        assert_eq!(config.output, PathBuf::from("out/today.csv"));
        assert_eq!(config.concurrency, 2);
    }

    #[test]
    fn test_env_invalid_values_ignored() {
        let env_config = load_env_config_from(|k| match k {
            "DH_BATCH_SIZE" => Some("0".to_string()),
            "DH_DELAY_MS" => Some("fast".to_string()),
            "DH_TLDS" => Some(" , ".to_string()),
            "DH_RDAP_TIMEOUT" => Some("18446744073709551615s".to_string()),
            "DH_DNS_TIMEOUT" => Some("18446744073709551615m".to_string()),
            _ => None,
        });
        assert_eq!(env_config, EnvConfig::default());
    }
}
