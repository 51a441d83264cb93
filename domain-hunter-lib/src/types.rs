//! Core data types for domain hunting.
//!
//! This module defines the data flowing between pipeline stages: candidate
//! domains, per-domain check results, lookup probes, run configuration and
//! the final report handed to the CLI.

use crate::aggregate::BaseGroups;
use crate::batch::BatchSelection;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

/// Default TLDs every variation is checked against.
pub const DEFAULT_TLDS: &[&str] = &[".com", ".app", ".ai", ".so"];

/// Default number of variations checked per daily run.
pub const DEFAULT_BATCH_SIZE: usize = 200;

/// Default pause after every domain check, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 1200;

/// Default public RDAP redirector.
pub const DEFAULT_RDAP_BASE_URL: &str = "https://rdap.org";

/// Final classification of a single domain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainStatus {
    /// Registry reported "not found", or DNS reported no such domain
    Available,

    /// Registry or DNS returned evidence of a registration
    Registered,

    /// Neither lookup was conclusive
    PossibleAvailable,
}

impl DomainStatus {
    /// The upper-case label used in the CSV artifact and terminal output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainStatus::Available => "AVAILABLE",
            DomainStatus::Registered => "REGISTERED",
            DomainStatus::PossibleAvailable => "POSSIBLE_AVAILABLE",
        }
    }
}

impl std::fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which stage of the resolver produced the final status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CheckMethod {
    /// Decided by the RDAP lookup
    #[serde(rename = "rdap")]
    Rdap,

    /// Decided by the NS record fallback
    #[serde(rename = "dns")]
    Dns,

    /// Both lookups were inconclusive
    #[serde(rename = "unknown")]
    Unknown,
}

impl std::fmt::Display for CheckMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckMethod::Rdap => write!(f, "RDAP"),
            CheckMethod::Dns => write!(f, "DNS"),
            CheckMethod::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Outcome of one lookup stage.
///
/// `Inconclusive` carries a short human-readable reason for debug logging;
/// it is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Conclusive(DomainStatus),
    Inconclusive(String),
}

impl Probe {
    pub fn inconclusive<R: Into<String>>(reason: R) -> Self {
        Probe::Inconclusive(reason.into())
    }

    pub fn status(&self) -> Option<DomainStatus> {
        match self {
            Probe::Conclusive(status) => Some(*status),
            Probe::Inconclusive(_) => None,
        }
    }
}

/// Registration details pulled from an RDAP record.
///
/// Only used for debug logging; classification looks at the raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DomainInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,

    /// Domain status codes (e.g., "client transfer prohibited")
    pub status: Vec<String>,

    pub nameservers: Vec<String>,
}

/// A base name paired with one TLD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDomain {
    /// The variation this domain was built from (e.g., "acmelabs")
    pub base: String,

    /// TLD with leading dot (e.g., ".com")
    pub tld: String,

    /// `base + tld`
    pub domain: String,
}

impl CandidateDomain {
    pub fn new(base: &str, tld: &str) -> Self {
        Self {
            base: base.to_string(),
            tld: tld.to_string(),
            domain: format!("{}{}", base, tld),
        }
    }
}

/// Result of checking one candidate domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The domain name that was checked (e.g., "acme.com")
    pub domain: String,

    /// The base name it belongs to (e.g., "acme")
    pub base: String,

    /// Final classification
    pub status: DomainStatus,

    /// Which stage decided the status
    pub method_used: CheckMethod,

    /// How long the lookups took, excluding the rate-limit pause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_duration: Option<Duration>,
}

impl CheckResult {
    pub fn is_registered(&self) -> bool {
        self.status == DomainStatus::Registered
    }
}

/// Counters handed to the reporter alongside the interesting groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_checked: usize,
    pub available_count: usize,
    pub possible_count: usize,
    pub registered_count: usize,
    pub interesting_count: usize,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Serialize)]
pub struct HuntReport {
    /// Which slice of the corpus was checked today
    pub selection: BatchSelection,

    /// Every check result, in check order
    pub results: Vec<CheckResult>,

    /// Interesting groups only
    pub groups: BaseGroups,

    pub summary: RunSummary,

    /// Wall-clock time of the resolution phase, pauses included
    pub duration: Duration,
}

/// Settings for a hunting run.
///
/// Built from defaults, then merged with config files, environment
/// variables and CLI flags (see [`crate::ConfigManager`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuntConfig {
    /// TLDs with leading dot, in check order
    /// Default: .com .app .ai .so
    pub tlds: Vec<String>,

    /// Affixes added before and after each base name
    /// Default: ai labs cloud tech
    pub affixes: Vec<String>,

    /// Variations per daily batch
    /// Default: 200
    pub batch_size: usize,

    /// Pause after every check
    /// Default: 1200 ms
    #[serde(skip)]
    pub delay: Duration,

    /// Timeout for each RDAP request
    /// Default: 10 seconds
    #[serde(skip)]
    pub rdap_timeout: Duration,

    /// Timeout for each NS lookup
    /// Default: 5 seconds
    #[serde(skip)]
    pub dns_timeout: Duration,

    /// RDAP service base URL; requests go to `{base}/domain/{domain}`
    pub rdap_base_url: String,

    /// Reserved for a future bounded worker pool. Checks are sequential
    /// regardless of this value.
    /// Default: 2
    pub concurrency: usize,

    /// Where the interesting results are written
    /// Default: results.csv
    pub output: PathBuf,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            tlds: DEFAULT_TLDS.iter().map(|t| t.to_string()).collect(),
            affixes: crate::generate::DEFAULT_AFFIXES
                .iter()
                .map(|a| a.to_string())
                .collect(),
            batch_size: DEFAULT_BATCH_SIZE,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            rdap_timeout: Duration::from_secs(10),
            dns_timeout: Duration::from_secs(5),
            rdap_base_url: DEFAULT_RDAP_BASE_URL.to_string(),
            concurrency: 2,
            output: PathBuf::from("results.csv"),
        }
    }
}

impl HuntConfig {
    /// Set TLDs to check. Entries are normalized to carry a leading dot;
    /// repeats are dropped, keeping the first occurrence.
    pub fn with_tlds(mut self, tlds: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        self.tlds = tlds
            .iter()
            .filter_map(|t| crate::utils::normalize_tld(t))
            .filter(|t| seen.insert(t.clone()))
            .collect();
        self
    }

    /// Set the affix list used by the variation generator.
    pub fn with_affixes(mut self, affixes: Vec<String>) -> Self {
        self.affixes = affixes;
        self
    }

    /// Set the daily batch size. Values below 1 are raised to 1.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set the pause after each check.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the RDAP request timeout.
    pub fn with_rdap_timeout(mut self, timeout: Duration) -> Self {
        self.rdap_timeout = timeout;
        self
    }

    /// Set the NS lookup timeout.
    pub fn with_dns_timeout(mut self, timeout: Duration) -> Self {
        self.dns_timeout = timeout;
        self
    }

    /// Point RDAP lookups at another service (trailing slashes are trimmed).
    pub fn with_rdap_base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.rdap_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, output: P) -> Self {
        self.output = output.into();
        self
    }
}
