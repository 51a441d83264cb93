//! # Domain Hunter Library
//!
//! Turns lists of company names into short domain candidates and finds the
//! ones that look unregistered.
//!
//! A run normalizes the raw names, expands each into a set of variations,
//! picks today's batch from the sorted corpus, checks every variation under
//! every configured TLD (RDAP first, NS records as a fallback) and keeps the
//! base names where at least one domain is not registered.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_hunter_lib::{run_hunt, write_results_csv, DomainChecker, HuntConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HuntConfig::default();
//!     let checker = DomainChecker::with_config(config.clone())?;
//!     let today = chrono::Local::now().date_naive();
//!
//!     let report = run_hunt(["Acme Corp", "Zeta"], &config, today, &checker).await?;
//!     write_results_csv(&config.output, &report.groups)?;
//!
//!     for group in &report.groups {
//!         println!("{}", group.base);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Daily rotation**: a large corpus is covered in day-of-month batches
//! - **RDAP with DNS fallback**: inconclusive lookups degrade, never fail
//! - **Pacing**: a fixed pause after every check keeps registries happy
//! - **Configurable**: TOML files, `DH_*` environment variables, CLI flags

pub use aggregate::{filter_interesting, group_and_filter, group_by_base, summarize, BaseGroup, BaseGroups};
pub use batch::{select_batch, select_batch_with_info, BatchSelection};
pub use checker::DomainChecker;
pub use config::{
    load_env_config, load_env_config_from, parse_timeout_string, ConfigManager, EnvConfig, FileConfig,
    GenerationConfig, HuntSection, LookupConfig, MAX_TIMEOUT_SECS,
};
pub use error::DomainHunterError;
pub use hunt::{prepare_batch, run_hunt, PreparedBatch};
pub use normalize::{is_valid, normalize, MAX_NAME_LEN, MIN_NAME_LEN};
pub use protocols::{
    classify_ns_answer, classify_rdap_response, extract_domain_info, DnsClient, NsAnswer, NsLookup, RdapClient,
    RegistryLookup,
};
pub use rate_limit::{FixedDelay, NoDelay, RateLimit};
pub use report::{results_csv_string, write_results_csv};
pub use types::{
    CandidateDomain, CheckMethod, CheckResult, DomainInfo, DomainStatus, HuntConfig, HuntReport, Probe, RunSummary,
    DEFAULT_BATCH_SIZE, DEFAULT_DELAY_MS, DEFAULT_RDAP_BASE_URL, DEFAULT_TLDS,
};
pub use utils::{normalize_tld, parse_name_list, read_name_file, synthesize};

// Public modules
pub mod generate;

pub use generate::{build_corpus, generate_variations, normalize_affixes, DEFAULT_AFFIXES};

// Internal modules
mod aggregate;
mod batch;
mod checker;
mod config;
mod error;
mod hunt;
mod normalize;
mod protocols;
mod rate_limit;
mod report;
mod types;
mod utils;

pub type Result<T> = std::result::Result<T, DomainHunterError>;
