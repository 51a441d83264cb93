// domain-hunter-lib/tests/integration.rs

//! Integration tests for domain-hunter-lib exports and the full pipeline

use async_trait::async_trait;
use chrono::NaiveDate;
use domain_hunter_lib::{
    build_corpus, prepare_batch, run_hunt, select_batch, write_results_csv, DomainChecker, DomainHunterError,
    DomainStatus, HuntConfig, NoDelay, NsLookup, Probe, RegistryLookup,
};
use std::collections::HashMap;
use tempfile::tempdir;

/// Registry that answers from a table and is inconclusive for anything else.
struct TableRegistry(HashMap<&'static str, DomainStatus>);

#[async_trait]
impl RegistryLookup for TableRegistry {
    async fn lookup(&self, domain: &str) -> Probe {
        match self.0.get(domain) {
            Some(status) => Probe::Conclusive(*status),
            None => Probe::inconclusive("no RDAP service"),
        }
    }
}

/// NS lookup that finds records for every `.com` domain only.
struct ComOnlyDns;

#[async_trait]
impl NsLookup for ComOnlyDns {
    async fn lookup_ns(&self, domain: &str) -> Probe {
        if domain.ends_with(".com") {
            Probe::Conclusive(DomainStatus::Registered)
        } else {
            Probe::inconclusive("SERVFAIL")
        }
    }
}

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

#[test]
fn test_default_config_uses_default_tlds() {
    let config = HuntConfig::default();
    assert_eq!(config.tlds, domain_hunter_lib::DEFAULT_TLDS.to_vec());
    assert_eq!(config.tlds, vec![".com", ".app", ".ai", ".so"]);
}

#[test]
fn test_corpus_is_sorted_and_deduplicated() {
    let corpus = build_corpus(["Acme", "ACME Inc.", "acme"], &["hq"]);
    let mut sorted = corpus.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(corpus, sorted);
    assert!(corpus.contains(&"acme".to_string()));
    assert!(corpus.contains(&"acmeinc".to_string()));
}

#[test]
fn test_a_month_covers_the_corpus() {
    let names: Vec<String> = (0..40).map(|i| format!("company{:02}", i)).collect();
    let corpus = build_corpus(&names, &["ai"]);
    let batch_size = corpus.len().div_ceil(5);

    let mut seen = Vec::new();
    for day in 1..=5 {
        seen.extend(select_batch(&corpus, batch_size, march(day)));
    }
    seen.sort();
    assert_eq!(seen, corpus);
}

#[tokio::test]
async fn test_full_pipeline() {
    let registry = TableRegistry(
        [
            ("acme.com", DomainStatus::Registered),
            ("acme.app", DomainStatus::Registered),
            ("acme.ai", DomainStatus::Available),
            ("acme.so", DomainStatus::Registered),
        ]
        .into_iter()
        .collect(),
    );
    let checker = DomainChecker::from_parts(registry, ComOnlyDns, NoDelay);
    let config = HuntConfig::default().with_affixes(Vec::<String>::new());

    let report = run_hunt(["Acme"], &config, march(1), &checker).await.unwrap();

    assert_eq!(report.selection.names, vec!["acme"]);
    assert_eq!(report.results.len(), 4);
    assert_eq!(report.summary.available_count, 1);
    assert_eq!(report.summary.registered_count, 3);
    assert_eq!(report.summary.interesting_count, 1);

    let dir = tempdir().unwrap();
    let path = dir.path().join("results.csv");
    assert!(write_results_csv(&path, &report.groups).unwrap());
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("base,domain,status\n"));
    assert!(content.contains("acme,acme.ai,AVAILABLE"));
    assert_eq!(content.lines().count(), 5);
}

#[tokio::test]
async fn test_dns_fallback_and_possible_available() {
    let checker = DomainChecker::from_parts(TableRegistry(HashMap::new()), ComOnlyDns, NoDelay);
    let config = HuntConfig::default()
        .with_affixes(Vec::<String>::new())
        .with_tlds(vec!["com".to_string(), "so".to_string()]);

    let report = run_hunt(["zeta"], &config, march(1), &checker).await.unwrap();
    let statuses: Vec<DomainStatus> = report.results.iter().map(|r| r.status).collect();

    assert_eq!(
        statuses,
        vec![DomainStatus::Registered, DomainStatus::PossibleAvailable]
    );
    assert_eq!(report.groups.len(), 1);
}

#[tokio::test]
async fn test_all_registered_writes_no_file() {
    let checker = DomainChecker::from_parts(TableRegistry(HashMap::new()), ComOnlyDns, NoDelay);
    let config = HuntConfig::default()
        .with_affixes(Vec::<String>::new())
        .with_tlds(vec![".com".to_string()]);

    let report = run_hunt(["google"], &config, march(1), &checker).await.unwrap();
    assert!(report.groups.is_empty());

    let dir = tempdir().unwrap();
    let path = dir.path().join("results.csv");
    assert!(!write_results_csv(&path, &report.groups).unwrap());
    assert!(!path.exists());
}

#[test]
fn test_empty_input_is_an_error() {
    let result = prepare_batch(Vec::<String>::new(), &HuntConfig::default(), march(1));
    assert!(matches!(result, Err(DomainHunterError::EmptyCorpus { .. })));
}
