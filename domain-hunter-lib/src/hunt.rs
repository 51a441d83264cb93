//! End-to-end run: raw names in, interesting groups out.

use crate::aggregate::{group_and_filter, summarize};
use crate::batch::{select_batch_with_info, BatchSelection};
use crate::checker::DomainChecker;
use crate::error::DomainHunterError;
use crate::generate::build_corpus;
use crate::types::{CandidateDomain, HuntConfig, HuntReport};
use crate::utils::synthesize;
use chrono::NaiveDate;
use std::time::Instant;
use tracing::info;

/// The network-free half of a run: today's batch and its candidate domains.
#[derive(Debug, Clone)]
pub struct PreparedBatch {
    pub selection: BatchSelection,
    pub candidates: Vec<CandidateDomain>,
}

/// Build the corpus, select today's batch and synthesize its domains.
///
/// Fails with [`DomainHunterError::EmptyCorpus`] when no valid variation
/// survives normalization.
pub fn prepare_batch<I, S>(
    raw_names: I,
    config: &HuntConfig,
    reference_date: NaiveDate,
) -> Result<PreparedBatch, DomainHunterError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let corpus = build_corpus(raw_names, &config.affixes);
    if corpus.is_empty() {
        return Err(DomainHunterError::empty_corpus(
            "no input name normalized to 3-25 letters or digits",
        ));
    }

    if config.tlds.is_empty() {
        return Err(DomainHunterError::config("at least one TLD is required"));
    }

    let selection = select_batch_with_info(&corpus, config.batch_size, reference_date);
    if selection.is_empty() {
        return Err(DomainHunterError::empty_corpus("today's batch is empty"));
    }

    let candidates = synthesize(&selection.names, &config.tlds);
    info!(
        variations = selection.names.len(),
        tlds = config.tlds.len(),
        domains = candidates.len(),
        "Prepared batch"
    );

    Ok(PreparedBatch {
        selection,
        candidates,
    })
}

/// Run a full hunt for `reference_date`.
///
/// Checks run sequentially through `checker`; lookup problems never abort
/// the run. Writing the CSV artifact is left to the caller
/// (see [`crate::write_results_csv`]).
pub async fn run_hunt<I, S>(
    raw_names: I,
    config: &HuntConfig,
    reference_date: NaiveDate,
    checker: &DomainChecker,
) -> Result<HuntReport, DomainHunterError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let PreparedBatch {
        selection,
        candidates,
    } = prepare_batch(raw_names, config, reference_date)?;

    let start_time = Instant::now();
    let results = checker.check_candidates(&candidates).await;
    let duration = start_time.elapsed();

    let groups = group_and_filter(&results);
    let summary = summarize(&results, &groups);

    info!(
        checked = summary.total_checked,
        available = summary.available_count,
        possible = summary.possible_count,
        registered = summary.registered_count,
        interesting = summary.interesting_count,
        duration_secs = duration.as_secs_f64(),
        "Hunt finished"
    );

    Ok(HuntReport {
        selection,
        results,
        groups,
        summary,
        duration,
    })
}
