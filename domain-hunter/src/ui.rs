//! Console display logic for domain-hunter.
//!
//! Headers, the interesting-group listing and the run summary. Uses only the
//! `console` crate. Everything here writes to stdout; logs go to stderr.

use chrono::NaiveDate;
use console::{pad_str, style, Alignment, StyledObject};
use domain_hunter_lib::{BaseGroups, BatchSelection, CheckResult, DomainStatus, PreparedBatch, RunSummary};
use std::path::Path;
use std::time::Duration;

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header describing today's batch.
pub fn print_header(selection: &BatchSelection, tld_count: usize, reference_date: NaiveDate) {
    let domain_count = selection.names.len() * tld_count;
    println!(
        "{} {} {}",
        style("domain-hunter").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "· Checked {} domain{}",
            domain_count,
            if domain_count == 1 { "" } else { "s" }
        ))
        .dim(),
    );
    println!(
        "{}",
        style(format!(
            "{} | {}",
            reference_date.format("%Y-%m-%d"),
            format_batch_position(selection)
        ))
        .dim()
    );
    println!();
}

/// "Batch 2/5 (variations 200-399 of 1000)"
pub fn format_batch_position(selection: &BatchSelection) -> String {
    if selection.is_empty() {
        return format!("Empty batch of {} variations", selection.total_variations);
    }
    format!(
        "Batch {}/{} (variations {}-{} of {})",
        selection.current_batch + 1,
        selection.total_batches,
        selection.start,
        selection.end - 1,
        selection.total_variations,
    )
}

// ── Dry run ──────────────────────────────────────────────────────────────────

/// Print the candidates of a prepared batch, one domain per line.
///
/// The count goes to stderr so stdout can be piped.
pub fn print_dry_run(prepared: &PreparedBatch) {
    for candidate in &prepared.candidates {
        println!("{}", candidate.domain);
    }
    eprintln!(
        "{} domains would be checked · {}",
        prepared.candidates.len(),
        format_batch_position(&prepared.selection)
    );
}

// ── Groups ───────────────────────────────────────────────────────────────────

/// Print each interesting base with all of its domains.
pub fn print_groups(groups: &BaseGroups, debug: bool) {
    if groups.is_empty() {
        println!("  {}", style("No interesting domains in this batch").dim());
        println!();
        return;
    }

    for group in groups {
        println!(
            "  {} {}",
            style(format!("── {} ", group.base)).cyan().bold(),
            style("─".repeat(40usize.saturating_sub(group.base.len()))).cyan().dim(),
        );
        for result in &group.results {
            print_result_line(result, debug);
        }
        println!();
    }
}

fn print_result_line(result: &CheckResult, debug: bool) {
    let padded = pad_str(&result.domain, 30, Alignment::Left, Some(".."));
    println!("    {}  {}", style(&padded).white(), status_label(result.status));

    if debug {
        if let Some(duration) = result.check_duration {
            println!(
                "      {} Checked in {}ms via {}",
                style("└─").dim(),
                duration.as_millis(),
                result.method_used,
            );
        }
    }
}

/// Colored status word.
pub fn status_label(status: DomainStatus) -> StyledObject<&'static str> {
    match status {
        DomainStatus::Available => style(status.as_str()).green().bold(),
        DomainStatus::PossibleAvailable => style(status.as_str()).yellow(),
        DomainStatus::Registered => style(status.as_str()).red(),
    }
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Print the final summary bar with colored counts.
pub fn print_summary(summary: &RunSummary, duration: Duration, written_to: Option<&Path>) {
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} domain{} in {:.1}s  {}  {}  {}  {}  {}  {}",
        style(summary.total_checked).bold(),
        if summary.total_checked == 1 { "" } else { "s" },
        duration.as_secs_f64(),
        style("|").dim(),
        style(format!("{} available", summary.available_count)).green(),
        style("|").dim(),
        style(format!("{} possible", summary.possible_count)).yellow(),
        style("|").dim(),
        style(format!("{} registered", summary.registered_count)).red(),
    );

    match written_to {
        Some(path) => println!(
            "  {} interesting base name{} written to {}",
            style(summary.interesting_count).bold(),
            if summary.interesting_count == 1 { "" } else { "s" },
            style(path.display()).cyan(),
        ),
        None => println!("  {}", style("No results file written").dim()),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(total: usize, size: usize, day: u32) -> BatchSelection {
        let corpus: Vec<String> = (0..total).map(|i| format!("name{:04}", i)).collect();
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        domain_hunter_lib::select_batch_with_info(&corpus, size, date)
    }

    #[test]
    fn test_batch_position_first_day() {
        assert_eq!(
            format_batch_position(&selection(1000, 200, 1)),
            "Batch 1/5 (variations 0-199 of 1000)"
        );
    }

    #[test]
    fn test_batch_position_wraps() {
        assert_eq!(
            format_batch_position(&selection(1000, 200, 6)),
            "Batch 1/5 (variations 0-199 of 1000)"
        );
        assert_eq!(
            format_batch_position(&selection(1000, 200, 31)),
            "Batch 1/5 (variations 0-199 of 1000)"
        );
    }

    #[test]
    fn test_batch_position_short_last_batch() {
        assert_eq!(
            format_batch_position(&selection(9, 4, 3)),
            "Batch 3/3 (variations 8-8 of 9)"
        );
    }

    #[test]
    fn test_batch_position_empty() {
        assert_eq!(
            format_batch_position(&selection(0, 200, 1)),
            "Empty batch of 0 variations"
        );
    }

    #[test]
    fn test_status_label_text() {
        assert!(status_label(DomainStatus::PossibleAvailable)
            .to_string()
            .contains("POSSIBLE_AVAILABLE"));
        assert!(status_label(DomainStatus::Registered)
            .to_string()
            .contains("REGISTERED"));
    }
}
