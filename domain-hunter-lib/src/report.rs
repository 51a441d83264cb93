//! The results table written after a run.
//!
//! Header `base,domain,status`, one row per result of every interesting
//! group. The file is only created when there is something to report; its
//! absence means "nothing interesting found".

use crate::aggregate::BaseGroups;
use crate::error::DomainHunterError;
use std::path::Path;
use tracing::info;

/// Write the interesting groups as CSV.
///
/// Returns `Ok(true)` if the file was written, `Ok(false)` if there were no
/// interesting groups (no file is created in that case).
pub fn write_results_csv<P: AsRef<Path>>(path: P, groups: &BaseGroups) -> Result<bool, DomainHunterError> {
    let path = path.as_ref();

    if groups.is_empty() {
        info!(path = %path.display(), "No interesting domains, skipping results file");
        return Ok(false);
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        DomainHunterError::file_error(path.to_string_lossy(), format!("Failed to create results file: {}", e))
    })?;
    write_rows(&mut writer, groups)?;
    writer.flush()?;

    info!(path = %path.display(), groups = groups.len(), "Results written");
    Ok(true)
}

/// Render the same table into a string.
pub fn results_csv_string(groups: &BaseGroups) -> Result<String, DomainHunterError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_rows(&mut writer, groups)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| DomainHunterError::internal(format!("CSV buffer error: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| DomainHunterError::internal(format!("CSV is not UTF-8: {}", e)))
}

fn write_rows<W: std::io::Write>(writer: &mut csv::Writer<W>, groups: &BaseGroups) -> Result<(), DomainHunterError> {
    writer.write_record(["base", "domain", "status"])?;
    for group in groups {
        for result in &group.results {
            writer.write_record([group.base.as_str(), result.domain.as_str(), result.status.as_str()])?;
        }
    }
    Ok(())
}
