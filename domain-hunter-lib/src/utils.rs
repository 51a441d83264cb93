//! Helpers for turning base names into candidate domains and for reading
//! raw name lists.

use crate::error::DomainHunterError;
use crate::types::CandidateDomain;
use std::path::Path;

/// Cross product of base names and TLDs.
///
/// Order is outer loop over `bases`, inner loop over `tlds`, both in input
/// order. No de-duplication: bases and TLDs are each expected to be distinct.
///
/// ```
/// use domain_hunter_lib::synthesize;
///
/// let bases = vec!["acme".to_string(), "zeta".to_string()];
/// let tlds = vec![".com".to_string(), ".ai".to_string()];
/// let domains: Vec<String> = synthesize(&bases, &tlds).into_iter().map(|c| c.domain).collect();
/// assert_eq!(domains, vec!["acme.com", "acme.ai", "zeta.com", "zeta.ai"]);
/// ```
pub fn synthesize<B: AsRef<str>, T: AsRef<str>>(bases: &[B], tlds: &[T]) -> Vec<CandidateDomain> {
    let mut candidates = Vec::with_capacity(bases.len() * tlds.len());

    for base in bases {
        for tld in tlds {
            candidates.push(CandidateDomain::new(base.as_ref(), tld.as_ref()));
        }
    }

    candidates
}

/// Normalize a TLD to lowercase with exactly one leading dot.
///
/// Returns `None` for empty input or input containing whitespace.
pub fn normalize_tld(tld: &str) -> Option<String> {
    let trimmed = tld.trim().trim_start_matches('.').to_lowercase();

    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return None;
    }

    Some(format!(".{}", trimmed))
}

/// Split a plain-text name list into raw names.
///
/// One name per line; blank lines and comment lines are skipped. A comment
/// is a lone `#` or a line starting with `# `, so names such as `#1 Cochran`
/// are kept. Names are trimmed but otherwise passed through untouched.
pub fn parse_name_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_comment(line))
        .map(str::to_string)
        .collect()
}

fn is_comment(line: &str) -> bool {
    line == "#" || line.starts_with("# ") || line.starts_with("#\t")
}

/// Read a name list file. See [`parse_name_list`] for the format.
pub fn read_name_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, DomainHunterError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        DomainHunterError::file_error(path.to_string_lossy(), format!("Failed to read name list: {}", e))
    })?;
    Ok(parse_name_list(&content))
}
