//! Candidate name generation.
//!
//! Turns normalized base names into variations by gluing a fixed set of
//! affixes onto either end, and builds the sorted, de-duplicated corpus that
//! daily batches are cut from.
//!
//! # Examples
//!
//! ```
//! use domain_hunter_lib::generate::{build_corpus, generate_variations, DEFAULT_AFFIXES};
//!
//! let variations = generate_variations("acme", DEFAULT_AFFIXES);
//! assert_eq!(variations.len(), 9);
//! assert!(variations.contains("acmelabs"));
//! assert!(variations.contains("aiacme"));
//!
//! let corpus = build_corpus(["Acme Inc", "ACME inc"], DEFAULT_AFFIXES);
//! assert_eq!(corpus.first().map(String::as_str), Some("acmeinc"));
//! ```

use crate::normalize::{is_valid, normalize, MAX_NAME_LEN};
use std::collections::HashSet;
use tracing::info;

/// Affixes applied when none are configured.
pub const DEFAULT_AFFIXES: &[&str] = &["ai", "labs", "cloud", "tech"];

/// Build the variation set for one normalized base name.
///
/// Contains the base itself plus `base + affix` and `affix + base` for each
/// affix, skipping any that would exceed 25 characters. Returns an empty set
/// when the base fails [`is_valid`].
///
/// The set has no defined order; sort before cutting batches.
pub fn generate_variations<S: AsRef<str>>(base: &str, affixes: &[S]) -> HashSet<String> {
    let mut variations = HashSet::new();

    if !is_valid(base) {
        return variations;
    }

    variations.insert(base.to_string());

    // base + affix
    for affix in affixes {
        let candidate = format!("{}{}", base, affix.as_ref());
        if candidate.len() <= MAX_NAME_LEN {
            variations.insert(candidate);
        }
    }

    // affix + base
    for affix in affixes {
        let candidate = format!("{}{}", affix.as_ref(), base);
        if candidate.len() <= MAX_NAME_LEN {
            variations.insert(candidate);
        }
    }

    variations
}

/// Normalize configured affixes the same way names are normalized.
///
/// Empty results are dropped and duplicates collapse, first one wins.
pub fn normalize_affixes<S: AsRef<str>>(affixes: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    affixes
        .iter()
        .map(|a| normalize(a.as_ref()))
        .filter(|a| !a.is_empty())
        .filter(|a| seen.insert(a.clone()))
        .collect()
}

/// Build the full, sorted variation corpus from raw names.
///
/// 1. de-duplicate raw names
/// 2. normalize and drop invalid names
/// 3. de-duplicate normalized names
/// 4. expand each into its variations and union them
/// 5. sort ascending
///
/// The sort is part of the contract: batch selection indexes into this
/// vector, so the same corpus must always come back in the same order.
pub fn build_corpus<I, S, A>(raw_names: I, affixes: &[A]) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    A: AsRef<str>,
{
    let affixes = normalize_affixes(affixes);

    let unique_raw: HashSet<String> = raw_names
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect();

    let unique_normalized: HashSet<String> = unique_raw
        .iter()
        .map(|name| normalize(name))
        .filter(|name| is_valid(name))
        .collect();

    let mut all_variations: HashSet<String> = HashSet::new();
    for name in &unique_normalized {
        all_variations.extend(generate_variations(name, &affixes));
    }

    let mut corpus: Vec<String> = all_variations.into_iter().collect();
    corpus.sort();

    info!(
        unique_names = unique_raw.len(),
        valid_names = unique_normalized.len(),
        variations = corpus.len(),
        "Built variation corpus"
    );

    corpus
}
