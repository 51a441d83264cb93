//! Grouping check results by base name.
//!
//! A base name is interesting when at least one of its domains is not
//! registered. Groups where every TLD came back registered are dropped.

use crate::types::{CheckResult, DomainStatus, RunSummary};
use serde::Serialize;
use std::collections::HashMap;

/// All results for one base name, in check (TLD) order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseGroup {
    pub base: String,
    pub results: Vec<CheckResult>,
}

impl BaseGroup {
    /// True when at least one member is not registered.
    pub fn is_interesting(&self) -> bool {
        self.results.iter().any(|r| !r.is_registered())
    }
}

/// Insertion-ordered mapping from base name to its results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BaseGroups {
    groups: Vec<BaseGroup>,
}

impl BaseGroups {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Results for a base name, if present.
    pub fn get(&self, base: &str) -> Option<&[CheckResult]> {
        self.groups
            .iter()
            .find(|g| g.base == base)
            .map(|g| g.results.as_slice())
    }

    /// Base names in first-seen order.
    pub fn bases(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.base.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BaseGroup> {
        self.groups.iter()
    }

    /// Every result across all groups, group by group.
    pub fn results(&self) -> impl Iterator<Item = &CheckResult> {
        self.groups.iter().flat_map(|g| g.results.iter())
    }
}

impl<'a> IntoIterator for &'a BaseGroups {
    type Item = &'a BaseGroup;
    type IntoIter = std::slice::Iter<'a, BaseGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Group results by base, keeping first-seen base order and per-base order.
pub fn group_by_base(results: &[CheckResult]) -> BaseGroups {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<BaseGroup> = Vec::new();

    for result in results {
        let slot = *index.entry(result.base.as_str()).or_insert_with(|| {
            groups.push(BaseGroup {
                base: result.base.clone(),
                results: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].results.push(result.clone());
    }

    BaseGroups { groups }
}

/// Keep only groups with at least one non-registered member.
pub fn filter_interesting(grouped: BaseGroups) -> BaseGroups {
    BaseGroups {
        groups: grouped
            .groups
            .into_iter()
            .filter(BaseGroup::is_interesting)
            .collect(),
    }
}

/// Group by base and drop groups where everything is registered.
///
/// Pure: the same input always produces the same mapping.
pub fn group_and_filter(results: &[CheckResult]) -> BaseGroups {
    filter_interesting(group_by_base(results))
}

/// Count statuses over all results and the number of interesting groups.
pub fn summarize(results: &[CheckResult], interesting: &BaseGroups) -> RunSummary {
    let count = |status: DomainStatus| results.iter().filter(|r| r.status == status).count();

    RunSummary {
        total_checked: results.len(),
        available_count: count(DomainStatus::Available),
        possible_count: count(DomainStatus::PossibleAvailable),
        registered_count: count(DomainStatus::Registered),
        interesting_count: interesting.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CheckMethod;
    use DomainStatus::*;

    const TLDS: [&str; 4] = [".com", ".app", ".ai", ".so"];

    fn results_for(base: &str, statuses: [DomainStatus; 4]) -> Vec<CheckResult> {
        TLDS.iter()
            .zip(statuses)
            .map(|(tld, status)| CheckResult {
                domain: format!("{}{}", base, tld),
                base: base.to_string(),
                status,
                method_used: CheckMethod::Rdap,
                check_duration: None,
            })
            .collect()
    }

    #[test]
    fn test_one_non_registered_keeps_group() {
        let results = results_for("acme", [Registered, Registered, Available, Registered]);
        let groups = group_and_filter(&results);

        assert_eq!(groups.len(), 1);
        let acme = groups.get("acme").unwrap();
        assert_eq!(acme.len(), 4);
        assert_eq!(acme[2].domain, "acme.ai");
    }

    #[test]
    fn test_all_registered_dropped() {
        let results = results_for("google", [Registered; 4]);
        assert!(group_and_filter(&results).is_empty());
    }

    #[test]
    fn test_possible_available_counts_as_interesting() {
        let results = results_for("zeta", [Registered, PossibleAvailable, Registered, Registered]);
        assert_eq!(group_and_filter(&results).len(), 1);
    }

    #[test]
    fn test_order_preserved() {
        let mut results = Vec::new();
        results.extend(results_for("zulu", [Available; 4]));
        results.extend(results_for("alpha", [Registered; 4]));
        results.extend(results_for("mike", [Registered, Registered, Registered, Available]));

        let grouped = group_by_base(&results);
        assert_eq!(grouped.bases().collect::<Vec<_>>(), vec!["zulu", "alpha", "mike"]);

        let interesting = filter_interesting(grouped);
        assert_eq!(interesting.bases().collect::<Vec<_>>(), vec!["zulu", "mike"]);
        let mike: Vec<&str> = interesting
            .get("mike")
            .unwrap()
            .iter()
            .map(|r| r.domain.as_str())
            .collect();
        assert_eq!(mike, vec!["mike.com", "mike.app", "mike.ai", "mike.so"]);
    }

    #[test]
    fn test_interleaved_bases_grouped() {
        let a = results_for("acme", [Available; 4]);
        let b = results_for("beta", [Available; 4]);
        let interleaved = vec![a[0].clone(), b[0].clone(), a[1].clone(), b[1].clone()];

        let groups = group_by_base(&interleaved);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get("acme").unwrap().len(), 2);
        assert_eq!(groups.bases().next(), Some("acme"));
    }

    #[test]
    fn test_idempotent() {
        let mut results = results_for("acme", [Registered, Registered, Available, Registered]);
        results.extend(results_for("google", [Registered; 4]));

        assert_eq!(group_and_filter(&results), group_and_filter(&results));
    }

    #[test]
    fn test_summarize() {
        let mut results = results_for("acme", [Registered, Registered, Available, PossibleAvailable]);
        results.extend(results_for("google", [Registered; 4]));

        let interesting = group_and_filter(&results);
        let summary = summarize(&results, &interesting);

        assert_eq!(summary.total_checked, 8);
        assert_eq!(summary.available_count, 1);
        assert_eq!(summary.possible_count, 1);
        assert_eq!(summary.registered_count, 6);
        assert_eq!(summary.interesting_count, 1);
    }

    #[test]
    fn test_empty_input() {
        let groups = group_and_filter(&[]);
        assert!(groups.is_empty());
        assert_eq!(summarize(&[], &groups), RunSummary::default());
    }
}
