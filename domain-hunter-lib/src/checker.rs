//! Main domain checker implementation.
//!
//! [`DomainChecker`] runs the per-domain resolution chain:
//!
//! 1. RDAP lookup. "Not found" is available; a record with an active status,
//!    nameservers or entities is registered. Anything else falls through.
//! 2. NS lookup. Records mean registered; NXDOMAIN or no answer means
//!    available. Anything else falls through.
//! 3. Possibly available.
//!
//! Every check ends in exactly one [`DomainStatus`]. Lookup failures never
//! reach the caller, so one flaky lookup cannot abort a batch.

use crate::error::DomainHunterError;
use crate::protocols::{DnsClient, NsLookup, RdapClient, RegistryLookup};
use crate::rate_limit::{FixedDelay, RateLimit};
use crate::types::{CandidateDomain, CheckMethod, CheckResult, DomainStatus, HuntConfig, Probe};
use std::time::Instant;
use tracing::{debug, info};

/// Coordinates the lookup stages and the pause between checks.
///
/// # Example
///
/// ```rust,no_run
/// use domain_hunter_lib::{DomainChecker, HuntConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let checker = DomainChecker::with_config(HuntConfig::default())?;
///     let result = checker.check_domain("acme", "acme.com").await;
///     println!("{}: {}", result.domain, result.status);
///     Ok(())
/// }
/// ```
pub struct DomainChecker {
    /// First stage lookup
    registry: Box<dyn RegistryLookup>,
    /// Fallback lookup
    dns: Box<dyn NsLookup>,
    /// Applied after every check
    rate_limit: Box<dyn RateLimit>,
}

impl DomainChecker {
    /// Create a checker with the real RDAP and DNS clients.
    pub fn with_config(config: HuntConfig) -> Result<Self, DomainHunterError> {
        let rdap = RdapClient::with_config(config.rdap_base_url.clone(), config.rdap_timeout)?;
        let dns = DnsClient::new(config.dns_timeout);

        Ok(Self::from_parts(rdap, dns, FixedDelay::new(config.delay)))
    }

    /// Create a checker from any lookup and pacing implementations.
    pub fn from_parts<R, D, L>(registry: R, dns: D, rate_limit: L) -> Self
    where
        R: RegistryLookup + 'static,
        D: NsLookup + 'static,
        L: RateLimit + 'static,
    {
        Self {
            registry: Box::new(registry),
            dns: Box::new(dns),
            rate_limit: Box::new(rate_limit),
        }
    }

    /// Resolve the status of one domain. Does not pause afterwards.
    pub async fn check_domain(&self, base: &str, domain: &str) -> CheckResult {
        let start_time = Instant::now();
        let (status, method_used) = self.resolve(domain).await;

        CheckResult {
            domain: domain.to_string(),
            base: base.to_string(),
            status,
            method_used,
            check_duration: Some(start_time.elapsed()),
        }
    }

    async fn resolve(&self, domain: &str) -> (DomainStatus, CheckMethod) {
        match self.registry.lookup(domain).await {
            Probe::Conclusive(status) => return (status, CheckMethod::Rdap),
            Probe::Inconclusive(reason) => {
                debug!(domain, %reason, "RDAP inconclusive, trying DNS");
            }
        }

        match self.dns.lookup_ns(domain).await {
            Probe::Conclusive(status) => (status, CheckMethod::Dns),
            Probe::Inconclusive(reason) => {
                debug!(domain, %reason, "DNS inconclusive");
                (DomainStatus::PossibleAvailable, CheckMethod::Unknown)
            }
        }
    }

    /// Check one candidate, then pause.
    async fn check_and_pause(&self, candidate: &CandidateDomain) -> CheckResult {
        let result = self.check_domain(&candidate.base, &candidate.domain).await;
        info!(
            domain = %result.domain,
            status = %result.status,
            method = %result.method_used,
            "Checked"
        );
        self.rate_limit.pause().await;
        result
    }

    /// Check candidates strictly in order, pausing after each one.
    ///
    /// Returns exactly one result per candidate, in input order.
    pub async fn check_candidates(&self, candidates: &[CandidateDomain]) -> Vec<CheckResult> {
        let mut results = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            results.push(self.check_and_pause(candidate).await);
        }

        results
    }

}
