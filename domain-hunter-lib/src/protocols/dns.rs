//! NS record lookup, the fallback when RDAP is inconclusive.
//!
//! A delegated domain has NS records; NXDOMAIN or an empty NOERROR answer
//! means nobody has registered it. SERVFAIL, REFUSED and every other resolver
//! failure is inconclusive.

use crate::error::DomainHunterError;
use crate::protocols::NsLookup;
use crate::types::{DomainStatus, Probe};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::op::ResponseCode;
use trust_dns_resolver::TokioAsyncResolver;

/// What the resolver said about a domain's NS records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NsAnswer {
    /// At least one NS record
    Records(usize),
    /// NXDOMAIN
    NoSuchDomain,
    /// NOERROR with no NS records
    NoAnswer,
    /// SERVFAIL, REFUSED, other error rcodes, network trouble, timeout
    Failed(String),
}

impl NsAnswer {
    fn from_resolve_error(err: &ResolveError) -> Self {
        match err.kind() {
            ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
                ResponseCode::NXDomain => NsAnswer::NoSuchDomain,
                ResponseCode::NoError => NsAnswer::NoAnswer,
                _ => NsAnswer::Failed(err.to_string()),
            },
            _ => NsAnswer::Failed(err.to_string()),
        }
    }
}

/// Map a resolver answer to a lookup outcome.
pub fn classify_ns_answer(answer: &NsAnswer) -> Probe {
    match answer {
        NsAnswer::Records(0) => Probe::Conclusive(DomainStatus::Available),
        NsAnswer::Records(_) => Probe::Conclusive(DomainStatus::Registered),
        NsAnswer::NoSuchDomain | NsAnswer::NoAnswer => Probe::Conclusive(DomainStatus::Available),
        NsAnswer::Failed(reason) => Probe::inconclusive(reason.clone()),
    }
}

/// DNS client backed by an async tokio resolver.
#[derive(Clone)]
pub struct DnsClient {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl DnsClient {
    /// Resolver using the system configuration, falling back to the
    /// library's default upstreams if it cannot be read.
    pub fn new(timeout: Duration) -> Self {
        let (config, mut opts) = match trust_dns_resolver::system_conf::read_system_conf() {
            Ok(system) => system,
            Err(e) => {
                debug!(error = %e, "Could not read system resolver config, using defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };
        opts.timeout = timeout;
        opts.attempts = 1;

        Self::with_resolver_config(config, opts, timeout)
    }

    /// Resolver with an explicit upstream configuration.
    pub fn with_resolver_config(config: ResolverConfig, opts: ResolverOpts, timeout: Duration) -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn query_ns(&self, domain: &str) -> NsAnswer {
        // Fully qualified so search domains are never appended
        let fqdn = format!("{}.", domain.trim_end_matches('.'));

        match tokio::time::timeout(self.timeout, self.resolver.ns_lookup(fqdn.as_str())).await {
            Ok(Ok(lookup)) => NsAnswer::Records(lookup.iter().count()),
            Ok(Err(e)) => NsAnswer::from_resolve_error(&e),
            Err(_) => NsAnswer::Failed(
                DomainHunterError::timeout("NS lookup", self.timeout).to_string(),
            ),
        }
    }
}

#[async_trait]
impl NsLookup for DnsClient {
    async fn lookup_ns(&self, domain: &str) -> Probe {
        let answer = self.query_ns(domain).await;
        debug!(domain, ?answer, "NS lookup");
        classify_ns_answer(&answer)
    }
}
