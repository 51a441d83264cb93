//! Lookup protocols used to decide domain availability.
//!
//! Each stage sits behind a trait so the checker can be driven by fakes in
//! tests. Implementations never fail: network and parse problems come back
//! as [`Probe::Inconclusive`].

use crate::types::Probe;
use async_trait::async_trait;

/// RDAP (Registration Data Access Protocol) implementation
pub mod rdap;

/// NS record fallback
pub mod dns;

pub use dns::{classify_ns_answer, DnsClient, NsAnswer};
pub use rdap::{classify_rdap_response, extract_domain_info, RdapClient};

/// First stage: ask the registration data service about a domain.
#[async_trait]
pub trait RegistryLookup: Send + Sync {
    async fn lookup(&self, domain: &str) -> Probe;
}

/// Second stage: look for NS records.
#[async_trait]
pub trait NsLookup: Send + Sync {
    async fn lookup_ns(&self, domain: &str) -> Probe;
}
