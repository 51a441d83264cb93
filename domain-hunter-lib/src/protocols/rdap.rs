//! RDAP (Registration Data Access Protocol) lookup.
//!
//! Requests go to `{base_url}/domain/{domain}`. The default base,
//! `https://rdap.org`, redirects to the authoritative registry, so no
//! per-TLD endpoint table is needed; reqwest follows the redirect.
//!
//! Only a few fields of the response are inspected. Anything that is not a
//! clear "not found" or a clear registration signal is inconclusive and
//! handed to the DNS fallback.

use crate::error::DomainHunterError;
use crate::protocols::RegistryLookup;
use crate::types::{DomainInfo, DomainStatus, Probe, DEFAULT_RDAP_BASE_URL};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// RDAP client for checking domain registration.
#[derive(Clone)]
pub struct RdapClient {
    /// HTTP client for making RDAP requests
    http_client: reqwest::Client,
    /// Service root, without trailing slash
    base_url: String,
    /// Per-lookup timeout
    timeout: Duration,
}

/// Raw outcome of one RDAP request: the status code and, if it parsed, the JSON body.
#[derive(Debug, Clone)]
struct RdapResponse {
    status: StatusCode,
    body: Option<serde_json::Value>,
}

impl RdapClient {
    /// Create a new RDAP client against rdap.org with a 10 second timeout.
    pub fn new() -> Result<Self, DomainHunterError> {
        Self::with_config(DEFAULT_RDAP_BASE_URL, Duration::from_secs(10))
    }

    /// Create a new RDAP client with custom settings.
    pub fn with_config<S: Into<String>>(
        base_url: S,
        timeout: Duration,
    ) -> Result<Self, DomainHunterError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout.saturating_add(Duration::from_secs(2))) // Add buffer for HTTP timeout
            .user_agent(concat!("domain-hunter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                DomainHunterError::network_with_source(
                    "Failed to create RDAP HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the lookup URL for a domain.
    pub fn domain_url(&self, domain: &str) -> String {
        format!("{}/domain/{}", self.base_url, domain)
    }

    /// Make an RDAP request. A 200 with an unparseable body yields `body: None`.
    async fn make_rdap_request(&self, domain: &str) -> Result<RdapResponse, DomainHunterError> {
        let url = self.domain_url(domain);
        debug!(%url, "RDAP request");

        let response = self
            .http_client
            .get(&url)
            .header(ACCEPT, "application/rdap+json")
            .send()
            .await
            .map_err(|e| DomainHunterError::rdap(domain, format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = if status == StatusCode::OK {
            match response.json::<serde_json::Value>().await {
                Ok(json) => Some(json),
                Err(e) => {
                    debug!(domain, error = %e, "Failed to parse RDAP body");
                    None
                }
            }
        } else {
            None
        };

        Ok(RdapResponse { status, body })
    }
}

#[async_trait]
impl RegistryLookup for RdapClient {
    async fn lookup(&self, domain: &str) -> Probe {
        match tokio::time::timeout(self.timeout, self.make_rdap_request(domain)).await {
            Ok(Ok(response)) => {
                if let Some(json) = &response.body {
                    let info = extract_domain_info(json);
                    debug!(
                        domain,
                        registrar = ?info.registrar,
                        created = ?info.creation_date,
                        expires = ?info.expiration_date,
                        status = ?info.status,
                        nameservers = info.nameservers.len(),
                        "RDAP record"
                    );
                }
                classify_rdap_response(response.status.as_u16(), response.body.as_ref())
            }
            Ok(Err(e)) => Probe::inconclusive(e.to_string()),
            Err(_) => Probe::inconclusive(
                DomainHunterError::timeout("RDAP request", self.timeout).to_string(),
            ),
        }
    }
}

/// Classify an RDAP response.
///
/// - 404: available.
/// - 200 with a JSON body: registered if any `status` entry contains
///   "active" or "ok" (case-insensitive), otherwise registered if it lists
///   nameservers or entities, otherwise inconclusive.
/// - Anything else, including a 200 whose body did not parse: inconclusive.
pub fn classify_rdap_response(status: u16, body: Option<&serde_json::Value>) -> Probe {
    match status {
        404 => Probe::Conclusive(DomainStatus::Available),
        200 => {
            let Some(json) = body else {
                return Probe::inconclusive("RDAP returned an unparseable body");
            };

            if has_active_status(json) {
                Probe::Conclusive(DomainStatus::Registered)
            } else if has_records(json, "nameservers") || has_records(json, "entities") {
                Probe::Conclusive(DomainStatus::Registered)
            } else {
                Probe::inconclusive("RDAP record has no status, nameservers or entities")
            }
        }
        code => Probe::inconclusive(format!("RDAP returned HTTP {}", code)),
    }
}

fn has_active_status(json: &serde_json::Value) -> bool {
    json.get("status")
        .and_then(|s| s.as_array())
        .map(|statuses| {
            statuses.iter().filter_map(|s| s.as_str()).any(|s| {
                let s = s.to_lowercase();
                s.contains("active") || s.contains("ok")
            })
        })
        .unwrap_or(false)
}

fn has_records(json: &serde_json::Value, key: &str) -> bool {
    json.get(key)
        .and_then(|v| v.as_array())
        .is_some_and(|records| !records.is_empty())
}

/// Extract domain information from an RDAP JSON response.
pub fn extract_domain_info(json: &serde_json::Value) -> DomainInfo {
    let mut info = DomainInfo::default();

    // Registrar from entities
    if let Some(entities) = json.get("entities").and_then(|e| e.as_array()) {
        for entity in entities {
            let is_registrar = entity
                .get("roles")
                .and_then(|r| r.as_array())
                .is_some_and(|roles| roles.iter().any(|role| role.as_str() == Some("registrar")));

            if is_registrar {
                if let Some(name) = extract_vcard_name(entity).or_else(|| extract_entity_identifier(entity)) {
                    info.registrar = Some(name);
                    break;
                }
            }
        }
    }

    // Dates from events
    if let Some(events) = json.get("events").and_then(|e| e.as_array()) {
        for event in events {
            if let (Some(event_action), Some(event_date)) = (
                event.get("eventAction").and_then(|a| a.as_str()),
                event.get("eventDate").and_then(|d| d.as_str()),
            ) {
                match event_action {
                    "registration" => info.creation_date = Some(event_date.to_string()),
                    "expiration" => info.expiration_date = Some(event_date.to_string()),
                    "last update of RDAP database" | "last changed" => {
                        info.updated_date = Some(event_date.to_string())
                    }
                    _ => {}
                }
            }
        }
    }

    if let Some(statuses) = json.get("status").and_then(|s| s.as_array()) {
        info.status = statuses
            .iter()
            .filter_map(|s| s.as_str())
            .map(String::from)
            .collect();
    }

    if let Some(nameservers) = json.get("nameservers").and_then(|ns| ns.as_array()) {
        info.nameservers = nameservers
            .iter()
            .filter_map(|ns| ns.get("ldhName").and_then(|name| name.as_str()))
            .map(String::from)
            .collect();
    }

    info
}

/// Extract the `fn` (formatted name) from an entity's vCard.
fn extract_vcard_name(entity: &serde_json::Value) -> Option<String> {
    let items = entity
        .get("vcardArray")
        .and_then(|v| v.as_array())
        .and_then(|a| a.get(1))
        .and_then(|a| a.as_array())?;

    items.iter().filter_map(|item| item.as_array()).find_map(|item| {
        if item.len() >= 4 && item.first().and_then(|f| f.as_str()) == Some("fn") {
            item.get(3).and_then(|n| n.as_str()).map(String::from)
        } else {
            None
        }
    })
}

/// Entity identifier from publicIds, handle, or name.
fn extract_entity_identifier(entity: &serde_json::Value) -> Option<String> {
    entity
        .get("publicIds")
        .and_then(|p| p.as_array())
        .and_then(|ids| ids.first())
        .and_then(|id| id.get("identifier"))
        .and_then(|i| i.as_str())
        .or_else(|| entity.get("handle").and_then(|h| h.as_str()))
        .or_else(|| entity.get("name").and_then(|n| n.as_str()))
        .map(String::from)
}
