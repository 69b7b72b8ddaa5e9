//! Domain DTOs for the selected-hostnames resource.
//!
//! # Design
//! Field names follow the wire schema (`configId`, `hostnameList`) through
//! `rename_all` so the Rust side keeps snake_case. IDs are signed so that
//! zero and negative input can be represented and rejected by validation
//! instead of being unrepresentable at the call site.
//!
//! The mock-server crate defines its own copies of these types; integration
//! tests catch any schema drift between the two.

use serde::{Deserialize, Serialize};

use crate::validation::{require_positive_ids, ValidationError};

/// A hostname that may be protected by a security configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Hostname {
    pub hostname: String,
}

impl Hostname {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.hostname
    }
}

impl From<&str> for Hostname {
    fn from(hostname: &str) -> Self {
        Self::new(hostname)
    }
}

impl From<String> for Hostname {
    fn from(hostname: String) -> Self {
        Self { hostname }
    }
}

/// Retrieves the selected hostnames of a configuration version.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetSelectedHostnamesRequest {
    pub config_id: i64,
    pub version: i64,
}

impl GetSelectedHostnamesRequest {
    pub fn new(config_id: i64, version: i64) -> Self {
        Self { config_id, version }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_positive_ids(self.config_id, self.version)
    }
}

/// Returned from a call to `get_selected_hostnames`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetSelectedHostnamesResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hostname_list: Vec<Hostname>,
}

/// Same wire call as [`GetSelectedHostnamesRequest`], kept as its own type
/// for call-site clarity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetSelectedHostnameRequest {
    pub config_id: i64,
    pub version: i64,
}

impl GetSelectedHostnameRequest {
    pub fn new(config_id: i64, version: i64) -> Self {
        Self { config_id, version }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_positive_ids(self.config_id, self.version)
    }
}

/// Returned from a call to `get_selected_hostname`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetSelectedHostnameResponse {
    #[serde(default)]
    pub hostname_list: Vec<Hostname>,
}

/// Replaces the selected hostnames of a configuration version. The server
/// treats `hostname_list` as the complete desired set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSelectedHostnameRequest {
    pub config_id: i64,
    pub version: i64,
    pub hostname_list: Vec<Hostname>,
}

impl UpdateSelectedHostnameRequest {
    pub fn new<I, H>(config_id: i64, version: i64, hostnames: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<Hostname>,
    {
        Self {
            config_id,
            version,
            hostname_list: hostnames.into_iter().map(Into::into).collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_positive_ids(self.config_id, self.version)
    }
}

/// Returned from a call to `update_selected_hostname`. Reflects the server's
/// post-update state, which may differ from what was sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSelectedHostnameResponse {
    #[serde(default)]
    pub hostname_list: Vec<Hostname>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_serializes_wire_names() {
        let req = UpdateSelectedHostnameRequest::new(1, 2, ["a.com", "b.com"]);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "configId": 1,
                "version": 2,
                "hostnameList": [{"hostname": "a.com"}, {"hostname": "b.com"}]
            })
        );
    }

    #[test]
    fn list_response_missing_hostname_list_is_empty() {
        let resp: GetSelectedHostnamesResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.hostname_list.is_empty());
    }

    #[test]
    fn list_response_omits_empty_hostname_list() {
        let json = serde_json::to_string(&GetSelectedHostnamesResponse::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn single_response_keeps_empty_hostname_list() {
        let json = serde_json::to_string(&GetSelectedHostnameResponse::default()).unwrap();
        assert_eq!(json, r#"{"hostnameList":[]}"#);
    }

    #[test]
    fn hostname_ignores_unknown_fields() {
        let h: Hostname =
            serde_json::from_str(r#"{"hostname":"www.example.com","extra":true}"#).unwrap();
        assert_eq!(h.as_str(), "www.example.com");
    }
}
