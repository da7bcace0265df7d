// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::engine::FaultPolicy;
use crate::scanners::DEFAULT_SAMPLE_SIZE;
use crate::types::{Credential, Verbosity};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuditConfig {
    #[serde(default)]
    pub verbosity: Verbosity,

    #[validate(range(min = 1, max = 1000))]
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    #[serde(default)]
    pub fault_policy: FaultPolicy,

    /// Tests that make no sense for this target, e.g. `is_persistent` without logout
    #[serde(default)]
    pub disabled_tests: Vec<String>,

    #[validate(length(min = 1))]
    pub credentials: Vec<Credential>,

    #[validate]
    pub target: TargetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TargetConfig {
    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[validate(length(min = 1))]
    pub host: String,

    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    #[validate(range(min = 1, max = 3600))]
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[validate]
    pub login: LoginConfig,

    #[validate]
    pub check: CheckConfig,

    #[serde(default)]
    pub logout: Option<LogoutConfig>,
}

impl TargetConfig {
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormEncoding {
    #[default]
    Urlencoded,
    Multipart,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginConfig {
    #[validate(length(min = 1))]
    pub path: String,

    #[serde(default)]
    pub encoding: FormEncoding,

    /// Credential field name -> form field name; unmapped fields are sent as-is
    #[serde(default)]
    pub field_names: BTreeMap<String, String>,

    /// Constant form fields sent with every login
    #[serde(default)]
    pub extra_fields: BTreeMap<String, String>,

    /// Regex over the response body; capture group 1 is the token
    #[serde(default)]
    pub token_pattern: Option<String>,

    /// Cookie carrying the token in `Set-Cookie`
    #[serde(default)]
    pub token_cookie: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckConfig {
    #[validate(length(min = 1))]
    pub path: String,

    #[serde(default = "default_token_header")]
    pub token_header: String,

    /// Header value, `{token}` is replaced with the token
    #[serde(default = "default_token_template")]
    pub token_template: String,

    /// Regex the protected page matches when the token is accepted; 2xx otherwise
    #[serde(default)]
    pub success_pattern: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutConfig {
    pub path: String,

    #[serde(default)]
    pub method: HttpMethod,
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_token_header() -> String {
    "Cookie".to_string()
}

fn default_token_template() -> String {
    "session={token}".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml() {
        let config: AuditConfig = toml::from_str(
            r#"
            [[credentials]]
            user = "admin"
            pass = "hunter2"

            [target]
            host = "127.0.0.1"
            port = 8080

            [target.login]
            path = "/login.php"
            token_pattern = 'createCookie\("p", "(.{32})"'

            [target.check]
            path = "/status_device.php"
            "#,
        )
        .unwrap();

        assert_eq!(config.verbosity, Verbosity::Low);
        assert_eq!(config.sample_size, 10);
        assert_eq!(config.fault_policy, FaultPolicy::Abort);
        assert_eq!(config.credentials[0].username(), Some("admin"));
        assert_eq!(config.target.scheme, "http");
        assert_eq!(config.target.timeout_secs, 30);
        assert_eq!(config.target.login.encoding, FormEncoding::Urlencoded);
        assert_eq!(config.target.check.token_header, "Cookie");
        assert!(config.target.logout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_urls() {
        let target = TargetConfig {
            scheme: "https".to_string(),
            host: "router.local".to_string(),
            port: 8443,
            timeout_secs: 5,
            login: LoginConfig {
                path: "/login".to_string(),
                encoding: FormEncoding::Multipart,
                field_names: BTreeMap::new(),
                extra_fields: BTreeMap::new(),
                token_pattern: None,
                token_cookie: Some("sid".to_string()),
            },
            check: CheckConfig {
                path: "status".to_string(),
                token_header: default_token_header(),
                token_template: default_token_template(),
                success_pattern: None,
            },
            logout: None,
        };

        assert_eq!(target.base_url(), "https://router.local:8443");
        assert_eq!(target.url("/login"), "https://router.local:8443/login");
        assert_eq!(target.url("status"), "https://router.local:8443/status");
    }

    #[test]
    fn test_empty_credentials_fail_validation() {
        let config: AuditConfig = serde_json::from_str(
            r#"{
                "credentials": [],
                "target": {
                    "host": "127.0.0.1",
                    "port": 80,
                    "login": { "path": "/login", "token_cookie": "sid" },
                    "check": { "path": "/" }
                }
            }"#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }
}
