// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{AuditError, AuditResult};

/// Field names recognised as the identity's username
pub const USERNAME_FIELDS: &[&str] = &["user", "username"];

/// Field names recognised as the identity's password
pub const PASSWORD_FIELDS: &[&str] = &["pass", "password"];

/// Opaque key-value identity handed to the adapter for authentication
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential {
    fields: BTreeMap<String, String>,
}

impl Credential {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for the common username/password identity
    pub fn user_pass(username: &str, password: &str) -> Self {
        Self::new().with_field("user", username).with_field("pass", password)
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn username(&self) -> Option<&str> {
        USERNAME_FIELDS.iter().find_map(|name| self.get(name))
    }

    pub fn password(&self) -> Option<&str> {
        PASSWORD_FIELDS.iter().find_map(|name| self.get(name))
    }
}

impl From<BTreeMap<String, String>> for Credential {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }
}

/// Ordered, non-empty list of identities. The first entry is the primary identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSet {
    credentials: Vec<Credential>,
}

impl CredentialSet {
    pub fn new(credentials: Vec<Credential>) -> AuditResult<Self> {
        if credentials.is_empty() {
            return Err(AuditError::Configuration(
                "credential set must contain at least one identity".to_string(),
            ));
        }
        Ok(Self { credentials })
    }

    pub fn primary(&self) -> &Credential {
        &self.credentials[0]
    }

    /// Second identity, used for cross-user comparisons
    pub fn secondary(&self) -> Option<&Credential> {
        self.credentials.get(1)
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Credential> {
        self.credentials.iter()
    }
}

/// Session token as issued by the target. No structure is assumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Character-wise reversal, a well-formed but tampered copy of the token
    pub fn reversed(&self) -> Token {
        Token(self.0.chars().rev().collect())
    }

    /// Parses the whole token as a signed decimal integer of any length.
    ///
    /// Returns the sign and the magnitude digits without leading zeros.
    /// Partially numeric tokens such as `12ab` are not integers.
    pub fn as_decimal(&self) -> Option<(bool, &str)> {
        let (negative, digits) = match self.0.as_bytes().first() {
            Some(b'-') => (true, &self.0[1..]),
            Some(b'+') => (false, &self.0[1..]),
            _ => (false, self.0.as_str()),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let magnitude = digits.trim_start_matches('0');
        if magnitude.is_empty() {
            return Some((false, "0"));
        }
        Some((negative, magnitude))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token(value)
    }
}

/// Console verbosity. Controls which lines are printed, never what a test decides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    #[default]
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Verbosity {
    pub fn from_level(level: u8) -> Self {
        match level {
            0 | 1 => Verbosity::Low,
            2 => Verbosity::Medium,
            _ => Verbosity::High,
        }
    }

    pub fn level(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for Verbosity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verbosity::Low => write!(f, "low"),
            Verbosity::Medium => write!(f, "medium"),
            Verbosity::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Verbosity {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" | "1" => Ok(Verbosity::Low),
            "medium" | "2" => Ok(Verbosity::Medium),
            "high" | "3" => Ok(Verbosity::High),
            other => Err(AuditError::Configuration(format!("unknown verbosity '{}'", other))),
        }
    }
}

/// One line of test output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum VerdictMessage {
    /// A weakness, always printed as `[!]`
    Finding(String),
    /// Supporting detail, printed as `[?]` from medium verbosity
    Diagnostic(String),
}

/// Outcome of a single test. `failed == true` means a weakness was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestVerdict {
    pub failed: bool,
    pub messages: Vec<VerdictMessage>,
}

impl TestVerdict {
    pub fn pass() -> Self {
        Self::default()
    }

    /// Records a finding and marks the verdict failed
    pub fn finding(&mut self, text: impl Into<String>) {
        self.failed = true;
        self.messages.push(VerdictMessage::Finding(text.into()));
    }

    pub fn diagnostic(&mut self, text: impl Into<String>) {
        self.messages.push(VerdictMessage::Diagnostic(text.into()));
    }

    pub fn findings(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().filter_map(|m| match m {
            VerdictMessage::Finding(text) => Some(text.as_str()),
            VerdictMessage::Diagnostic(_) => None,
        })
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().filter_map(|m| match m {
            VerdictMessage::Diagnostic(text) => Some(text.as_str()),
            VerdictMessage::Finding(_) => None,
        })
    }
}

/// How a registered test ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestOutcome {
    Completed(TestVerdict),
    /// Adapter or configuration fault, only recorded under the isolate policy
    Faulted(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub name: String,
    pub outcome: TestOutcome,
}

/// Result of a full run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub records: Vec<TestRecord>,
}

impl RunSummary {
    /// Number of tests that found a weakness
    pub fn failures(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(&r.outcome, TestOutcome::Completed(v) if v.failed))
            .count()
    }

    pub fn faulted(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, TestOutcome::Faulted(_)))
            .map(|r| r.name.as_str())
            .collect()
    }

    pub fn verdict(&self, name: &str) -> Option<&TestVerdict> {
        self.records.iter().find(|r| r.name == name).and_then(|r| match &r.outcome {
            TestOutcome::Completed(v) => Some(v),
            TestOutcome::Faulted(_) => None,
        })
    }
}
