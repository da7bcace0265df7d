// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Session Token Test Battery
 * Login/validate/logout choreography shared by every token test
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::adapter::TargetAdapter;
use crate::errors::{AuditError, AuditResult};
use crate::types::{Credential, CredentialSet, TestVerdict, Token};
use tracing::{debug, warn};

pub mod known_values;
pub mod nonrandom;
pub mod persistence;
pub mod registry;
pub mod sequential_tokens;
pub mod static_tokens;
pub mod validation_bypass;

pub use known_values::KnownValuesTest;
pub use nonrandom::NonRandomTest;
pub use persistence::PersistenceTest;
pub use registry::TestRegistry;
pub use sequential_tokens::SequentialTokensTest;
pub use static_tokens::StaticTokensTest;
pub use validation_bypass::ValidationBypassTest;

/// Tokens collected for the randomness battery unless configured otherwise
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// A single black-box token test. `failed == true` in the verdict means a weakness.
#[async_trait::async_trait]
pub trait TokenTest<A: TargetAdapter>: Send + Sync {
    /// Registry name, also printed before the test runs at high verbosity
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &TestContext<'_, A>) -> AuditResult<TestVerdict>;
}

/// Read-only view handed to every test
pub struct TestContext<'a, A: TargetAdapter> {
    pub adapter: &'a A,
    pub credentials: &'a CredentialSet,
    pub sample_size: usize,
}

impl<'a, A: TargetAdapter> TestContext<'a, A> {
    pub fn new(adapter: &'a A, credentials: &'a CredentialSet) -> Self {
        Self {
            adapter,
            credentials,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Authenticate and parse the token, without checking it
    pub async fn login(&self, credential: &Credential) -> AuditResult<Token> {
        let response = self.adapter.authenticate(credential).await?;
        let token = self.adapter.extract_token(response);
        debug!("[Session] {} issued token of {} bytes", self.adapter.name(), token.len());
        Ok(token)
    }

    /// Log in and require the fresh token to validate.
    ///
    /// A fresh token that does not validate means the adapter or credentials
    /// are broken, which is fatal rather than a finding.
    pub async fn checked_login(&self, credential: &Credential) -> AuditResult<Token> {
        let token = self.login(credential).await?;
        if !self.adapter.validate(&token).await? {
            let identity = self
                .credentials
                .iter()
                .position(|c| c == credential)
                .unwrap_or(0);
            warn!("[Session] Fresh token for identity #{} did not validate", identity);
            return Err(AuditError::InvalidSession { identity });
        }
        Ok(token)
    }

    /// Checked login followed by logout; the token is kept for comparison only
    pub async fn fresh_token(&self, credential: &Credential) -> AuditResult<Token> {
        let token = self.checked_login(credential).await?;
        self.adapter.invalidate(&token).await?;
        Ok(token)
    }
}
