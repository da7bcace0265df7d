// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Target adapter capability contract
//!
//! An adapter knows how to log in to one target application, pull the session
//! token out of the login response, check whether a token still grants access
//! and log it out. It is the only extension point of the harness.

use crate::errors::AdapterError;
use crate::types::{Credential, Token};

#[async_trait::async_trait]
pub trait TargetAdapter: Send + Sync {
    /// Raw login response handed from `authenticate` to `extract_token`
    type Response: Send;

    /// Attempt a login. Only adapter-internal faults are errors; a rejected
    /// login must surface through `validate` on the extracted token.
    async fn authenticate(&self, credential: &Credential) -> Result<Self::Response, AdapterError>;

    /// Parse the session token out of a login response. An unusable response
    /// yields a token that fails `validate`.
    fn extract_token(&self, response: Self::Response) -> Token;

    /// Whether the token currently grants access to a protected resource,
    /// as decided by the target.
    async fn validate(&self, token: &Token) -> Result<bool, AdapterError>;

    /// Best-effort logout. Targets without logout implement this as a no-op.
    async fn invalidate(&self, token: &Token) -> Result<(), AdapterError>;

    /// Adapter name for display
    fn name(&self) -> &str {
        "custom"
    }
}
