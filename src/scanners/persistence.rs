// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Logout invalidation: a token must stop working once it has been logged out.

use super::{TestContext, TokenTest};
use crate::adapter::TargetAdapter;
use crate::errors::AuditResult;
use crate::types::TestVerdict;
use tracing::info;

pub struct PersistenceTest;

#[async_trait::async_trait]
impl<A: TargetAdapter> TokenTest<A> for PersistenceTest {
    fn name(&self) -> &'static str {
        "is_persistent"
    }

    async fn run(&self, ctx: &TestContext<'_, A>) -> AuditResult<TestVerdict> {
        info!("[Persistence] Testing logout invalidation");

        let token = ctx.fresh_token(ctx.credentials.primary()).await?;

        let mut verdict = TestVerdict::pass();
        if ctx.adapter.validate(&token).await? {
            verdict.finding("Tokens still valid after logout.");
        }

        Ok(verdict)
    }
}
