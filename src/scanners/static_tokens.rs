// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Static token detection: same token for repeated logins of one identity,
//! or the same token handed to two different identities.

use super::{TestContext, TokenTest};
use crate::adapter::TargetAdapter;
use crate::errors::AuditResult;
use crate::types::TestVerdict;
use tracing::info;

pub struct StaticTokensTest;

#[async_trait::async_trait]
impl<A: TargetAdapter> TokenTest<A> for StaticTokensTest {
    fn name(&self) -> &'static str {
        "is_static"
    }

    async fn run(&self, ctx: &TestContext<'_, A>) -> AuditResult<TestVerdict> {
        info!("[Static] Comparing tokens across repeated logins");

        let primary = ctx.credentials.primary();
        let first = ctx.fresh_token(primary).await?;
        let second = ctx.fresh_token(primary).await?;

        let mut verdict = TestVerdict::pass();

        if let Some(other) = ctx.credentials.secondary() {
            let third = ctx.fresh_token(other).await?;
            if first == third {
                verdict.finding("Tokens static across multiple users.");
                return Ok(verdict);
            }
        }

        if first == second {
            verdict.finding("Tokens static for each user.");
        }

        Ok(verdict)
    }
}
