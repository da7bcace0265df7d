// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Validation bypass: a well-formed but tampered token (the reversed string)
//! must not be accepted.

use super::{TestContext, TokenTest};
use crate::adapter::TargetAdapter;
use crate::errors::AuditResult;
use crate::types::TestVerdict;
use tracing::{debug, info};

pub struct ValidationBypassTest;

#[async_trait::async_trait]
impl<A: TargetAdapter> TokenTest<A> for ValidationBypassTest {
    fn name(&self) -> &'static str {
        "is_validated"
    }

    async fn run(&self, ctx: &TestContext<'_, A>) -> AuditResult<TestVerdict> {
        info!("[Validation] Testing acceptance of tampered tokens");

        let token = ctx.checked_login(ctx.credentials.primary()).await?;
        let tampered = token.reversed();
        if tampered == token {
            debug!("[Validation] Token is a palindrome, reversal does not tamper with it");
        }

        // The genuine session is closed even when the check faults
        let accepted = ctx.adapter.validate(&tampered).await;
        ctx.adapter.invalidate(&token).await?;
        let accepted = accepted?;

        let mut verdict = TestVerdict::pass();
        if accepted {
            verdict.finding("Well-formed yet invalid tokens are accepted.");
        }

        Ok(verdict)
    }
}
