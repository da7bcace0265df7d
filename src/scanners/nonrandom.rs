// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Non-randomness: collects a sample of fresh tokens for the primary identity
//! and runs the randomness battery over their concatenation.

use super::{TestContext, TokenTest};
use crate::adapter::TargetAdapter;
use crate::analysis::randomness::{self, MIN_SAMPLE_CHARS, MIN_SAMPLE_TOKENS};
use crate::errors::AuditResult;
use crate::types::TestVerdict;
use tracing::info;

pub struct NonRandomTest;

#[async_trait::async_trait]
impl<A: TargetAdapter> TokenTest<A> for NonRandomTest {
    fn name(&self) -> &'static str {
        "is_nonrandom"
    }

    async fn run(&self, ctx: &TestContext<'_, A>) -> AuditResult<TestVerdict> {
        info!("[Randomness] Collecting {} tokens", ctx.sample_size);

        let primary = ctx.credentials.primary();
        let mut tokens = Vec::with_capacity(ctx.sample_size);
        for _ in 0..ctx.sample_size {
            tokens.push(ctx.fresh_token(primary).await?);
        }

        let sample: String = tokens.iter().map(|t| t.as_str()).collect();

        let mut verdict = TestVerdict::pass();
        if tokens.len() < MIN_SAMPLE_TOKENS || sample.chars().count() < MIN_SAMPLE_CHARS {
            verdict.diagnostic("Sample size not large enough for true randomness detection.");
        }

        let report = randomness::analyze(&sample);
        for signal in &report.signals {
            verdict.diagnostic(signal.detail.clone());
        }

        if let Some(finding) = report.band.finding() {
            verdict.finding(finding);
        }

        Ok(verdict)
    }
}
