// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Known-value leakage
//!
//! Looks for the primary identity's username, password, or the MD5 hex digest
//! of either inside the token, both as issued and inside every base64-looking
//! run of the token once decoded.

use super::{TestContext, TokenTest};
use crate::adapter::TargetAdapter;
use crate::errors::AuditResult;
use crate::types::TestVerdict;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use md5::{Digest, Md5};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

static BASE64_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9+/_-]{4,}={0,2}").expect("valid regex"));

/// Accepts missing padding and non-canonical trailing bits
const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_allow_trailing_bits(true)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent);

const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

pub struct KnownValuesTest;

/// Decoded forms of every base64-looking run inside the token.
///
/// The token is percent-decoded first, so `%3D` padding survives a cookie
/// jar. Runs are split on anything outside the base64 alphabets, which keeps
/// the segments of `header.payload.signature` tokens apart. A run that does
/// not decode contributes nothing.
pub fn decode_base64_runs(token: &str) -> Vec<Vec<u8>> {
    let token = urlencoding::decode(token)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| token.to_string());

    BASE64_RUN
        .find_iter(&token)
        .filter_map(|run| decode_run(run.as_str()))
        .collect()
}

fn decode_run(run: &str) -> Option<Vec<u8>> {
    let decode = |data: &str| {
        LENIENT_STANDARD
            .decode(data)
            .or_else(|_| LENIENT_URL_SAFE.decode(data))
            .ok()
    };

    // A 4n+1 body has one dangling symbol, decode what precedes it
    let body = run.trim_end_matches('=');
    match body.len() % 4 {
        1 => decode(&body[..body.len() - 1]),
        _ => decode(run),
    }
}

/// Byte-sequence containment. Empty needles never match.
pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

pub fn md5_hex(value: &str) -> String {
    hex::encode(Md5::digest(value.as_bytes()))
}

#[async_trait::async_trait]
impl<A: TargetAdapter> TokenTest<A> for KnownValuesTest {
    fn name(&self) -> &'static str {
        "is_made_of_known_values"
    }

    async fn run(&self, ctx: &TestContext<'_, A>) -> AuditResult<TestVerdict> {
        info!("[KnownValues] Looking for credential material inside tokens");

        let primary = ctx.credentials.primary();
        let token = ctx.fresh_token(primary).await?;

        let mut verdict = TestVerdict::pass();

        let decoded = decode_base64_runs(token.as_str());
        if !decoded.is_empty() {
            verdict.diagnostic("Tokens look base64 encoded.");
        }

        let leaks = |needle: &str| {
            contains_bytes(token.as_bytes(), needle.as_bytes())
                || decoded.iter().any(|d| contains_bytes(d, needle.as_bytes()))
        };

        let username = primary.username().filter(|u| !u.is_empty());
        let password = primary.password().filter(|p| !p.is_empty());

        if username.is_none() {
            debug!("[KnownValues] Primary identity has no username field");
        }
        if password.is_none() {
            debug!("[KnownValues] Primary identity has no password field");
        }

        if username.is_some_and(|u| leaks(u)) {
            verdict.finding("Tokens contain username.");
        }
        if password.is_some_and(|p| leaks(p)) {
            verdict.finding("Tokens contain password.");
        }
        if username.is_some_and(|u| leaks(&md5_hex(u))) {
            verdict.finding("Tokens contain md5sum of username.");
        }
        if password.is_some_and(|p| leaks(&md5_hex(p))) {
            verdict.finding("Tokens contain md5sum of password.");
        }

        Ok(verdict)
    }
}
