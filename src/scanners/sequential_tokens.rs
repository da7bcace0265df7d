// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Sequential / near-identical token detection over two consecutive logins.

use super::{TestContext, TokenTest};
use crate::adapter::TargetAdapter;
use crate::errors::AuditResult;
use crate::types::{TestVerdict, Token};
use tracing::{debug, info};

/// Integer tokens closer than this are considered sequential
const MAX_NUMERIC_DISTANCE: u128 = 10;

/// Equal-length tokens differing in fewer bytes than this are considered similar
const MAX_BYTE_DISTANCE: usize = 3;

pub struct SequentialTokensTest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
    Sequential,
    Similar,
    Unrelated,
}

/// Compare two tokens.
///
/// Whole-string integers of any length are compared numerically and never
/// fall through to the byte comparison. Anything else is compared byte by
/// byte, but only when both tokens have the same byte length.
pub fn proximity(a: &Token, b: &Token) -> Proximity {
    if let (Some(x), Some(y)) = (a.as_decimal(), b.as_decimal()) {
        let diff = numeric_distance(x, y);
        debug!("[Sequential] Numeric distance {}", diff);
        if diff > 0 && diff < MAX_NUMERIC_DISTANCE {
            return Proximity::Sequential;
        }
        return Proximity::Unrelated;
    }

    if let Some(diff) = hamming_distance(a.as_bytes(), b.as_bytes()) {
        debug!("[Sequential] Byte distance {}", diff);
        if diff > 0 && diff < MAX_BYTE_DISTANCE {
            return Proximity::Similar;
        }
    }

    Proximity::Unrelated
}

/// Absolute difference of two parsed decimals, saturating at `u128::MAX`
pub fn numeric_distance(a: (bool, &str), b: (bool, &str)) -> u128 {
    let ((a_negative, a_digits), (b_negative, b_digits)) = (a, b);

    if a_negative != b_negative {
        // Distance is the sum of the magnitudes
        return match (parse_magnitude(a_digits), parse_magnitude(b_digits)) {
            (Some(x), Some(y)) => x.saturating_add(y),
            _ => u128::MAX,
        };
    }

    let (larger, smaller) = match compare_magnitudes(a_digits, b_digits) {
        std::cmp::Ordering::Less => (b_digits, a_digits),
        _ => (a_digits, b_digits),
    };
    parse_magnitude(&subtract_magnitudes(larger, smaller)).unwrap_or(u128::MAX)
}

fn parse_magnitude(digits: &str) -> Option<u128> {
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Some(0);
    }
    digits.parse().ok()
}

/// Magnitudes carry no leading zeros, so length orders them first
fn compare_magnitudes(a: &str, b: &str) -> std::cmp::Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Schoolbook `larger - smaller` over decimal digit strings
fn subtract_magnitudes(larger: &str, smaller: &str) -> String {
    let mut smaller = smaller.bytes().rev();
    let mut borrow = 0u8;
    let mut digits: Vec<u8> = Vec::with_capacity(larger.len());

    for x in larger.bytes().rev() {
        let y = smaller.next().map_or(0, |d| d - b'0') + borrow;
        let x = x - b'0';
        if x >= y {
            digits.push(b'0' + x - y);
            borrow = 0;
        } else {
            digits.push(b'0' + x + 10 - y);
            borrow = 1;
        }
    }

    digits.iter().rev().map(|&d| d as char).collect()
}

/// Number of differing bytes, `None` when lengths differ
pub fn hamming_distance(a: &[u8], b: &[u8]) -> Option<usize> {
    if a.len() != b.len() {
        return None;
    }
    Some(a.iter().zip(b).filter(|(x, y)| x != y).count())
}

#[async_trait::async_trait]
impl<A: TargetAdapter> TokenTest<A> for SequentialTokensTest {
    fn name(&self) -> &'static str {
        "is_sequential"
    }

    async fn run(&self, ctx: &TestContext<'_, A>) -> AuditResult<TestVerdict> {
        info!("[Sequential] Comparing two consecutive tokens");

        let primary = ctx.credentials.primary();
        let first = ctx.fresh_token(primary).await?;
        let second = ctx.fresh_token(primary).await?;

        let mut verdict = TestVerdict::pass();
        match proximity(&first, &second) {
            Proximity::Sequential => verdict.finding("Token strings seem sequential."),
            Proximity::Similar => verdict.finding("Token strings seem similar."),
            Proximity::Unrelated => {}
        }

        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_tokens() {
        assert_eq!(proximity(&"1000".into(), &"1001".into()), Proximity::Sequential);
        assert_eq!(proximity(&"1009".into(), &"1000".into()), Proximity::Sequential);
        assert_eq!(proximity(&"1000".into(), &"1010".into()), Proximity::Unrelated);
        assert_eq!(proximity(&"1000".into(), &"1000".into()), Proximity::Unrelated);
    }

    #[test]
    fn test_numeric_branch_does_not_fall_through() {
        // Same length and one byte apart, but numerically 100 apart
        assert_eq!(proximity(&"1000".into(), &"1100".into()), Proximity::Unrelated);
    }

    #[test]
    fn test_long_numeric_tokens() {
        let before = format!("{}099", "7".repeat(40));
        let after = format!("{}100", "7".repeat(40));
        assert_eq!(proximity(&before.as_str().into(), &after.as_str().into()), Proximity::Sequential);

        let far = format!("{}900", "7".repeat(40));
        assert_eq!(proximity(&before.as_str().into(), &far.as_str().into()), Proximity::Unrelated);
    }

    #[test]
    fn test_numeric_distance() {
        assert_eq!(numeric_distance((false, "1000"), (false, "1001")), 1);
        assert_eq!(numeric_distance((true, "3"), (false, "4")), 7);
        let power = format!("1{}", "0".repeat(41));
        let below = "9".repeat(41);
        assert_eq!(numeric_distance((false, power.as_str()), (false, below.as_str())), 1);
        assert_eq!(numeric_distance((true, "1".repeat(45).as_str()), (false, "1")), u128::MAX);
        assert_eq!(numeric_distance((false, "1".repeat(45).as_str()), (false, "2")), u128::MAX);
    }

    #[test]
    fn test_mixed_tokens_use_byte_distance() {
        assert_eq!(proximity(&"12abcdef".into(), &"12abcdeg".into()), Proximity::Similar);
        assert_eq!(proximity(&"abcdef".into(), &"abcxyz".into()), Proximity::Unrelated);
        assert_eq!(proximity(&"abcdef".into(), &"abcdef".into()), Proximity::Unrelated);
    }

    #[test]
    fn test_length_mismatch_skips_byte_branch() {
        assert_eq!(proximity(&"abcdef".into(), &"abcdefg".into()), Proximity::Unrelated);
        assert_eq!(hamming_distance(b"abc", b"abcd"), None);
        assert_eq!(hamming_distance(b"abcd", b"abcf"), Some(1));
    }
}
