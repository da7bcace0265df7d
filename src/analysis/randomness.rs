// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Token Randomness Battery
//!
//! Three cheap heuristics over a concatenated token sample:
//! - Arithmetic mean of character codes against a per-charset expectation
//! - Character frequency (small alphabet, heavily reused)
//! - zlib compression ratio
//!
//! Each heuristic yields a [`Signal`]. The number of fired signals is banded
//! into [`NonRandomness`]: none, weak (exactly one) or strong (two or more).

use flate2::write::ZlibEncoder;
use flate2::Compression;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::debug;

/// Random strings would probably compress worse than this
pub const EXPECTED_COMPRESSION_RATIO: f64 = 0.68;

pub const MEAN_LOW_FACTOR: f64 = 0.87;
pub const MEAN_HIGH_FACTOR: f64 = 1.13;

/// Sample is "small" below either of these
pub const MIN_SAMPLE_TOKENS: usize = 5;
pub const MIN_SAMPLE_CHARS: usize = 100;

const FREQ_LENGTH_DIVISOR: usize = 15;
const FREQ_MAX_OCCURRENCES: usize = 30;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));
static LOWER_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-z]+$").expect("valid regex"));
static ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Za-z]+$").expect("valid regex"));
static BASE64_ALPHABET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Za-z+/=]+$").expect("valid regex"));
static PRINTABLE_ASCII: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ -~]+$").expect("valid regex"));

/// Character class of a sample, narrowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetClass {
    Digits,
    LowerAlphanumeric,
    Alphanumeric,
    Base64,
    PrintableAscii,
    Unknown,
}

impl CharsetClass {
    pub fn detect(sample: &str) -> Self {
        if DIGITS.is_match(sample) {
            CharsetClass::Digits
        } else if LOWER_ALNUM.is_match(sample) {
            CharsetClass::LowerAlphanumeric
        } else if ALNUM.is_match(sample) {
            CharsetClass::Alphanumeric
        } else if BASE64_ALPHABET.is_match(sample) {
            CharsetClass::Base64
        } else if PRINTABLE_ASCII.is_match(sample) {
            CharsetClass::PrintableAscii
        } else {
            CharsetClass::Unknown
        }
    }

    /// Empirical mean character code of random strings over this class
    pub fn expected_mean(&self) -> f64 {
        match self {
            CharsetClass::Digits => 52.5,
            CharsetClass::LowerAlphanumeric => 93.67,
            CharsetClass::Alphanumeric => 86.89,
            CharsetClass::Base64 => 85.2,
            CharsetClass::PrintableAscii => 79.0,
            CharsetClass::Unknown => 127.5,
        }
    }
}

/// One heuristic's suspicion output
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub name: &'static str,
    pub fired: bool,
    pub detail: String,
}

/// Banded verdict over the fired signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonRandomness {
    None,
    Weak,
    Strong,
}

impl NonRandomness {
    pub fn from_fired(fired: usize) -> Self {
        match fired {
            0 => NonRandomness::None,
            1 => NonRandomness::Weak,
            _ => NonRandomness::Strong,
        }
    }

    pub fn finding(&self) -> Option<&'static str> {
        match self {
            NonRandomness::None => None,
            NonRandomness::Weak => Some("One randomness test failed. Tokens possibly non-random."),
            NonRandomness::Strong => {
                Some("Multiple randomness tests failed. Tokens very likely to be non-random.")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RandomnessReport {
    pub signals: Vec<Signal>,
    pub band: NonRandomness,
}

impl RandomnessReport {
    pub fn fired(&self) -> usize {
        self.signals.iter().filter(|s| s.fired).count()
    }
}

/// Run all three heuristics and band the result
pub fn analyze(sample: &str) -> RandomnessReport {
    let signals = vec![
        arithmetic_mean(sample),
        char_frequency(sample),
        compression_ratio(sample),
    ];
    let fired = signals.iter().filter(|s| s.fired).count();

    debug!("[Randomness] {} of {} signals fired over {} chars", fired, signals.len(), sample.chars().count());

    RandomnessReport {
        signals,
        band: NonRandomness::from_fired(fired),
    }
}

/// Fires when the mean character code is outside the band expected for the charset
pub fn arithmetic_mean(sample: &str) -> Signal {
    let name = "arithmetic_mean";
    let length = sample.chars().count();
    if length == 0 {
        return empty_sample(name);
    }

    let expected = CharsetClass::detect(sample).expected_mean();
    let low_bar = MEAN_LOW_FACTOR * expected;
    let high_bar = MEAN_HIGH_FACTOR * expected;

    let actual = sample.chars().map(|c| c as u32 as f64).sum::<f64>() / length as f64;

    Signal {
        name,
        fired: actual <= low_bar || actual >= high_bar,
        detail: format!(
            "Arithmetic mean is {:.2} (random strings would probably be between {:.2} and {:.2}).",
            actual, low_bar, high_bar
        ),
    }
}

/// Fires when a small alphabet is reused heavily. Weak on short or numeric samples.
pub fn char_frequency(sample: &str) -> Signal {
    let name = "char_frequency";
    let length = sample.chars().count();

    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    for c in sample.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }

    let Some((&top_char, &top_count)) = counts.iter().max_by_key(|(_, count)| **count) else {
        return empty_sample(name);
    };

    Signal {
        name,
        fired: counts.len() < length / FREQ_LENGTH_DIVISOR && top_count > FREQ_MAX_OCCURRENCES,
        detail: format!(
            "Unique characters found: {} out of {}, Most frequent character: {:?} ({}).",
            counts.len(),
            length,
            top_char,
            top_count
        ),
    }
}

/// Fires when the sample compresses to at most [`EXPECTED_COMPRESSION_RATIO`]
pub fn compression_ratio(sample: &str) -> Signal {
    let name = "compression_ratio";
    let length = sample.chars().count();
    if length == 0 {
        return empty_sample(name);
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    let compressed = match encoder.write_all(sample.as_bytes()).and_then(|_| encoder.finish()) {
        Ok(bytes) => bytes,
        Err(e) => {
            return Signal {
                name,
                fired: false,
                detail: format!("Compression failed: {}", e),
            }
        }
    };

    let actual = compressed.len() as f64 / length as f64;

    Signal {
        name,
        fired: actual <= EXPECTED_COMPRESSION_RATIO,
        detail: format!(
            "Compression ratio is {:.4} (random strings would probably be > {}).",
            actual, EXPECTED_COMPRESSION_RATIO
        ),
    }
}

fn empty_sample(name: &'static str) -> Signal {
    Signal {
        name,
        fired: false,
        detail: format!("{}: empty sample, nothing to measure.", name),
    }
}
