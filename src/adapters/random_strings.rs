// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Calibration adapter. Every "login" issues a fresh uniformly random string,
//! every token validates and logout does nothing. Running the static,
//! sequential and randomness tests against it should report no failures.

use crate::adapter::TargetAdapter;
use crate::errors::AdapterError;
use crate::types::{Credential, Token};
use rand::Rng;

pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const DEFAULT_TOKEN_LENGTH: usize = 64;

#[derive(Debug, Clone)]
pub struct RandomStringAdapter {
    alphabet: Vec<char>,
    length: usize,
}

impl RandomStringAdapter {
    pub fn new(alphabet: &str, length: usize) -> Result<Self, AdapterError> {
        let alphabet: Vec<char> = alphabet.chars().collect();
        if alphabet.is_empty() {
            return Err(AdapterError::Other("random token alphabet is empty".to_string()));
        }
        Ok(Self { alphabet, length })
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomStringAdapter {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            length: DEFAULT_TOKEN_LENGTH,
        }
    }
}

#[async_trait::async_trait]
impl TargetAdapter for RandomStringAdapter {
    type Response = ();

    async fn authenticate(&self, _credential: &Credential) -> Result<(), AdapterError> {
        Ok(())
    }

    fn extract_token(&self, _response: ()) -> Token {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| self.alphabet[rng.gen_range(0..self.alphabet.len())])
            .collect::<String>()
            .into()
    }

    async fn validate(&self, _token: &Token) -> Result<bool, AdapterError> {
        Ok(true)
    }

    async fn invalidate(&self, _token: &Token) -> Result<(), AdapterError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "random-strings"
    }
}
