// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

#![allow(dead_code)]

/**
 * Bountyy Oy - Shared Test Fixtures
 * In-memory scripted target used by the token test and engine suites
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use parking_lot::Mutex;
use rand::distributions::{Alphanumeric, DistString};
use std::collections::HashSet;

use session_token_auditor::errors::AdapterError;
use session_token_auditor::reporting::{ConsoleReporter, SharedBuffer};
use session_token_auditor::types::{Credential, CredentialSet, Token, Verbosity};
use session_token_auditor::TargetAdapter;

type Issuer = Box<dyn Fn(&Credential, usize) -> String + Send + Sync>;

/// Target that issues tokens from a closure and tracks which are live
pub struct ScriptedAdapter {
    issuer: Issuer,
    logins: Mutex<usize>,
    live: Mutex<HashSet<String>>,
    issued: Mutex<HashSet<String>>,
    logout_revokes: bool,
    fault_on_forged: bool,
    accept_everything: bool,
    reject_fresh: bool,
    broken_check: bool,
}

impl ScriptedAdapter {
    pub fn new(issuer: impl Fn(&Credential, usize) -> String + Send + Sync + 'static) -> Self {
        Self {
            issuer: Box::new(issuer),
            logins: Mutex::new(0),
            live: Mutex::new(HashSet::new()),
            issued: Mutex::new(HashSet::new()),
            logout_revokes: true,
            fault_on_forged: false,
            accept_everything: false,
            reject_fresh: false,
            broken_check: false,
        }
    }

    /// Same token for every login of every identity
    pub fn fixed(token: &str) -> Self {
        let token = token.to_string();
        Self::new(move |_, _| token.clone())
    }

    /// Decimal counter starting at `start`
    pub fn counter(start: u64) -> Self {
        Self::new(move |_, n| (start + n as u64).to_string())
    }

    /// Fresh alphanumeric string per login
    pub fn random(length: usize) -> Self {
        Self::new(move |_, _| Alphanumeric.sample_string(&mut rand::thread_rng(), length))
    }

    /// Logout succeeds but the token stays valid
    pub fn without_logout(mut self) -> Self {
        self.logout_revokes = false;
        self
    }

    /// Any non-empty token is accepted
    pub fn accepting_everything(mut self) -> Self {
        self.accept_everything = true;
        self
    }

    /// Issued tokens never validate, as with wrong credentials
    pub fn rejecting_fresh(mut self) -> Self {
        self.reject_fresh = true;
        self
    }

    /// The protected page cannot be reached
    pub fn with_broken_check(mut self) -> Self {
        self.broken_check = true;
        self
    }

    /// Checking a token that was never issued is a transport fault
    pub fn faulting_on_forged(mut self) -> Self {
        self.fault_on_forged = true;
        self
    }

    pub fn is_live(&self, token: &str) -> bool {
        self.live.lock().contains(token)
    }

    pub fn logins(&self) -> usize {
        *self.logins.lock()
    }
}

#[async_trait::async_trait]
impl TargetAdapter for ScriptedAdapter {
    type Response = String;

    async fn authenticate(&self, credential: &Credential) -> Result<String, AdapterError> {
        let mut logins = self.logins.lock();
        let token = (self.issuer)(credential, *logins);
        *logins += 1;
        self.live.lock().insert(token.clone());
        self.issued.lock().insert(token.clone());
        Ok(token)
    }

    fn extract_token(&self, response: String) -> Token {
        Token::new(response)
    }

    async fn validate(&self, token: &Token) -> Result<bool, AdapterError> {
        if self.broken_check {
            return Err(AdapterError::Connection {
                url: "scripted://check".to_string(),
                reason: "connection refused".to_string(),
            });
        }
        if self.fault_on_forged && !self.issued.lock().contains(token.as_str()) {
            return Err(AdapterError::Timeout {
                url: "scripted://check".to_string(),
                timeout: std::time::Duration::from_secs(5),
            });
        }
        if self.reject_fresh {
            return Ok(false);
        }
        if self.accept_everything {
            return Ok(!token.is_empty());
        }
        Ok(self.live.lock().contains(token.as_str()))
    }

    async fn invalidate(&self, token: &Token) -> Result<(), AdapterError> {
        if self.logout_revokes {
            self.live.lock().remove(token.as_str());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn admin() -> CredentialSet {
    CredentialSet::new(vec![Credential::user_pass("admin", "hunter2")]).unwrap()
}

pub fn two_users() -> CredentialSet {
    CredentialSet::new(vec![
        Credential::user_pass("admin", "hunter2"),
        Credential::user_pass("guest", "guest123"),
    ])
    .unwrap()
}

pub fn captured(verbosity: Verbosity) -> (ConsoleReporter, SharedBuffer) {
    let buffer = SharedBuffer::new();
    (ConsoleReporter::with_writer(verbosity, Box::new(buffer.clone())), buffer)
}
