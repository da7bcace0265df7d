// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

pub mod core;
pub mod loader;
pub mod validation;

pub use self::core::{
    AuditConfig, CheckConfig, FormEncoding, HttpMethod, LoginConfig, LogoutConfig, TargetConfig,
};

pub use loader::{ConfigFormat, ConfigLoader};

pub use validation::ConfigValidator;

use anyhow::Result;
use std::path::Path;

use crate::types::{CredentialSet, Verbosity};

impl AuditConfig {
    pub fn credential_set(&self) -> Result<CredentialSet> {
        Ok(CredentialSet::new(self.credentials.clone())?)
    }

    /// Command-line verbosity wins when it is louder than the file's
    pub fn effective_verbosity(&self, cli: Option<Verbosity>) -> Verbosity {
        cli.map_or(self.verbosity, |v| v.max(self.verbosity))
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AuditConfig> {
    ConfigLoader::new(path)?.load_config()
}
