// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{Context, Result};
use regex::Regex;
use validator::Validate;

use super::core::{AuditConfig, TargetConfig};
use crate::adapters::http_form::TOKEN_PLACEHOLDER;
use crate::scanners::registry::DEFAULT_TESTS;

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate_audit_config(config: &AuditConfig) -> Result<()> {
        config.validate()
            .context("Configuration validation failed")?;

        Self::validate_credentials(config)?;
        Self::validate_disabled_tests(config)?;
        Self::validate_target_config(&config.target)?;

        Ok(())
    }

    fn validate_credentials(config: &AuditConfig) -> Result<()> {
        for (index, credential) in config.credentials.iter().enumerate() {
            if credential.fields().next().is_none() {
                return Err(anyhow::anyhow!("Credential #{} has no fields", index));
            }
        }
        Ok(())
    }

    fn validate_disabled_tests(config: &AuditConfig) -> Result<()> {
        for name in &config.disabled_tests {
            if !DEFAULT_TESTS.contains(&name.as_str()) {
                return Err(anyhow::anyhow!(
                    "Unknown test '{}' in disabled_tests (known: {})",
                    name,
                    DEFAULT_TESTS.join(", ")
                ));
            }
        }
        Ok(())
    }

    pub fn validate_target_config(target: &TargetConfig) -> Result<()> {
        if target.scheme != "http" && target.scheme != "https" {
            return Err(anyhow::anyhow!("Target scheme must be http or https, got '{}'", target.scheme));
        }

        if target.login.token_pattern.is_none() && target.login.token_cookie.is_none() {
            return Err(anyhow::anyhow!(
                "Login must define token_pattern or token_cookie to locate the session token"
            ));
        }

        if let Some(pattern) = &target.login.token_pattern {
            Regex::new(pattern).with_context(|| format!("Invalid token_pattern: {}", pattern))?;
        }

        if let Some(pattern) = &target.check.success_pattern {
            Regex::new(pattern).with_context(|| format!("Invalid success_pattern: {}", pattern))?;
        }

        if !target.check.token_template.contains(TOKEN_PLACEHOLDER) {
            return Err(anyhow::anyhow!(
                "token_template must contain {} placeholder",
                TOKEN_PLACEHOLDER
            ));
        }

        Ok(())
    }
}
