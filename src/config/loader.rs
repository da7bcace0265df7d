// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::core::AuditConfig;
use super::validation::ConfigValidator;

pub struct ConfigLoader {
    config_path: PathBuf,
    format: ConfigFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigLoader {
    pub fn new<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let path = config_path.as_ref().to_path_buf();
        let format = Self::detect_format(&path)?;

        Ok(Self {
            config_path: path,
            format,
        })
    }

    pub fn with_format<P: AsRef<Path>>(config_path: P, format: ConfigFormat) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            format,
        }
    }

    pub fn format(&self) -> ConfigFormat {
        self.format
    }

    fn detect_format(path: &Path) -> Result<ConfigFormat> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| anyhow::anyhow!("Could not determine config file format"))?;

        match extension {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(anyhow::anyhow!("Unsupported config file format: {}", extension)),
        }
    }

    /// Read, apply `AUDIT_*` environment overrides, validate
    pub fn load_config(&self) -> Result<AuditConfig> {
        let content = std::fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config file: {:?}", self.config_path))?;

        let mut config = self.parse(&content)?;

        apply_overrides(&mut config, |key| std::env::var(key).ok())?;

        ConfigValidator::validate_audit_config(&config)?;

        Ok(config)
    }

    pub fn parse(&self, content: &str) -> Result<AuditConfig> {
        let config = match self.format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .context("Failed to parse YAML config")?,
            ConfigFormat::Toml => toml::from_str(content)
                .context("Failed to parse TOML config")?,
            ConfigFormat::Json => serde_json::from_str(content)
                .context("Failed to parse JSON config")?,
        };
        Ok(config)
    }
}

fn apply_overrides<F>(config: &mut AuditConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(verbosity) = lookup("AUDIT_VERBOSITY") {
        config.verbosity = verbosity.parse()
            .context("Invalid AUDIT_VERBOSITY")?;
    }

    if let Some(sample_size) = lookup("AUDIT_SAMPLE_SIZE") {
        config.sample_size = sample_size.parse()
            .context("Invalid AUDIT_SAMPLE_SIZE")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Verbosity;
    use std::collections::HashMap;

    const YAML: &str = r#"
verbosity: medium
sample_size: 20
disabled_tests: [is_persistent]
credentials:
  - user: ATTadmin
    pass: "2500!VaP"
  - user: super
    pass: "M0torola!"
target:
  host: 127.0.0.1
  port: 8080
  login:
    path: /login.php
    encoding: multipart
    field_names:
      pass: pwd
    token_pattern: 'createCookie\("p", "(.{32})"'
  check:
    path: /status_device.php
    token_template: "p={token}"
    success_pattern: tools_admin
"#;

    #[test]
    fn test_detect_format() {
        assert_eq!(ConfigLoader::new("audit.yml").unwrap().format(), ConfigFormat::Yaml);
        assert_eq!(ConfigLoader::new("audit.toml").unwrap().format(), ConfigFormat::Toml);
        assert_eq!(ConfigLoader::new("audit.json").unwrap().format(), ConfigFormat::Json);
        assert!(ConfigLoader::new("audit.ini").is_err());
        assert!(ConfigLoader::new("audit").is_err());
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("router.yaml");
        std::fs::write(&path, YAML).unwrap();

        let config = ConfigLoader::new(&path).unwrap().load_config().unwrap();

        assert_eq!(config.credentials.len(), 2);
        assert_eq!(config.disabled_tests, vec!["is_persistent".to_string()]);
        assert_eq!(config.target.login.field_names.get("pass").map(String::as_str), Some("pwd"));
        assert_eq!(config.target.check.token_template, "p={token}");
    }

    #[test]
    fn test_overrides() {
        let loader = ConfigLoader::with_format("inline.yaml", ConfigFormat::Yaml);
        let mut config = loader.parse(YAML).unwrap();
        assert_eq!(config.verbosity, Verbosity::Medium);
        assert_eq!(config.sample_size, 20);

        let env: HashMap<&str, &str> = [("AUDIT_VERBOSITY", "high"), ("AUDIT_SAMPLE_SIZE", "25")].into();
        apply_overrides(&mut config, |key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.verbosity, Verbosity::High);
        assert_eq!(config.sample_size, 25);
    }

    #[test]
    fn test_bad_override_rejected() {
        let loader = ConfigLoader::with_format("inline.yaml", ConfigFormat::Yaml);
        let mut config = loader.parse(YAML).unwrap();

        let result = apply_overrides(&mut config, |key| {
            (key == "AUDIT_SAMPLE_SIZE").then(|| "lots".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let loader = ConfigLoader::new("/nonexistent/audit.toml").unwrap();
        assert!(loader.load_config().is_err());
    }
}
