// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Config-driven form login adapter
//!
//! Logs in by POSTing the credential fields to a login form, extracts the
//! token from the response body (regex) or from a `Set-Cookie` header, and
//! checks tokens by fetching a protected page with the token in a header.

use regex::Regex;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use crate::adapter::TargetAdapter;
use crate::config::{FormEncoding, HttpMethod, TargetConfig};
use crate::errors::AdapterError;
use crate::types::{Credential, Token};

/// Placeholder replaced with the token in the check header template
pub const TOKEN_PLACEHOLDER: &str = "{token}";

/// Maximum response body size (10MB) to prevent memory exhaustion
const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: HashMap<String, String>,
    /// Every `Set-Cookie` value, headers map only keeps the last one
    pub set_cookies: Vec<String>,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers.get(&name.to_lowercase()).cloned()
    }

    /// Value of a cookie set by this response
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.set_cookies.iter().find_map(|set_cookie| {
            let pair = set_cookie.split(';').next()?.trim();
            let (key, value) = pair.split_once('=')?;
            (key.trim() == name).then(|| value.trim().to_string())
        })
    }
}

pub struct HttpFormAdapter {
    client: Client,
    config: TargetConfig,
    timeout: Duration,
    token_pattern: Option<Regex>,
    success_pattern: Option<Regex>,
}

impl HttpFormAdapter {
    pub fn new(config: TargetConfig) -> Result<Self, AdapterError> {
        let timeout = Duration::from_secs(config.timeout_secs);

        // Redirects are not followed: the login response carries the cookie
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AdapterError::Other(format!("Failed to create HTTP client: {}", e)))?;

        let token_pattern = compile(config.login.token_pattern.as_deref(), "token_pattern")?;
        let success_pattern = compile(config.check.success_pattern.as_deref(), "success_pattern")?;

        if token_pattern.is_none() && config.login.token_cookie.is_none() {
            return Err(AdapterError::Other(
                "login needs either token_pattern or token_cookie".to_string(),
            ));
        }

        Ok(Self {
            client,
            config,
            timeout,
            token_pattern,
            success_pattern,
        })
    }

    pub fn config(&self) -> &TargetConfig {
        &self.config
    }

    fn login_fields(&self, credential: &Credential) -> Vec<(String, String)> {
        let login = &self.config.login;
        credential
            .fields()
            .map(|(name, value)| {
                let form_name = login.field_names.get(name).map(String::as_str).unwrap_or(name);
                (form_name.to_string(), value.to_string())
            })
            .chain(login.extra_fields.iter().map(|(k, v)| (k.clone(), v.clone())))
            .collect()
    }

    fn token_header_value(&self, token: &Token) -> String {
        self.config
            .check
            .token_template
            .replace(TOKEN_PLACEHOLDER, token.as_str())
    }

    fn fault(&self, url: &str, err: reqwest::Error) -> AdapterError {
        if err.is_timeout() {
            AdapterError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else if err.is_connect() {
            AdapterError::Connection {
                url: url.to_string(),
                reason: err.to_string(),
            }
        } else {
            err.into()
        }
    }

    async fn read(&self, url: &str, response: reqwest::Response) -> Result<HttpResponse, AdapterError> {
        let status_code = response.status().as_u16();

        let mut headers = HashMap::new();
        let mut set_cookies = Vec::new();
        for (name, value) in response.headers() {
            let value = value.to_str().unwrap_or("").to_string();
            if *name == reqwest::header::SET_COOKIE {
                set_cookies.push(value.clone());
            }
            headers.insert(name.as_str().to_string(), value);
        }

        let mut body = response.text().await.map_err(|e| self.fault(url, e))?;
        if body.len() > MAX_BODY_SIZE {
            warn!("[HttpForm] Truncating {} byte body from {}", body.len(), url);
            let mut cut = MAX_BODY_SIZE;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }

        Ok(HttpResponse {
            status_code,
            body,
            headers,
            set_cookies,
        })
    }

    async fn get_with_token(&self, url: &str, token: &Token) -> Result<HttpResponse, AdapterError> {
        let response = self
            .client
            .get(url)
            .header(self.config.check.token_header.as_str(), self.token_header_value(token))
            .send()
            .await
            .map_err(|e| self.fault(url, e))?;
        self.read(url, response).await
    }
}

fn compile(pattern: Option<&str>, field: &str) -> Result<Option<Regex>, AdapterError> {
    pattern
        .map(|p| {
            Regex::new(p).map_err(|e| AdapterError::Other(format!("Invalid {} '{}': {}", field, p, e)))
        })
        .transpose()
}

#[async_trait::async_trait]
impl TargetAdapter for HttpFormAdapter {
    type Response = HttpResponse;

    async fn authenticate(&self, credential: &Credential) -> Result<HttpResponse, AdapterError> {
        let url = self.config.url(&self.config.login.path);
        let fields = self.login_fields(credential);
        debug!("[HttpForm] POST {} with {} fields", url, fields.len());

        let request = self.client.post(&url);
        let request = match self.config.login.encoding {
            FormEncoding::Urlencoded => request.form(&fields),
            FormEncoding::Multipart => {
                let form = fields
                    .into_iter()
                    .fold(reqwest::multipart::Form::new(), |form, (name, value)| form.text(name, value));
                request.multipart(form)
            }
        };

        let response = request.send().await.map_err(|e| self.fault(&url, e))?;
        self.read(&url, response).await
    }

    fn extract_token(&self, response: HttpResponse) -> Token {
        if let Some(pattern) = &self.token_pattern {
            if let Some(captures) = pattern.captures(&response.body) {
                let matched = captures.get(1).or_else(|| captures.get(0));
                if let Some(m) = matched {
                    return Token::new(m.as_str());
                }
            }
        }

        if let Some(cookie) = &self.config.login.token_cookie {
            if let Some(value) = response.cookie(cookie) {
                return Token::new(value);
            }
        }

        warn!(
            "[HttpForm] No token found in login response (status {})",
            response.status_code
        );
        Token::default()
    }

    async fn validate(&self, token: &Token) -> Result<bool, AdapterError> {
        let url = self.config.url(&self.config.check.path);
        let response = self.get_with_token(&url, token).await?;

        let accepted = match &self.success_pattern {
            Some(pattern) => pattern.is_match(&response.body),
            None => (200..300).contains(&response.status_code),
        };
        debug!("[HttpForm] Token check {} -> {} ({})", url, accepted, response.status_code);

        Ok(accepted)
    }

    async fn invalidate(&self, token: &Token) -> Result<(), AdapterError> {
        let Some(logout) = &self.config.logout else {
            return Ok(());
        };

        let url = self.config.url(&logout.path);
        let request = match logout.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        let response = request
            .header(self.config.check.token_header.as_str(), self.token_header_value(token))
            .send()
            .await
            .map_err(|e| self.fault(&url, e))?;
        debug!("[HttpForm] Logout {} -> {}", url, response.status());

        Ok(())
    }

    fn name(&self) -> &str {
        "http-form"
    }
}
