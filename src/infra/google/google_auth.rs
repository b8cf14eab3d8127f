// =============================================================================
// GOOGLE AUTHENTICATION
// =============================================================================
//
// Two credential kinds can sit at MCPGD_CLIENT_SECRET_PATH:
//
// 1. **OAuth client secret** (`installed` / `web` JSON from the Cloud Console):
//    the installed-app flow runs once, opening a local redirect listener, and
//    caches tokens at MCPGD_TOKEN_PATH.
//
// 2. **Service account key** (`"type": "service_account"`): a signed JWT is
//    exchanged for an access token. Files and folders must be shared with the
//    service account email.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use yup_oauth2::authenticator::DefaultAuthenticator;
use yup_oauth2::authenticator_delegate::InstalledFlowDelegate;
use yup_oauth2::{InstalledFlowAuthenticator, InstalledFlowReturnMethod};

use crate::core::config::Config;
use crate::core::workspace::WorkspaceError;

/// Scopes needed across Drive, Sheets, Slides and Docs.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/drive",
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/presentations",
    "https://www.googleapis.com/auth/documents",
];

/// Source of bearer tokens for the REST client.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, WorkspaceError>;
}

#[async_trait]
impl AccessTokenProvider for Box<dyn AccessTokenProvider> {
    async fn access_token(&self) -> Result<String, WorkspaceError> {
        (**self).access_token().await
    }
}

/// What kind of credential file was configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    ServiceAccount,
    OAuthClient,
}

impl CredentialKind {
    pub fn detect(json: &str) -> Result<Self, WorkspaceError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| WorkspaceError::Auth(format!("credential file is not valid JSON: {e}")))?;

        if value.get("type").and_then(|t| t.as_str()) == Some("service_account") {
            Ok(Self::ServiceAccount)
        } else {
            Ok(Self::OAuthClient)
        }
    }
}

/// Build the token provider matching the configured credential file.
pub async fn token_provider_from_config(
    config: &Config,
) -> Result<Box<dyn AccessTokenProvider>, WorkspaceError> {
    let content = tokio::fs::read_to_string(&config.client_secret_path)
        .await
        .map_err(|e| {
            WorkspaceError::Auth(format!(
                "failed to read credential file '{}': {e}",
                config.client_secret_path
            ))
        })?;

    match CredentialKind::detect(&content)? {
        CredentialKind::ServiceAccount => {
            let auth = ServiceAccountAuth::from_json(&content)?;
            tracing::info!(client_email = %auth.client_email(), "Using service account credentials");
            Ok(Box::new(auth))
        }
        CredentialKind::OAuthClient => {
            tracing::info!(token_path = %config.token_path, "Using installed-app OAuth flow");
            let auth = InstalledAppAuth::new(&config.client_secret_path, &config.token_path).await?;
            Ok(Box::new(auth))
        }
    }
}

// =============================================================================
// SERVICE ACCOUNT
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountCredentials {
    client_email: String,
    /// PEM encoded RSA key.
    private_key: String,
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

#[derive(Debug, Serialize)]
struct JwtClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: u64,
    /// At most one hour after `iat`.
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    token: String,
    expires_at: SystemTime,
}

/// Exchanges a signed JWT for access tokens and caches them until shortly before expiry.
pub struct ServiceAccountAuth {
    credentials: ServiceAccountCredentials,
    client: Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
}

impl ServiceAccountAuth {
    pub fn from_json(json: &str) -> Result<Self, WorkspaceError> {
        let credentials: ServiceAccountCredentials = serde_json::from_str(json)
            .map_err(|e| WorkspaceError::Auth(format!("invalid service account key: {e}")))?;
        Ok(Self {
            credentials,
            client: Client::new(),
            cached_token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.credentials.client_email
    }

    async fn fetch_new_token(&self) -> Result<CachedToken, WorkspaceError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| WorkspaceError::Auth(e.to_string()))?
            .as_secs();

        let claims = JwtClaims {
            iss: self.credentials.client_email.clone(),
            scope: SCOPES.join(" "),
            aud: self.credentials.token_uri.clone(),
            iat: now,
            exp: now + 3600,
        };

        let key = EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())
            .map_err(|e| WorkspaceError::Auth(format!("invalid private key: {e}")))?;
        let jwt = encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| WorkspaceError::Auth(format!("failed to sign JWT: {e}")))?;

        let response = self
            .client
            .post(&self.credentials.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", &jwt),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(WorkspaceError::Auth(format!(
                "token exchange failed ({status}): {text}"
            )));
        }

        let token: TokenResponse = response.json().await?;
        // Refresh five minutes early.
        let lifetime = token.expires_in.unwrap_or(3600).saturating_sub(300);
        Ok(CachedToken {
            token: token.access_token,
            expires_at: SystemTime::now() + Duration::from_secs(lifetime),
        })
    }
}

#[async_trait]
impl AccessTokenProvider for ServiceAccountAuth {
    async fn access_token(&self) -> Result<String, WorkspaceError> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if token.expires_at > SystemTime::now() + Duration::from_secs(60) {
                    return Ok(token.token.clone());
                }
            }
        }

        let fresh = self.fetch_new_token().await?;
        let token = fresh.token.clone();
        *self.cached_token.write().await = Some(fresh);
        tracing::debug!(client_email = %self.credentials.client_email, "Refreshed service account token");
        Ok(token)
    }
}

// =============================================================================
// INSTALLED APP FLOW
// =============================================================================

/// Prints the consent URL to stderr. Stdout carries the MCP protocol.
struct StderrFlowDelegate;

impl InstalledFlowDelegate for StderrFlowDelegate {
    fn present_user_url<'a>(
        &'a self,
        url: &'a str,
        need_code: bool,
    ) -> Pin<Box<dyn Future<Output = Result<String, String>> + Send + 'a>> {
        Box::pin(async move {
            eprintln!("Open this URL in your browser to authorize Google Workspace access:\n{url}");
            if need_code {
                return Err("authorization code entry is not supported over stdio".to_string());
            }
            Ok(String::new())
        })
    }
}

/// OAuth installed-app flow with tokens persisted to disk.
pub struct InstalledAppAuth {
    authenticator: DefaultAuthenticator,
}

impl InstalledAppAuth {
    pub async fn new(client_secret_path: &str, token_path: &str) -> Result<Self, WorkspaceError> {
        let _ = rustls::crypto::ring::default_provider().install_default();

        let secret = yup_oauth2::read_application_secret(client_secret_path)
            .await
            .map_err(|e| WorkspaceError::Auth(format!("failed to read client secret: {e}")))?;

        let authenticator =
            InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::HTTPRedirect)
                .persist_tokens_to_disk(token_path)
                .flow_delegate(Box::new(StderrFlowDelegate))
                .build()
                .await
                .map_err(|e| WorkspaceError::Auth(format!("failed to build authenticator: {e}")))?;

        Ok(Self { authenticator })
    }
}

#[async_trait]
impl AccessTokenProvider for InstalledAppAuth {
    async fn access_token(&self) -> Result<String, WorkspaceError> {
        let token = self
            .authenticator
            .token(SCOPES)
            .await
            .map_err(|e| WorkspaceError::Auth(e.to_string()))?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| WorkspaceError::Auth("no access token returned".to_string()))
    }
}
