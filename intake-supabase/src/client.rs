//! HTTP client for the two Supabase APIs the landing page uses.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/rest/v1/{table}` | Insert one row (PostgREST) |
//! | POST   | `/auth/v1/otp` | Text a one-time code |
//! | POST   | `/auth/v1/verify` | Exchange the code for a session |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use intake_types::{InsertReceipt, RemoteError, RemoteStore, Table, VerifiedIdentity};

use crate::config::{IntakeConfig, SupabaseConfig};
use crate::error::{ConfigError, SupabaseError};

/// `RemoteStore` backed by a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseRemote {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    user: Option<AuthUser>,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
}

impl SupabaseRemote {
    /// Create a client for the project described by `config`.
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseError> {
        let base_url = config.base_url()?;

        let invalid_key = || ConfigError::InvalidUrl {
            url: config.url.clone(),
            reason: "anon key is not a valid header value".into(),
        };
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.anon_key).map_err(|_| invalid_key())?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.anon_key)).map_err(|_| invalid_key())?,
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| SupabaseError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self { http, base_url })
    }

    /// Create a client from `intake.toml` and `INTAKE_*` variables.
    pub fn from_config() -> Result<Self, SupabaseError> {
        let config = IntakeConfig::load()?;
        Self::new(&config.supabase)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, SupabaseError> {
        self.base_url.join(path).map_err(|e| {
            ConfigError::InvalidUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            }
            .into()
        })
    }

    async fn post(&self, endpoint: &str, url: Url, body: &Value) -> Result<reqwest::Response, SupabaseError> {
        tracing::debug!(%endpoint, "supabase request");
        let resp = self
            .http
            .post(url)
            .json(body)
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|e| SupabaseError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SupabaseError::Api {
                endpoint: endpoint.into(),
                status,
                message: error_message(&body),
            });
        }
        Ok(resp)
    }

    /// Insert `record` into `table`; the first returned row's `id` is the receipt.
    pub async fn insert(&self, table: Table, record: &Value) -> Result<InsertReceipt, SupabaseError> {
        let endpoint = format!("POST /rest/v1/{table}");
        let url = self.endpoint(&format!("rest/v1/{table}"))?;

        let resp = self.post(&endpoint, url, &json!([record])).await?;
        let rows: Value = resp.json().await.map_err(|e| SupabaseError::Decode {
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        })?;

        let id = rows
            .as_array()
            .and_then(|rows| rows.first())
            .and_then(|row| row.get("id"))
            .map(|id| match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        tracing::debug!(%table, ?id, "row inserted");
        Ok(InsertReceipt { id })
    }

    /// Ask Supabase Auth to text a one-time code to `phone`.
    pub async fn request_otp(&self, phone: &str) -> Result<(), SupabaseError> {
        let url = self.endpoint("auth/v1/otp")?;
        self.post("POST /auth/v1/otp", url, &json!({ "phone": phone }))
            .await?;
        Ok(())
    }

    /// Exchange `code` for the verified user's id.
    pub async fn verify(&self, phone: &str, code: &str) -> Result<VerifiedIdentity, SupabaseError> {
        let endpoint = "POST /auth/v1/verify";
        let url = self.endpoint("auth/v1/verify")?;
        let resp = self
            .post(
                endpoint,
                url,
                &json!({ "phone": phone, "token": code, "type": "sms" }),
            )
            .await?;

        let body: VerifyResponse = resp.json().await.map_err(|e| SupabaseError::Decode {
            endpoint: endpoint.into(),
            reason: e.to_string(),
        })?;
        body.user
            .map(|user| VerifiedIdentity::new(user.id))
            .ok_or_else(|| SupabaseError::Decode {
                endpoint: endpoint.into(),
                reason: "response has no user".into(),
            })
    }
}

/// Pull a human-readable message out of a Supabase error body.
///
/// PostgREST uses `message`, GoTrue uses `msg` or `error_description`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "msg", "error_description"]
                .iter()
                .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl RemoteStore for SupabaseRemote {
    async fn insert_record(&self, table: Table, record: &Value) -> Result<InsertReceipt, RemoteError> {
        Ok(self.insert(table, record).await?)
    }

    async fn send_otp(&self, phone: &str) -> Result<(), RemoteError> {
        Ok(self.request_otp(phone).await?)
    }

    async fn verify_otp(&self, phone: &str, code: &str) -> Result<VerifiedIdentity, RemoteError> {
        Ok(self.verify(phone, code).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_fields() {
        assert_eq!(error_message(r#"{"message":"duplicate key"}"#), "duplicate key");
        assert_eq!(error_message(r#"{"code":400,"msg":"Invalid phone"}"#), "Invalid phone");
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Token has expired"}"#),
            "Token has expired"
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn unconfigured_project_is_refused() {
        let err = SupabaseRemote::new(&SupabaseConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SupabaseError::Config(ConfigError::NotConfigured { .. })
        ));
    }
}
