//! Stripe implementation of the payments client.
//!
//! Talks to the Stripe REST API directly with `reqwest`:
//! - `POST /v1/accounts` to provision an Express connected account
//! - `GET /v1/accounts/{id}` to read capability flags
//! - `POST /v1/account_links` to mint onboarding links
//!
//! Stripe error bodies carry a `type` field which is mapped onto the
//! `PaymentsError` categories instead of being passed through verbatim.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{AccountSnapshot, NewConnectedAccount, PaymentsClient, PaymentsError};

/// Per-request timeout for calls to the Stripe API.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(15);

/// Stripe REST API client.
pub struct StripeClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl StripeClient {
    /// Create a client for the given API base URL and secret key.
    ///
    /// `base_url` is normally `https://api.stripe.com`; tests point it at a
    /// local mock server.
    pub fn new(
        base_url: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, PaymentsError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PaymentsError::Unavailable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        })
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, PaymentsError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.secret_key)
            .form(form)
            .send()
            .await
            .map_err(|e| PaymentsError::Unavailable(e.to_string()))?;

        decode_response(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, PaymentsError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| PaymentsError::Unavailable(e.to_string()))?;

        decode_response(response).await
    }
}

#[async_trait]
impl PaymentsClient for StripeClient {
    async fn create_account(
        &self,
        account: &NewConnectedAccount,
    ) -> Result<String, PaymentsError> {
        let created: StripeAccount = self
            .post_form(
                "/v1/accounts",
                &[
                    ("type", "express"),
                    ("email", account.email.as_str()),
                    ("business_profile[name]", account.business_name.as_str()),
                    ("capabilities[card_payments][requested]", "true"),
                    ("capabilities[transfers][requested]", "true"),
                ],
            )
            .await?;

        Ok(created.id)
    }

    async fn retrieve_account(&self, account_id: &str) -> Result<AccountSnapshot, PaymentsError> {
        let account: StripeAccount = self.get(&format!("/v1/accounts/{account_id}")).await?;

        Ok(account.into())
    }

    async fn create_onboarding_link(
        &self,
        account_id: &str,
        refresh_url: &str,
        return_url: &str,
    ) -> Result<String, PaymentsError> {
        let link: StripeAccountLink = self
            .post_form(
                "/v1/account_links",
                &[
                    ("account", account_id),
                    ("refresh_url", refresh_url),
                    ("return_url", return_url),
                    ("type", "account_onboarding"),
                ],
            )
            .await?;

        Ok(link.url)
    }
}

/// Decode a Stripe response, classifying non-2xx bodies into error categories.
async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, PaymentsError> {
    let status = response.status();

    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| PaymentsError::Protocol(e.to_string()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| PaymentsError::Unavailable(e.to_string()))?;

    match serde_json::from_str::<StripeErrorEnvelope>(&body) {
        Ok(envelope) => Err(classify_error(envelope.error)),
        Err(_) if status.is_server_error() => Err(PaymentsError::Unavailable(format!(
            "HTTP {status} from payments provider"
        ))),
        Err(_) => Err(PaymentsError::Protocol(format!(
            "HTTP {status} with undecodable error body"
        ))),
    }
}

/// Map a Stripe error object onto the `PaymentsError` taxonomy.
fn classify_error(error: StripeErrorBody) -> PaymentsError {
    let message = error.message.unwrap_or_else(|| "unknown error".to_string());

    match error.error_type.as_deref() {
        Some("invalid_request_error") => {
            // Unknown-account errors arrive as invalid_request_error with
            // code resource_missing.
            if error.code.as_deref() == Some("resource_missing") {
                PaymentsError::AccountNotFound(message)
            } else {
                PaymentsError::InvalidRequest(message)
            }
        }
        Some("authentication_error") => PaymentsError::Authentication(message),
        Some("rate_limit_error") | Some("api_error") => PaymentsError::Unavailable(message),
        _ => PaymentsError::Protocol(message),
    }
}

/// Connected account object, reduced to the fields the lifecycle reads.
///
/// Also used to decode the `data.object` payload of `account.updated`
/// webhook events.
#[derive(Debug, Deserialize)]
pub struct StripeAccount {
    pub id: String,
    #[serde(default)]
    pub charges_enabled: bool,
    #[serde(default)]
    pub payouts_enabled: bool,
    #[serde(default)]
    pub details_submitted: bool,
    #[serde(default)]
    pub requirements: StripeRequirements,
}

/// `requirements` hash of a connected account.
#[derive(Debug, Default, Deserialize)]
pub struct StripeRequirements {
    #[serde(default)]
    pub currently_due: Vec<String>,
    #[serde(default)]
    pub disabled_reason: Option<String>,
}

impl From<StripeAccount> for AccountSnapshot {
    fn from(account: StripeAccount) -> Self {
        Self {
            id: account.id,
            charges_enabled: account.charges_enabled,
            payouts_enabled: account.payouts_enabled,
            details_submitted: account.details_submitted,
            disabled_reason: account.requirements.disabled_reason,
            currently_due: account.requirements.currently_due,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StripeAccountLink {
    url: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<String>,
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_json_maps_to_snapshot() {
        let account: StripeAccount = serde_json::from_str(
            r#"{
                "id": "acct_123",
                "charges_enabled": true,
                "payouts_enabled": true,
                "details_submitted": true,
                "requirements": {
                    "currently_due": ["external_account"],
                    "disabled_reason": null
                }
            }"#,
        )
        .unwrap();

        let snapshot: AccountSnapshot = account.into();
        assert_eq!(snapshot.id, "acct_123");
        assert!(snapshot.charges_enabled);
        assert!(snapshot.payouts_enabled);
        assert!(snapshot.details_submitted);
        assert_eq!(snapshot.disabled_reason, None);
        assert_eq!(snapshot.currently_due, vec!["external_account"]);
    }

    #[test]
    fn missing_capability_flags_default_to_false() {
        let account: StripeAccount = serde_json::from_str(r#"{"id": "acct_min"}"#).unwrap();
        let snapshot: AccountSnapshot = account.into();

        assert!(!snapshot.charges_enabled);
        assert!(!snapshot.payouts_enabled);
        assert!(!snapshot.details_submitted);
        assert!(snapshot.currently_due.is_empty());
    }

    #[test]
    fn resource_missing_classifies_as_account_not_found() {
        let error = StripeErrorBody {
            error_type: Some("invalid_request_error".to_string()),
            code: Some("resource_missing".to_string()),
            message: Some("No such account: acct_nope".to_string()),
        };

        assert!(matches!(
            classify_error(error),
            PaymentsError::AccountNotFound(_)
        ));
    }

    #[test]
    fn error_types_map_to_categories() {
        let mk = |error_type: &str| StripeErrorBody {
            error_type: Some(error_type.to_string()),
            code: None,
            message: Some("boom".to_string()),
        };

        assert!(matches!(
            classify_error(mk("invalid_request_error")),
            PaymentsError::InvalidRequest(_)
        ));
        assert!(matches!(
            classify_error(mk("authentication_error")),
            PaymentsError::Authentication(_)
        ));
        assert!(matches!(
            classify_error(mk("rate_limit_error")),
            PaymentsError::Unavailable(_)
        ));
        assert!(matches!(
            classify_error(mk("api_error")),
            PaymentsError::Unavailable(_)
        ));
        assert!(matches!(
            classify_error(mk("card_error")),
            PaymentsError::Protocol(_)
        ));
    }
}
