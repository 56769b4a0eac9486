//! Identity Toolkit REST client.
//!
//! Sign-in uses `accounts:signInWithPassword` and account removal uses
//! `accounts:delete`; both authenticate the project with an API key passed as
//! the `key` query parameter. The protocol keeps no server-side session, so
//! signing out only means dropping the ID token, which the caller owns.

use super::{AccountErasureError, IdentityProvider, Principal, SignInError};
use crate::http;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info_span, instrument, Instrument};
use url::Url;

pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com";

const SIGN_IN_PATH: &str = "/v1/accounts:signInWithPassword";
const DELETE_PATH: &str = "/v1/accounts:delete";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: Option<String>,
    id_token: String,
}

pub struct RestIdentityProvider {
    client: Client,
    auth_url: Url,
    api_key: SecretString,
}

impl RestIdentityProvider {
    /// # Errors
    /// Returns an error if `auth_url` is not a valid http(s) URL or the HTTP client cannot be built.
    pub fn new(auth_url: &str, api_key: SecretString) -> Result<Self> {
        Ok(Self {
            client: http::client()?,
            auth_url: http::base_url(auth_url)?,
            api_key,
        })
    }
}

/// Identity Toolkit reports errors as `CODE` or `CODE : human readable detail`.
fn error_code(json_response: &Value) -> &str {
    http::error_message(json_response)
        .split(" : ")
        .next()
        .unwrap_or_default()
        .trim()
}

/// `OPERATION_NOT_ALLOWED` becomes `auth/operation-not-allowed`, the key used
/// by the message table.
fn sdk_code(code: &str) -> String {
    format!("auth/{}", code.to_ascii_lowercase().replace('_', "-"))
}

fn sign_in_error(code: &str, status: StatusCode) -> SignInError {
    match code {
        "INVALID_EMAIL" => SignInError::InvalidEmail,
        "USER_DISABLED" => SignInError::UserDisabled,
        "EMAIL_NOT_FOUND" => SignInError::UserNotFound,
        "INVALID_PASSWORD" => SignInError::WrongPassword,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => SignInError::TooManyRequests,
        "INVALID_LOGIN_CREDENTIALS" => SignInError::InvalidCredential,
        "" => SignInError::Other(status.to_string()),
        other => SignInError::Other(sdk_code(other)),
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    #[instrument(skip_all)]
    async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Principal, SignInError> {
        let sign_in_url = http::endpoint_url(&self.auth_url, SIGN_IN_PATH);

        let payload = json!({
            "email": email,
            "password": password.expose_secret(),
            "returnSecureToken": true,
        });

        let span = info_span!("identity.sign_in", http.method = "POST", url = %sign_in_url);
        let response = self
            .client
            .post(sign_in_url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&payload)
            .send()
            .instrument(span)
            .await
            .map_err(|e| {
                error!("Sign-in request failed: {}", e);

                SignInError::NetworkRequestFailed(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let json_response: Value = response.json().await.unwrap_or_default();
            let code = error_code(&json_response);

            debug!("sign-in rejected: {} {}", status, code);

            return Err(sign_in_error(code, status));
        }

        let body: SignInResponse = response.json().await.map_err(|e| {
            error!("Failed to parse sign-in response: {}", e);

            SignInError::Other(format!("Error parsing JSON response: {e}"))
        })?;

        Ok(Principal::new(
            body.local_id,
            body.email.unwrap_or_else(|| email.to_string()),
            SecretString::from(body.id_token),
        ))
    }

    async fn sign_out(&self) {
        debug!("signing out, dropping local session");
    }

    #[instrument(skip_all, fields(uid = %principal.uid))]
    async fn delete_account(&self, principal: &Principal) -> Result<(), AccountErasureError> {
        let delete_url = http::endpoint_url(&self.auth_url, DELETE_PATH);

        let payload = json!({
            "idToken": principal.id_token.expose_secret(),
        });

        let span = info_span!("identity.delete_account", http.method = "POST", url = %delete_url);
        let response = self
            .client
            .post(delete_url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&payload)
            .send()
            .instrument(span)
            .await
            .map_err(|e| {
                error!("Account deletion request failed: {}", e);

                AccountErasureError::Other(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let json_response: Value = response.json().await.unwrap_or_default();

            return match error_code(&json_response) {
                "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => Err(AccountErasureError::RequiresRecentLogin),
                "" => Err(AccountErasureError::Other(status.to_string())),
                code => Err(AccountErasureError::Other(format!("{status}, {code}"))),
            };
        }

        Ok(())
    }
}
