#![allow(clippy::unwrap_used, clippy::expect_used)]

use expunge::{
    datastore::RestDataStore,
    identity::RestIdentityProvider,
    workflow::{ErasePlan, Messages, Phase, Section, Workflow, WorkflowError},
};
use secrecy::SecretString;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "api-key";

struct Backend {
    auth: MockServer,
    database: MockServer,
}

impl Backend {
    async fn start() -> Self {
        let backend = Self {
            auth: MockServer::start().await,
            database: MockServer::start().await,
        };

        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .and(query_param("key", API_KEY))
            .and(body_json(json!({
                "email": "a@b.com",
                "password": "correct horse",
                "returnSecureToken": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "localId": "u1",
                "email": "a@b.com",
                "idToken": "id-token"
            })))
            .mount(&backend.auth)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 400, "message": "INVALID_PASSWORD" }
            })))
            .mount(&backend.auth)
            .await;

        backend
    }

    fn workflow(&self, erase_plan: ErasePlan) -> Workflow<RestIdentityProvider, RestDataStore> {
        self.workflow_with_messages(erase_plan, Messages::default())
    }

    fn workflow_with_messages(
        &self,
        erase_plan: ErasePlan,
        messages: Messages,
    ) -> Workflow<RestIdentityProvider, RestDataStore> {
        let identity =
            RestIdentityProvider::new(&self.auth.uri(), SecretString::from(API_KEY.to_string()))
                .expect("identity client");
        let store = RestDataStore::new(&self.database.uri()).expect("data store client");

        Workflow::new(identity, store, messages, erase_plan)
    }

    async fn expect_account_delete(&self, times: u64, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/v1/accounts:delete"))
            .and(body_json(json!({ "idToken": "id-token" })))
            .respond_with(response)
            .expect(times)
            .mount(&self.auth)
            .await;
    }

    async fn expect_data_delete(&self, node: &str, times: u64, response: ResponseTemplate) {
        Mock::given(method("DELETE"))
            .and(path(node))
            .and(query_param("auth", "id-token"))
            .respond_with(response)
            .expect(times)
            .mount(&self.database)
            .await;
    }
}

fn password(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

fn accept(_: &str) -> bool {
    true
}

#[tokio::test]
async fn wrong_password_shows_message() {
    let backend = Backend::start().await;
    let mut workflow = backend.workflow(ErasePlan::default());

    workflow.authenticate("a@b.com", &password("wrong")).await;

    assert_eq!(workflow.phase(), Phase::AwaitingCredentials);
    assert_eq!(
        workflow.view().sign_in_error.as_deref(),
        Some("Incorrect password.")
    );
}

#[tokio::test]
async fn overridden_message_for_unlisted_sign_in_code() {
    let backend = Backend {
        auth: MockServer::start().await,
        database: MockServer::start().await,
    };
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "OPERATION_NOT_ALLOWED" }
        })))
        .mount(&backend.auth)
        .await;

    let messages = Messages::from_json(
        r#"{ "auth": { "auth/operation-not-allowed": "Password sign-in is disabled." } }"#,
    )
    .unwrap();
    let mut workflow = backend.workflow_with_messages(ErasePlan::default(), messages);

    workflow.authenticate("a@b.com", &password("correct horse")).await;

    assert_eq!(workflow.phase(), Phase::AwaitingCredentials);
    assert_eq!(
        workflow.view().sign_in_error.as_deref(),
        Some("Password sign-in is disabled.")
    );
}

#[tokio::test]
async fn full_deletion_erases_data_before_account() {
    let backend = Backend::start().await;
    backend
        .expect_data_delete(
            "/users/u1.json",
            1,
            ResponseTemplate::new(200).set_body_json(Value::Null),
        )
        .await;
    backend
        .expect_account_delete(1, ResponseTemplate::new(200).set_body_json(json!({})))
        .await;

    let mut workflow = backend.workflow(ErasePlan::default());

    workflow.authenticate("a@b.com", &password("correct horse")).await;
    assert_eq!(workflow.view().email.as_deref(), Some("a@b.com"));

    workflow.confirm_checkbox(true);
    workflow.delete_account(&accept).await;

    assert_eq!(workflow.phase(), Phase::Deleted);
    assert_eq!(workflow.view().section, Section::Success);
    assert!(workflow.session().is_none());

    // One data delete and one account delete, nothing else.
    let data_requests = backend.database.received_requests().await.unwrap_or_default();
    let auth_requests = backend.auth.received_requests().await.unwrap_or_default();
    assert_eq!(data_requests.len(), 1);
    assert_eq!(
        auth_requests
            .iter()
            .filter(|r| r.url.path() == "/v1/accounts:delete")
            .count(),
        1
    );
}

#[tokio::test]
async fn denied_data_erasure_keeps_account() {
    let backend = Backend::start().await;
    backend
        .expect_data_delete(
            "/users/u1.json",
            1,
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Permission denied" })),
        )
        .await;
    backend
        .expect_account_delete(0, ResponseTemplate::new(200))
        .await;

    let mut workflow = backend.workflow(ErasePlan::default());
    workflow.authenticate("a@b.com", &password("correct horse")).await;
    workflow.confirm_checkbox(true);
    workflow.delete_account(&accept).await;

    assert_eq!(workflow.phase(), Phase::ConfirmingDeletion);
    assert_eq!(
        workflow.view().delete_error.as_deref(),
        Some("Failed to delete account: 401 Unauthorized, Permission denied")
    );
    assert!(!workflow.view().deleting);
}

#[tokio::test]
async fn stale_login_asks_to_sign_in_again() {
    let backend = Backend::start().await;
    backend
        .expect_data_delete(
            "/users/u1.json",
            1,
            ResponseTemplate::new(200).set_body_json(Value::Null),
        )
        .await;
    backend
        .expect_account_delete(
            1,
            ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 400, "message": "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" }
            })),
        )
        .await;

    let mut workflow = backend.workflow(ErasePlan::default());
    workflow.authenticate("a@b.com", &password("correct horse")).await;
    workflow.confirm_checkbox(true);
    workflow.delete_account(&accept).await;

    assert_eq!(workflow.phase(), Phase::ConfirmingDeletion);
    assert_eq!(
        workflow.last_error(),
        Some(&WorkflowError::ReauthenticationRequired)
    );
    assert_eq!(
        workflow.view().delete_error.as_deref(),
        Some("For security reasons, please sign out and sign in again before deleting your account.")
    );
}

#[tokio::test]
async fn every_configured_path_is_erased() {
    let backend = Backend::start().await;
    for node in ["/users/u1.json", "/settings/u1.json"] {
        backend
            .expect_data_delete(node, 1, ResponseTemplate::new(200).set_body_json(Value::Null))
            .await;
    }
    backend
        .expect_account_delete(1, ResponseTemplate::new(200).set_body_json(json!({})))
        .await;

    let erase_plan = ErasePlan::new(["users/{uid}", "settings/{uid}"]).unwrap();
    let mut workflow = backend.workflow(erase_plan);
    workflow.authenticate("a@b.com", &password("correct horse")).await;
    workflow.confirm_checkbox(true);
    workflow.delete_account(&accept).await;

    assert_eq!(workflow.phase(), Phase::Deleted);
}

#[tokio::test]
async fn declined_prompt_sends_nothing() {
    let backend = Backend::start().await;
    backend
        .expect_data_delete("/users/u1.json", 0, ResponseTemplate::new(200))
        .await;
    backend
        .expect_account_delete(0, ResponseTemplate::new(200))
        .await;

    let mut workflow = backend.workflow(ErasePlan::default());
    workflow.authenticate("a@b.com", &password("correct horse")).await;
    workflow.confirm_checkbox(true);
    workflow.delete_account(&|_: &str| false).await;

    assert_eq!(workflow.phase(), Phase::ConfirmingDeletion);

    workflow.cancel().await;
    assert_eq!(workflow.phase(), Phase::AwaitingCredentials);
    assert!(workflow.session().is_none());
}
