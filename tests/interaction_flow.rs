//! Integration tests for the interactions endpoint.
//!
//! Drives the full router with signed requests against in-memory doubles:
//! 1. Signature and timestamp checks reject forged or replayed requests
//! 2. The trigger opens a session and answers with the modal
//! 3. A submission is acknowledged immediately and finalized on a task
//! 4. Side effects happen in the documented order

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Datelike;
use ed25519_dalek::{Signer, SigningKey};
use serde_json::{json, Value};
use tower::ServiceExt;

use age_gate::adapters::audit::RecordingAuditSink;
use age_gate::adapters::discord::MockPlatform;
use age_gate::adapters::http::interactions::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use age_gate::adapters::http::{interactions_router, InteractionAppState, InteractionVerifier};
use age_gate::adapters::journal::CallJournal;
use age_gate::adapters::session::InMemorySessionGuard;
use age_gate::application::handlers::verification::replies;
use age_gate::application::{FatalSignal, GateSettings, VerificationContext};
use age_gate::config::UnderageAction;
use age_gate::domain::foundation::{ApplicantId, ChannelId, GuildId, RoleId};
use age_gate::domain::verification::{Announcement, DateInputPolicy, DEFAULT_MINIMUM_AGE};

// =============================================================================
// Test Infrastructure
// =============================================================================

const GUILD: &str = "100";
const APPLICANT: &str = "4242";

fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[7u8; 32])
}

fn settings() -> GateSettings {
    GateSettings {
        guild_id: GuildId::new(GUILD).unwrap(),
        channel_id: ChannelId::new("200").unwrap(),
        role_id: RoleId::new("300").unwrap(),
        application_id: MockPlatform::APPLICATION_ID.to_string(),
        minimum_age: DEFAULT_MINIMUM_AGE,
        date_policy: DateInputPolicy::Strict,
        underage_action: UnderageAction::Ban,
        form_title: "Age Verification".to_string(),
        supplementary_fields: Vec::new(),
        announcement: Announcement::default(),
    }
}

struct TestApp {
    router: Router,
    journal: CallJournal,
    sessions: Arc<InMemorySessionGuard>,
}

impl TestApp {
    fn new() -> Self {
        let journal = CallJournal::new();
        let guild = GuildId::new(GUILD).unwrap();
        let platform = Arc::new(
            MockPlatform::new(journal.clone())
                .with_guild(guild.clone())
                .with_channel(&guild, ChannelId::new("200").unwrap())
                .with_role(&guild, RoleId::new("300").unwrap())
                .with_member(&guild, ApplicantId::new(APPLICANT).unwrap()),
        );
        let sessions = Arc::new(InMemorySessionGuard::new(900));
        let (fatal, _listener) = FatalSignal::channel();

        let context = VerificationContext {
            settings: Arc::new(settings()),
            directory: platform.clone(),
            moderation: platform.clone(),
            messenger: platform.clone(),
            responder: platform,
            audit_sink: Arc::new(RecordingAuditSink::new(journal.clone())),
            sessions: sessions.clone(),
            fatal,
        };
        let verifier = InteractionVerifier::from_key(signing_key().verifying_key());

        Self {
            router: interactions_router(InteractionAppState::new(context, verifier)),
            journal,
            sessions,
        }
    }

    async fn post_signed(&self, body: &Value) -> (StatusCode, Value) {
        let body = body.to_string();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body.as_bytes());
        let signature = hex::encode(signing_key().sign(&message).to_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/interactions")
            .header("content-type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .header(TIMESTAMP_HEADER, timestamp)
            .body(Body::from(body))
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    /// Waits for the spawned pipeline to finalize its reply.
    async fn wait_for_finalize(&self) {
        for _ in 0..100 {
            if self.journal.count("finalize") > 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("reply was never finalized: {:?}", self.journal.kinds());
    }
}

fn member() -> Value {
    json!({
        "user": {"id": APPLICANT, "username": "applicant", "discriminator": "0", "avatar": null},
        "roles": []
    })
}

fn trigger(guild: &str) -> Value {
    json!({
        "type": 3,
        "id": "1",
        "application_id": MockPlatform::APPLICATION_ID,
        "token": "trigger-token",
        "guild_id": guild,
        "member": member(),
        "data": {"custom_id": "age-verification", "component_type": 2}
    })
}

fn submission(form_id: &str, birthday: &str) -> Value {
    json!({
        "type": 5,
        "id": "2",
        "application_id": MockPlatform::APPLICATION_ID,
        "token": "submit-token",
        "guild_id": GUILD,
        "member": member(),
        "data": {
            "custom_id": form_id,
            "components": [
                {"type": 1, "components": [{"type": 4, "custom_id": "birthday", "value": birthday}]}
            ]
        }
    })
}

async fn open_form(app: &TestApp) -> String {
    let (status, body) = app.post_signed(&trigger(GUILD)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], 9);
    body["data"]["custom_id"].as_str().unwrap().to_string()
}

fn birthday_years_ago(years: i32) -> String {
    format!("01/01/{}", chrono::Utc::now().year() - years)
}

// =============================================================================
// Signature Checks
// =============================================================================

#[tokio::test]
async fn ping_is_answered_with_pong() {
    let app = TestApp::new();

    let (status, body) = app
        .post_signed(&json!({"type": 1, "id": "1", "application_id": "2"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": 1}));
}

#[tokio::test]
async fn unsigned_request_is_unauthorized() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/interactions")
        .body(Body::from(r#"{"type":1}"#))
        .unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "INVALID_SIGNATURE");
}

#[tokio::test]
async fn forged_signature_is_unauthorized() {
    let app = TestApp::new();
    let forger = SigningKey::from_bytes(&[9u8; 32]);
    let timestamp = chrono::Utc::now().timestamp().to_string();
    let body = r#"{"type":1,"id":"1","application_id":"2"}"#;
    let signature = hex::encode(forger.sign(format!("{timestamp}{body}").as_bytes()).to_bytes());
    let request = Request::builder()
        .method("POST")
        .uri("/interactions")
        .header(SIGNATURE_HEADER, signature)
        .header(TIMESTAMP_HEADER, timestamp)
        .body(Body::from(body))
        .unwrap();

    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

// =============================================================================
// Verification Flow
// =============================================================================

#[tokio::test]
async fn trigger_opens_session_scoped_modal() {
    let app = TestApp::new();

    let form_id = open_form(&app).await;

    assert!(form_id.starts_with("age-verification:"));
    assert_eq!(app.sessions.len().await, 1);
}

#[tokio::test]
async fn adult_submission_grants_role_after_audit() {
    let app = TestApp::new();
    let form_id = open_form(&app).await;

    let (status, body) = app
        .post_signed(&submission(&form_id, &birthday_years_ago(30)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": 5, "data": {"flags": 64}}));
    app.wait_for_finalize().await;
    assert_eq!(app.journal.kinds(), vec!["audit", "grant_role", "finalize"]);
}

#[tokio::test]
async fn minor_submission_is_told_then_banned() {
    let app = TestApp::new();
    let form_id = open_form(&app).await;

    app.post_signed(&submission(&form_id, &birthday_years_ago(10)))
        .await;

    app.wait_for_finalize().await;
    for _ in 0..100 {
        if app.journal.count("ban") > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(app.journal.kinds(), vec!["audit", "finalize", "ban"]);
}

#[tokio::test]
async fn malformed_birthday_only_gets_correction() {
    let app = TestApp::new();
    let form_id = open_form(&app).await;

    app.post_signed(&submission(&form_id, "2000-01-01")).await;

    app.wait_for_finalize().await;
    assert_eq!(app.journal.kinds(), vec!["finalize"]);
}

#[tokio::test]
async fn replayed_form_is_refused_as_stale() {
    let app = TestApp::new();
    let form_id = open_form(&app).await;
    app.post_signed(&submission(&form_id, &birthday_years_ago(30)))
        .await;

    let (status, body) = app
        .post_signed(&submission(&form_id, &birthday_years_ago(10)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], 4);
    assert_eq!(body["data"]["flags"], 64);
    assert_eq!(body["data"]["content"], replies::STALE_FORM);
    app.wait_for_finalize().await;
    assert_eq!(app.journal.count("ban"), 0);
}

#[tokio::test]
async fn trigger_from_other_guild_is_refused() {
    let app = TestApp::new();

    let (status, body) = app.post_signed(&trigger("999")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], 4);
    assert_eq!(body["data"]["content"], replies::WRONG_GUILD);
    assert!(app.sessions.is_empty().await);
}

#[tokio::test]
async fn unknown_component_is_bad_request() {
    let app = TestApp::new();
    let mut interaction = trigger(GUILD);
    interaction["data"]["custom_id"] = json!("something-else");

    let (status, body) = app.post_signed(&interaction).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "UNSUPPORTED_INTERACTION");
}
