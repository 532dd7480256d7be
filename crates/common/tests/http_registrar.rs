use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use authprobe_common::{
    AccountStatus, AccountProvisioner, HarnessConfig, HttpRegistrar, IdentityGenerator,
    RegistrationFailure, RegistrationRequest,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

type Accounts = Arc<Mutex<Vec<RegistrationRequest>>>;

async fn create_user(
    State(accounts): State<Accounts>,
    Json(request): Json<RegistrationRequest>,
) -> StatusCode {
    accounts.lock().unwrap().push(request);
    StatusCode::OK
}

async fn refuse_user(Json(_request): Json<RegistrationRequest>) -> (StatusCode, &'static str) {
    (StatusCode::BAD_REQUEST, "unknown status")
}

async fn slow_user(Json(_request): Json<RegistrationRequest>) -> StatusCode {
    tokio::time::sleep(Duration::from_secs(5)).await;
    StatusCode::OK
}

/// Spawn a stand-in for the application's test-mode endpoints
async fn spawn_app(accounts: Accounts) -> SocketAddr {
    let app = Router::new()
        .route("/api/system/users", post(create_user))
        .route("/refuse", post(refuse_user))
        .route("/slow", post(slow_user))
        .with_state(accounts);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Provisioning resolves only after the application has stored the account
#[tokio::test]
async fn provision_is_acknowledged_before_returning() {
    let accounts = Accounts::default();
    let addr = spawn_app(accounts.clone()).await;

    let config = HarnessConfig {
        base_url: format!("http://{}", addr),
        ..Default::default()
    };
    let provisioner = config.provisioner().expect("valid config");

    let user = provisioner
        .provision(AccountStatus::Active)
        .await
        .expect("registration accepted");

    let stored = accounts.lock().unwrap().clone();
    assert_eq!(
        stored,
        vec![RegistrationRequest::new(&user.identity, AccountStatus::Active)]
    );
}

#[tokio::test]
async fn non_success_status_is_rejection() {
    let addr = spawn_app(Accounts::default()).await;
    let registrar =
        HttpRegistrar::new(&format!("http://{}", addr), "/refuse", Duration::from_secs(2)).unwrap();
    let provisioner = AccountProvisioner::new(IdentityGenerator::default(), Arc::new(registrar));

    let err = provisioner
        .provision(AccountStatus::Blocked)
        .await
        .expect_err("refused registration must fail");

    assert_eq!(err.status, AccountStatus::Blocked);
    match err.cause {
        RegistrationFailure::Rejected { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "unknown status");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn client_timeout_is_reported_as_timeout() {
    let addr = spawn_app(Accounts::default()).await;
    let registrar =
        HttpRegistrar::new(&format!("http://{}", addr), "/slow", Duration::from_millis(200))
            .unwrap();
    let provisioner = AccountProvisioner::new(IdentityGenerator::default(), Arc::new(registrar));

    let err = provisioner
        .provision(AccountStatus::Active)
        .await
        .expect_err("slow registration must time out");

    assert!(
        matches!(err.cause, RegistrationFailure::Timeout(d) if d == Duration::from_millis(200)),
        "unexpected cause: {:?}",
        err.cause
    );
}

#[tokio::test]
async fn unreachable_application_is_transport_error() {
    // Bind and drop to get a port nothing listens on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let config = HarnessConfig {
        base_url: format!("http://{}", addr),
        request_timeout_secs: 2,
        ..Default::default()
    };
    let provisioner = config.provisioner().unwrap();

    let err = provisioner.provision(AccountStatus::Active).await.unwrap_err();
    assert!(matches!(err.cause, RegistrationFailure::Transport(_)));
}
