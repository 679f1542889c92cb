//! Drives `HttpCredentialVerifier` against a live in-process server.

use std::time::Duration;

use lancenotas_core::AuthFailure;
use lancenotas_core::auth::{
    CredentialVerifier, DEMO_EMAIL, DEMO_PASSWORD, NewProfessor, UserDirectory,
};
use lancenotas_infrastructure::HttpCredentialVerifier;
use lancenotas_server::{AppState, serve};
use tokio::net::TcpListener;

async fn spawn_server() -> String {
    spawn_server_with(UserDirectory::with_demo_account().unwrap()).await
}

async fn spawn_server_with(directory: UserDirectory) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, AppState::new(directory)));
    format!("http://{}", addr)
}

fn verifier(base_url: &str) -> HttpCredentialVerifier {
    HttpCredentialVerifier::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_remote_login_success() {
    let base = spawn_server().await;

    let professor = verifier(&base)
        .verify(DEMO_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();

    assert_eq!(professor.id, "1");
    assert_eq!(professor.nome, "Professor Demo");
    assert_eq!(professor.email, DEMO_EMAIL);
}

#[tokio::test]
async fn test_remote_login_rejections() {
    let base = spawn_server().await;
    let verifier = verifier(&base);

    let err = verifier.verify(DEMO_EMAIL, "wrong").await.unwrap_err();
    assert_eq!(err.auth_failure(), Some(AuthFailure::InvalidCredentials));
    assert_eq!(err.user_message(), "Email ou senha inválidos");

    let err = verifier.verify("", "").await.unwrap_err();
    assert_eq!(err.auth_failure(), Some(AuthFailure::MissingFields));
}

#[tokio::test]
async fn test_registered_professor_logs_in_remotely() {
    let mut directory = UserDirectory::with_demo_account().unwrap();
    directory
        .register(NewProfessor {
            nome: "Ana Souza".to_string(),
            email: "Ana@Escola.br".to_string(),
            password: "s3nha".to_string(),
            escola: Some("EE Centro".to_string()),
        })
        .unwrap();
    let base = spawn_server_with(directory).await;

    let professor = verifier(&base).verify("ana@escola.br", "s3nha").await.unwrap();

    assert_eq!(professor.id, "2");
    assert_eq!(professor.email, "ana@escola.br");
    assert_eq!(professor.escola.as_deref(), Some("EE Centro"));
}

#[tokio::test]
async fn test_missing_endpoint_is_unavailable() {
    let base = spawn_server().await;

    let err = verifier(&format!("{}/nope", base))
        .verify(DEMO_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap_err();

    assert!(err.is_unavailable());
    assert!(!err.is_authentication());
}
