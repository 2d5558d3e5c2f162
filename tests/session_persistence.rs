//! Session state survives a restart through the JSON file store.

use jobboard::api::MultipartPart;
use jobboard::domain::{FileUpload, FormSubmission};
use jobboard::storage::{JsonFileStore, SESSION_FILE};
use jobboard::{JobBoardClient, NavigationTarget, ScriptedTransport, SessionController};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn open(dir: &Path) -> (JobBoardClient<Arc<ScriptedTransport>>, Arc<ScriptedTransport>) {
    let store = JsonFileStore::open(dir.join(SESSION_FILE)).unwrap();
    let session = SessionController::open(Box::new(store)).unwrap();
    let transport = Arc::new(ScriptedTransport::new());
    (
        JobBoardClient::new(Arc::clone(&transport), Arc::new(session)),
        transport,
    )
}

#[tokio::test]
async fn login_then_profile_edit_persists_merged_user() {
    let dir = TempDir::new().unwrap();

    {
        let (client, transport) = open(dir.path());
        transport.reply(
            200,
            json!({
                "token": "abc",
                "user": { "_id": "u1", "name": "Ada", "role": "user", "gender": "f" }
            }),
        );
        let login = FormSubmission::new()
            .with_text("email", "ada@example.com")
            .with_text("password", "s3cret");
        assert_eq!(client.login(&login).await.unwrap(), NavigationTarget::JobListing);

        transport.reply(200, json!({ "message": "updated" }));
        let edit = FormSubmission::new()
            .with_text("username", "Ada L")
            .with_text("image", "https://img.example/ada.png")
            .with_text("phone", "555")
            .with_text("skills", "rust")
            .with_text("skills", "sql")
            .with_file("cv", FileUpload::new("cv.pdf", b"%PDF".to_vec()));
        assert_eq!(
            client.edit_profile("u1", &edit).await.unwrap(),
            NavigationTarget::Profile("u1".to_string())
        );

        let request = transport.last_request().unwrap();
        let jobboard::api::RequestBody::Multipart(parts) = request.body else {
            panic!("profile edit should be multipart");
        };
        assert!(parts.contains(&MultipartPart::text("skills", r#"["rust","sql"]"#)));
        assert!(parts.iter().any(|part| part.name() == "cv"));
    }

    let (reopened, _transport) = open(dir.path());
    assert_eq!(reopened.session().token().as_deref(), Some("abc"));
    let user = reopened.session().current_user().unwrap();
    assert_eq!(user.name, "Ada L");
    assert_eq!(user.extra["phone"], "555");
    assert_eq!(user.extra["skills"], json!(["rust", "sql"]));
    assert_eq!(user.extra["cv"], "cv.pdf");
    assert_eq!(user.extra["gender"], "f");
}

#[tokio::test]
async fn refused_profile_edit_leaves_stored_user_alone() {
    let dir = TempDir::new().unwrap();
    let (client, transport) = open(dir.path());
    client
        .session()
        .sign_in(
            "abc".to_string(),
            jobboard::domain::SessionUser::new("u1", "Ada", "user"),
        )
        .unwrap();
    let version = client.session().version();

    transport.reply(500, json!({ "message": "boom" }));
    let edit = FormSubmission::new()
        .with_text("username", "Changed")
        .with_text("image", "x")
        .with_text("phone", "1");
    let err = client.edit_profile("u1", &edit).await.unwrap_err();

    assert_eq!(err.kind(), jobboard::ErrorKind::Remote);
    assert_eq!(client.session().version(), version);
    drop(client);

    let (reopened, _transport) = open(dir.path());
    assert_eq!(reopened.session().current_user().unwrap().name, "Ada");
}

#[tokio::test]
async fn logout_removes_both_entries_from_disk() {
    let dir = TempDir::new().unwrap();
    {
        let (client, _transport) = open(dir.path());
        client
            .session()
            .sign_in(
                "abc".to_string(),
                jobboard::domain::SessionUser::new("u1", "Ada", "user"),
            )
            .unwrap();
        client.logout().unwrap();
    }

    let (reopened, _transport) = open(dir.path());
    assert!(reopened.session().token().is_none());
    assert!(reopened.session().current_user().is_none());
}
