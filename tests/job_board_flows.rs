//! End-to-end flows through the client, the job detail runtime and the
//! listing, against a scripted transport.

use jobboard::api::{Method, RequestBody};
use jobboard::app::{handle_event, Action, Event, JobDetailState, JobListingState};
use jobboard::domain::{FormSubmission, SessionUser, APPLICANT_ROLE};
use jobboard::resource::ResourceHook;
use jobboard::storage::MemoryStore;
use jobboard::ui::{render_job_listing, JobDetailView};
use jobboard::{
    ErrorKind, JobBoardClient, JobDetailRuntime, NavigationTarget, PostingMode,
    ScriptedTransport, SessionController,
};
use serde_json::{json, Value};
use std::sync::Arc;

type Client = JobBoardClient<Arc<ScriptedTransport>>;

fn client() -> (Client, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::new());
    let session = SessionController::open(Box::new(MemoryStore::new())).unwrap();
    (
        JobBoardClient::new(Arc::clone(&transport), Arc::new(session)),
        transport,
    )
}

fn signed_in(user_id: &str, role: &str) -> (Client, Arc<ScriptedTransport>) {
    let (client, transport) = client();
    client
        .session()
        .sign_in(
            format!("token-{user_id}"),
            SessionUser::new(user_id, format!("User {user_id}"), role),
        )
        .unwrap();
    (client, transport)
}

fn posting_json(applicants: &[&str]) -> Value {
    json!({
        "_id": "p1",
        "title": "Engineer",
        "companyName": "Acme",
        "position": "mid",
        "description": "Build things",
        "requirements": ["SQL"],
        "applicants": applicants
            .iter()
            .map(|id| json!({ "id": id, "name": format!("User {id}") }))
            .collect::<Vec<_>>(),
        "postedBy": { "id": "owner", "name": "Olive" },
        "createdAt": "2024-03-05T10:00:00Z"
    })
}

fn poster_json() -> Value {
    json!({ "_id": "owner", "name": "Olive", "image": "https://img.example/olive.png" })
}

#[tokio::test]
async fn missing_fields_never_reach_the_network() {
    let (client, transport) = signed_in("u1", APPLICANT_ROLE);

    let err = client
        .login(&FormSubmission::new().with_text("email", "ada@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = client
        .save_job_posting(
            &FormSubmission::new().with_text("title", "Engineer"),
            PostingMode::Create,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = client
        .change_password("u1", &FormSubmission::new().with_text("oldPassword", "a"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn rejected_login_keeps_previous_session() {
    let (client, transport) = signed_in("u1", APPLICANT_ROLE);
    let before = client.session().snapshot();
    transport.reply(401, json!({ "message": "bad credentials" }));

    let form = FormSubmission::new()
        .with_text("email", "ada@example.com")
        .with_text("password", "wrong");
    let err = client.login(&form).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
    assert_eq!(err.message(), "Incorrect Password try again.");
    assert_eq!(client.session().snapshot(), before);
}

#[tokio::test]
async fn existing_applicant_is_rejected_before_sending() {
    let (client, transport) = signed_in("u1", APPLICANT_ROLE);
    transport.reply(200, posting_json(&["u1"]));

    let job = client.fetch_job("p1").await.unwrap();
    let roster = jobboard::ApplicantRoster::from_server(&job.applicants);
    let sent_before = transport.request_count();

    let err = client.apply_to_job("p1", &roster).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Application);
    assert_eq!(transport.request_count(), sent_before);
}

#[tokio::test]
async fn apply_through_runtime_adds_optimistic_entry_once() {
    let (client, transport) = signed_in("u2", APPLICANT_ROLE);
    transport.reply(200, posting_json(&[]));
    transport.reply(200, poster_json());
    transport.reply(200, json!({ "message": "Applied" }));

    let mut page = JobDetailRuntime::new(client);
    page.dispatch(Event::Mount { job_id: "p1".into() }).await.unwrap();
    assert!(page.state().can_apply());

    page.dispatch(Event::Apply).await.unwrap();
    assert!(page.state().roster.contains("u2"));
    assert_eq!(page.state().roster.pending(), 1);
    assert_eq!(transport.request_count(), 3);

    let apply = transport.last_request().unwrap();
    assert_eq!(apply.method, Method::Patch);
    assert_eq!(apply.path, "/post/apply/p1");
    assert_eq!(apply.bearer.as_deref(), Some("token-u2"));
    assert_eq!(apply.body, RequestBody::Json(json!({ "uid": "u2", "pid": "p1" })));

    page.dispatch(Event::Apply).await.unwrap();
    assert_eq!(transport.request_count(), 3);

    let JobDetailView::Ready(vm) = page.view() else {
        panic!("page should be ready");
    };
    assert_eq!(vm.applicants_line, "1 Applicants");
    assert!(vm.apply_button.is_none());
}

#[test]
fn second_apply_while_in_flight_is_ignored() {
    let mut state = JobDetailState::new(Some(SessionUser::new("u2", "Ada", APPLICANT_ROLE)));
    let (_, actions) = handle_event(&mut state, &Event::Mount { job_id: "p1".into() }).unwrap();
    let Some(Action::FetchJob(ticket)) = actions.into_iter().next() else {
        panic!("mount should fetch");
    };
    let job = serde_json::from_value(posting_json(&[])).unwrap();
    handle_event(&mut state, &Event::JobSettled { ticket, result: Ok(job) }).unwrap();

    let (_, first) = handle_event(&mut state, &Event::Apply).unwrap();
    let (rerender, second) = handle_event(&mut state, &Event::Apply).unwrap();

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert!(!rerender);
}

#[test]
fn late_response_for_previous_id_is_discarded() {
    let mut hook: ResourceHook<String> = ResourceHook::new();
    let a = hook.activate(Some("a")).unwrap();
    let b = hook.activate(Some("b")).unwrap();

    assert!(hook.settle(&b, Ok("job b".to_string())));
    assert!(!hook.settle(&a, Ok("job a".to_string())));
    assert_eq!(hook.data().map(String::as_str), Some("job b"));
}

#[tokio::test]
async fn owner_and_applicant_see_different_controls() {
    let (owner, transport) = signed_in("owner", "employer");
    transport.reply(200, posting_json(&[]));
    transport.reply(200, poster_json());
    let mut page = JobDetailRuntime::new(owner);
    page.dispatch(Event::Mount { job_id: "p1".into() }).await.unwrap();
    let JobDetailView::Ready(vm) = page.view() else {
        panic!("owner page should be ready");
    };
    assert!(vm.owner_controls.is_some());
    assert!(vm.apply_button.is_none());

    let (seeker, transport) = signed_in("u3", APPLICANT_ROLE);
    transport.reply(200, posting_json(&[]));
    transport.reply(200, poster_json());
    let mut page = JobDetailRuntime::new(seeker);
    page.dispatch(Event::Mount { job_id: "p1".into() }).await.unwrap();
    let JobDetailView::Ready(vm) = page.view() else {
        panic!("seeker page should be ready");
    };
    assert!(vm.owner_controls.is_none());
    assert!(vm.apply_button.is_some());
    assert_eq!(vm.poster.avatar.as_deref(), Some("https://img.example/olive.png"));
}

#[tokio::test]
async fn confirmed_delete_navigates_to_listing() {
    let (owner, transport) = signed_in("owner", "employer");
    transport.reply(200, posting_json(&[]));
    transport.reply(200, poster_json());
    transport.reply(200, json!({ "message": "Deleted" }));

    let mut page = JobDetailRuntime::new(owner);
    page.dispatch(Event::Mount { job_id: "p1".into() }).await.unwrap();
    page.dispatch(Event::RequestDelete).await.unwrap();
    assert!(page.state().delete_dialog_open);
    assert_eq!(transport.request_count(), 2);

    page.dispatch(Event::ConfirmDelete).await.unwrap();
    assert_eq!(page.take_navigation(), Some(NavigationTarget::JobListing));
    let delete = transport.last_request().unwrap();
    assert_eq!(delete.method, Method::Delete);
    assert_eq!(delete.path, "/post/delete/p1");
}

#[tokio::test]
async fn created_posting_appears_in_listing_with_level_label() {
    let (client, transport) = signed_in("u1", "employer");
    transport.reply(201, json!({ "message": "Post created" }));

    let form = FormSubmission::new()
        .with_text("title", "Engineer")
        .with_text("company_name", "Acme")
        .with_text("requirements", "SQL")
        .with_text("position", "mid")
        .with_text("description", "...");
    let target = client
        .save_job_posting(&form, PostingMode::Create)
        .await
        .unwrap();
    assert_eq!(target, NavigationTarget::JobListing);

    let create = transport.last_request().unwrap();
    assert_eq!(create.method, Method::Post);
    assert_eq!(create.path, "/post/create");
    assert_eq!(create.bearer.as_deref(), Some("token-u1"));
    let RequestBody::Json(body) = &create.body else {
        panic!("create should send JSON");
    };
    assert_eq!(body["companyName"], "Acme");
    assert_eq!(body["uid"], "u1");

    transport.reply(
        200,
        json!([{
            "_id": "p9",
            "title": "Engineer",
            "companyName": "Acme",
            "position": "mid",
            "description": "...",
            "requirements": "SQL",
            "applicants": [],
            "postedBy": { "id": "u1", "name": "User u1" }
        }]),
    );
    let mut listing = JobListingState::new();
    let ticket = listing.mount().unwrap();
    listing.settle(&ticket, client.list_jobs().await.map_err(|e| e.message()));

    let vm = listing.compute_viewmodel();
    assert_eq!(vm.items.len(), 1);
    assert_eq!(vm.items[0].position_label, "mid-level");
    assert!(render_job_listing(&vm).contains("Acme (mid-level)"));
}

#[tokio::test]
async fn logout_clears_token_and_user_together() {
    let (client, _transport) = signed_in("u1", APPLICANT_ROLE);
    let version = client.session().version();

    assert_eq!(client.logout().unwrap(), NavigationTarget::Login);
    assert!(client.session().token().is_none());
    assert!(client.session().current_user().is_none());
    assert!(client.session().version() > version);
}
