//! End-to-end console sessions against in-memory collaborators.

#![allow(clippy::unwrap_used, clippy::panic)]

use serde_json::json;
use std::time::Duration;
use userdesk::{Command, Console, ConsoleConfig, Route, Step};
use userdesk_auth::mocks::MockAuthGateway;
use userdesk_auth::{AuthEnvironment, LoginCredentials, Surface, User, auth_store};
use userdesk_directory::mocks::MockDirectoryApi;
use userdesk_directory::{UserProfile, UserSummary};
use userdesk_testing::{FixedClock, test_clock};

type TestConsole = Console<MockAuthGateway, MockDirectoryApi, FixedClock>;

fn emily() -> User {
    User {
        id: 1,
        username: "emilys".to_string(),
        email: "emily.johnson@x.dummyjson.com".to_string(),
        first_name: "Emily".to_string(),
        last_name: "Johnson".to_string(),
        gender: "female".to_string(),
        image: String::new(),
        token: "token-emily".to_string(),
    }
}

fn directory() -> MockDirectoryApi {
    let hits: Vec<UserSummary> = serde_json::from_value(json!([
        { "id": 1, "firstName": "Emily", "lastName": "Johnson", "email": "emily.johnson@x.dummyjson.com", "phone": "+81 965-431-3024" },
        { "id": 2, "firstName": "Michael", "lastName": "Williams", "email": "michael.williams@x.dummyjson.com", "phone": "+49 258-627-6644" }
    ]))
    .unwrap();

    MockDirectoryApi::new()
        .with_user(UserProfile {
            id: 2,
            username: "michaelw".to_string(),
            email: "michael.williams@x.dummyjson.com".to_string(),
            university: "Ohio State University".to_string(),
            ..UserProfile::default()
        })
        .with_search_results(hits)
}

async fn console_with(directory: MockDirectoryApi) -> TestConsole {
    let gateway =
        MockAuthGateway::with_accounts([(LoginCredentials::new("emilys", "emilyspass"), emily())]);
    Console::attach(
        auth_store(AuthEnvironment::new(gateway)),
        directory,
        test_clock(),
        ConsoleConfig {
            landing_route: "/welcome".to_string(),
            search_url: "http://directory.test/users/search".to_string(),
            login_timeout: Duration::from_secs(1),
        },
    )
    .await
}

async fn run(console: &mut TestConsole, line: &str) -> String {
    match console.execute(Command::parse(line).unwrap()).await {
        Step::Continue(output) => output,
        Step::Quit => panic!("unexpected quit after '{line}'"),
    }
}

#[tokio::test]
async fn pages_are_gated_until_login() {
    let mut console = console_with(directory()).await;

    assert_eq!(console.surface(), Surface::Login);
    assert_eq!(run(&mut console, "go /storage").await, "Please log in first");
    assert_eq!(run(&mut console, "login emilys nope").await, "Invalid credentials");
    assert_eq!(console.surface(), Surface::Login);

    let welcome = run(&mut console, "login emilys emilyspass").await;
    assert_eq!(welcome, "Signed in as Emily Johnson\n\nWelcome, Emily Johnson");
    assert_eq!(console.surface(), Surface::Shell);
    assert_eq!(console.shell().current(), Route::Welcome);

    assert_eq!(run(&mut console, "logout").await, "Signed out");
    assert_eq!(console.surface(), Surface::Login);
    assert_eq!(run(&mut console, "menu").await, "Please log in first");
}

#[tokio::test]
async fn search_open_edit_and_save() {
    let directory = directory();
    let mut console = console_with(directory.clone()).await;
    run(&mut console, "login emilys emilyspass").await;

    let table = run(&mut console, "search john doe").await;
    assert!(table.starts_with("List of Users\n#  First Name | Last Name | Email | Phone"));
    assert!(table.contains("1  Michael | Williams | michael.williams@x.dummyjson.com | +49 258-627-6644"));
    assert_eq!(
        directory.searches(),
        vec![("http://directory.test/users/search".to_string(), "john doe".to_string())]
    );

    let detail = run(&mut console, "open 1").await;
    assert!(detail.starts_with("User 2 (read-only)"));
    assert_eq!(console.shell().current(), Route::UserDetail(2));

    assert_eq!(
        run(&mut console, "set university MIT").await,
        "Not in edit mode (use 'edit')"
    );
    assert!(run(&mut console, "edit").await.starts_with("User 2 (editing)"));
    assert!(run(&mut console, "set university MIT").await.contains("university:  MIT"));

    assert_eq!(run(&mut console, "save").await, "User updated successfully");
    assert_eq!(directory.user(2).map(|u| u.university), Some("MIT".to_string()));
    assert!(console.editor().is_some_and(|e| !e.is_editing()));
}

#[tokio::test]
async fn missing_user_and_unknown_page() {
    let mut console = console_with(directory()).await;
    run(&mut console, "login emilys emilyspass").await;

    assert_eq!(
        run(&mut console, "go /user-detail/99").await,
        "Could not load user 99: User 99 not found"
    );
    assert_eq!(
        run(&mut console, "go /reports").await,
        "404\nSorry, the page you visited does not exist."
    );
    assert_eq!(console.shell().current(), Route::NotFound("reports".to_string()));
}

#[tokio::test]
async fn storage_page_shows_entries() {
    let mut console = console_with(directory()).await;
    run(&mut console, "login emilys emilyspass").await;

    assert_eq!(run(&mut console, "session theme dark").await, "Saved");
    assert_eq!(run(&mut console, "cookie promo spring 5").await, "Saved");

    let page = run(&mut console, "go /storage").await;
    assert_eq!(
        page,
        "Session Storage\n{\n  \"theme\": \"dark\"\n}\n\n\
         Local Storage\n{}\n\n\
         Cookies\npromo: spring\nExpiry: Wed, 01 Jan 2025 00:05:00 GMT\n\n\
         GMT Time\nWed, 01 Jan 2025 00:00:00 GMT"
    );

    assert_eq!(run(&mut console, "reset").await, "All storage cleared");
    assert!(console.storage().session().is_empty());
    assert!(console.storage().cookies().is_empty());
}

#[tokio::test]
async fn quit_stops_the_console() {
    let mut console = console_with(directory()).await;
    assert_eq!(console.execute(Command::Quit).await, Step::Quit);
}
