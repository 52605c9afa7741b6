//! End-to-end export runs against a mock JSONPlaceholder server.

use std::fs;

use json_csv_export::normalize::ViolationPolicy;
use json_csv_export::{run_export, AddressStyle, Config, Dataset, DatasetOutcome};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn posts_body() -> serde_json::Value {
    json!([
        {"userId": 1, "id": 1, "title": "sunt aut facere", "body": "quia et suscipit\nsuscipit recusandae"},
        {"userId": 1, "id": 2, "title": "qui est esse", "body": "est rerum tempore, vitae"}
    ])
}

fn users_body() -> serde_json::Value {
    json!([
        {
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": {"lat": "-37.3159", "lng": "81.1496"}
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        },
        {
            "id": 2,
            "name": "Ervin Howell",
            "username": "Antonette",
            "email": "Shanna@melissa.tv",
            "address": "N/A",
            "phone": "010-692-6593 x09125",
            "website": "anastasia.net",
            "company": {"name": "Deckow-Crist"}
        }
    ])
}

async fn mock_api(users_status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(users_status).set_body_json(users_body()))
        .mount(&server)
        .await;
    server
}

fn config_for(server: &MockServer, dir: &TempDir) -> Config {
    Config {
        base_url: server.uri(),
        output_dir: dir.path().to_path_buf(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_run_exports_posts_and_skips_bad_user() {
    let server = mock_api(200).await;
    let dir = TempDir::new().unwrap();
    let config = Config {
        on_violation: ViolationPolicy::Skip,
        ..config_for(&server, &dir)
    };

    let summary = run_export(config).await.unwrap();

    assert!(summary.is_success());
    assert_eq!(summary.outcomes.len(), 2);

    let posts = fs::read_to_string(dir.path().join("posts.csv")).unwrap();
    assert_eq!(
        posts,
        "userId,id,title,body\n\
         1,1,sunt aut facere,\"quia et suscipit\nsuscipit recusandae\"\n\
         1,2,qui est esse,\"est rerum tempore, vitae\"\n"
    );

    let users = fs::read_to_string(dir.path().join("users.csv")).unwrap();
    let mut lines = users.lines();
    assert_eq!(
        lines.next(),
        Some("id,name,username,email,phone,website,street,suite,city,zipcode,lat,lng,company_name,company_catchphrase,company_bs")
    );
    assert!(lines.next().unwrap().starts_with("1,Leanne Graham,Bret,"));
    assert_eq!(lines.next(), None);

    match &summary.outcomes[1] {
        DatasetOutcome::Exported(report) => {
            assert_eq!(report.fetched, 2);
            assert_eq!(report.skipped, 1);
            assert_eq!(report.export.rows_written, 1);
        }
        other => panic!("users should have been exported: {other:?}"),
    }
}

#[tokio::test]
async fn test_run_aborts_dataset_on_schema_violation() {
    let server = mock_api(200).await;
    let dir = TempDir::new().unwrap();

    let summary = run_export(config_for(&server, &dir)).await.unwrap();

    assert_eq!(summary.succeeded(), 1);
    assert_eq!(summary.failed(), 1);
    match &summary.outcomes[1] {
        DatasetOutcome::Failed { dataset, error } => {
            assert_eq!(*dataset, Dataset::Users);
            assert!(format!("{error:#}").contains("Schema violation"));
        }
        other => panic!("users should have failed: {other:?}"),
    }
    assert!(!dir.path().join("users.csv").exists());
    assert!(dir.path().join("posts.csv").exists());
}

#[tokio::test]
async fn test_server_error_fails_only_that_dataset() {
    let server = mock_api(500).await;
    let dir = TempDir::new().unwrap();
    let config = Config {
        atomic: true,
        ..config_for(&server, &dir)
    };

    let summary = run_export(config).await.unwrap();

    assert!(!summary.is_success());
    assert_eq!(summary.outcomes[0].dataset(), Dataset::Posts);
    assert!(matches!(summary.outcomes[0], DatasetOutcome::Exported(_)));
    assert!(matches!(
        summary.outcomes[1],
        DatasetOutcome::Failed { dataset: Dataset::Users, .. }
    ));
}

#[tokio::test]
async fn test_single_dataset_with_combined_address() {
    let server = mock_api(200).await;
    let dir = TempDir::new().unwrap();
    let config = Config {
        datasets: vec![Dataset::Users],
        address_style: AddressStyle::Combined,
        on_violation: ViolationPolicy::Skip,
        ..config_for(&server, &dir)
    };

    let summary = run_export(config).await.unwrap();

    assert_eq!(summary.outcomes.len(), 1);
    assert!(!dir.path().join("posts.csv").exists());
    let users = fs::read_to_string(dir.path().join("users.csv")).unwrap();
    assert_eq!(
        users,
        "id,name,username,email,phone,website,address,company_name\n\
         1,Leanne Graham,Bret,Sincere@april.biz,1-770-736-8031 x56442,hildegard.org,\
         \"Kulas Light, Apt. 556, Gwenborough, 92998-3874\",Romaguera-Crona\n"
    );
}

#[tokio::test]
async fn test_output_directory_is_created() {
    let server = mock_api(200).await;
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("exports/today");
    let config = Config {
        datasets: vec![Dataset::Posts],
        output_dir: nested.clone(),
        ..config_for(&server, &dir)
    };

    let summary = run_export(config).await.unwrap();

    assert!(summary.is_success());
    assert_eq!(summary.output_dir, nested);
    assert!(nested.join("posts.csv").exists());
}
