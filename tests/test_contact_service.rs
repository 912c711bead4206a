mod mocks;

use contact_manager::error::ServiceError;
use contact_manager::filter::{ContactQuery, SortOrder};
use contact_manager::services::{ContactService, ContactServiceImpl};
use contact_manager::domain::ContactGroup;
use mocks::MockContactRepository;
use serde_json::json;
use std::sync::Arc;

fn service_with(repo: &MockContactRepository) -> ContactServiceImpl {
    ContactServiceImpl::new(Arc::new(repo.clone()))
}

#[tokio::test]
async fn test_invalid_create_never_reaches_repository() {
    let repo = MockContactRepository::new();
    let service = service_with(&repo);

    let err = service
        .create_contact(&json!({"name": "", "email": "not-an-email"}))
        .await
        .unwrap_err();

    match err {
        ServiceError::Validation(issues) => {
            let fields: Vec<String> = issues.iter().map(|i| i.field()).collect();
            assert_eq!(fields, vec!["name", "email"]);
        }
        other => panic!("Expected validation error, got: {:?}", other),
    }
    assert_eq!(repo.total_calls(), 0);
}

#[tokio::test]
async fn test_invalid_update_never_reaches_repository() {
    let repo = MockContactRepository::new();
    let service = service_with(&repo);

    let err = service
        .update_contact("mock-1", &json!({"name": "Ada", "email": "ada@example.com", "group": "Pals"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(repo.total_calls(), 0);
}

#[tokio::test]
async fn test_create_then_get() {
    let repo = MockContactRepository::new();
    let service = service_with(&repo);

    let created = service
        .create_contact(&json!({"name": "Ada Lovelace", "email": "ada@example.com", "group": "Work"}))
        .await
        .unwrap();
    assert_eq!(created.group, Some(ContactGroup::Work));
    assert_eq!(repo.get_call_count("create"), 1);

    let fetched = service.get_contact(&created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let repo = MockContactRepository::new();
    let service = service_with(&repo);

    assert!(matches!(
        service.get_contact("missing").await,
        Err(ServiceError::NotFound)
    ));
    // Blank ids are rejected before the repository is asked.
    assert!(matches!(
        service.get_contact("   ").await,
        Err(ServiceError::NotFound)
    ));
    assert_eq!(repo.get_call_count("get"), 1);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let repo = MockContactRepository::new();
    let service = service_with(&repo);

    let err = service
        .update_contact("missing", &json!({"name": "Ada", "email": "ada@example.com"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));
}

#[tokio::test]
async fn test_delete() {
    let repo = MockContactRepository::new();
    let service = service_with(&repo);

    let created = service
        .create_contact(&json!({"name": "Ada", "email": "ada@example.com"}))
        .await
        .unwrap();

    service.delete_contact(&created.id).await.unwrap();
    assert_eq!(repo.len(), 0);
    assert!(matches!(
        service.delete_contact(&created.id).await,
        Err(ServiceError::NotFound)
    ));
}

#[tokio::test]
async fn test_list_applies_query() {
    let repo = MockContactRepository::new();
    let service = service_with(&repo);

    for (name, group) in [
        ("Grace Hopper", "Work"),
        ("Ada Lovelace", "Work"),
        ("Charles Babbage", "Friends"),
    ] {
        service
            .create_contact(&json!({"name": name, "email": "x@example.com", "group": group}))
            .await
            .unwrap();
    }

    let all = service.list_contacts(&ContactQuery::default()).await.unwrap();
    let names: Vec<&str> = all.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Ada Lovelace", "Charles Babbage", "Grace Hopper"]);

    let work = service
        .list_contacts(&ContactQuery::new("", Some(ContactGroup::Work), SortOrder::Desc))
        .await
        .unwrap();
    let names: Vec<&str> = work.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Grace Hopper", "Ada Lovelace"]);
}

#[tokio::test]
async fn test_repository_failure_becomes_generic_error() {
    let repo = MockContactRepository::new();
    repo.set_failing(true);
    let service = service_with(&repo);

    let err = service
        .list_contacts(&ContactQuery::default())
        .await
        .unwrap_err();
    match err {
        ServiceError::OperationFailed(message) => {
            assert_eq!(message, "Failed to reach mock store");
            assert!(!message.contains("mock store is down"));
        }
        other => panic!("Expected operation failure, got: {:?}", other),
    }
}
