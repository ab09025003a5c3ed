/// Integration tests for project lookup, creation and release linking
mod test_utilities;

use sw360_adapter::prelude::*;
use test_utilities::mocks::*;

fn connection() -> CatalogConnection<FakeCatalog> {
    CatalogConnection::with_transport(FakeCatalog::new())
}

async fn stored_release(connection: &CatalogConnection<FakeCatalog>, name: &str) -> Release {
    let fake = connection.transport();
    let component = fake.seed_component(name);
    let release_id = fake.seed_release(&component, name, "1.0", &[]);
    connection
        .release_adapter()
        .get_release_by_id(&release_id)
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn test_project_lookup_matches_name_and_version_ignoring_case() {
    let connection = connection();
    let fake = connection.transport();
    fake.seed_project("frontend-app", "1.0");
    fake.seed_project("Frontend", "2.0");
    let wanted = fake.seed_project("Frontend", "1.0");

    let found = connection
        .project_adapter()
        .get_project_id_by_name_and_version("frontend", "1.0")
        .await
        .unwrap();

    assert_eq!(found, Some(wanted));
}

#[tokio::test]
async fn test_project_lookup_without_exact_match_is_none() {
    let connection = connection();
    connection.transport().seed_project("frontend-app", "1.0");

    let found = connection
        .project_adapter()
        .get_project_id_by_name_and_version("frontend", "1.0")
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_add_project_creates_with_defaults() {
    let connection = connection();
    let fake = connection.transport();

    let id = connection
        .project_adapter()
        .add_project("frontend", "1.0")
        .await
        .unwrap();

    let stored = fake.project_json(&id);
    assert_eq!(stored["description"], "frontend 1.0");
    assert_eq!(stored["projectType"], "CUSTOMER");
    assert_eq!(stored["visibility"], "BUISNESSUNIT_AND_MODERATORS");
    assert!(fake.bodies()[0].get("_links").is_none());
    assert_eq!(
        connection
            .project_adapter()
            .get_project_id_by_name_and_version("FRONTEND", "1.0")
            .await
            .unwrap(),
        Some(id)
    );
}

#[tokio::test]
async fn test_add_project_with_blank_version_makes_no_request() {
    let connection = connection();

    let err = connection
        .project_adapter()
        .add_project("frontend", "")
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::InvalidEntity { .. })
    ));
    assert!(connection.transport().requests().is_empty());
    assert_eq!(connection.transport().project_count(), 0);
}

#[tokio::test]
async fn test_releases_are_linked_by_self_href() {
    let connection = connection();
    let project_id = connection.transport().seed_project("frontend", "1.0");
    let commons = stored_release(&connection, "commons-io").await;
    let zlib = stored_release(&connection, "zlib").await;
    let never_stored = Release::new("local-only", "0.1");

    connection
        .project_adapter()
        .add_releases_to_project(&project_id, &[commons.clone(), never_stored, zlib.clone()])
        .await
        .unwrap();

    let fake = connection.transport();
    assert_eq!(
        fake.linked_releases(&project_id),
        vec![
            commons.self_href().unwrap().to_string(),
            zlib.self_href().unwrap().to_string()
        ]
    );

    let linked = connection
        .project_adapter()
        .get_linked_releases(&project_id)
        .await
        .unwrap();
    let names: Vec<&str> = linked.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["commons-io", "zlib"]);
    assert!(fake
        .requests()
        .iter()
        .any(|(m, p)| m == "GET" && p.ends_with("/releases?transitive=true")));
}

#[tokio::test]
async fn test_linking_only_unstored_releases_sends_nothing() {
    let connection = connection();
    let project_id = connection.transport().seed_project("frontend", "1.0");

    connection
        .project_adapter()
        .add_releases_to_project(&project_id, &[Release::new("local-only", "0.1")])
        .await
        .unwrap();

    assert_eq!(connection.transport().calls("POST"), 0);
}

#[tokio::test]
async fn test_linking_to_unknown_project_fails() {
    let connection = connection();
    let release = stored_release(&connection, "commons-io").await;

    let err = connection
        .project_adapter()
        .add_releases_to_project("p-404", &[release])
        .await
        .unwrap_err();

    assert_eq!(status_of(&err), Some(404));
}

#[tokio::test]
async fn test_linked_releases_of_unknown_project_is_empty() {
    let connection = connection();

    let linked = connection
        .project_adapter()
        .get_linked_releases("p-404")
        .await
        .unwrap();

    assert!(linked.is_empty());
}

#[tokio::test]
async fn test_project_id_with_path_separator_is_rejected() {
    let connection = connection();

    let result = connection
        .project_adapter()
        .get_linked_releases("../components")
        .await;

    assert!(result.is_err());
    assert!(connection.transport().requests().is_empty());
}
