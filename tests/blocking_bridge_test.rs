/// Integration tests for the synchronous facade
mod test_utilities;

use std::fs;
use sw360_adapter::prelude::*;
use tempfile::TempDir;
use test_utilities::mocks::*;

#[test]
fn test_blocking_release_resolution_from_plain_thread() {
    let connection = CatalogConnection::with_transport(FakeCatalog::new());
    let releases = Blocking::new(connection.release_adapter().clone()).unwrap();

    let first = releases
        .get_or_create_release(&Release::new("commons-io", "2.6"), false)
        .unwrap();
    let second = releases
        .get_or_create_release(&Release::new("commons-io", "2.6"), false)
        .unwrap();

    assert_eq!(first.id(), second.id());
    assert_eq!(connection.transport().release_count(), 1);
    assert!(releases.get_release_by_id("r-404").unwrap().is_none());
}

#[test]
fn test_blocking_facades_share_one_runtime() {
    let connection = CatalogConnection::with_transport(FakeCatalog::new());
    let components = Blocking::new(connection.component_adapter().clone()).unwrap();
    let licenses = Blocking::with_runtime(connection.license_adapter().clone(), components.runtime());

    let component = components
        .get_or_create_component(&Component::new("commons-io").with_category("Library"))
        .unwrap();
    assert_eq!(component.name(), "commons-io");
    assert!(components.get_component_by_name("commons-io").unwrap().is_some());

    let license = licenses.get_license_by_name("Apache-2.0").unwrap();
    assert_eq!(license.unwrap().short_name(), "Apache-2.0");
}

#[test]
fn test_blocking_sources_export() {
    let connection = CatalogConnection::with_transport(FakeCatalog::new());
    let fake = connection.transport();
    let component = fake.seed_component("commons-io");
    let release_id = fake.seed_release(&component, "commons-io", "2.6", &[]);
    fake.seed_attachment(&release_id, "sources.zip", "SOURCE", b"content");

    let releases = Blocking::new(connection.release_adapter().clone()).unwrap();
    let release = releases.get_release_by_id(&release_id).unwrap().unwrap();

    let cache = TempDir::new().unwrap();
    fs::write(cache.path().join("orphan.txt"), b"orphan").unwrap();
    let exporter = Blocking::with_runtime(
        SourcesExporter::new(cache.path(), SilentProgressReporter),
        releases.runtime(),
    );

    let exported = exporter.download_sources(releases.inner(), &[release]);
    let report = exporter.remove_unreferenced_files(&exported).unwrap();

    assert_eq!(exported[0].sources().len(), 1);
    assert_eq!(report.deleted_files, vec![cache.path().join("orphan.txt")]);
    assert!(cache.path().join("commons-io/2.6/sources.zip").is_file());
}

#[test]
fn test_blocking_project_linking() {
    let connection = CatalogConnection::with_transport(FakeCatalog::new());
    let fake = connection.transport();
    let component = fake.seed_component("commons-io");
    let release_id = fake.seed_release(&component, "commons-io", "2.6", &[]);

    let releases = Blocking::new(connection.release_adapter().clone()).unwrap();
    let projects = Blocking::with_runtime(connection.project_adapter().clone(), releases.runtime());
    let release = releases.get_release_by_id(&release_id).unwrap().unwrap();

    let project_id = projects.add_project("frontend", "1.0").unwrap();
    projects.add_releases_to_project(&project_id, &[release]).unwrap();

    assert_eq!(
        projects
            .get_project_id_by_name_and_version("frontend", "1.0")
            .unwrap(),
        Some(project_id.clone())
    );
    let linked = projects.get_linked_releases(&project_id).unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id(), Some(release_id));
}
