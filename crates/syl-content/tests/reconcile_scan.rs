//! Reconciliation scan tests: catalog state rebuilt from the content root.

mod common;

use std::io::Cursor;
use std::time::UNIX_EPOCH;

use pretty_assertions::assert_eq;
use syl_content::reconcile::MISSING_MANIFEST_WARNING;

use common::{Fixture, PY_BASICS_MANIFEST, SUM_TWO_NUMBERS, py_basics_archive, write_file};

#[tokio::test]
async fn scan_after_import_preserves_installed_at() {
    let fx = Fixture::new().await;
    let imported = fx
        .service
        .import_archive(Cursor::new(py_basics_archive()))
        .await
        .unwrap();

    let scanned = fx.service.scan_content_root().await.unwrap();
    assert_eq!(scanned.len(), 1);
    assert_eq!(scanned[0].course_id, "py-basics");
    assert_eq!(scanned[0].tasks_indexed, 1);
    assert_eq!(scanned[0].installed_at, imported.installed_at);
    assert!(scanned[0].warnings.is_empty(), "{:?}", scanned[0].warnings);
}

#[tokio::test]
async fn repeated_scans_are_idempotent() {
    let fx = Fixture::new().await;
    let root = fx.content_root().to_path_buf();
    write_file(&root, "py-basics/1.0.0/manifest.json", PY_BASICS_MANIFEST);
    write_file(&root, "py-basics/1.0.0/tasks/sum_two_numbers.json", SUM_TWO_NUMBERS);
    write_file(
        &root,
        "algo/2024.1/manifest.json",
        r#"{"id": "algo", "version": "2024.1"}"#,
    );
    write_file(
        &root,
        "algo/2024.1/tasks/sort/task.json",
        r#"{"id": "sort", "kind": "custom_checker"}"#,
    );

    let first = fx.service.scan_content_root().await.unwrap();
    let catalog_first = fx.service.list_courses().await.unwrap();
    let second = fx.service.scan_content_root().await.unwrap();
    let catalog_second = fx.service.list_courses().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(catalog_first, catalog_second);
    let keys: Vec<(&str, &str)> = first
        .iter()
        .map(|s| (s.course_id.as_str(), s.version.as_str()))
        .collect();
    assert_eq!(keys, vec![("algo", "2024.1"), ("py-basics", "1.0.0")]);
    assert_eq!(catalog_first[0].tasks[0].source_path, "tasks/sort");
}

#[tokio::test]
async fn missing_manifest_yields_placeholder() {
    let fx = Fixture::new().await;
    let root = fx.content_root().to_path_buf();
    write_file(&root, "orphan/0.1/tasks/a.json", r#"{"id": "a", "kind": "declarative"}"#);
    std::fs::write(root.join("stray-file.txt"), "ignored").unwrap();

    let scanned = fx.service.scan_content_root().await.unwrap();
    assert_eq!(scanned.len(), 1);
    let placeholder = &scanned[0];
    assert_eq!(placeholder.course_id, "orphan");
    assert_eq!(placeholder.version, "0.1");
    assert_eq!(placeholder.title, "orphan");
    assert_eq!(placeholder.tasks_indexed, 0);
    assert_eq!(placeholder.warnings, vec![MISSING_MANIFEST_WARNING.to_string()]);
    assert!(fx.service.list_courses().await.unwrap().is_empty());

    let mtime = std::fs::metadata(root.join("orphan/0.1"))
        .unwrap()
        .modified()
        .unwrap()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    assert_eq!(placeholder.installed_at.timestamp(), i64::try_from(mtime).unwrap());
}

#[tokio::test]
async fn undecodable_manifest_yields_placeholder() {
    let fx = Fixture::new().await;
    let root = fx.content_root().to_path_buf();
    write_file(&root, "broken/1/manifest.json", "{ nope");

    let scanned = fx.service.scan_content_root().await.unwrap();
    assert_eq!(scanned.len(), 1);
    assert_eq!(scanned[0].warnings.len(), 1);
    assert!(scanned[0].warnings[0].starts_with("manifest.json: "));
    assert!(fx.service.list_courses().await.unwrap().is_empty());
}

#[tokio::test]
async fn manifest_without_identity_uses_directory_names() {
    let fx = Fixture::new().await;
    let root = fx.content_root().to_path_buf();
    write_file(&root, "intro/1.0/manifest.json", r#"{"title": "Intro"}"#);

    let scanned = fx.service.scan_content_root().await.unwrap();
    assert_eq!(scanned[0].course_id, "intro");
    assert_eq!(scanned[0].version, "1.0");
    assert_eq!(scanned[0].title, "Intro");
    assert!(scanned[0].warnings.is_empty(), "{:?}", scanned[0].warnings);
    assert!(fx.service.get_course("intro", "1.0").await.unwrap().is_some());
}

#[tokio::test]
async fn invalid_resident_manifest_is_indexed_with_trailing_warning() {
    let fx = Fixture::new().await;
    let root = fx.content_root().to_path_buf();
    write_file(&root, "c/1/manifest.json", r#"{"title": ""}"#);
    write_file(&root, "c/1/tasks/bad.json", r#"{"id": "bad"}"#);

    let scanned = fx.service.scan_content_root().await.unwrap();
    let warnings = &scanned[0].warnings;
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].starts_with("tasks/bad.json: "));
    assert!(warnings[1].starts_with("manifest.json: title: "));
    assert!(fx.service.get_course("c", "1").await.unwrap().is_some());
}

#[tokio::test]
async fn rescan_after_removing_a_task_drops_it() {
    let fx = Fixture::new().await;
    fx.service
        .import_archive(Cursor::new(py_basics_archive()))
        .await
        .unwrap();
    std::fs::remove_file(
        fx.content_root()
            .join("py-basics/1.0.0/tasks/sum_two_numbers.json"),
    )
    .unwrap();

    let scanned = fx.service.scan_content_root().await.unwrap();
    assert_eq!(scanned[0].tasks_indexed, 0);
    assert!(fx.service.list_courses().await.unwrap()[0].tasks.is_empty());
}

#[tokio::test]
async fn empty_content_root_scans_to_nothing() {
    let fx = Fixture::new().await;
    assert!(fx.service.scan_content_root().await.unwrap().is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn unreadable_course_dir_does_not_abort_scan() {
    use std::os::unix::fs::PermissionsExt;

    let fx = Fixture::new().await;
    let root = fx.content_root().to_path_buf();
    write_file(&root, "py-basics/1.0.0/manifest.json", PY_BASICS_MANIFEST);
    write_file(&root, "py-basics/1.0.0/tasks/sum_two_numbers.json", SUM_TWO_NUMBERS);
    let locked = root.join("zz-locked");
    std::fs::create_dir_all(locked.join("1.0")).unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not restrict root.
    if std::fs::read_dir(&locked).is_ok() {
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let scanned = fx.service.scan_content_root().await;
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
    let scanned = scanned.unwrap();

    assert_eq!(scanned.len(), 2);
    assert_eq!(scanned[0].course_id, "py-basics");
    assert_eq!(scanned[0].tasks_indexed, 1);
    assert_eq!(scanned[1].course_id, "zz-locked");
    assert_eq!(scanned[1].tasks_indexed, 0);
    assert_eq!(scanned[1].warnings.len(), 1);
    assert!(scanned[1].warnings[0].starts_with("zz-locked: "), "{:?}", scanned[1].warnings);
    let courses = fx.service.list_courses().await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].id, "py-basics");
}
