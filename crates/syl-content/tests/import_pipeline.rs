//! End-to-end import tests: archive in, catalog rows and content tree out.

mod common;

use std::io::Cursor;

use pretty_assertions::assert_eq;
use syl_content::ContentError;
use syl_core::entities::TaskSource;
use syl_core::enums::TaskKind;
use syl_core::errors::ErrorKind;

use common::{Fixture, PY_BASICS_MANIFEST, SUM_TWO_NUMBERS, py_basics_archive, zip_archive};

#[tokio::test]
async fn import_indexes_single_task() {
    let fx = Fixture::new().await;
    let summary = fx
        .service
        .import_archive(Cursor::new(py_basics_archive()))
        .await
        .unwrap();

    assert_eq!(summary.course_id, "py-basics");
    assert_eq!(summary.version, "1.0.0");
    assert_eq!(summary.title, "Python Basics");
    assert_eq!(summary.tasks_indexed, 1);
    assert!(summary.warnings.is_empty(), "{:?}", summary.warnings);

    let courses = fx.service.list_courses().await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].status.as_deref(), Some("installed"));
    assert_eq!(courses[0].tasks.len(), 1);
    let task = &courses[0].tasks[0];
    assert_eq!(task.id, "sum_two_numbers");
    assert_eq!(task.kind, TaskKind::Declarative);
    assert_eq!(task.source_path, "tasks/sum_two_numbers.json");

    let installed = fx.content_root().join("py-basics/1.0.0");
    assert!(installed.join("manifest.json").is_file());
    assert!(installed.join("tasks/sum_two_numbers.json").is_file());
    assert_eq!(fx.staging_leftovers(), 0);
}

#[tokio::test]
async fn flat_archive_is_its_own_root() {
    let fx = Fixture::new().await;
    let bytes = zip_archive(&[
        ("manifest.json", PY_BASICS_MANIFEST),
        ("tasks/sum_two_numbers.json", SUM_TWO_NUMBERS),
    ]);
    let summary = fx.service.import_archive(Cursor::new(bytes)).await.unwrap();
    assert_eq!(summary.tasks_indexed, 1);
    assert!(fx.content_root().join("py-basics/1.0.0/manifest.json").is_file());
}

#[tokio::test]
async fn missing_manifest_is_client_error_and_catalog_stays_empty() {
    let fx = Fixture::new().await;
    let bytes = zip_archive(&[("course/tasks/sum_two_numbers.json", SUM_TWO_NUMBERS)]);

    let err = fx.service.import_archive(Cursor::new(bytes)).await.unwrap_err();
    assert!(matches!(err, ContentError::ManifestMissing));
    assert_eq!(err.kind(), ErrorKind::Client);

    assert!(fx.service.list_courses().await.unwrap().is_empty());
    assert!(!fx.content_root().exists());
    assert_eq!(fx.staging_leftovers(), 0);
}

#[tokio::test]
async fn invalid_manifest_reports_sorted_errors() {
    let fx = Fixture::new().await;
    let bytes = zip_archive(&[("manifest.json", r#"{"title": 5}"#)]);

    let err = fx.service.import_archive(Cursor::new(bytes)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let errors = err.validation_errors().unwrap();
    // Two missing required properties at the root, then the bad title.
    assert_eq!(errors.len(), 3);
    assert!(errors[0].starts_with(": "));
    assert!(errors[1].starts_with(": "));
    assert!(errors[2].starts_with("title: "));

    assert!(fx.service.list_courses().await.unwrap().is_empty());
    assert!(!fx.content_root().exists());
}

#[tokio::test]
async fn undecodable_manifest_is_client_error() {
    let fx = Fixture::new().await;
    let bytes = zip_archive(&[("manifest.json", "{ id: ")]);
    let err = fx.service.import_archive(Cursor::new(bytes)).await.unwrap_err();
    assert!(matches!(err, ContentError::ManifestDecode(_)));
    assert_eq!(err.kind(), ErrorKind::Client);
}

#[tokio::test]
async fn corrupt_archive_is_client_error() {
    let fx = Fixture::new().await;
    let err = fx
        .service
        .import_archive(Cursor::new(b"PK\x03\x04 truncated".to_vec()))
        .await
        .unwrap_err();
    assert!(matches!(err, ContentError::InvalidArchive(_)));
    assert_eq!(fx.staging_leftovers(), 0);
}

#[tokio::test]
async fn descriptor_missing_kind_is_skipped_with_warning() {
    let fx = Fixture::new().await;
    let bytes = zip_archive(&[
        ("py-basics/manifest.json", PY_BASICS_MANIFEST),
        ("py-basics/tasks/sum_two_numbers.json", SUM_TWO_NUMBERS),
        ("py-basics/tasks/no_kind.json", r#"{"id": "no_kind"}"#),
    ]);

    let summary = fx.service.import_archive(Cursor::new(bytes)).await.unwrap();
    assert_eq!(summary.tasks_indexed, 1);
    assert_eq!(summary.warnings.len(), 1);
    assert!(
        summary.warnings[0].starts_with("tasks/no_kind.json: "),
        "{:?}",
        summary.warnings
    );
    assert!(summary.warnings[0].contains("kind"));
    assert_eq!(fx.service.list_courses().await.unwrap().len(), 1);
}

#[tokio::test]
async fn folder_descriptor_is_indexed_once() {
    let fx = Fixture::new().await;
    let bytes = zip_archive(&[
        ("manifest.json", PY_BASICS_MANIFEST),
        (
            "tasks/fizzbuzz/task.json",
            r#"{"id": "fizzbuzz", "kind": "custom_checker", "entry": "main.py"}"#,
        ),
        ("tasks/fizzbuzz/main.py", "print('fizz')"),
    ]);

    let summary = fx.service.import_archive(Cursor::new(bytes)).await.unwrap();
    assert_eq!(summary.tasks_indexed, 1);
    assert!(summary.warnings.is_empty(), "{:?}", summary.warnings);

    let tasks = fx
        .service
        .db()
        .tasks_for_course("py-basics", "1.0.0")
        .await
        .unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].source, TaskSource::Folder("tasks/fizzbuzz".into()));
}

#[tokio::test]
async fn reimport_replaces_tree_and_task_set() {
    let fx = Fixture::new().await;
    let first = fx
        .service
        .import_archive(Cursor::new(zip_archive(&[
            ("manifest.json", PY_BASICS_MANIFEST),
            ("tasks/sum_two_numbers.json", SUM_TWO_NUMBERS),
            ("tasks/extra.json", r#"{"id": "extra", "kind": "declarative"}"#),
        ])))
        .await
        .unwrap();
    assert_eq!(first.tasks_indexed, 2);

    let second = fx
        .service
        .import_archive(Cursor::new(py_basics_archive()))
        .await
        .unwrap();
    assert_eq!(second.tasks_indexed, 1);
    assert!(second.installed_at >= first.installed_at);

    let ids: Vec<String> = fx.service.list_courses().await.unwrap()[0]
        .tasks
        .iter()
        .map(|t| t.id.clone())
        .collect();
    assert_eq!(ids, vec!["sum_two_numbers"]);
    assert!(
        !fx.content_root()
            .join("py-basics/1.0.0/tasks/extra.json")
            .exists()
    );
}

#[tokio::test]
async fn task_id_taken_by_other_version_is_warned() {
    let fx = Fixture::new().await;
    fx.service
        .import_archive(Cursor::new(py_basics_archive()))
        .await
        .unwrap();

    let v2 = zip_archive(&[
        ("manifest.json", r#"{"id": "py-basics", "version": "2.0.0"}"#),
        ("tasks/sum_two_numbers.json", SUM_TWO_NUMBERS),
    ]);
    let summary = fx.service.import_archive(Cursor::new(v2)).await.unwrap();
    assert_eq!(summary.tasks_indexed, 0);
    assert_eq!(
        summary.warnings,
        vec![
            "tasks/sum_two_numbers.json: task id 'sum_two_numbers' already indexed by py-basics@1.0.0"
                .to_string()
        ]
    );

    let courses = fx.service.list_courses().await.unwrap();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].tasks.len(), 1);
    assert!(courses[1].tasks.is_empty());
}

#[tokio::test]
async fn import_from_path() {
    let fx = Fixture::new().await;
    let upload = fx.data_dir.path().join("py-basics.zip");
    std::fs::write(&upload, py_basics_archive()).unwrap();

    let summary = fx.service.import_archive_path(&upload).await.unwrap();
    assert_eq!(summary.tasks_indexed, 1);

    let missing = fx
        .service
        .import_archive_path(&fx.data_dir.path().join("nope.zip"))
        .await
        .unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::Internal);
}

#[tokio::test]
async fn remove_course_deletes_rows_and_tree() {
    let fx = Fixture::new().await;
    fx.service
        .import_archive(Cursor::new(py_basics_archive()))
        .await
        .unwrap();
    assert!(fx.service.get_course("py-basics", "1.0.0").await.unwrap().is_some());

    fx.service.remove_course("py-basics", "1.0.0").await.unwrap();
    assert!(fx.service.get_course("py-basics", "1.0.0").await.unwrap().is_none());
    assert!(fx.service.db().find_task("sum_two_numbers").await.unwrap().is_none());
    assert!(!fx.content_root().join("py-basics").exists());

    let again = fx.service.remove_course("py-basics", "1.0.0").await.unwrap_err();
    assert!(matches!(again, ContentError::CourseNotFound { .. }));
    let traversal = fx.service.remove_course("..", "1.0.0").await.unwrap_err();
    assert!(matches!(traversal, ContentError::InvalidCourseKey { .. }));
}
