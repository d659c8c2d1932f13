use scraper_core::{CoreError, TitleLog};
use std::env;
use std::path::PathBuf;

fn temp_log() -> PathBuf {
    env::temp_dir().join(format!("post_titles_{}.txt", uuid::Uuid::new_v4()))
}

#[test]
fn test_appends_across_calls_in_order() {
    let path = temp_log();
    let log = TitleLog::new(&path);

    assert_eq!(log.append(&["X"]).unwrap(), 1);
    assert_eq!(log.append(&["Y"]).unwrap(), 1);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "X\nY\n");
    assert_eq!(contents.lines().collect::<Vec<_>>(), vec!["X", "Y"]);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_identical_input_duplicates_lines() {
    let path = temp_log();
    let log = TitleLog::new(&path);
    let titles = vec!["Skol".to_string(), "Game thread".to_string()];

    log.append(&titles).unwrap();
    log.append(&titles).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "Skol\nGame thread\nSkol\nGame thread\n");

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_preserves_existing_content() {
    let path = temp_log();
    std::fs::write(&path, "older title\n").unwrap();

    TitleLog::new(&path).append(&["newer title"]).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "older title\nnewer title\n");

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_empty_input_leaves_line_count_unchanged() {
    let path = temp_log();
    let log = TitleLog::new(&path);
    log.append(&["only"]).unwrap();

    let empty: Vec<String> = Vec::new();
    assert_eq!(log.append(&empty).unwrap(), 0);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_missing_parent_directory_is_an_io_error() {
    let path = env::temp_dir()
        .join(format!("missing_dir_{}", uuid::Uuid::new_v4()))
        .join("post_titles.txt");

    let result = TitleLog::new(&path).append(&["X"]);
    match result {
        Err(CoreError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("Expected Io error, got {:?}", other),
    }
    assert!(!path.parent().unwrap().exists());
}

#[test]
fn test_unicode_titles_are_written_verbatim() {
    let path = temp_log();
    TitleLog::new(&path)
        .append(&["Vikings 🏈 win", "Fünf Punkte"])
        .unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "Vikings 🏈 win\nFünf Punkte\n");

    std::fs::remove_file(&path).unwrap();
}
