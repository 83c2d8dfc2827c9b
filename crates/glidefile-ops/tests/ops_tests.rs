use std::fs;
use std::path::Path;

use glidefile_core::FsError;
use glidefile_ops::{
    COPY_BUFFER_SIZE, OperationType, TransferResult, copy_entry, create_entry, delete_entry,
    move_entry, rename_entry, start_copy, start_delete, start_move,
};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_create_appends_default_extension() {
    let temp = TempDir::new().unwrap();
    let name = create_entry(temp.path(), "notes").unwrap();
    assert_eq!(name, "notes.txt");
    assert!(temp.path().join("notes.txt").is_file());
    assert_eq!(listing(temp.path()), vec!["notes.txt"]);
}

#[test]
fn test_create_keeps_existing_extension() {
    let temp = TempDir::new().unwrap();
    assert_eq!(create_entry(temp.path(), "README.md").unwrap(), "README.md");
    assert_eq!(create_entry(temp.path(), ".env").unwrap(), ".env");
}

#[test]
fn test_create_trailing_separator_makes_directory() {
    let temp = TempDir::new().unwrap();
    let name = create_entry(temp.path(), "sub/").unwrap();
    assert_eq!(name, "sub");
    assert!(temp.path().join("sub").is_dir());
}

#[test]
fn test_create_builds_intermediate_directories() {
    let temp = TempDir::new().unwrap();
    assert_eq!(create_entry(temp.path(), "a/b/c").unwrap(), "c.txt");
    assert!(temp.path().join("a/b/c.txt").is_file());
    assert_eq!(create_entry(temp.path(), "x/y/").unwrap(), "y");
    assert!(temp.path().join("x/y").is_dir());
}

#[test]
fn test_create_existing_fails_without_changes() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("notes.txt"), "keep me").unwrap();

    let err = create_entry(temp.path(), "notes").unwrap_err();

    assert!(matches!(err, FsError::AlreadyExists { ref name } if name == "notes.txt"));
    assert_eq!(err.to_string(), "'notes.txt' already exists.");
    assert_eq!(fs::read_to_string(temp.path().join("notes.txt")).unwrap(), "keep me");
    assert_eq!(listing(temp.path()), vec!["notes.txt"]);
}

#[test]
fn test_create_rejects_empty_and_invalid_input() {
    let temp = TempDir::new().unwrap();
    assert!(matches!(create_entry(temp.path(), "   "), Err(FsError::EmptyInput)));
    assert!(matches!(
        create_entry(temp.path(), "bad\0name"),
        Err(FsError::InvalidName { .. })
    ));
    assert!(matches!(
        create_entry(temp.path(), "../escape"),
        Err(FsError::InvalidName { .. })
    ));
    assert!(listing(temp.path()).is_empty());
}

#[test]
fn test_rename_moves_single_entry() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("old.txt"), "data").unwrap();

    assert_eq!(rename_entry(temp.path(), "old.txt", "new.txt").unwrap(), "new.txt");
    assert_eq!(listing(temp.path()), vec!["new.txt"]);
}

#[test]
fn test_rename_refuses_to_clobber() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    fs::write(temp.path().join("b.txt"), "b").unwrap();

    let err = rename_entry(temp.path(), "a.txt", "b.txt").unwrap_err();
    assert!(matches!(err, FsError::AlreadyExists { .. }));
    assert_eq!(fs::read_to_string(temp.path().join("b.txt")).unwrap(), "b");

    let err = rename_entry(temp.path(), "a.txt", "bad/name").unwrap_err();
    assert!(matches!(err, FsError::InvalidName { .. }));
}

#[test]
fn test_delete_file_and_tree() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("f.txt"), "x").unwrap();
    fs::create_dir_all(temp.path().join("d/e")).unwrap();
    fs::write(temp.path().join("d/e/g.txt"), "y").unwrap();

    delete_entry(&temp.path().join("f.txt")).unwrap();
    delete_entry(&temp.path().join("d")).unwrap();
    assert!(listing(temp.path()).is_empty());

    let err = delete_entry(&temp.path().join("missing")).unwrap_err();
    assert!(matches!(err, FsError::Delete { .. }));
}

#[test]
fn test_copy_file_reports_every_chunk() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("big.bin");
    let size = COPY_BUFFER_SIZE * 3 + 17;
    fs::write(&src, vec![7u8; size]).unwrap();
    let dst = temp.path().join("copy.bin");

    let mut seen = Vec::new();
    let bytes = copy_entry(&src, &dst, &CancellationToken::new(), &mut |p| {
        seen.push((p.bytes_processed, p.bytes_total));
    })
    .unwrap();

    assert_eq!(bytes, size as u64);
    assert_eq!(seen.first(), Some(&(0, size as u64)));
    assert!(seen.contains(&(COPY_BUFFER_SIZE as u64, size as u64)));
    assert_eq!(seen.last(), Some(&(size as u64, size as u64)));
    assert!(seen.windows(2).all(|w| w[0].0 <= w[1].0));
    assert_eq!(fs::read(&dst).unwrap().len(), size);
    assert!(src.exists());
}

#[test]
fn test_copy_directory_tree() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("project");
    fs::create_dir_all(src.join("src/empty")).unwrap();
    fs::write(src.join("Cargo.toml"), "[package]").unwrap();
    fs::write(src.join("src/main.rs"), "fn main() {}").unwrap();
    let dst = temp.path().join("backup");

    let bytes = copy_entry(&src, &dst, &CancellationToken::new(), &mut |_| {}).unwrap();

    assert_eq!(bytes, 9 + 12);
    assert!(dst.join("src/empty").is_dir());
    assert_eq!(fs::read_to_string(dst.join("src/main.rs")).unwrap(), "fn main() {}");
    assert!(src.join("Cargo.toml").exists());
}

#[test]
fn test_copy_never_overwrites() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a"), "new").unwrap();
    fs::write(temp.path().join("b"), "old").unwrap();

    let err = copy_entry(
        &temp.path().join("a"),
        &temp.path().join("b"),
        &CancellationToken::new(),
        &mut |_| {},
    )
    .unwrap_err();

    assert!(matches!(err, FsError::AlreadyExists { .. }));
    assert_eq!(fs::read_to_string(temp.path().join("b")).unwrap(), "old");
}

#[test]
fn test_copy_into_own_subtree_is_rejected() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("dir");
    fs::create_dir(&src).unwrap();

    let err = copy_entry(&src, &src.join("inner"), &CancellationToken::new(), &mut |_| {})
        .unwrap_err();
    assert!(matches!(err, FsError::NestedDestination { .. }));
    assert!(!src.join("inner").exists());
}

#[test]
fn test_cancelled_file_copy_leaves_nothing() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("big.bin");
    fs::write(&src, vec![1u8; COPY_BUFFER_SIZE * 4]).unwrap();
    let dst = temp.path().join("partial.bin");
    let cancel = CancellationToken::new();

    let result = copy_entry(&src, &dst, &cancel, &mut |p| {
        if p.bytes_processed >= COPY_BUFFER_SIZE as u64 {
            cancel.cancel();
        }
    });

    assert!(matches!(result, Err(FsError::Cancelled)));
    assert!(!dst.exists());
    assert!(src.exists());
}

#[test]
fn test_cancelled_directory_copy_leaves_nothing() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("tree");
    for dir in ["a", "b", "c"] {
        fs::create_dir_all(src.join(dir)).unwrap();
        fs::write(src.join(dir).join("data.bin"), vec![3u8; COPY_BUFFER_SIZE * 2]).unwrap();
    }
    let dst = temp.path().join("tree-copy");
    let cancel = CancellationToken::new();

    let result = copy_entry(&src, &dst, &cancel, &mut |p| {
        if p.bytes_processed > COPY_BUFFER_SIZE as u64 * 2 {
            cancel.cancel();
        }
    });

    assert!(matches!(result, Err(FsError::Cancelled)));
    assert!(!dst.exists());
}

#[test]
fn test_same_volume_move_is_instant() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("doc.txt");
    fs::write(&src, "hello").unwrap();
    fs::create_dir(temp.path().join("dest")).unwrap();
    let dst = temp.path().join("dest/doc.txt");

    let mut percentages = Vec::new();
    move_entry(&src, &dst, &CancellationToken::new(), &mut |p| {
        percentages.push(p.percentage());
    })
    .unwrap();

    assert_eq!(percentages, vec![0.0, 100.0]);
    assert!(!src.exists());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "hello");
}

#[test]
fn test_move_refuses_existing_destination() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a"), "a").unwrap();
    fs::create_dir(temp.path().join("d")).unwrap();
    fs::write(temp.path().join("d/a"), "other").unwrap();

    let err = move_entry(
        &temp.path().join("a"),
        &temp.path().join("d/a"),
        &CancellationToken::new(),
        &mut |_| {},
    )
    .unwrap_err();

    assert!(matches!(err, FsError::AlreadyExists { .. }));
    assert!(temp.path().join("a").exists());
}

#[tokio::test]
async fn test_start_copy_sends_single_completion() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("file.txt");
    fs::write(&src, "payload").unwrap();
    let dst = temp.path().join("copy.txt");

    let mut rx = start_copy(src.clone(), dst.clone(), CancellationToken::new());
    let mut completions = Vec::new();
    while let Some(msg) = rx.recv().await {
        if let TransferResult::Complete(done) = msg {
            completions.push(done);
        }
    }

    assert_eq!(completions.len(), 1);
    let done = &completions[0];
    assert_eq!(done.operation_type, OperationType::Copy);
    assert_eq!(done.result.as_ref().ok(), Some(&7));
    assert_eq!(done.summary(), "Copied 'file.txt'");
    assert!(dst.exists());
}

#[tokio::test]
async fn test_start_move_cancelled_before_start() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("file.txt");
    fs::write(&src, "payload").unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut rx = start_move(src.clone(), temp.path().join("moved.txt"), cancel);
    let mut outcome = None;
    while let Some(msg) = rx.recv().await {
        if let TransferResult::Complete(done) = msg {
            outcome = Some(done);
        }
    }

    let done = outcome.unwrap();
    assert!(done.is_cancelled());
    assert!(src.exists());
}

#[tokio::test]
async fn test_start_delete_reports_completion() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("gone");
    fs::create_dir_all(dir.join("inner")).unwrap();

    let mut rx = start_delete(dir.clone());
    let done = rx.recv().await.unwrap();

    assert!(done.is_success());
    assert_eq!(done.summary(), "Deleted 'gone'");
    assert!(!dir.exists());
}
