use std::fs;

use craft::error::Error;
use craft::processor::GeneratedFiles;
use craft::writer::{ensure_output_dir, Writer};
use tempfile::TempDir;

fn files(entries: &[(&str, &str)]) -> GeneratedFiles {
    entries.iter().map(|(path, content)| (path.to_string(), content.as_bytes().to_vec())).collect()
}

#[test]
fn test_ensure_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    let new_dir = path.join("new_dir");
    assert!(ensure_output_dir(&new_dir, false).is_ok());

    assert!(matches!(
        ensure_output_dir(path, false),
        Err(Error::OutputDirectoryExistsError { .. })
    ));
    assert!(ensure_output_dir(path, true).is_ok());
}

#[test]
fn test_write_all_creates_tree() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("shop");

    let mut writer = Writer::new(&root);
    writer
        .write_all(&files(&[("go.mod", "module x\n"), ("internal/commands/root.go", "package commands\n")]))
        .unwrap();

    assert_eq!(fs::read_to_string(root.join("go.mod")).unwrap(), "module x\n");
    assert_eq!(
        fs::read_to_string(root.join("internal/commands/root.go")).unwrap(),
        "package commands\n"
    );
    assert_eq!(writer.created_files().len(), 2);
    assert_eq!(writer.created_dirs().len(), 3);
}

#[cfg(unix)]
#[test]
fn test_write_all_sets_modes() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let mut writer = Writer::new(temp_dir.path());
    writer
        .write_all(&files(&[
            ("scripts/build", "#!/bin/sh\n"),
            ("scripts/lib/common.sh", "#!/bin/sh\n"),
            ("scripts/README.md", "# Scripts\n"),
        ]))
        .unwrap();

    let mode = |p: &str| fs::metadata(temp_dir.path().join(p)).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode("scripts/build"), 0o755);
    assert_eq!(mode("scripts/lib/common.sh"), 0o755);
    assert_eq!(mode("scripts/README.md"), 0o644);
}

#[test]
fn test_write_all_rolls_back_on_failure() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("out");

    // "a" is written as a file first, so "a/b.txt" cannot be created.
    let mut writer = Writer::new(&root);
    let result = writer.write_all(&files(&[
        ("0/first.txt", "first"),
        ("a", "file"),
        ("a/b.txt", "never"),
    ]));

    assert!(matches!(result, Err(Error::IoError(_))));
    assert!(!root.exists());
    assert!(temp_dir.path().exists());
}

#[test]
fn test_rollback_keeps_existing_content() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("keep.txt"), "mine").unwrap();
    fs::write(root.join("blocker"), "file").unwrap();

    let mut writer = Writer::new(root);
    let result = writer.write_all(&files(&[("a/new.txt", "new"), ("blocker/x.txt", "never")]));

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(root.join("keep.txt")).unwrap(), "mine");
    assert!(root.join("blocker").is_file());
    assert!(!root.join("a").exists());
}

#[test]
fn test_rollback_restores_overwritten_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.txt"), "user data").unwrap();
    fs::write(root.join("blocker"), "file").unwrap();

    let mut writer = Writer::new(root);
    let result = writer.write_all(&files(&[("a.txt", "generated"), ("blocker/x.txt", "never")]));

    assert!(matches!(result, Err(Error::IoError(_))));
    assert_eq!(fs::read_to_string(root.join("a.txt")).unwrap(), "user data");
    assert_eq!(fs::read_to_string(root.join("blocker")).unwrap(), "file");
    assert!(writer.created_files().is_empty());
    assert!(writer.overwritten_files().is_empty());
}

#[test]
fn test_overwritten_file_is_not_tracked_as_created() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("go.mod"), "module old\n").unwrap();

    let mut writer = Writer::new(root);
    writer.write_all(&files(&[("go.mod", "module new\n"), ("main.go", "package main\n")])).unwrap();

    assert_eq!(fs::read_to_string(root.join("go.mod")).unwrap(), "module new\n");
    assert_eq!(writer.created_files(), &[root.join("main.go")]);
    assert_eq!(writer.overwritten_files(), vec![root.join("go.mod").as_path()]);
}

#[cfg(unix)]
#[test]
fn test_rollback_restores_overwritten_mode() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join("scripts")).unwrap();
    fs::write(root.join("scripts/build"), "echo old\n").unwrap();
    fs::set_permissions(root.join("scripts/build"), fs::Permissions::from_mode(0o600)).unwrap();
    fs::write(root.join("zblocker"), "file").unwrap();

    let mut writer = Writer::new(root);
    let result = writer.write_all(&files(&[("scripts/build", "echo new\n"), ("zblocker/x", "never")]));

    assert!(result.is_err());
    let metadata = fs::metadata(root.join("scripts/build")).unwrap();
    assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
    assert_eq!(fs::read_to_string(root.join("scripts/build")).unwrap(), "echo old\n");
}
