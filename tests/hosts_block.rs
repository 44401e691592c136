//! Activate/deactivate the managed block in a temp hosts file.

mod common;

use bloqueo::hosts::{self, BlockChange, DOMAINS, END_MARKER, START_MARKER};
use bloqueo::platform::{FileHostsEditor, HostsEditor};
use std::fs;

#[test]
fn activate_appends_block_after_existing_lines() {
    let dir = common::temp_home();
    let path = common::hosts_file(&dir, "127.0.0.1 localhost\n");
    let editor = FileHostsEditor::new(&path);

    assert_eq!(hosts::activate(&editor).unwrap(), BlockChange::Applied);

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "127.0.0.1 localhost");
    assert_eq!(lines[1], START_MARKER);
    assert_eq!(*lines.last().unwrap(), END_MARKER);
    assert_eq!(DOMAINS.len(), 8);
    for domain in DOMAINS {
        assert!(lines.contains(&format!("0.0.0.0 {domain}").as_str()), "{domain}");
        assert!(lines.contains(&format!("0.0.0.0 www.{domain}").as_str()), "www.{domain}");
    }
    assert_eq!(lines.len(), 1 + 2 + DOMAINS.len() * 2);
    assert!(content.ends_with('\n'));
}

#[test]
fn activate_twice_is_idempotent() {
    let dir = common::temp_home();
    let path = common::hosts_file(&dir, "127.0.0.1 localhost\n::1 localhost\n");
    let editor = FileHostsEditor::new(&path);

    hosts::activate(&editor).unwrap();
    let once = fs::read(&path).unwrap();

    assert_eq!(hosts::activate(&editor).unwrap(), BlockChange::Unchanged);
    assert_eq!(fs::read(&path).unwrap(), once);
}

#[test]
fn activate_then_deactivate_restores_original() {
    let original = "127.0.0.1 localhost\n# comment\n10.0.0.2 nas.lan\n";
    let dir = common::temp_home();
    let path = common::hosts_file(&dir, original);
    let editor = FileHostsEditor::new(&path);

    hosts::activate(&editor).unwrap();
    assert_eq!(hosts::deactivate(&editor).unwrap(), BlockChange::Applied);

    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn round_trip_normalizes_missing_trailing_newline() {
    let dir = common::temp_home();
    let path = common::hosts_file(&dir, "127.0.0.1 localhost");
    let editor = FileHostsEditor::new(&path);

    hosts::activate(&editor).unwrap();
    hosts::deactivate(&editor).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "127.0.0.1 localhost\n");
}

#[test]
fn block_state_follows_activate_and_deactivate() {
    let dir = common::temp_home();
    let path = common::hosts_file(&dir, "127.0.0.1 localhost\n");
    let editor = FileHostsEditor::new(&path);

    assert!(!hosts::is_blocked(&editor.read().unwrap()));
    hosts::activate(&editor).unwrap();
    assert!(hosts::is_blocked(&editor.read().unwrap()));
    hosts::deactivate(&editor).unwrap();
    assert!(!hosts::is_blocked(&editor.read().unwrap()));
}

#[test]
fn deactivate_without_block_leaves_file_untouched() {
    let original = "127.0.0.1 localhost\r\n\r\n#no newline at end";
    let dir = common::temp_home();
    let path = common::hosts_file(&dir, original);
    let editor = FileHostsEditor::new(&path);

    assert_eq!(hosts::deactivate(&editor).unwrap(), BlockChange::Unchanged);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn deactivate_keeps_lines_after_the_block() {
    let dir = common::temp_home();
    let path = common::hosts_file(&dir, "127.0.0.1 localhost\n");
    let editor = FileHostsEditor::new(&path);

    hosts::activate(&editor).unwrap();
    let mut content = fs::read_to_string(&path).unwrap();
    content.push_str("192.168.1.5 printer\n");
    fs::write(&path, &content).unwrap();

    hosts::deactivate(&editor).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "127.0.0.1 localhost\n192.168.1.5 printer\n"
    );
}

#[test]
fn invalid_utf8_is_read_lossily() {
    let dir = common::temp_home();
    let path = dir.path().join("hosts");
    fs::write(&path, b"127.0.0.1 caf\xe9\n").unwrap();
    let editor = FileHostsEditor::new(&path);

    assert_eq!(hosts::activate(&editor).unwrap(), BlockChange::Applied);
    assert!(hosts::block_active(&editor).unwrap());
}

#[test]
fn missing_hosts_file_is_an_error() {
    let dir = common::temp_home();
    let editor = FileHostsEditor::new(dir.path().join("does-not-exist"));

    let err = hosts::activate(&editor).unwrap_err();
    assert!(format!("{err:#}").contains("does-not-exist"));
}

#[test]
fn write_errors_name_the_hosts_file() {
    let dir = common::temp_home();
    let editor = FileHostsEditor::new(dir.path().join("gone-hosts"));

    let err = editor.write("127.0.0.1 localhost\n").unwrap_err();
    assert!(format!("{err:#}").contains("gone-hosts"));
}
