use std::path::PathBuf;

use codingg::config::{ConfigFlags, EditorConfig, load_config_flags, parse_flag_tokens};
use codingg::editor::WrapMode;
use codingg::gutter::GutterMode;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".codinggrc");
    let content = r#"
# comment
--no-welcome

--wrap none

--debug-log=events.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_welcome);
    assert_eq!(flags.wrap, Some(WrapMode::None));
    assert_eq!(flags.debug_log, Some(PathBuf::from("events.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".codinggrc");
    let content = "--no-expand-tabs\n--tab-size 8\n--debug-log file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "codingg".to_string(),
        "--tab-size".to_string(),
        "2".to_string(),
        "--gutter".to_string(),
        "line-count".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_expand_tabs, "file flags should remain enabled");
    assert_eq!(effective.gutter, Some(GutterMode::LineCount), "cli flags should be applied");
    assert_eq!(effective.tab_size, Some(2), "cli should override tab size");
    assert_eq!(
        effective.debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );

    let config = effective.editor_config();
    assert_eq!(config.tab_text(), "\t");
    assert_eq!(config.tab_size, 2);
}

#[test]
fn test_global_then_local_then_cli() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config");
    let local = dir.path().join(".codinggrc");
    std::fs::write(&global, "--wrap char\n--perf\n").unwrap();
    std::fs::write(&local, "--wrap word\n").unwrap();

    let files = load_config_flags(&global)
        .unwrap()
        .union(&load_config_flags(&local).unwrap());
    let effective = files.union(&parse_flag_tokens(&["--no-welcome".to_string()]));

    assert_eq!(effective.wrap, Some(WrapMode::Word));
    assert!(effective.perf);
    let config = effective.editor_config();
    assert!(!config.show_welcome);
    assert_eq!(config.wrap, WrapMode::Word);
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
    assert_eq!(flags.editor_config(), EditorConfig::default());
}
