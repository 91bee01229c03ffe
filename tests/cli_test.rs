//! Tests for CLI parsing, rendered output and command exit codes

use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use citytree::application::services::LookupService;
use citytree::cli::args::{BitsCommands, Commands};
use citytree::cli::commands::{
    duplicate_warnings, parse_targets, render_find_lines, render_stats,
};
use citytree::cli::{execute_command, Cli};
use citytree::config::Settings;
use citytree::domain::{NodeId, TreeDisplay};
use citytree::exitcode;
use citytree::infrastructure::ServiceContainer;

/// Writes a forest file plus an empty local config dir.
fn fixture() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("forest.json");
    std::fs::write(
        &data,
        r#"[{"id": 1, "name": "A", "children": [{"id": 2, "name": "B"}]}]"#,
    )
    .unwrap();
    (temp, data)
}

fn run(args: &[&str]) -> Result<i32, citytree::cli::CliError> {
    let cli = Cli::try_parse_from(args).expect("valid arguments");
    execute_command(&cli)
}

#[test]
fn given_find_with_ids_when_parsing_then_collects_all() {
    let cli = Cli::try_parse_from(["citytree", "find", "1", "2", "--path"]).unwrap();
    match cli.command {
        Some(Commands::Find {
            ids,
            string_id,
            path,
        }) => {
            assert_eq!(ids, vec!["1", "2"]);
            assert!(!string_id);
            assert!(path);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn given_negative_operands_when_parsing_multiply_then_accepted() {
    let cli = Cli::try_parse_from(["citytree", "bits", "multiply", "-3", "7"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Bits {
            command: BitsCommands::Multiply { a: -3, b: 7 }
        })
    ));
}

#[test]
fn given_find_without_ids_when_parsing_then_error() {
    assert!(Cli::try_parse_from(["citytree", "find"]).is_err());
}

#[test]
fn given_present_id_when_running_find_then_ok() {
    let (temp, data) = fixture();
    let code = run(&[
        "citytree",
        "-C",
        temp.path().to_str().unwrap(),
        "--data",
        data.to_str().unwrap(),
        "find",
        "2",
    ])
    .unwrap();
    assert_eq!(code, exitcode::OK);
}

#[test]
fn given_missing_id_when_running_find_then_not_found_exit_code() {
    let (temp, data) = fixture();
    let code = run(&[
        "citytree",
        "-C",
        temp.path().to_str().unwrap(),
        "--data",
        data.to_str().unwrap(),
        "find",
        "2",
        "99",
    ])
    .unwrap();
    assert_eq!(code, exitcode::NOT_FOUND);
}

#[test]
fn given_malformed_data_when_running_find_then_dataerr() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("broken.json");
    std::fs::write(&data, "{not json").unwrap();

    let err = run(&[
        "citytree",
        "-C",
        temp.path().to_str().unwrap(),
        "--data",
        data.to_str().unwrap(),
        "find",
        "1",
    ])
    .unwrap_err();

    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_bad_date_when_running_month_range_then_usage_error() {
    let temp = TempDir::new().unwrap();
    let err = run(&[
        "citytree",
        "-C",
        temp.path().to_str().unwrap(),
        "month-range",
        "2024-13-01",
    ])
    .unwrap_err();
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_fib_past_range_when_running_then_dataerr() {
    let temp = TempDir::new().unwrap();
    let err = run(&["citytree", "-C", temp.path().to_str().unwrap(), "fib", "500"]).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

// ============================================================
// Rendered output
// ============================================================

/// Forest with a string id and a repeated integer id.
const MIXED_FOREST: &str = r#"[
  {"id": 1, "name": "Zhejiang", "children": [
    {"id": 12, "name": "Ningbo", "children": [{"id": 122, "name": "Yinzhou"}]},
    {"id": "12", "name": "Twelve"}
  ]},
  {"id": 12, "name": "Elsewhere"}
]"#;

fn mixed_service() -> (TempDir, LookupService) {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("mixed.json");
    std::fs::write(&data, MIXED_FOREST).unwrap();
    let service = ServiceContainer::new(Settings::default())
        .lookup_service(Some(data.as_path()))
        .unwrap();
    (temp, service)
}

fn targets(ids: &[&str], string_id: bool) -> Vec<NodeId> {
    let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
    parse_targets(&ids, string_id)
}

#[test]
fn given_single_id_when_rendering_find_then_bare_label() {
    let (_temp, service) = mixed_service();
    let targets = targets(&["122"], false);

    let (lines, missing) = render_find_lines(&service, &targets, false);

    assert_eq!(lines, vec!["Yinzhou"]);
    assert!(missing.is_empty());
}

#[test]
fn given_several_ids_when_rendering_find_then_tab_separated_id_and_label() {
    // Arrange
    let (_temp, service) = mixed_service();
    let targets = targets(&["12", "99", "1"], false);

    // Act
    let (lines, missing) = render_find_lines(&service, &targets, false);

    // Assert: misses are reported separately, found lines keep input order
    assert_eq!(lines, vec!["12\tNingbo", "1\tZhejiang"]);
    assert_eq!(missing, vec![&NodeId::from(99)]);
}

#[test]
fn given_path_flag_when_rendering_find_then_labels_joined_by_arrow() {
    let (_temp, service) = mixed_service();
    let targets = targets(&["122"], false);

    let (lines, _) = render_find_lines(&service, &targets, true);

    assert_eq!(lines, vec!["Zhejiang > Ningbo > Yinzhou"]);
}

#[test]
fn given_string_id_flag_when_running_find_then_matches_string_id_only() {
    // Arrange
    let (_temp, service) = mixed_service();
    let cli = Cli::try_parse_from(["citytree", "find", "--string-id", "12", "122"]).unwrap();
    let Some(Commands::Find { ids, string_id, .. }) = cli.command else {
        panic!("expected find command");
    };

    // Act
    let targets = parse_targets(&ids, string_id);
    let (lines, missing) = render_find_lines(&service, &targets, true);

    // Assert: "12" hits the string node, "122" as a string matches nothing
    assert_eq!(lines, vec!["12\tZhejiang > Twelve"]);
    assert_eq!(missing, vec![&NodeId::from("122")]);
}

#[test]
fn given_forest_when_rendering_tree_then_nests_labels_under_root() {
    let (_temp, service) = mixed_service();

    let rendered = service.forest().to_tree_string().to_string();

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "forest");
    assert!(lines[1].ends_with("Zhejiang (1)"));
    assert!(lines[2].ends_with("Ningbo (12)"));
    assert!(lines[3].ends_with("Yinzhou (122)"));
    assert!(lines[4].ends_with("Twelve (12)"));
    assert!(lines[5].ends_with("Elsewhere (12)"));
}

#[test]
fn given_repeated_id_when_checking_then_stats_and_single_duplicate_warning() {
    // Arrange
    let (_temp, service) = mixed_service();

    // Act
    let stats = render_stats(&service.stats());
    let warnings = duplicate_warnings(&service);

    // Assert: Int(12) repeats, Str("12") is a different id
    assert_eq!(
        stats,
        vec!["roots:  2", "nodes:  5", "depth:  3", "leaves: 3"]
    );
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("id 12 occurs more than once"));
}

#[test]
fn given_unique_ids_when_checking_then_no_warnings() {
    let service = LookupService::new(citytree::application::bundled_forest().unwrap());
    assert!(duplicate_warnings(&service).is_empty());
}
