use craft::cli::Args;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("craft")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let args = make_args(&["--name", "shop", "--module", "github.com/acme/shop"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.name.as_deref(), Some("shop"));
    assert_eq!(parsed.module.as_deref(), Some("github.com/acme/shop"));
    assert!(parsed.generators.is_empty());
    assert!(parsed.binaries.is_none());
    assert!(!parsed.force);
    assert!(!parsed.dry_run);
    assert!(!parsed.verbose);
}

#[test]
fn test_list_values_are_comma_separated() {
    let args = make_args(&[
        "-n",
        "shop",
        "-m",
        "github.com/acme/shop",
        "-b",
        "api,worker",
        "-g",
        "commands,license",
        "--include",
        "grpc,metrics",
        "--config-dirs",
        "/etc/shop,/opt/shop",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.binaries, Some(vec!["api".to_string(), "worker".to_string()]));
    assert_eq!(parsed.generators, vec!["commands", "license"]);
    assert_eq!(parsed.includes, Some(vec!["grpc".to_string(), "metrics".to_string()]));
    assert_eq!(
        parsed.config_dirs,
        Some(vec!["/etc/shop".to_string(), "/opt/shop".to_string()])
    );
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "--name",
        "shop",
        "--module",
        "github.com/acme/shop",
        "--cli",
        "urfave",
        "--license",
        "apache-2.0",
        "--go",
        "1.22",
        "--year",
        "2024",
        "--output-dir",
        "./out",
        "--templates",
        "./my-templates",
        "--force",
        "--dry-run",
        "--verbose",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.cli_framework.as_deref(), Some("urfave"));
    assert_eq!(parsed.license.as_deref(), Some("apache-2.0"));
    assert_eq!(parsed.go_version.as_deref(), Some("1.22"));
    assert_eq!(parsed.year, Some(2024));
    assert_eq!(parsed.output_dir, Some(PathBuf::from("./out")));
    assert_eq!(parsed.templates, Some(PathBuf::from("./my-templates")));
    assert!(parsed.force);
    assert!(parsed.dry_run);
    assert!(parsed.verbose);
}

#[test]
fn test_list_needs_no_project() {
    let parsed = Args::try_parse_from(make_args(&["--list"])).unwrap();
    assert!(parsed.list);
    assert!(parsed.name.is_none());
}

#[test]
fn test_project_config_mirrors_flags() {
    let args = make_args(&["-n", "shop", "-m", "github.com/acme/shop", "--author", "Jane"]);
    let config = Args::try_parse_from(args).unwrap().project_config();

    assert_eq!(config.project_name.as_deref(), Some("shop"));
    assert_eq!(config.module_prefix.as_deref(), Some("github.com/acme/shop"));
    assert_eq!(config.author.as_deref(), Some("Jane"));
    assert!(config.license.is_none());
}

#[test]
fn test_invalid_year() {
    let args = make_args(&["--year", "soon"]);
    assert!(Args::try_parse_from(args).is_err());
}
