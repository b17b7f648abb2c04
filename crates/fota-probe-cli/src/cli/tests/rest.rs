//! Tests for metadata, resolve and config-path subcommands.

use super::parse;
use crate::cli::CliCommand;
use clap::Parser;

#[test]
fn cli_parse_metadata_defaults() {
    match parse(&["fota-probe", "metadata"]).command {
        CliCommand::Metadata {
            pkg_version,
            model,
            device_type,
            host_id,
            raw_query,
            keep_newlines,
            pretty,
        } => {
            assert_eq!(pkg_version, "10008");
            assert_eq!(model, "es-2");
            assert_eq!(device_type, "ag");
            assert_eq!(host_id, "ATY-GP0-FF2");
            assert!(!raw_query);
            assert!(!keep_newlines);
            assert!(!pretty);
        }
        _ => panic!("expected Metadata"),
    }
}

#[test]
fn cli_parse_metadata_fields_and_flags() {
    match parse(&[
        "fota-probe",
        "metadata",
        "--pkg-version",
        "20001",
        "--model",
        "es-3",
        "--device-type",
        "vg",
        "--host-id",
        "ABC-123",
        "--raw-query",
        "--pretty",
    ])
    .command
    {
        CliCommand::Metadata {
            pkg_version,
            model,
            device_type,
            host_id,
            raw_query,
            pretty,
            ..
        } => {
            assert_eq!(pkg_version, "20001");
            assert_eq!(model, "es-3");
            assert_eq!(device_type, "vg");
            assert_eq!(host_id, "ABC-123");
            assert!(raw_query);
            assert!(pretty);
        }
        _ => panic!("expected Metadata"),
    }
}

#[test]
fn cli_parse_resolve_default_host() {
    match parse(&["fota-probe", "resolve"]).command {
        CliCommand::Resolve { host } => assert_eq!(host, "iot.keeptruckin.com"),
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_resolve_host() {
    match parse(&["fota-probe", "resolve", "example.com"]).command {
        CliCommand::Resolve { host } => assert_eq!(host, "example.com"),
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_config_path() {
    assert!(matches!(
        parse(&["fota-probe", "config-path"]).command,
        CliCommand::ConfigPath
    ));
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(crate::cli::Cli::try_parse_from(["fota-probe", "bench"]).is_err());
}
