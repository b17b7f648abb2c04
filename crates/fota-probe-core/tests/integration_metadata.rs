//! Integration tests: package metadata lookup against a local server.

mod common;

use fota_probe_core::config::ProbeConfig;
use fota_probe_core::error::ProbeError;
use fota_probe_core::metadata::{self, MetadataQuery};

fn query() -> MetadataQuery {
    MetadataQuery {
        version: "10008".to_string(),
        model: "es-2".to_string(),
        host_device_type: "ag".to_string(),
        host_identifier: "ATY-GP0-FF2".to_string(),
    }
}

fn config_for(server: &common::probe_server::ProbeServer) -> ProbeConfig {
    ProbeConfig {
        metadata_base_url: format!("{}/api/d1/packages", server.base_url),
        timeout_secs: 10,
        ..ProbeConfig::default()
    }
}

#[test]
fn lookup_builds_query_and_joins_unescaped_lines() {
    let body = b"{\\\"packages\\\":[\r\n{\\\"url\\\":\\\"https://cdn\\.example\\.com/fw\\.bin\\\"}\r\n]}\r\n".to_vec();
    let server = common::probe_server::start(200, body);
    let resp = metadata::lookup(&query(), &config_for(&server)).unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.lines.len(), 3);
    assert_eq!(
        resp.joined(),
        r#"{"packages":[{"url":"https://cdn.example.com/fw.bin"}]}"#
    );
    assert!(resp.pretty_json().is_some());

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(
        requests[0].target,
        "/api/d1/packages?sw_pkg_version=10008&model=es-2&host_device_type=ag&host_device_identifier=ATY-GP0-FF2"
    );
    assert_eq!(requests[0].header("Content-Type"), Some("application/json"));
}

#[test]
fn lookup_http_error_is_reported() {
    let server = common::probe_server::start(500, b"boom".to_vec());
    let err = metadata::lookup(&query(), &config_for(&server)).unwrap_err();
    assert!(matches!(err, ProbeError::Http { status: 500, .. }), "{:?}", err);
}

#[test]
fn lookup_percent_encodes_fields() {
    let server = common::probe_server::start(200, b"[]".to_vec());
    let mut q = query();
    q.host_identifier = "ATY/GP0#1".to_string();

    metadata::lookup(&q, &config_for(&server)).unwrap();
    let target = &server.requests()[0].target;
    assert!(target.ends_with("host_device_identifier=ATY%2FGP0%231"), "{}", target);
}

#[test]
fn lookup_raw_query_sends_fields_verbatim() {
    let server = common::probe_server::start(200, b"[]".to_vec());
    let mut q = query();
    q.host_identifier = "ATY/GP0".to_string();
    let cfg = ProbeConfig {
        raw_query: true,
        ..config_for(&server)
    };

    metadata::lookup(&q, &cfg).unwrap();
    let target = &server.requests()[0].target;
    assert!(target.ends_with("host_device_identifier=ATY/GP0"), "{}", target);
}
