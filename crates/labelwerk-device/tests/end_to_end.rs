// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Full pipeline against a mock device: address in, PDF label out.

use std::time::Duration;

use labelwerk_core::LabelwerkError;
use labelwerk_core::types::{Credentials, LabelSize};
use labelwerk_device::DeviceClient;
use labelwerk_device::client::{QR_PATH, REGISTER_CODE_PATH};
use labelwerk_document::{LabelInspector, LabelRequest, generate_label};
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_device() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QR_PATH))
        .and(basic_auth("admin", "123456"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<svg/>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(REGISTER_CODE_PATH))
        .and(basic_auth("admin", "123456"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(r#"{"registerCode":"R57NX98AAFC62AF2A"}"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .with_priority(10)
        .mount(&server)
        .await;
    server
}

fn request(password: &str) -> LabelRequest {
    LabelRequest {
        input: "192.168.1.100".into(),
        size: LabelSize::default(),
        credentials: Credentials::new("admin", password),
        logo_path: None,
    }
}

#[tokio::test]
async fn reachable_device_produces_label() {
    let server = mock_device().await;
    let client = DeviceClient::new(Duration::from_secs(5))
        .unwrap()
        .with_base_url(server.uri());
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("device_label.pdf");

    let outcome = generate_label(&request("123456"), &client, &out).await.unwrap();

    assert!(outcome.fetched);
    assert_eq!(outcome.code.as_str(), "R57NX98AAFC62AF2A");

    let inspector = LabelInspector::open(&out).unwrap();
    assert_eq!(inspector.page_count(), 1);
    let (w, h) = inspector.page_size_in(1).unwrap();
    assert!((w - 2.625).abs() < 0.01);
    assert!((h - 1.0).abs() < 0.01);
    let text = inspector.page_text(1).unwrap();
    assert!(text.iter().any(|t| t == "R57NX98AAFC62AF2A"));
}

#[tokio::test]
async fn wrong_credentials_produce_nothing() {
    let server = mock_device().await;
    let client = DeviceClient::new(Duration::from_secs(5))
        .unwrap()
        .with_base_url(server.uri());
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("device_label.pdf");

    let err = generate_label(&request("wrong"), &client, &out)
        .await
        .unwrap_err();

    assert!(matches!(err, LabelwerkError::FetchFailed { .. }));
    assert!(!out.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
