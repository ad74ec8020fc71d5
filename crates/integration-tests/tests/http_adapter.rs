// HTTP adapter tests against an in-process mock GROBID server

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use grobid_batch_core::application::{shutdown_channel, BatchRun};
use grobid_batch_core::domain::{GrobidService, RunConfig};
use grobid_batch_core::error::BatchError;
use grobid_batch_core::port::{DocumentService, ServiceError};
use grobid_batch_infra_http::{Endpoint, GrobidClient};
use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

const TEI_BODY: &[u8] = b"<TEI/>";

/// Accepts the upload only when the file arrives under field name "input".
async fn process_fulltext(mut multipart: Multipart) -> Result<Vec<u8>, StatusCode> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() == Some("input") {
            let payload = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            if payload.is_empty() {
                return Err(StatusCode::BAD_REQUEST);
            }
            return Ok(TEI_BODY.to_vec());
        }
    }
    Err(StatusCode::BAD_REQUEST)
}

async fn broken_upload() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Mock GROBID: live probe plus a well-behaved fulltext route.
async fn spawn_mock_grobid() -> SocketAddr {
    let app = Router::new()
        .route("/api/isalive", get(|| async { StatusCode::OK }))
        .route("/api/processFulltextDocument", post(process_fulltext));
    serve(app).await
}

/// Mock GROBID that is up but reports not ready.
async fn spawn_not_ready_grobid() -> SocketAddr {
    let app = Router::new().route(
        "/api/isalive",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    serve(app).await
}

/// Mock GROBID whose upload route always errors.
async fn spawn_failing_grobid() -> SocketAddr {
    let app = Router::new()
        .route("/api/isalive", get(|| async { StatusCode::OK }))
        .route("/api/processFulltextDocument", post(broken_upload));
    serve(app).await
}

fn client_for(addr: SocketAddr) -> GrobidClient {
    let endpoint = Endpoint::new("127.0.0.1", addr.port().to_string());
    GrobidClient::new(endpoint).unwrap()
}

#[tokio::test]
async fn liveness_probe_accepts_exactly_200() {
    let addr = spawn_mock_grobid().await;
    client_for(addr).is_alive().await.unwrap();

    let addr = spawn_not_ready_grobid().await;
    let err = client_for(addr).is_alive().await.unwrap_err();
    assert!(matches!(err, ServiceError::Status(503)));
}

#[tokio::test]
async fn liveness_probe_reports_connection_failure() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr).is_alive().await.unwrap_err();
    assert!(matches!(err, ServiceError::Unreachable(_)));
}

#[tokio::test]
async fn upload_round_trips_the_response_body() {
    let addr = spawn_mock_grobid().await;
    let client = client_for(addr);

    let body = client
        .process_document(
            GrobidService::FullTextDocument,
            "paper.pdf",
            b"%PDF-1.4".to_vec(),
        )
        .await
        .unwrap();
    assert_eq!(body, TEI_BODY);
}

#[tokio::test]
async fn non_success_upload_status_is_an_error() {
    let addr = spawn_failing_grobid().await;
    let client = client_for(addr);

    let err = client
        .process_document(
            GrobidService::FullTextDocument,
            "paper.pdf",
            b"%PDF-1.4".to_vec(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Status(500)));
}

#[tokio::test]
async fn full_run_through_the_http_adapter() {
    let addr = spawn_mock_grobid().await;
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("a.pdf"), b"%PDF-1.4 a").unwrap();
    fs::write(input.path().join("skip.txt"), b"x").unwrap();

    let config = RunConfig::new(
        input.path(),
        output.path(),
        GrobidService::FullTextDocument,
    );
    let (_shutdown_tx, shutdown_rx) = shutdown_channel();
    let summary = BatchRun::new(config, Arc::new(client_for(addr)))
        .execute(shutdown_rx)
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 1);
    assert_eq!(
        fs::read(output.path().join("a.pdf.tei.xml")).unwrap(),
        TEI_BODY
    );
}

#[tokio::test]
async fn full_run_aborts_when_the_probe_is_not_ready() {
    let addr = spawn_not_ready_grobid().await;
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("a.pdf"), b"%PDF-1.4 a").unwrap();

    let config = RunConfig::new(
        input.path(),
        output.path(),
        GrobidService::FullTextDocument,
    );
    let (_shutdown_tx, shutdown_rx) = shutdown_channel();
    let result = BatchRun::new(config, Arc::new(client_for(addr)))
        .execute(shutdown_rx)
        .await;

    assert!(matches!(result, Err(BatchError::ServiceUnavailable(_))));
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}
