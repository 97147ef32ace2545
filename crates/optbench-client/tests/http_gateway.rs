//! `HttpGateway` against a stub backend served by axum on a loopback port.

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use optbench_client::{
    BackendGateway, GatewayConfig, GatewayError, HttpGateway, ReportBrowser, RunCommand,
    SingleTestSession,
};
use optbench_core::{MultiAlgorithmTestRequest, SingleAlgorithmTestRequest};
use serde_json::{json, Value};

#[derive(Default)]
struct Seen {
    bodies: Mutex<Vec<Value>>,
    uploads: Mutex<Vec<(String, Vec<u8>)>>,
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn stub_backend(seen: Arc<Seen>) -> Router {
    let single_seen = seen.clone();
    let multi_seen = seen.clone();
    let upload_seen = seen;

    Router::new()
        .route(
            "/algorithms",
            get(|| async {
                Json(json!([
                    {"name": "PSO", "paramsInfo": [
                        {"name": "w", "description": "inertia", "lowerBoundary": 0.0, "upperBoundary": 10.0}
                    ]}
                ]))
            }),
        )
        .route(
            "/testfunctions",
            get(|| async { Json(json!([{"name": "Sphere"}, {"name": "Ackley"}])) }),
        )
        .route(
            "/calculationprocessor/onealgorithmmanyfunctions",
            post(move |Json(body): Json<Value>| async move {
                single_seen.bodies.lock().unwrap().push(body);
                "queued"
            }),
        )
        .route(
            "/calculationprocessor/onefunctionmanyalgorithms",
            post(move |Json(body): Json<Value>| async move {
                multi_seen.bodies.lock().unwrap().push(body);
                "queued"
            }),
        )
        .route("/calculationprocessor/result", get(|| async { "running" }))
        .route("/calculationprocessor/stop", get(|| async { "stopped" }))
        .route("/calculationprocessor/resume", get(|| async { "running" }))
        .route(
            "/report",
            get(|| async { Json(json!(["run 1", "run-2"])) }),
        )
        .route(
            "/report/{name}",
            get(|Path(name): Path<String>| async move {
                if name == "run 1" {
                    Ok(b"PK\x03\x04".to_vec())
                } else {
                    Err(StatusCode::NOT_FOUND)
                }
            })
            .delete(|Path(name): Path<String>| async move {
                if name == "run-2" {
                    StatusCode::OK
                } else {
                    StatusCode::NOT_FOUND
                }
            }),
        )
        .route(
            "/dllcontroler",
            get(|| async {
                Json(json!([{
                    "fileName": "Bees.dll",
                    "algorithmList": [{"name": "Bees", "paramsInfo": [], "fBest": 1.5, "stop": false}],
                    "functionList": [{"name": "Schwefel"}]
                }]))
            })
            .post(move |mut multipart: Multipart| async move {
                while let Some(field) = multipart.next_field().await.unwrap() {
                    let name = field.name().map(str::to_string);
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let data = field.bytes().await.unwrap();
                    if name.as_deref() == Some("file") {
                        upload_seen.uploads.lock().unwrap().push((file_name, data.to_vec()));
                    }
                }
                StatusCode::OK
            }),
        )
        .route(
            "/dllcontroler/{file}",
            delete(|Path(file): Path<String>| async move {
                if file == "Bees.dll" {
                    StatusCode::OK
                } else {
                    StatusCode::NOT_FOUND
                }
            }),
        )
}

async fn gateway_with_stub() -> (HttpGateway, Arc<Seen>) {
    let seen = Arc::new(Seen::default());
    let base = spawn(stub_backend(seen.clone())).await;
    (HttpGateway::new(&GatewayConfig::new(&base)).unwrap(), seen)
}

// ── Catalogs ────────────────────────────────────────────────────────────

#[tokio::test]
async fn fetches_catalogs() {
    let (gw, _) = gateway_with_stub().await;

    let algorithms = gw.algorithms().await.unwrap();
    assert_eq!(algorithms.len(), 1);
    assert_eq!(algorithms[0].name, "PSO");
    assert_eq!(algorithms[0].params_info[0].upper_boundary, 10.0);

    let functions = gw.fitness_functions().await.unwrap();
    let names: Vec<_> = functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Sphere", "Ackley"]);
}

// ── Submissions ─────────────────────────────────────────────────────────

#[tokio::test]
async fn posts_single_request_in_wire_shape() {
    let (gw, seen) = gateway_with_stub().await;
    let request = SingleAlgorithmTestRequest {
        algorithm_name: "PSO".to_string(),
        domain: [vec![-5.0, -5.0], vec![5.0, 5.0]],
        parameters: vec![[2.0, 8.0, 1.0]],
        test_function_names: vec!["Sphere".to_string()],
    };

    assert_eq!(gw.submit_single(&request).await.unwrap(), "queued");

    let bodies = seen.bodies.lock().unwrap();
    assert_eq!(
        bodies[0],
        json!({
            "algorithmName": "PSO",
            "domain": [[-5.0, -5.0], [5.0, 5.0]],
            "parameters": [[2.0, 8.0, 1.0]],
            "testFunctionNames": ["Sphere"]
        })
    );
}

#[tokio::test]
async fn posts_multi_request_in_wire_shape() {
    let (gw, seen) = gateway_with_stub().await;
    let request = MultiAlgorithmTestRequest {
        test_function_name: "Sphere".to_string(),
        domain: [vec![-1.0], vec![1.0]],
        parameters: vec![[30, 100]],
        algorithm_names: vec!["PSO".to_string()],
    };

    gw.submit_multi(&request).await.unwrap();

    let bodies = seen.bodies.lock().unwrap();
    assert_eq!(bodies[0]["testFunctionName"], "Sphere");
    assert_eq!(bodies[0]["parameters"], json!([[30, 100]]));
    assert_eq!(bodies[0]["algorithmNames"], json!(["PSO"]));
}

#[tokio::test]
async fn session_submits_through_http() {
    let (gw, seen) = gateway_with_stub().await;
    let mut session = SingleTestSession::open(Arc::new(gw)).await;
    assert_eq!(session.reference().functions.len(), 2);

    session.select_algorithm(Some("PSO"));
    session.set_dimension(1);
    session.set_domain_bound(0, optbench_core::BoundSide::Lower, -1.0);
    session.set_domain_bound(0, optbench_core::BoundSide::Upper, 1.0);
    session.set_parameter(0, optbench_core::ParameterField::Lower, 1.0);
    session.set_parameter(0, optbench_core::ParameterField::Upper, 3.0);
    session.set_parameter(0, optbench_core::ParameterField::Step, 0.5);
    session.set_function_checked("Ackley", true);

    assert_eq!(
        session.submit().await,
        optbench_client::SubmitOutcome::Sent
    );
    assert_eq!(seen.bodies.lock().unwrap().len(), 1);
}

// ── Run control ─────────────────────────────────────────────────────────

#[tokio::test]
async fn run_commands_return_plain_text() {
    let (gw, _) = gateway_with_stub().await;
    assert_eq!(gw.run_command(RunCommand::Result).await.unwrap(), "running");
    assert_eq!(gw.run_command(RunCommand::Stop).await.unwrap(), "stopped");
    assert_eq!(gw.run_command(RunCommand::Resume).await.unwrap(), "running");
}

// ── Reports ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn report_names_are_percent_encoded() {
    let (gw, _) = gateway_with_stub().await;
    assert_eq!(gw.reports().await.unwrap(), vec!["run 1", "run-2"]);
    assert_eq!(gw.report_archive("run 1").await.unwrap(), b"PK\x03\x04");

    let err = gw.report_archive("run-9").await.unwrap_err();
    assert!(err.is_not_found(), "{err}");
}

#[tokio::test]
async fn report_browser_keeps_entry_when_backend_refuses_delete() {
    let (gw, _) = gateway_with_stub().await;
    let mut browser = ReportBrowser::open(Arc::new(gw)).await;

    assert!(!browser.delete("run 1").await);
    assert_eq!(browser.reports().len(), 2);

    assert!(browser.delete("run-2").await);
    assert_eq!(browser.reports(), &["run 1".to_string()]);
}

// ── Plugins ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn plugin_listing_upload_and_delete() {
    let (gw, seen) = gateway_with_stub().await;

    let plugins = gw.plugins().await.unwrap();
    assert_eq!(plugins[0].file_name, "Bees.dll");
    assert_eq!(plugins[0].function_list[0].name, "Schwefel");

    gw.upload_plugin("Wolves.dll", b"MZ\x90".to_vec())
        .await
        .unwrap();
    let uploads = seen.uploads.lock().unwrap().clone();
    assert_eq!(uploads, vec![("Wolves.dll".to_string(), b"MZ\x90".to_vec())]);

    gw.delete_plugin("Bees.dll").await.unwrap();
    assert!(gw.delete_plugin("Wolves.dll").await.unwrap_err().is_not_found());
}

// ── Failures ────────────────────────────────────────────────────────────

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gw = HttpGateway::new(&GatewayConfig::new(&format!("http://{addr}"))).unwrap();
    let err = gw.algorithms().await.unwrap_err();
    assert!(matches!(err, GatewayError::Http(_)), "{err}");

    let browser = ReportBrowser::open(Arc::new(gw)).await;
    assert!(browser.reports().is_empty());
}

#[tokio::test]
async fn bad_status_and_bad_body_are_distinguished() {
    let app = Router::new()
        .route("/algorithms", get(|| async { "definitely not json" }))
        .route(
            "/report",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "disk full") }),
        );
    let base = spawn(app).await;
    let gw = HttpGateway::new(&GatewayConfig::new(&base)).unwrap();

    assert!(matches!(
        gw.algorithms().await.unwrap_err(),
        GatewayError::Decode(_)
    ));
    match gw.reports().await.unwrap_err() {
        GatewayError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "disk full");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}
