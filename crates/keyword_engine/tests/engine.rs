use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use keyword_engine::{
    ClientSettings, EngineEvent, EngineHandle, ExportError, ExportFormat, FailureKind,
    HealthStatus, KeywordService, ReqwestKeywordService, ServiceError,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn next_event(engine: &EngineHandle) -> EngineEvent {
    for _ in 0..400 {
        if let Some(event) = engine.try_recv() {
            return event;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("engine produced no event");
}

fn engine_for(server: &MockServer, dir: &TempDir) -> EngineHandle {
    let service = ReqwestKeywordService::new(ClientSettings {
        base_url: server.uri(),
    })
    .unwrap();
    EngineHandle::new(Arc::new(service), dir.path().to_path_buf()).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn generate_command_reports_result_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "keywords": ["coffee shop"]
        })))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let engine = engine_for(&server, &dir);

    assert!(engine.generate("coffee"));
    match next_event(&engine).await {
        EngineEvent::GenerateFinished { keyword, result } => {
            assert_eq!(keyword, "coffee");
            assert_eq!(result.unwrap(), vec!["coffee shop".to_string()]);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn download_command_saves_payload_under_seed_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/download/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"[{"Keywords":"coffee shop"}]"#, "application/json"),
        )
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let engine = engine_for(&server, &dir);

    assert!(engine.download(
        ExportFormat::Json,
        "coffee".to_string(),
        vec!["coffee shop".to_string()]
    ));
    match next_event(&engine).await {
        EngineEvent::DownloadFinished { format, result } => {
            assert_eq!(format, ExportFormat::Json);
            let saved = result.unwrap();
            assert_eq!(saved, dir.path().join("coffee-keywords.json"));
            assert_eq!(
                std::fs::read_to_string(saved).unwrap(),
                r#"[{"Keywords":"coffee shop"}]"#
            );
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn download_into_unusable_dir_reports_save_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/download/csv"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("Keyword\n", "text/csv"))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("downloads");
    std::fs::write(&blocker, "x").unwrap();
    let service = ReqwestKeywordService::new(ClientSettings {
        base_url: server.uri(),
    })
    .unwrap();
    let engine = EngineHandle::new(Arc::new(service), blocker).unwrap();

    assert!(engine.download(ExportFormat::Csv, "coffee".to_string(), vec!["a".to_string()]));
    match next_event(&engine).await {
        EngineEvent::DownloadFinished { format, result } => {
            assert_eq!(format, ExportFormat::Csv);
            match result {
                Err(ExportError::Save(message)) => {
                    assert!(message.contains("not a usable download directory"));
                }
                other => panic!("unexpected result {other:?}"),
            }
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn health_command_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let engine = engine_for(&server, &dir);

    assert!(engine.check_health());
    assert_eq!(
        next_event(&engine).await,
        EngineEvent::HealthChecked(Ok(HealthStatus {
            status: "ok".to_string(),
            message: None
        }))
    );
}

struct PanickingService;

#[async_trait::async_trait]
impl KeywordService for PanickingService {
    async fn generate(&self, _keyword: &str) -> Result<Vec<String>, ServiceError> {
        panic!("generator crashed");
    }

    async fn download(
        &self,
        _format: ExportFormat,
        _keyword: &str,
        _keywords: &[String],
    ) -> Result<Bytes, ServiceError> {
        panic!("exporter crashed");
    }

    async fn health(&self) -> Result<HealthStatus, ServiceError> {
        panic!("health crashed");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn panicking_tasks_still_complete() {
    let dir = TempDir::new().unwrap();
    let engine = EngineHandle::new(Arc::new(PanickingService), dir.path().to_path_buf()).unwrap();

    assert!(engine.generate("coffee"));
    match next_event(&engine).await {
        EngineEvent::GenerateFinished { result, .. } => {
            assert_eq!(result.unwrap_err().kind, FailureKind::Aborted);
        }
        other => panic!("unexpected event {other:?}"),
    }

    assert!(engine.download(ExportFormat::Csv, "coffee".to_string(), vec!["a".to_string()]));
    match next_event(&engine).await {
        EngineEvent::DownloadFinished { format, result } => {
            assert_eq!(format, ExportFormat::Csv);
            assert!(matches!(
                result,
                Err(ExportError::Transport(ServiceError {
                    kind: FailureKind::Aborted,
                    ..
                }))
            ));
        }
        other => panic!("unexpected event {other:?}"),
    }
}
