use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use keyword_logging::{kw_info, kw_warn};

use crate::persist::DownloadSaver;
use crate::{EngineEvent, ExportError, ExportFormat, FailureKind, KeywordService, ServiceError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    Generate {
        keyword: String,
    },
    Download {
        format: ExportFormat,
        keyword: String,
        keywords: Vec<String>,
    },
    CheckHealth,
}

/// Owns the worker thread that runs round trips on a tokio runtime.
///
/// Every `generate` / `download` call that returns `true` is answered by
/// exactly one matching `EngineEvent`, including when the task panics.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(
        service: Arc<dyn KeywordService>,
        download_dir: PathBuf,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let saver = Arc::new(DownloadSaver::new(download_dir));

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let saver = saver.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(service.as_ref(), saver.as_ref(), command, event_tx).await;
                });
            }
            runtime.shutdown_timeout(Duration::from_millis(500));
        });

        Ok(Self { cmd_tx, event_rx })
    }

    /// Returns false when the worker is gone; no event will follow.
    pub fn generate(&self, keyword: impl Into<String>) -> bool {
        self.cmd_tx
            .send(EngineCommand::Generate {
                keyword: keyword.into(),
            })
            .is_ok()
    }

    /// Returns false when the worker is gone; no event will follow.
    pub fn download(&self, format: ExportFormat, keyword: String, keywords: Vec<String>) -> bool {
        self.cmd_tx
            .send(EngineCommand::Download {
                format,
                keyword,
                keywords,
            })
            .is_ok()
    }

    pub fn check_health(&self) -> bool {
        self.cmd_tx.send(EngineCommand::CheckHealth).is_ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

/// Sends its fallback event when dropped without `complete` having run, so a
/// panicking or cancelled task still reports back.
struct CompletionGuard {
    tx: mpsc::Sender<EngineEvent>,
    fallback: Option<EngineEvent>,
}

impl CompletionGuard {
    fn new(tx: mpsc::Sender<EngineEvent>, fallback: EngineEvent) -> Self {
        Self {
            tx,
            fallback: Some(fallback),
        }
    }

    fn complete(mut self, event: EngineEvent) {
        self.fallback = None;
        let _ = self.tx.send(event);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(event) = self.fallback.take() {
            kw_warn!("Engine task ended without a result; reporting abort");
            let _ = self.tx.send(event);
        }
    }
}

fn aborted() -> ServiceError {
    ServiceError::new(FailureKind::Aborted, "request aborted")
}

async fn handle_command(
    service: &dyn KeywordService,
    saver: &DownloadSaver,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Generate { keyword } => {
            let guard = CompletionGuard::new(
                event_tx,
                EngineEvent::GenerateFinished {
                    keyword: keyword.clone(),
                    result: Err(aborted()),
                },
            );
            let result = service.generate(&keyword).await;
            match &result {
                Ok(keywords) => kw_info!("Generated {} keywords for {:?}", keywords.len(), keyword),
                Err(err) => kw_warn!("Generation for {:?} failed: {}", keyword, err),
            }
            guard.complete(EngineEvent::GenerateFinished { keyword, result });
        }
        EngineCommand::Download {
            format,
            keyword,
            keywords,
        } => {
            let guard = CompletionGuard::new(
                event_tx,
                EngineEvent::DownloadFinished {
                    format,
                    result: Err(ExportError::Transport(aborted())),
                },
            );
            let result = export(service, saver, format, &keyword, &keywords).await;
            match &result {
                Ok(path) => kw_info!("Saved {} export to {:?}", format, path),
                Err(err) => kw_warn!("Export {} failed: {}", format, err),
            }
            guard.complete(EngineEvent::DownloadFinished { format, result });
        }
        EngineCommand::CheckHealth => {
            let result = service.health().await;
            let _ = event_tx.send(EngineEvent::HealthChecked(result));
        }
    }
}

async fn export(
    service: &dyn KeywordService,
    saver: &DownloadSaver,
    format: ExportFormat,
    keyword: &str,
    keywords: &[String],
) -> Result<PathBuf, ExportError> {
    let payload = service
        .download(format, keyword, keywords)
        .await
        .map_err(ExportError::Transport)?;
    saver
        .save(keyword, format, &payload)
        .map_err(|err| ExportError::Save(err.to_string()))
}
