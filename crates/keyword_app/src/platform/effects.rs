use keyword_core::{Effect, ExportKind, GenerateFailure, Msg};
use keyword_engine::{ClipboardUtility, CopyOutcome, EngineEvent, EngineHandle, ExportFormat, ServiceError};
use keyword_logging::{kw_debug, kw_info, kw_warn};

const ENGINE_GONE: &str = "background worker is not running";

/// Executes core effects against the engine and the clipboard, and turns
/// engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: ClipboardUtility,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, clipboard: ClipboardUtility) -> Self {
        Self { engine, clipboard }
    }

    pub fn check_health(&self) {
        if !self.engine.check_health() {
            kw_warn!("Health check not sent: {}", ENGINE_GONE);
        }
    }

    /// Runs the effects; returns messages that must be dispatched right away
    /// because no engine event will ever answer them.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut immediate = Vec::new();
        for effect in effects {
            match effect {
                Effect::Generate { keyword } => {
                    kw_info!("Generate keyword={:?}", keyword);
                    if !self.engine.generate(keyword) {
                        immediate.push(Msg::GenerateFinished(Err(GenerateFailure::Transport {
                            message: ENGINE_GONE.to_string(),
                        })));
                    }
                }
                Effect::Download {
                    kind,
                    keyword,
                    keywords,
                } => {
                    kw_info!(
                        "Download kind={} keyword={:?} count={}",
                        kind,
                        keyword,
                        keywords.len()
                    );
                    if !self.engine.download(map_kind(kind), keyword, keywords) {
                        immediate.push(Msg::DownloadFinished {
                            kind,
                            result: Err(ENGINE_GONE.to_string()),
                        });
                    }
                }
                Effect::CopyToClipboard { text } => {
                    if self.clipboard.copy_text(&text) == CopyOutcome::Failed {
                        kw_warn!("Clipboard copy failed for {} chars", text.len());
                    }
                }
            }
        }
        immediate
    }

    pub fn drain_events(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = event_to_msg(event) {
                inbox.push(msg);
            }
        }
        inbox
    }
}

fn event_to_msg(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::GenerateFinished { keyword, result } => {
            kw_debug!("GenerateFinished keyword={:?} ok={}", keyword, result.is_ok());
            Some(Msg::GenerateFinished(
                result.map_err(|err| generate_failure(&err)),
            ))
        }
        EngineEvent::DownloadFinished { format, result } => Some(Msg::DownloadFinished {
            kind: map_format(format),
            result: result
                .map(|path| path.display().to_string())
                .map_err(|err| err.to_string()),
        }),
        EngineEvent::HealthChecked(result) => {
            match result {
                Ok(health) => kw_info!(
                    "Server health: {} {}",
                    health.status,
                    health.message.unwrap_or_default()
                ),
                Err(err) => kw_warn!("Server health check failed: {}", err),
            }
            None
        }
    }
}

fn generate_failure(err: &ServiceError) -> GenerateFailure {
    if err.is_rejection() {
        GenerateFailure::Service {
            message: err.server_reason().map(str::to_string),
        }
    } else {
        GenerateFailure::Transport {
            message: err.message.clone(),
        }
    }
}

fn map_kind(kind: ExportKind) -> ExportFormat {
    match kind {
        ExportKind::Csv => ExportFormat::Csv,
        ExportKind::Json => ExportFormat::Json,
    }
}

fn map_format(format: ExportFormat) -> ExportKind {
    match format {
        ExportFormat::Csv => ExportKind::Csv,
        ExportFormat::Json => ExportKind::Json,
    }
}
