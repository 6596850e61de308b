use crate::{AppState, Effect, Msg, Phase};

pub(crate) const EMPTY_SEED_ERROR: &str = "Please enter a keyword";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SeedInputChanged(text) => {
            state.set_seed_input(text);
            Vec::new()
        }
        Msg::GenerateSubmitted => {
            // Submission is disabled while a request is in flight.
            if state.phase() == Phase::Loading {
                return (state, Vec::new());
            }
            let keyword = state.seed_input().trim().to_string();
            if keyword.is_empty() {
                state.show_error(EMPTY_SEED_ERROR);
                return (state, Vec::new());
            }
            state.begin_generation(keyword.clone());
            vec![Effect::Generate { keyword }]
        }
        Msg::GenerateFinished(result) => {
            let Some(seed) = state.take_pending_seed() else {
                return (state, Vec::new());
            };
            match result {
                Ok(keywords) => state.accept_results(seed, keywords),
                Err(failure) => state.reject_results(failure.display_message()),
            }
            Vec::new()
        }
        Msg::FilterChanged(query) => {
            state.apply_filter(query);
            Vec::new()
        }
        Msg::DownloadClicked(kind) => {
            if !state.download_enabled(kind) {
                return (state, Vec::new());
            }
            let Some((keyword, keywords)) = state
                .session()
                .exportable()
                .map(|(seed, results)| (seed.to_string(), results.to_vec()))
            else {
                return (state, Vec::new());
            };
            state.mark_download_busy(kind);
            vec![Effect::Download {
                kind,
                keyword,
                keywords,
            }]
        }
        Msg::DownloadFinished { kind, result } => {
            state.restore_download(kind);
            match result {
                Ok(location) => state.push_toast(format!("Saved {location}")),
                Err(message) => state.show_error(format!(
                    "Error downloading {}: {}",
                    kind.as_str().to_uppercase(),
                    message
                )),
            }
            Vec::new()
        }
        Msg::CopyAllClicked => {
            let results = state.session().results();
            if results.is_empty() {
                return (state, Vec::new());
            }
            let text = results.join("\n");
            let count = results.len();
            state.push_toast(format!("Copied {count} keywords!"));
            vec![Effect::CopyToClipboard { text }]
        }
        Msg::ItemClicked(index) => {
            let Some((text, toast)) = state
                .displayed_item(index)
                .map(|item| (item.text.clone(), item.copy_toast()))
            else {
                return (state, Vec::new());
            };
            state.push_toast(toast);
            vec![Effect::CopyToClipboard { text }]
        }
        Msg::Tick(elapsed) => {
            state.advance_toasts(elapsed);
            Vec::new()
        }
    };

    (state, effects)
}
