use std::sync::Once;

use keyword_core::{
    update, AppState, Effect, GenerateFailure, KeywordItem, Msg, Phase, ResultList,
    NO_RESULTS_TEXT,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(keyword_logging::initialize_for_tests);
}

fn submit_seed(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::SeedInputChanged(input.to_string()));
    update(state, Msg::GenerateSubmitted)
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn whitespace_seed_is_rejected_without_request() {
    init_logging();
    let (mut state, effects) = submit_seed(AppState::new(), "   \t ");
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.error.as_deref(), Some("Please enter a keyword"));
    assert_eq!(view.phase, Phase::Idle);
    assert!(view.submit_enabled);
    assert!(state.consume_dirty());
}

#[test]
fn submission_trims_and_enters_loading() {
    init_logging();
    let (state, effects) = submit_seed(AppState::new(), "  coffee  ");
    let view = state.view();

    assert_eq!(
        effects,
        vec![Effect::Generate {
            keyword: "coffee".to_string()
        }]
    );
    assert_eq!(view.phase, Phase::Loading);
    assert!(!view.submit_enabled);
    assert_eq!(view.generate_label, "Generating...");
    assert!(!view.results_visible);
    assert_eq!(view.error, None);
    // Seed becomes current only after a successful response.
    assert_eq!(view.current_seed, None);
}

#[test]
fn successful_generation_renders_results() {
    init_logging();
    let (state, _) = submit_seed(AppState::new(), "coffee");
    let (state, effects) = update(
        state,
        Msg::GenerateFinished(Ok(owned(&["coffee shop", "coffee beans"]))),
    );
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.phase, Phase::Results);
    assert!(view.results_visible);
    assert!(view.submit_enabled);
    assert_eq!(view.generate_label, "Generate");
    assert_eq!(view.count, 2);
    assert_eq!(
        view.list,
        ResultList::Items(vec![
            KeywordItem {
                index: 0,
                text: "coffee shop".to_string()
            },
            KeywordItem {
                index: 1,
                text: "coffee beans".to_string()
            },
        ])
    );
    assert_eq!(view.current_seed.as_deref(), Some("coffee"));
    assert_eq!(state.session().results(), owned(&["coffee shop", "coffee beans"]));
}

#[test]
fn empty_result_set_shows_placeholder() {
    init_logging();
    let (state, _) = submit_seed(AppState::new(), "zzz");
    let (state, _) = update(state, Msg::GenerateFinished(Ok(Vec::new())));
    let view = state.view();

    assert_eq!(view.phase, Phase::Results);
    assert_eq!(view.count, 0);
    assert_eq!(view.list, ResultList::Placeholder(NO_RESULTS_TEXT));
}

#[test]
fn service_failure_shows_server_message_and_clears_results() {
    init_logging();
    let (state, _) = submit_seed(AppState::new(), "coffee");
    let (state, _) = update(state, Msg::GenerateFinished(Ok(owned(&["coffee shop"]))));

    let (state, _) = submit_seed(state, "tea");
    let (state, _) = update(
        state,
        Msg::GenerateFinished(Err(GenerateFailure::Service {
            message: Some("rate limited".to_string()),
        })),
    );
    let view = state.view();

    assert_eq!(view.error.as_deref(), Some("rate limited"));
    assert_eq!(view.phase, Phase::Error);
    assert!(!view.results_visible);
    assert!(view.submit_enabled);
    assert!(state.session().results().is_empty());
    assert_eq!(state.session().seed(), None);
}

#[test]
fn service_failure_without_message_uses_generic_text() {
    init_logging();
    let (state, _) = submit_seed(AppState::new(), "coffee");
    let (state, _) = update(
        state,
        Msg::GenerateFinished(Err(GenerateFailure::Service { message: None })),
    );

    assert_eq!(
        state.view().error.as_deref(),
        Some("An error occurred while generating keywords")
    );
}

#[test]
fn transport_failure_is_prefixed() {
    init_logging();
    let (state, _) = submit_seed(AppState::new(), "coffee");
    let (state, _) = update(
        state,
        Msg::GenerateFinished(Err(GenerateFailure::Transport {
            message: "connection refused".to_string(),
        })),
    );

    assert_eq!(
        state.view().error.as_deref(),
        Some("Network error: connection refused")
    );
    assert_eq!(state.phase(), Phase::Error);
}

#[test]
fn resubmission_is_blocked_while_loading() {
    init_logging();
    let (state, _) = submit_seed(AppState::new(), "coffee");
    let (state, effects) = submit_seed(state, "tea");

    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Loading);
}

#[test]
fn submission_clears_filter_and_previous_error() {
    init_logging();
    let (state, _) = submit_seed(AppState::new(), "");
    assert!(state.view().error.is_some());

    let (state, _) = submit_seed(state, "coffee");
    let (state, _) = update(state, Msg::GenerateFinished(Ok(owned(&["coffee shop", "tea"]))));
    let (state, _) = update(state, Msg::FilterChanged("tea".to_string()));
    assert_eq!(state.view().filter_query, "tea");

    let (state, _) = submit_seed(state, "coffee");
    let view = state.view();
    assert_eq!(view.filter_query, "");
    assert_eq!(view.error, None);
}

#[test]
fn completion_without_pending_request_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::GenerateFinished(Ok(owned(&["stray"]))),
    );

    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn new_result_set_replaces_previous() {
    init_logging();
    let (state, _) = submit_seed(AppState::new(), "coffee");
    let (state, _) = update(state, Msg::GenerateFinished(Ok(owned(&["coffee shop"]))));
    let (state, _) = submit_seed(state, "tea");
    let (state, _) = update(state, Msg::GenerateFinished(Ok(owned(&["green tea", "tea pot"]))));

    assert_eq!(state.session().seed(), Some("tea"));
    assert_eq!(state.session().results(), owned(&["green tea", "tea pot"]));
    assert_eq!(state.view().count, 2);
}
