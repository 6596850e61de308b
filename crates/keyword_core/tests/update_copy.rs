use std::time::Duration;

use keyword_core::{update, AppState, Effect, Msg};
use pretty_assertions::assert_eq;

fn with_results(keywords: &[&str]) -> AppState {
    let (state, _) = update(AppState::new(), Msg::SeedInputChanged("coffee".to_string()));
    let (state, _) = update(state, Msg::GenerateSubmitted);
    let (state, _) = update(
        state,
        Msg::GenerateFinished(Ok(keywords.iter().map(|s| s.to_string()).collect())),
    );
    state
}

#[test]
fn copy_all_joins_result_set_with_newlines() {
    let state = with_results(&["coffee shop", "coffee beans", "tea"]);
    let (state, _) = update(state, Msg::FilterChanged("coffee".to_string()));
    let (state, effects) = update(state, Msg::CopyAllClicked);

    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "coffee shop\ncoffee beans\ntea".to_string()
        }]
    );
    assert_eq!(state.view().toasts[0].message, "Copied 3 keywords!");
}

#[test]
fn copy_all_with_empty_set_does_nothing() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::CopyAllClicked);

    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn item_click_copies_single_keyword() {
    let state = with_results(&["coffee shop", "coffee beans"]);
    let (state, effects) = update(state, Msg::ItemClicked(1));

    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "coffee beans".to_string()
        }]
    );
    assert_eq!(state.view().toasts[0].message, "Copied: coffee beans");
}

#[test]
fn item_click_out_of_range_is_ignored() {
    let state = with_results(&["coffee shop"]);
    let (state, effects) = update(state, Msg::ItemClicked(5));

    assert!(effects.is_empty());
    assert!(state.view().toasts.is_empty());
}

#[test]
fn toasts_stack_fade_and_expire_on_ticks() {
    let state = with_results(&["coffee shop"]);
    let (state, _) = update(state, Msg::ItemClicked(0));
    let (state, _) = update(state, Msg::ItemClicked(0));
    assert_eq!(state.view().toasts.len(), 2);

    let (mut state, _) = update(state, Msg::Tick(Duration::from_millis(2000)));
    assert!(state.view().toasts.iter().all(|toast| toast.fading));
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::Tick(Duration::from_millis(100)));
    assert!(!state.consume_dirty());

    let (state, _) = update(state, Msg::Tick(Duration::from_millis(200)));
    assert!(state.view().toasts.is_empty());
}
