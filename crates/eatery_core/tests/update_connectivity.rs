use eatery_core::{update, AppState, ListingOrigin, ListingScreen, Msg, Restaurant};

fn loaded_with_search() -> AppState {
    let (state, _) = update(AppState::new(), Msg::ListingRequested);
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            restaurants: vec![
                Restaurant::new("1", "Burger King"),
                Restaurant::new("2", "Pizza Hut"),
                Restaurant::new("3", "Burger Singh"),
            ],
            origin: ListingOrigin::Live,
        },
    );
    let (state, _) = update(state, Msg::SearchTextChanged("burger".to_string()));
    state
}

#[test]
fn offline_masks_listing_and_online_restores_it_without_refetch() {
    engine_logging::initialize_for_tests();
    let state = loaded_with_search();
    let before = state.view().listing;
    assert!(matches!(before, ListingScreen::Ready(ref view) if view.total_matches == 2));

    let (mut state, effects) = update(state, Msg::ConnectivityChanged { online: false });
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    let view = state.view();
    assert!(!view.online);
    assert_eq!(view.listing, ListingScreen::Offline);

    let (state, effects) = update(state, Msg::ConnectivityChanged { online: true });
    assert!(effects.is_empty());
    assert_eq!(state.view().listing, before);
}

#[test]
fn search_changed_while_offline_shows_once_back_online() {
    engine_logging::initialize_for_tests();
    let (state, _) = update(loaded_with_search(), Msg::ConnectivityChanged { online: false });

    let (state, effects) = update(state, Msg::SearchTextChanged("pizza".to_string()));
    assert!(effects.is_empty());
    assert_eq!(state.view().listing, ListingScreen::Offline);

    let (state, effects) = update(state, Msg::ConnectivityChanged { online: true });
    assert!(effects.is_empty());
    match state.view().listing {
        ListingScreen::Ready(view) => {
            assert_eq!(view.search_text, "pizza");
            assert_eq!(view.total_matches, 1);
            assert_eq!(view.restaurants[0].name, "Pizza Hut");
        }
        other => panic!("expected listing, got {other:?}"),
    }
}

#[test]
fn repeated_connectivity_report_is_not_a_change() {
    engine_logging::initialize_for_tests();
    let mut state = loaded_with_search();
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::ConnectivityChanged { online: true });
    assert!(!state.consume_dirty());
}

#[test]
fn offline_before_first_load_shows_notice() {
    engine_logging::initialize_for_tests();
    let (state, _) = update(AppState::new(), Msg::ConnectivityChanged { online: false });
    let (state, effects) = update(state, Msg::ListingRequested);
    // Retrieval is still attempted; the fallback set covers failures.
    assert_eq!(effects.len(), 1);
    assert_eq!(state.view().listing, ListingScreen::Offline);
}
