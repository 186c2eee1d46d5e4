mod common;

use common::{id, page_url, user_body, user_url, Harness};
use userdeck::app::header::DEBOUNCE_MS;
use userdeck::app::Event;
use userdeck::search::SearchModeState;

#[test]
fn burst_of_keystrokes_verifies_only_the_final_value() {
    let mut harness = Harness::on_list();

    harness.type_text("1");
    harness.advance(100);
    harness.type_text("2");
    harness.advance(100);
    harness.type_text("3");
    assert!(harness.pending.is_empty());

    harness.advance(DEBOUNCE_MS);

    assert_eq!(harness.pending_urls(), vec![user_url(123).as_str()]);
    assert_eq!(harness.times_requested(&user_url(1)), 0);
    assert_eq!(harness.times_requested(&user_url(12)), 0);
}

#[test]
fn early_timer_callback_rearms_instead_of_firing() {
    let mut harness = Harness::on_list();
    harness.type_text("8");
    harness.timeouts.clear();

    harness.advance(200);

    assert!(harness.pending.is_empty());
    assert_eq!(harness.timeouts, vec![0.2]);
}

#[test]
fn emptied_input_returns_to_browsing_without_lookup() {
    let mut harness = Harness::on_list();
    harness.type_text("5");
    harness.advance(DEBOUNCE_MS);
    harness.answer(&user_url(5), 200, &user_body(5));
    assert_eq!(harness.mode(), SearchModeState::Searching(id(5)));

    harness.send(Event::Backspace);
    harness.advance(DEBOUNCE_MS);

    assert_eq!(harness.mode(), SearchModeState::Browsing);
    assert_eq!(harness.times_requested(&user_url(5)), 1);
    assert!(harness.pending.is_empty(), "page 1 comes from the cache");
    assert!(!harness.list().is_searching());
}

#[test]
fn unknown_id_notifies_and_keeps_browsing() {
    let mut harness = Harness::on_list();
    harness.type_text("999999");
    harness.advance(DEBOUNCE_MS);

    harness.answer(&user_url(999_999), 404, "{}");

    assert_eq!(harness.notification(), Some("User not found"));
    assert_eq!(harness.mode(), SearchModeState::Browsing);
    assert_eq!(harness.state.search_input().raw(), "999999");
}

#[test]
fn search_notification_expires() {
    let mut harness = Harness::on_list();
    harness.type_text("42");
    harness.advance(DEBOUNCE_MS);
    harness.answer(&user_url(42), 500, "");
    assert_eq!(harness.notification(), Some("Server error: 500"));

    harness.advance(3000);

    assert_eq!(harness.notification(), None);
}

#[test]
fn non_numeric_input_is_ignored() {
    let mut harness = Harness::on_list();
    harness.type_text("abc");
    harness.advance(DEBOUNCE_MS);

    assert!(harness.pending.is_empty());
    assert_eq!(harness.mode(), SearchModeState::Browsing);
    assert_eq!(harness.notification(), None);
}

#[test]
fn stale_verification_neither_switches_nor_notifies() {
    let mut harness = Harness::on_list();
    harness.type_text("4");
    harness.advance(DEBOUNCE_MS);
    harness.type_text("5");
    harness.advance(DEBOUNCE_MS);
    assert_eq!(harness.pending.len(), 2);

    harness.answer(&user_url(4), 500, "");
    assert_eq!(harness.notification(), None);
    assert_eq!(harness.mode(), SearchModeState::Browsing);

    harness.answer(&user_url(45), 200, &user_body(45));
    assert_eq!(harness.mode(), SearchModeState::Searching(id(45)));

    // a late success for an older value does not switch back either
    harness.type_text("6");
    harness.advance(DEBOUNCE_MS);
    harness.type_text("7");
    harness.advance(DEBOUNCE_MS);
    harness.answer(&user_url(456), 200, &user_body(456));
    assert_eq!(harness.mode(), SearchModeState::Searching(id(45)));
}

#[test]
fn submit_skips_the_debounce_and_clears_the_box() {
    let mut harness = Harness::on_list();
    harness.type_text("7");
    harness.send(Event::SubmitSearch);
    assert_eq!(harness.pending_urls(), vec![user_url(7).as_str()]);

    harness.answer(&user_url(7), 200, &user_body(7));

    assert_eq!(harness.mode(), SearchModeState::Searching(id(7)));
    assert_eq!(harness.state.search_input().raw(), "");
    let searched = harness.list().searched_user().map(|user| user.id);
    assert_eq!(searched, Some(id(7)));

    // the cancelled debounce never runs
    harness.advance(DEBOUNCE_MS);
    assert_eq!(harness.times_requested(&user_url(7)), 1);
    assert_eq!(harness.mode(), SearchModeState::Searching(id(7)));
}

#[test]
fn submit_of_invalid_text_does_nothing() {
    let mut harness = Harness::on_list();
    harness.type_text("x");

    assert!(!harness.send(Event::SubmitSearch));
    assert!(harness.pending.is_empty());
    assert_eq!(harness.state.search_input().raw(), "x");
}

#[test]
fn submit_joins_a_verification_already_in_flight() {
    let mut harness = Harness::on_list();
    harness.type_text("3");
    harness.advance(DEBOUNCE_MS);
    harness.send(Event::SubmitSearch);

    assert_eq!(harness.pending.len(), 1);
    harness.answer(&user_url(3), 200, &user_body(3));

    assert_eq!(harness.times_requested(&user_url(3)), 1);
    assert_eq!(harness.mode(), SearchModeState::Searching(id(3)));
    assert_eq!(harness.state.search_input().raw(), "");
}

#[test]
fn clear_abandons_pending_work() {
    let mut harness = Harness::on_list();
    harness.type_text("9");
    harness.advance(DEBOUNCE_MS);
    harness.send(Event::ClearSearch);

    harness.answer(&user_url(9), 200, &user_body(9));

    assert_eq!(harness.mode(), SearchModeState::Browsing);
    assert_eq!(harness.state.search_input().raw(), "");
    assert_eq!(harness.times_requested(&page_url(1)), 1);
}
