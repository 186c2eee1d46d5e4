mod common;

use common::{id, page_body, page_url, user_body, user_url, Harness};
use std::collections::BTreeMap;
use userdeck::app::header::DEBOUNCE_MS;
use userdeck::app::{Event, Route};
use userdeck::gateway::HttpResponse;
use userdeck::search::SearchModeState;
use userdeck::ui::render_to_string;

#[test]
fn next_page_fetches_and_updates_paging() {
    let mut harness = Harness::on_list();
    assert_eq!(harness.list().current_page(), 1);
    assert_eq!(harness.list().per_page(), 6);
    assert_eq!(harness.list().total_pages(), 2);

    assert!(harness.send(Event::NextPage));
    assert_eq!(harness.pending_urls(), vec![page_url(2).as_str()]);
    harness.answer(&page_url(2), 200, &page_body(2, 2, &[7, 8, 9, 10, 11, 12]));

    let list = harness.list();
    assert_eq!(list.current_page(), 2);
    assert_eq!(list.visible_users().first().map(|user| user.id), Some(id(7)));
}

#[test]
fn paging_stops_at_the_last_page() {
    let mut harness = Harness::on_list();
    harness.send(Event::NextPage);
    harness.answer(&page_url(2), 200, &page_body(2, 2, &[7, 8, 9, 10, 11, 12]));

    assert!(!harness.send(Event::NextPage));
    assert!(harness.pending.is_empty());

    assert!(harness.send(Event::PrevPage));
    assert_eq!(harness.list().current_page(), 1, "page 1 is cached");
}

#[test]
fn failed_page_load_notifies_and_keeps_the_current_page() {
    let mut harness = Harness::on_list();
    harness.send(Event::NextPage);
    harness.answer(&page_url(2), 500, "");

    assert_eq!(harness.notification(), Some("Failed to load users: Server error: 500"));
    assert_eq!(harness.list().current_page(), 1);

    harness.send(Event::DismissNotification);
    assert_eq!(harness.notification(), None);
}

#[test]
fn list_notification_lasts_five_seconds() {
    let mut harness = Harness::on_list();
    harness.send(Event::NextPage);
    harness.fail_transport(&page_url(2), "connection reset");
    assert_eq!(harness.notification(), Some("Failed to load users: connection reset"));

    harness.advance(4900);
    assert!(harness.notification().is_some());
    harness.advance(100);
    assert_eq!(harness.notification(), None);
}

#[test]
fn search_shows_one_record_then_restores_the_page() {
    let mut harness = Harness::on_list();
    harness.send(Event::NextPage);
    harness.answer(&page_url(2), 200, &page_body(2, 2, &[7, 8, 9, 10, 11, 12]));

    harness.type_text("3");
    harness.advance(DEBOUNCE_MS);
    harness.answer(&user_url(3), 200, &user_body(3));

    let list = harness.list();
    assert!(list.is_searching());
    assert_eq!(list.visible_users().len(), 1);
    assert_eq!(list.selected_user().map(|user| user.id), Some(id(3)));

    harness.send(Event::LeaveSearch);
    assert!(!harness.send(Event::NextPage));
    assert!(harness.pending.is_empty(), "no paging while searching");

    harness.send(Event::ClearSearch);

    let list = harness.list();
    assert_eq!(list.mode(), SearchModeState::Browsing);
    assert_eq!(list.current_page(), 2);
    assert_eq!(harness.times_requested(&page_url(2)), 1);
}

#[test]
fn selection_wraps_and_opens_the_detail_route() {
    let mut harness = Harness::on_list();
    harness.send(Event::KeyUp);
    assert_eq!(harness.list().selected_index(), 5);
    harness.send(Event::KeyDown);
    harness.send(Event::KeyDown);
    assert_eq!(harness.list().selected_index(), 1);

    assert!(harness.send(Event::Open));

    assert_eq!(harness.state.route(), Some(&Route::UserDetail("2".to_string())));
    assert_eq!(harness.pending_urls(), vec![user_url(2).as_str()]);
}

#[test]
fn returning_from_detail_remounts_on_page_one_with_search_replayed() {
    let mut harness = Harness::on_list();
    harness.type_text("4");
    harness.send(Event::SubmitSearch);
    harness.answer(&user_url(4), 200, &user_body(4));
    harness.send(Event::LeaveSearch);

    harness.send(Event::Open);
    assert!(harness.pending.is_empty(), "user 4 is cached");
    harness.send(Event::Back);

    let list = harness.list();
    assert_eq!(list.current_page(), 1);
    assert_eq!(list.mode(), SearchModeState::Searching(id(4)));
    assert_eq!(list.searched_user().map(|user| user.id), Some(id(4)));
}

#[test]
fn frame_lists_users_with_pager() {
    let harness = Harness::on_list();
    let frame = render_to_string(&harness.state, 24, 100);

    assert!(frame.contains("First1 Last1"));
    assert!(frame.contains("user6@reqres.in"));
    assert!(frame.contains("Page 1 of 2"));
}

#[test]
fn control_sequences_from_the_directory_never_reach_the_frame() {
    let mut harness = Harness::started("/");
    let body = serde_json::json!({
        "page": 1, "per_page": 6, "total": 1, "total_pages": 1,
        "data": [{
            "id": 1,
            "email": "eve@reqres.in\r\n",
            "first_name": "\u{1b}[2J\u{1b}]0;pwned\u{7}Eve",
            "last_name": "X\nY",
            "avatar": "",
        }],
    });
    harness.answer(&page_url(1), 200, &body.to_string());

    let frame = render_to_string(&harness.state, 24, 100);

    assert!(!frame.contains("\u{1b}[2J"));
    assert!(!frame.contains("\u{1b}]0;"));
    assert!(!frame.contains('\u{7}'));
    assert!(!frame.contains('\n'));
    assert!(!frame.contains('\r'));
    assert!(frame.contains("[2J]0;pwnedEve X Y"));
}

#[test]
fn host_reported_request_failure_shows_the_underlying_message() {
    let mut harness = Harness::on_list();
    harness.send(Event::NextPage);
    let request = harness.take_request(&page_url(2));

    let response = HttpResponse::from_host(
        400,
        &BTreeMap::new(),
        b"error sending request: connection refused".to_vec(),
        request.context.clone(),
    );
    harness.send(Event::WebResponse(response));

    assert_eq!(
        harness.notification(),
        Some("Failed to load users: error sending request: connection refused")
    );
}
