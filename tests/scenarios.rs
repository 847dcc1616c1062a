//! End-to-end controller scenarios driven through `handle_event`.
//!
//! Responses are fed back by hand, so every test controls exactly which
//! request is answered and when.

use notehub::app::notification::{CREATED_MESSAGE, NO_RESULTS_MESSAGE};
use notehub::{
    handle_event, initialize, Action, ApiRequest, ApiResponse, AppState, Config, Event, InputMode,
    Notification,
};
use serde_json::json;

fn note_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "content": format!("{title} body"),
        "tag": "Work",
        "createdAt": "2024-05-01T10:00:00.000Z",
        "updatedAt": "2024-05-01T10:00:00.000Z"
    })
}

fn page_body(notes: &[(&str, &str)], total_pages: u32) -> serde_json::Value {
    json!({
        "notes": notes.iter().map(|(id, title)| note_json(id, title)).collect::<Vec<_>>(),
        "totalPages": total_pages
    })
}

fn send(state: &mut AppState, event: Event) -> Vec<Action> {
    handle_event(state, event).unwrap().1
}

fn respond(state: &mut AppState, request: &ApiRequest, status: u16, body: serde_json::Value) -> Vec<Action> {
    send(
        state,
        Event::ResponseReceived {
            context: request.context.clone(),
            outcome: Ok(ApiResponse {
                status,
                body: body.to_string().into_bytes(),
            }),
        },
    )
}

fn requests(actions: &[Action]) -> Vec<&ApiRequest> {
    actions
        .iter()
        .filter_map(|action| match action {
            Action::SendRequest(request) => Some(request),
            _ => None,
        })
        .collect()
}

fn notifications(actions: &[Action]) -> Vec<&Notification> {
    actions
        .iter()
        .filter_map(|action| match action {
            Action::Notify(notification) => Some(notification),
            _ => None,
        })
        .collect()
}

fn only_request(actions: &[Action]) -> ApiRequest {
    let sent = requests(actions);
    assert_eq!(sent.len(), 1, "expected exactly one request in {actions:?}");
    sent[0].clone()
}

/// Plugin with web access granted and the first page request in flight.
fn started() -> (AppState, ApiRequest) {
    let mut state = initialize(&Config::default());
    let actions = send(&mut state, Event::PermissionsResult { granted: true });
    let request = only_request(&actions);
    (state, request)
}

/// Plugin showing a settled first page.
fn loaded(notes: &[(&str, &str)], total_pages: u32) -> AppState {
    let (mut state, request) = started();
    respond(&mut state, &request, 200, page_body(notes, total_pages));
    state
}

fn type_search(state: &mut AppState, text: &str) -> Vec<Action> {
    let mut actions = send(state, Event::SearchInput(text.to_string()));
    actions.extend(send(state, Event::DebounceElapsed));
    actions
}

fn titles(state: &AppState) -> Vec<String> {
    state.visible_notes().iter().map(|n| n.title.clone()).collect()
}

#[test]
fn first_request_lists_page_one_newest_first() {
    let (_, request) = started();
    assert!(request.url.ends_with("/notes?page=1&perPage=15&sortBy=created"));
}

#[test]
fn rapid_inputs_fetch_only_the_last_text() {
    let (mut state, _) = started();

    let mut timers = 0;
    for text in ["g", "gr", "gro"] {
        let actions = send(&mut state, Event::SearchInput(text.to_string()));
        assert!(matches!(actions.as_slice(), [Action::ScheduleTimer { .. }]));
        timers += 1;
    }

    let mut sent = Vec::new();
    for _ in 0..timers {
        sent.extend(send(&mut state, Event::DebounceElapsed));
    }

    let request = only_request(&sent);
    assert!(request.url.contains("search=gro"));
    assert_eq!(state.search.debounced_term(), "gro");
}

#[test]
fn term_change_resets_the_page() {
    let mut state = loaded(&[("a", "Alpha")], 3);

    let request = only_request(&send(&mut state, Event::NextPage));
    assert!(request.url.contains("page=2"));
    respond(&mut state, &request, 200, page_body(&[("b", "Beta")], 3));
    assert_eq!(state.search.page(), 2);

    let request = only_request(&type_search(&mut state, "beta"));
    assert!(request.url.contains("page=1&perPage=15&search=beta"));
    assert_eq!(state.search.page(), 1);
}

#[test]
fn no_duplicate_fetch_while_pending() {
    let (mut state, request) = started();

    assert!(requests(&send(&mut state, Event::Refresh)).is_empty());
    assert!(requests(&send(&mut state, Event::Refresh)).is_empty());
    assert_eq!(state.cache.pending_count(), 1);

    respond(&mut state, &request, 200, page_body(&[("a", "Alpha")], 1));
    assert_eq!(requests(&send(&mut state, Event::Refresh)).len(), 1);
}

#[test]
fn invalidation_refetches_and_keeps_showing_stale_data() {
    let mut state = loaded(&[("a", "Alpha")], 1);

    let request = only_request(&state.invalidate_notes());
    assert!(request.url.contains("page=1"));

    let view = state.active_view();
    assert!(view.is_stale);
    assert!(view.is_loading);
    assert_eq!(titles(&state), ["Alpha"]);

    respond(&mut state, &request, 200, page_body(&[("a", "Alpha"), ("b", "Beta")], 1));
    assert!(!state.active_view().is_stale);
    assert_eq!(titles(&state), ["Alpha", "Beta"]);
}

#[test]
fn superseded_response_is_discarded() {
    let (mut state, first) = started();

    let second = only_request(&state.invalidate_notes());
    let (render, actions) = handle_event(
        &mut state,
        Event::ResponseReceived {
            context: first.context.clone(),
            outcome: Ok(ApiResponse {
                status: 200,
                body: page_body(&[("old", "Old")], 1).to_string().into_bytes(),
            }),
        },
    )
    .unwrap();

    assert!(!render);
    assert!(actions.is_empty());
    assert!(state.visible_notes().is_empty());

    respond(&mut state, &second, 200, page_body(&[("new", "New")], 1));
    assert_eq!(titles(&state), ["New"]);
}

#[test]
fn paging_keeps_previous_notes_until_the_next_page_arrives() {
    let first_page: Vec<(String, String)> =
        (1..=15).map(|i| (format!("n{i}"), format!("Note {i}"))).collect();
    let first_page: Vec<(&str, &str)> =
        first_page.iter().map(|(id, t)| (id.as_str(), t.as_str())).collect();

    let (mut state, request) = started();
    assert!(request.url.contains("page=1&perPage=15"));
    assert!(!request.url.contains("search="));
    respond(&mut state, &request, 200, page_body(&first_page, 2));

    let request = only_request(&send(&mut state, Event::GoToPage(2)));
    assert!(request.url.contains("page=2&perPage=15"));
    assert!(!request.url.contains("search="));

    let view = state.active_view();
    assert!(view.is_placeholder);
    assert!(view.is_loading);
    assert_eq!(state.visible_notes().len(), 15);

    respond(&mut state, &request, 200, page_body(&[("n16", "Note 16")], 2));
    let view = state.active_view();
    assert!(!view.is_placeholder);
    assert_eq!(titles(&state), ["Note 16"]);
}

#[test]
fn page_outside_the_result_is_ignored() {
    let mut state = loaded(&[("a", "Alpha")], 2);

    assert!(send(&mut state, Event::PreviousPage).is_empty());
    assert!(send(&mut state, Event::GoToPage(3)).is_empty());
    assert_eq!(state.search.page(), 1);
}

#[test]
fn create_invalidates_closes_the_modal_and_refetches() {
    let mut state = loaded(&[("a", "Alpha")], 1);

    send(&mut state, Event::OpenModal);
    assert_eq!(state.input_mode, InputMode::Form);
    for c in "Groceries".chars() {
        send(&mut state, Event::Char(c));
    }

    let create = only_request(&send(&mut state, Event::Submit));
    assert_eq!(create.method, notehub::api::HttpMethod::Post);
    let body: serde_json::Value = serde_json::from_slice(&create.body).unwrap();
    assert_eq!(body, json!({"title": "Groceries", "content": "", "tag": "Todo"}));

    assert!(send(&mut state, Event::Submit).is_empty());

    let actions = respond(&mut state, &create, 201, note_json("g", "Groceries"));
    assert!(state.modal.is_none());
    assert_eq!(state.input_mode, InputMode::Normal);
    assert_eq!(
        notifications(&actions),
        [&Notification::success(CREATED_MESSAGE)]
    );

    let refetch = only_request(&actions);
    respond(&mut state, &refetch, 200, page_body(&[("g", "Groceries"), ("a", "Alpha")], 1));
    assert_eq!(titles(&state), ["Groceries", "Alpha"]);
}

#[test]
fn failed_create_keeps_the_modal_open() {
    let mut state = loaded(&[("a", "Alpha")], 1);

    send(&mut state, Event::OpenModal);
    for c in "Plans".chars() {
        send(&mut state, Event::Char(c));
    }
    let create = only_request(&send(&mut state, Event::Submit));

    let actions = respond(&mut state, &create, 400, json!({"message": "Bad request"}));
    assert!(requests(&actions).is_empty());
    assert_eq!(notifications(&actions), [&Notification::error("Bad request")]);

    let form = state.modal.as_ref().unwrap();
    assert!(!form.submitting);
    assert_eq!(form.server_error.as_deref(), Some("Bad request"));
    assert_eq!(form.draft.title, "Plans");
}

#[test]
fn network_failure_on_create_keeps_the_modal_open() {
    let mut state = loaded(&[("a", "Alpha")], 1);

    send(&mut state, Event::OpenModal);
    for c in "Plans".chars() {
        send(&mut state, Event::Char(c));
    }
    let create = only_request(&send(&mut state, Event::Submit));

    let actions = send(
        &mut state,
        Event::ResponseReceived {
            context: create.context.clone(),
            outcome: notehub::api::classify_host_result(
                400,
                &std::collections::BTreeMap::new(),
                b"connection refused".to_vec(),
            ),
        },
    );
    assert!(requests(&actions).is_empty());
    assert_eq!(
        notifications(&actions),
        [&Notification::error("Network error, check your connection")]
    );

    assert_eq!(state.input_mode, InputMode::Form);
    let form = state.modal.as_ref().unwrap();
    assert!(!form.submitting);
    assert_eq!(form.server_error.as_deref(), Some("Network error, check your connection"));
    assert_eq!(form.draft.title, "Plans");
    assert_eq!(state.mutations.in_flight(), 0);
}

#[test]
fn reopened_modal_cannot_submit_during_a_create() {
    let mut state = loaded(&[("a", "Alpha")], 1);

    send(&mut state, Event::OpenModal);
    for c in "Plans".chars() {
        send(&mut state, Event::Char(c));
    }
    only_request(&send(&mut state, Event::Submit));

    send(&mut state, Event::CloseModal);
    send(&mut state, Event::OpenModal);
    for c in "Other".chars() {
        send(&mut state, Event::Char(c));
    }
    assert!(requests(&send(&mut state, Event::Submit)).is_empty());
    assert_eq!(state.mutations.in_flight(), 1);
}

#[test]
fn invalid_draft_sends_nothing() {
    let mut state = loaded(&[("a", "Alpha")], 1);

    send(&mut state, Event::OpenModal);
    send(&mut state, Event::Char('x'));

    assert!(send(&mut state, Event::Submit).is_empty());
    assert_eq!(state.mutations.in_flight(), 0);
    assert!(!state.modal.as_ref().unwrap().errors.is_empty());
}

#[test]
fn delete_not_found_leaves_the_list_alone() {
    let mut state = loaded(&[("n1", "Alpha"), ("n2", "Beta")], 1);

    let delete = only_request(&send(&mut state, Event::DeleteSelected));
    assert!(delete.url.ends_with("/notes/n1"));
    assert!(send(&mut state, Event::DeleteSelected).is_empty());

    let actions = respond(&mut state, &delete, 404, json!({"message": "Note not found"}));
    assert!(requests(&actions).is_empty());
    assert_eq!(notifications(&actions), [&Notification::error("Note not found")]);

    assert_eq!(titles(&state), ["Alpha", "Beta"]);
    assert!(!state.active_view().is_stale);
}

#[test]
fn delete_success_invalidates() {
    let mut state = loaded(&[("n1", "Alpha"), ("n2", "Beta")], 1);

    let delete = only_request(&send(&mut state, Event::DeleteSelected));
    let actions = respond(&mut state, &delete, 200, note_json("n1", "Alpha"));

    let refetch = only_request(&actions);
    assert!(refetch.url.contains("page=1"));
    assert!(notifications(&actions).iter().all(|n| !n.is_error()));
}

#[test]
fn empty_result_notifies_once() {
    let (mut state, _) = started();

    let request = only_request(&type_search(&mut state, "zzz"));
    let actions = respond(&mut state, &request, 200, page_body(&[], 0));
    assert_eq!(notifications(&actions), [&Notification::error(NO_RESULTS_MESSAGE)]);

    let refetch = only_request(&send(&mut state, Event::Refresh));
    let actions = respond(&mut state, &refetch, 200, page_body(&[], 0));
    assert!(notifications(&actions).is_empty());
    assert!(send(&mut state, Event::SelectNext).is_empty());
}

#[test]
fn list_failure_flags_the_error_without_a_toast() {
    let (mut state, request) = started();

    let actions = send(
        &mut state,
        Event::ResponseReceived {
            context: request.context.clone(),
            outcome: notehub::api::classify_host_result(
                400,
                &std::collections::BTreeMap::new(),
                b"connection refused".to_vec(),
            ),
        },
    );

    assert!(notifications(&actions).is_empty());
    let view = state.active_view();
    assert!(view.is_error);
    assert!(!view.is_loading);
}

#[test]
fn nothing_is_requested_without_web_access() {
    let mut state = initialize(&Config::default());

    let actions = send(&mut state, Event::PermissionsResult { granted: false });
    assert!(requests(&actions).is_empty());
    assert!(requests(&type_search(&mut state, "anything")).is_empty());
}

#[test]
fn blank_input_keeps_the_active_filter() {
    let mut state = loaded(&[("a", "Alpha")], 1);
    let search = only_request(&type_search(&mut state, "milk"));
    respond(&mut state, &search, 200, page_body(&[("m", "Milk")], 1));

    assert!(send(&mut state, Event::SearchInput("   ".to_string())).is_empty());
    assert!(requests(&send(&mut state, Event::DebounceElapsed)).is_empty());

    assert_eq!(state.search.debounced_term(), "milk");
    assert_eq!(titles(&state), ["Milk"]);
    assert_eq!(state.cache.pending_count(), 0);
}

#[test]
fn clearing_the_box_before_the_timer_keeps_the_old_filter() {
    let (mut state, _) = started();
    let search = only_request(&type_search(&mut state, "milk"));
    respond(&mut state, &search, 200, page_body(&[("m", "Milk")], 1));

    send(&mut state, Event::SearchInput("mi".to_string()));
    send(&mut state, Event::SearchInput(String::new()));

    let mut sent = send(&mut state, Event::DebounceElapsed);
    sent.extend(send(&mut state, Event::DebounceElapsed));
    assert!(requests(&sent).is_empty());
    assert_eq!(state.search.debounced_term(), "milk");
}
