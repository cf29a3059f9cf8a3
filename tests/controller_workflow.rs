//! End-to-end controller workflows over the in-memory notes service.

use quill::api::{ApiCall, InMemoryNotesApi, NotesClient, Operation};
use quill::controller::{Controller, EmptyState, Intent, NoteListView, UiEvent};
use quill::models::{NoteDraft, ViewMode};
use quill::widgets::{Dismissal, Severity};

fn setup(notes: &[(&str, &str, bool)]) -> (Controller, NotesClient<InMemoryNotesApi>) {
    let api = InMemoryNotesApi::new();
    for (title, body, archived) in notes {
        api.insert(title, body, *archived);
    }
    let client = NotesClient::new(api);
    let mut controller = Controller::new();
    controller.dispatch_blocking(&client, Intent::Init);
    controller.take_events();
    client.api().clear_calls();
    (controller, client)
}

fn visible_titles(controller: &Controller) -> Vec<String> {
    match controller.view() {
        NoteListView::Notes(cards) => cards.into_iter().map(|card| card.title).collect(),
        NoteListView::Empty(_) => Vec::new(),
    }
}

fn error_toasts(events: &[UiEvent]) -> usize {
    events
        .iter()
        .filter(|event| {
            matches!(
                event,
                UiEvent::Notified {
                    severity: Severity::Error,
                    ..
                }
            )
        })
        .count()
}

#[test]
fn created_notes_appear_after_reload() {
    let (mut controller, client) = setup(&[]);

    let cases = [
        ("abc", "12345"),
        ("Shopping list", "Milk, eggs, bread and butter"),
        ("Long body", &"x".repeat(200)),
    ];
    for (title, body) in cases {
        controller.dispatch_blocking(&client, Intent::Create(NoteDraft::new(title, body)));
    }
    controller.dispatch_blocking(&client, Intent::Refresh);

    let notes = controller.state().notes();
    for (title, body) in cases {
        assert!(
            notes.iter().any(|n| n.title == title && n.body == body),
            "missing {title}"
        );
    }
}

#[test]
fn every_note_is_in_exactly_one_partition() {
    let (mut controller, client) = setup(&[
        ("One", "first body", false),
        ("Two", "second body", false),
        ("Three", "third body", true),
    ]);

    let id = controller.state().notes()[0].id.clone();
    controller.dispatch_blocking(&client, Intent::ToggleArchive(id.clone()));
    let active: Vec<_> = controller.state().notes().to_vec();

    controller.dispatch_blocking(&client, Intent::SwitchView(ViewMode::Archived));
    let archived: Vec<_> = controller.state().notes().to_vec();

    assert!(!active.iter().any(|n| n.id == id));
    assert!(archived.iter().any(|n| n.id == id));

    let total = client.api().snapshot().len();
    assert_eq!(active.len() + archived.len(), total);
    for note in &active {
        assert!(!archived.iter().any(|other| other.id == note.id));
    }
}

#[test]
fn deleting_groceries_names_it_in_the_notification() {
    let (mut controller, client) = setup(&[("Groceries", "Milk and eggs", false)]);
    let id = controller.state().notes()[0].id.clone();

    controller.dispatch_blocking(&client, Intent::RequestDelete(id.clone()));
    assert!(controller.modal().is_open());
    assert!(client.api().calls().is_empty());

    controller.dispatch_blocking(&client, Intent::ConfirmDelete);

    assert_eq!(
        client.api().calls(),
        vec![ApiCall::Delete(id), ApiCall::List(ViewMode::Active)]
    );
    let events = controller.take_events();
    assert!(events.iter().any(|event| matches!(
        event,
        UiEvent::Notified { message, .. } if message.contains("Groceries")
    )));
    assert!(!controller.modal().is_open());
}

#[test]
fn cancelled_delete_keeps_note_after_reload() {
    let (mut controller, client) = setup(&[("Groceries", "Milk and eggs", false)]);
    let id = controller.state().notes()[0].id.clone();

    controller.dispatch_blocking(&client, Intent::RequestDelete(id));
    let before = controller.state().notes().to_vec();
    controller.dispatch_blocking(&client, Intent::CancelDelete(Dismissal::OverlayClick));
    assert_eq!(controller.state().notes(), before.as_slice());

    controller.dispatch_blocking(&client, Intent::Refresh);
    assert_eq!(visible_titles(&controller), vec!["Groceries"]);
}

#[test]
fn short_title_is_rejected_without_network_or_error() {
    let (mut controller, client) = setup(&[]);

    controller.dispatch_blocking(&client, Intent::Create(NoteDraft::new("ab", "short")));

    assert!(client.api().calls().is_empty());
    assert_eq!(error_toasts(&controller.take_events()), 0);
}

#[test]
fn create_against_failing_service_notifies_once() {
    let (mut controller, client) = setup(&[("Existing", "already here", false)]);
    let before = controller.state().notes().to_vec();
    client.api().fail_all("Service unavailable");

    controller.dispatch_blocking(
        &client,
        Intent::Create(NoteDraft::new("Valid Title", "This is fine")),
    );

    assert_eq!(controller.state().notes(), before.as_slice());
    assert_eq!(error_toasts(&controller.take_events()), 1);
}

#[test]
fn search_is_idempotent_and_case_insensitive() {
    let (mut controller, client) = setup(&[
        ("Plain", "xabcx", false),
        ("Other", "nothing here", false),
    ]);

    controller.dispatch_blocking(&client, Intent::Search("ABC".to_string()));
    let once = controller.view();
    controller.dispatch_blocking(&client, Intent::Search("ABC".to_string()));

    assert_eq!(controller.view(), once);
    assert_eq!(visible_titles(&controller), vec!["Plain"]);
}

#[test]
fn empty_state_precedence() {
    let (mut controller, client) = setup(&[]);
    controller.dispatch_blocking(&client, Intent::SwitchView(ViewMode::Archived));
    assert_eq!(
        controller.view(),
        NoteListView::Empty(EmptyState::NoArchivedNotes)
    );

    controller.dispatch_blocking(&client, Intent::Search("x".to_string()));
    assert_eq!(
        controller.view(),
        NoteListView::Empty(EmptyState::NoSearchMatch("x".to_string()))
    );
}

#[test]
fn outage_during_browsing_keeps_last_known_notes() {
    let (mut controller, client) = setup(&[("Cached", "still visible", false)]);
    client.api().fail(Operation::List, "offline");

    controller.dispatch_blocking(&client, Intent::Refresh);

    assert_eq!(visible_titles(&controller), vec!["Cached"]);
    assert_eq!(error_toasts(&controller.take_events()), 1);
}
