use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use super::*;
use crate::api::{ApiCall, InMemoryNotesApi, Operation};
use crate::models::NoteBuilder;

fn client_with(notes: &[(&str, &str, bool)]) -> NotesClient<InMemoryNotesApi> {
    let api = InMemoryNotesApi::new();
    for (title, body, archived) in notes {
        api.insert(title, body, *archived);
    }
    NotesClient::new(api)
}

fn started(client: &NotesClient<InMemoryNotesApi>) -> Controller {
    let mut controller = Controller::new();
    controller.dispatch_blocking(client, Intent::Init);
    controller.take_events();
    client.api().clear_calls();
    controller
}

fn titles(controller: &Controller) -> Vec<String> {
    match controller.view() {
        NoteListView::Notes(cards) => cards.into_iter().map(|card| card.title).collect(),
        NoteListView::Empty(_) => Vec::new(),
    }
}

fn notifications(events: &[UiEvent]) -> Vec<(String, Severity)> {
    events
        .iter()
        .filter_map(|event| match event {
            UiEvent::Notified { message, severity } => Some((message.clone(), *severity)),
            _ => None,
        })
        .collect()
}

fn listed(seq: u64, mode: ViewMode, titles: &[&str]) -> Response {
    let notes = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            NoteBuilder::new()
                .id(format!("n{i}"))
                .title(*title)
                .body("body text")
                .archived(mode == ViewMode::Archived)
                .build()
        })
        .collect();
    Response::Listed {
        seq,
        mode,
        result: Ok(notes),
    }
}

#[test]
fn init_loads_active_notes() {
    let client = client_with(&[("Active", "aaaaa", false), ("Old", "bbbbb", true)]);
    let controller = started(&client);

    assert_eq!(controller.state().mode(), ViewMode::Active);
    assert_eq!(titles(&controller), vec!["Active"]);
    assert_eq!(controller.in_flight(), 0);
    assert!(!controller.loading().is_visible());
}

#[test]
fn load_failure_keeps_cache_and_mode() {
    let client = client_with(&[("Keep me", "still here", false)]);
    let mut controller = started(&client);

    client.api().fail(Operation::List, "Service unavailable");
    controller.dispatch_blocking(&client, Intent::SwitchView(ViewMode::Archived));

    assert_eq!(controller.state().mode(), ViewMode::Active);
    assert_eq!(titles(&controller), vec!["Keep me"]);
    let events = controller.take_events();
    assert_eq!(
        notifications(&events),
        vec![(
            "Failed to load notes: Service unavailable".to_string(),
            Severity::Error
        )]
    );

    // the failed switch can be retried
    controller.dispatch_blocking(&client, Intent::SwitchView(ViewMode::Archived));
    assert_eq!(controller.state().mode(), ViewMode::Archived);
}

#[test]
fn switch_view_to_current_mode_is_a_no_op() {
    let client = client_with(&[]);
    let mut controller = started(&client);

    let requests = controller.handle(Intent::SwitchView(ViewMode::Active));
    assert!(requests.is_empty());
    assert!(client.api().calls().is_empty());
}

#[test]
fn switch_view_emits_view_changed() {
    let client = client_with(&[("Old", "bbbbb", true)]);
    let mut controller = started(&client);

    controller.dispatch_blocking(&client, Intent::SwitchView(ViewMode::Archived));

    assert_eq!(controller.state().mode(), ViewMode::Archived);
    assert_eq!(titles(&controller), vec!["Old"]);
    assert!(
        controller
            .take_events()
            .contains(&UiEvent::ViewChanged(ViewMode::Archived))
    );
    assert_eq!(client.api().calls(), vec![ApiCall::List(ViewMode::Archived)]);
}

#[test]
fn superseded_load_is_discarded() {
    let mut controller = Controller::new();

    let first = controller.handle(Intent::SwitchView(ViewMode::Archived));
    let second = controller.handle(Intent::SwitchView(ViewMode::Active));
    assert_eq!(first, vec![Request::List { seq: 1, mode: ViewMode::Archived }]);
    assert_eq!(second, vec![Request::List { seq: 2, mode: ViewMode::Active }]);

    // responses arrive out of order
    controller.apply(listed(2, ViewMode::Active, &["Fresh"]));
    controller.apply(listed(1, ViewMode::Archived, &["Stale"]));

    assert_eq!(controller.state().mode(), ViewMode::Active);
    assert_eq!(titles(&controller), vec!["Fresh"]);
    assert_eq!(controller.in_flight(), 0);
    assert!(!controller.loading().is_visible());
}

/// Log sink for asserting on `tracing` output.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLog {
    type Writer = CapturedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn stale_failure_is_logged_without_toast() {
    let log = CapturedLog::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();

    let mut controller = Controller::new();
    tracing::subscriber::with_default(subscriber, || {
        controller.handle(Intent::Init);
        controller.handle(Intent::Refresh);

        controller.apply(listed(2, ViewMode::Active, &["Fresh"]));
        controller.apply(Response::Listed {
            seq: 1,
            mode: ViewMode::Active,
            result: Err(ServiceError::Api {
                message: "late".to_string(),
            }),
        });
    });

    assert!(notifications(&controller.take_events()).is_empty());
    assert_eq!(titles(&controller), vec!["Fresh"]);

    let logged = log.contents();
    assert!(logged.contains("WARN"), "{logged}");
    assert!(logged.contains("superseded load failed"), "{logged}");
    assert!(logged.contains("late"), "{logged}");
}

#[test]
fn search_filters_case_insensitively_without_network() {
    let client = client_with(&[("Shopping", "xabcx", false), ("Work", "deadline", false)]);
    let mut controller = started(&client);

    controller.dispatch_blocking(&client, Intent::Search("ABC".to_string()));
    assert_eq!(titles(&controller), vec!["Shopping"]);
    assert!(client.api().calls().is_empty());

    let once = controller.view();
    controller.dispatch_blocking(&client, Intent::Search("ABC".to_string()));
    assert_eq!(controller.view(), once);
    assert_eq!(controller.state().notes().len(), 2);
}

#[test]
fn search_miss_shows_no_match_even_in_archived() {
    let client = client_with(&[]);
    let mut controller = started(&client);

    controller.dispatch_blocking(&client, Intent::SwitchView(ViewMode::Archived));
    controller.dispatch_blocking(&client, Intent::Search("x".to_string()));

    assert_eq!(
        controller.view(),
        NoteListView::Empty(EmptyState::NoSearchMatch("x".to_string()))
    );
}

#[test]
fn invalid_draft_is_rejected_locally() {
    let client = client_with(&[]);
    let mut controller = started(&client);

    let requests = controller.handle(Intent::Create(NoteDraft::new("ab", "short")));

    assert!(requests.is_empty());
    assert!(controller.take_events().is_empty());
    assert!(client.api().calls().is_empty());
}

#[test]
fn create_prepends_in_active_view() {
    let client = client_with(&[("Existing", "aaaaa", false)]);
    let mut controller = started(&client);

    controller.dispatch_blocking(
        &client,
        Intent::Create(NoteDraft::new("  New note ", "Fresh content ")),
    );

    assert_eq!(titles(&controller), vec!["New note", "Existing"]);
    assert_eq!(
        client.api().calls(),
        vec![ApiCall::Create {
            title: "New note".to_string(),
            body: "Fresh content".to_string(),
        }]
    );

    let events = controller.take_events();
    assert!(matches!(events.first(), Some(UiEvent::Notified { severity: Severity::Success, .. })));
    assert!(events.iter().any(|e| matches!(e, UiEvent::NoteCreated(_))));
}

#[test]
fn create_from_archived_view_switches_to_active() {
    let client = client_with(&[("Old", "bbbbb", true)]);
    let mut controller = started(&client);
    controller.dispatch_blocking(&client, Intent::SwitchView(ViewMode::Archived));
    client.api().clear_calls();

    controller.dispatch_blocking(
        &client,
        Intent::Create(NoteDraft::new("Valid Title", "This is fine")),
    );

    assert_eq!(controller.state().mode(), ViewMode::Active);
    assert_eq!(titles(&controller), vec!["Valid Title"]);
    assert_eq!(client.api().calls().last(), Some(&ApiCall::List(ViewMode::Active)));
}

#[test]
fn create_failure_leaves_cache_and_notifies_once() {
    let client = client_with(&[("Existing", "aaaaa", false)]);
    let mut controller = started(&client);
    client.api().fail(Operation::Create, "Gagal menambahkan catatan");

    controller.dispatch_blocking(
        &client,
        Intent::Create(NoteDraft::new("Valid Title", "This is fine")),
    );

    assert_eq!(titles(&controller), vec!["Existing"]);
    let events = controller.take_events();
    assert_eq!(
        notifications(&events),
        vec![(
            "Failed to add note: Gagal menambahkan catatan".to_string(),
            Severity::Error
        )]
    );
    assert!(!events.iter().any(|e| matches!(e, UiEvent::NoteCreated(_))));
}

#[test]
fn toggle_archive_moves_note_and_reloads() {
    let client = client_with(&[("Movable", "aaaaa", false)]);
    let mut controller = started(&client);
    let id = controller.state().notes()[0].id.clone();

    controller.dispatch_blocking(&client, Intent::ToggleArchive(id.clone()));

    assert!(titles(&controller).is_empty());
    assert_eq!(
        client.api().calls(),
        vec![ApiCall::Archive(id.clone()), ApiCall::List(ViewMode::Active)]
    );
    assert_eq!(
        notifications(&controller.take_events()),
        vec![("Note archived successfully!".to_string(), Severity::Success)]
    );

    controller.dispatch_blocking(&client, Intent::SwitchView(ViewMode::Archived));
    controller.dispatch_blocking(&client, Intent::ToggleArchive(id.clone()));
    assert_eq!(client.api().calls().iter().filter(|c| **c == ApiCall::Unarchive(id.clone())).count(), 1);
}

#[test]
fn toggle_archive_failure_names_direction_and_still_reloads() {
    let client = client_with(&[("Stuck", "aaaaa", true)]);
    let mut controller = started(&client);
    controller.dispatch_blocking(&client, Intent::SwitchView(ViewMode::Archived));
    controller.take_events();
    client.api().clear_calls();
    let id = controller.state().notes()[0].id.clone();

    client.api().fail(Operation::Unarchive, "nope");
    controller.dispatch_blocking(&client, Intent::ToggleArchive(id.clone()));

    assert_eq!(
        notifications(&controller.take_events()),
        vec![("Failed to unarchive note: nope".to_string(), Severity::Error)]
    );
    assert_eq!(
        client.api().calls(),
        vec![ApiCall::Unarchive(id), ApiCall::List(ViewMode::Archived)]
    );
    assert_eq!(titles(&controller), vec!["Stuck"]);
}

#[test]
fn toggle_archive_unknown_id_is_a_no_op() {
    let client = client_with(&[]);
    let mut controller = started(&client);

    let requests = controller.handle(Intent::ToggleArchive(NoteId::new("missing")));
    assert!(requests.is_empty());
    assert!(controller.take_events().is_empty());
}

#[test]
fn delete_requires_confirmation() {
    let client = client_with(&[("Groceries", "Milk and eggs", false)]);
    let mut controller = started(&client);
    let id = controller.state().notes()[0].id.clone();

    controller.dispatch_blocking(&client, Intent::RequestDelete(id.clone()));
    assert!(controller.modal().is_open());
    assert_eq!(controller.state().staged_deletion(), Some(&id));
    assert!(client.api().calls().is_empty());
    assert_eq!(controller.take_events(), vec![UiEvent::ModalOpened]);

    controller.dispatch_blocking(&client, Intent::ConfirmDelete);

    assert_eq!(
        client.api().calls(),
        vec![ApiCall::Delete(id), ApiCall::List(ViewMode::Active)]
    );
    assert!(!controller.modal().is_open());
    assert_eq!(controller.state().staged_deletion(), None);
    assert!(titles(&controller).is_empty());

    let events = controller.take_events();
    let notes = notifications(&events);
    assert_eq!(notes.len(), 1);
    assert!(notes[0].0.contains("Groceries"));
    assert_eq!(notes[0].1, Severity::Warning);
    assert!(events.contains(&UiEvent::ModalClosed));
}

#[test]
fn cancel_delete_keeps_note() {
    let client = client_with(&[("Groceries", "Milk and eggs", false)]);
    let mut controller = started(&client);
    let id = controller.state().notes()[0].id.clone();

    for how in [Dismissal::CancelButton, Dismissal::OverlayClick, Dismissal::Escape] {
        controller.dispatch_blocking(&client, Intent::RequestDelete(id.clone()));
        controller.dispatch_blocking(&client, Intent::CancelDelete(how));

        assert!(!controller.modal().is_open());
        assert!(!controller.modal().scroll_locked());
        assert_eq!(controller.state().staged_deletion(), None);
        assert_eq!(
            controller.take_events(),
            vec![UiEvent::ModalOpened, UiEvent::ModalClosed],
            "{how:?}"
        );
    }

    controller.dispatch_blocking(&client, Intent::Refresh);
    assert_eq!(titles(&controller), vec!["Groceries"]);
    assert!(!client.api().calls().iter().any(|c| matches!(c, ApiCall::Delete(_))));
}

#[test]
fn confirm_without_staged_deletion_does_nothing() {
    let mut controller = Controller::new();
    assert!(controller.handle(Intent::ConfirmDelete).is_empty());
}

#[test]
fn delete_failure_closes_modal_without_reload() {
    let client = client_with(&[("Groceries", "Milk and eggs", false)]);
    let mut controller = started(&client);
    let id = controller.state().notes()[0].id.clone();
    client.api().fail(Operation::Delete, "Catatan gagal dihapus");

    controller.dispatch_blocking(&client, Intent::RequestDelete(id.clone()));
    controller.dispatch_blocking(&client, Intent::ConfirmDelete);

    assert!(!controller.modal().is_open());
    assert_eq!(client.api().calls(), vec![ApiCall::Delete(id)]);
    assert_eq!(
        notifications(&controller.take_events()),
        vec![(
            "Failed to delete note: Catatan gagal dihapus".to_string(),
            Severity::Error
        )]
    );
    assert_eq!(titles(&controller), vec!["Groceries"]);
}

#[test]
fn pending_delete_completes_on_superseding_load() {
    let mut controller = Controller::new();
    controller.handle(Intent::Init);
    controller.apply(listed(1, ViewMode::Active, &["Groceries"]));
    let id = controller.state().notes()[0].id.clone();

    controller.handle(Intent::RequestDelete(id.clone()));
    let requests = controller.handle(Intent::ConfirmDelete);
    assert_eq!(requests, vec![Request::Delete { id: id.clone() }]);

    // a second confirm while the first is running is ignored
    assert!(controller.handle(Intent::ConfirmDelete).is_empty());

    let reload = controller.apply(Response::Deleted {
        id,
        result: Ok(()),
    });
    assert_eq!(reload, vec![Request::List { seq: 2, mode: ViewMode::Active }]);
    assert!(controller.modal().is_open());

    // user switches view before the reload lands
    controller.handle(Intent::SwitchView(ViewMode::Archived));
    controller.apply(listed(2, ViewMode::Active, &[]));

    assert!(!controller.modal().is_open());
    assert!(!controller.delete_pending());
    assert!(
        notifications(&controller.take_events())
            .iter()
            .any(|(message, _)| message == "\"Groceries\" has been deleted.")
    );
}

#[test]
fn loading_overlay_tracks_outstanding_requests() {
    let mut controller = Controller::new();
    controller.handle(Intent::Init);
    assert_eq!(controller.loading().message(), Some("Loading notes..."));

    controller.apply(listed(1, ViewMode::Active, &["One"]));
    assert!(!controller.loading().is_visible());

    let id = controller.state().notes()[0].id.clone();
    controller.handle(Intent::ToggleArchive(id.clone()));
    assert_eq!(controller.loading().message(), Some("Archiving note..."));

    controller.apply(Response::ArchiveSet {
        id,
        archive: true,
        result: Ok(()),
    });
    assert_eq!(controller.in_flight(), 1);
    assert!(controller.loading().is_visible());
}
