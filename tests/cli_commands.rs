//! CLI integration tests.
//!
//! Argument parsing goes through the real `Cli`; command execution runs
//! against the in-memory notes service with output captured in a buffer.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use quill::api::{ApiCall, InMemoryNotesApi, NotesClient, Operation};
use quill::cli::{self, Cli, Commands};
use quill::models::{NoteId, ViewMode};

fn client_with(notes: &[(&str, &str, bool)]) -> NotesClient<InMemoryNotesApi> {
    let api = InMemoryNotesApi::new();
    for (title, body, archived) in notes {
        api.insert(title, body, *archived);
    }
    NotesClient::new(api)
}

/// Runs a command and returns what it printed.
fn run(client: &NotesClient<InMemoryNotesApi>, command: Commands) -> Result<String> {
    let mut out = Vec::new();
    cli::execute(client, command, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn subcommands_parse() {
    let cli = Cli::parse_from(["quill", "list", "--archived"]);
    assert_eq!(cli.command_or_default(), Commands::List { archived: true });

    let cli = Cli::parse_from(["quill", "add", "Groceries", "Milk and eggs"]);
    assert_eq!(
        cli.command_or_default(),
        Commands::Add {
            title: "Groceries".to_string(),
            body: "Milk and eggs".to_string(),
        }
    );

    let cli = Cli::parse_from(["quill", "--base-url", "http://localhost:5000", "delete", "n1"]);
    assert_eq!(cli.base_url.as_deref(), Some("http://localhost:5000"));
    assert_eq!(
        cli.command_or_default(),
        Commands::Delete {
            id: "n1".to_string()
        }
    );
}

#[test]
fn add_requires_title_and_body() {
    let result = Cli::command().try_get_matches_from(["quill", "add", "Only title"]);
    assert!(result.is_err(), "add without a body should be rejected");
}

#[test]
fn list_prints_partition_only() -> Result<()> {
    let client = client_with(&[
        ("Groceries", "Milk and eggs", false),
        ("Old plans", "Never happened", true),
    ]);

    let active = run(&client, Commands::List { archived: false })?;
    assert!(active.contains("Groceries"));
    assert!(!active.contains("Old plans"));

    let archived = run(&client, Commands::List { archived: true })?;
    assert!(archived.contains("Old plans"));
    assert!(archived.contains("[Archived]"));
    Ok(())
}

#[test]
fn list_prints_empty_state() -> Result<()> {
    let client = client_with(&[]);
    assert_eq!(
        run(&client, Commands::List { archived: false })?,
        "No notes yet. Create your first note!\n"
    );
    assert_eq!(
        run(&client, Commands::List { archived: true })?,
        "No archived notes yet. Archive notes to see them here.\n"
    );
    Ok(())
}

#[test]
fn list_degrades_when_service_fails() -> Result<()> {
    let client = client_with(&[("Groceries", "Milk and eggs", false)]);
    client.api().fail(Operation::List, "offline");

    assert_eq!(
        run(&client, Commands::List { archived: false })?,
        "No notes yet. Create your first note!\n"
    );
    Ok(())
}

#[test]
fn show_prints_note_details() -> Result<()> {
    let client = client_with(&[("Groceries", "Milk and eggs", false)]);
    let id = client.api().snapshot()[0].id.clone();

    let out = run(
        &client,
        Commands::Show {
            id: id.to_string(),
        },
    )?;
    assert!(out.contains(id.as_str()));
    assert!(out.contains("Groceries"));
    assert!(out.contains("Milk and eggs"));
    Ok(())
}

#[test]
fn show_unknown_note_is_a_user_error() {
    let client = client_with(&[]);
    let err = run(
        &client,
        Commands::Show {
            id: "missing".to_string(),
        },
    )
    .unwrap_err();

    assert!(cli::is_user_error(&err));
    assert_eq!(err.to_string(), "Note not found: missing");
}

#[test]
fn add_creates_trimmed_note() -> Result<()> {
    let client = client_with(&[]);

    let out = run(
        &client,
        Commands::Add {
            title: "  Groceries  ".to_string(),
            body: " Milk and eggs ".to_string(),
        },
    )?;

    let notes = client.api().snapshot();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Groceries");
    assert_eq!(notes[0].body, "Milk and eggs");
    assert_eq!(out, format!("Note created (id: {})\n", notes[0].id));
    Ok(())
}

#[test]
fn add_rejects_invalid_draft_before_calling_service() {
    let client = client_with(&[]);

    let err = run(
        &client,
        Commands::Add {
            title: "ab".to_string(),
            body: "long enough".to_string(),
        },
    )
    .unwrap_err();

    assert!(cli::is_user_error(&err));
    assert!(client.api().calls().is_empty());
}

#[test]
fn add_reports_service_failure_as_internal() {
    let client = client_with(&[]);
    client.api().fail(Operation::Create, "Service unavailable");

    let err = run(
        &client,
        Commands::Add {
            title: "Groceries".to_string(),
            body: "Milk and eggs".to_string(),
        },
    )
    .unwrap_err();

    assert!(!cli::is_user_error(&err));
    assert_eq!(
        format!("{err:#}"),
        "Failed to add note: Service unavailable"
    );
}

#[test]
fn archive_and_unarchive_move_between_partitions() -> Result<()> {
    let client = client_with(&[("Groceries", "Milk and eggs", false)]);
    let id = client.api().snapshot()[0].id.clone();

    let out = run(
        &client,
        Commands::Archive {
            id: id.to_string(),
        },
    )?;
    assert_eq!(out, format!("Note archived (id: {id})\n"));
    assert!(client.list(ViewMode::Active).is_empty());
    assert_eq!(client.list(ViewMode::Archived).len(), 1);

    let out = run(
        &client,
        Commands::Unarchive {
            id: id.to_string(),
        },
    )?;
    assert_eq!(out, format!("Note unarchived (id: {id})\n"));
    assert_eq!(client.list(ViewMode::Active).len(), 1);
    Ok(())
}

#[test]
fn delete_removes_note() -> Result<()> {
    let client = client_with(&[("Groceries", "Milk and eggs", false)]);
    let id = client.api().snapshot()[0].id.clone();

    let out = run(
        &client,
        Commands::Delete {
            id: id.to_string(),
        },
    )?;

    assert_eq!(out, format!("Note deleted (id: {id})\n"));
    assert!(client.api().snapshot().is_empty());
    assert_eq!(client.api().calls(), vec![ApiCall::Delete(id)]);
    Ok(())
}

#[test]
fn delete_unknown_note_fails() {
    let client = client_with(&[]);
    let err = run(
        &client,
        Commands::Delete {
            id: NoteId::new("missing").to_string(),
        },
    )
    .unwrap_err();

    assert!(!cli::is_user_error(&err));
    assert!(format!("{err:#}").starts_with("Failed to delete note"));
}

#[test]
fn tui_command_refuses_non_interactive_execution() {
    let client = client_with(&[]);
    let err = run(&client, Commands::Tui).unwrap_err();
    assert_eq!(err.to_string(), "The tui command must be run interactively");
}
