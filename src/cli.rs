//! Command-line surface.
//!
//! One-shot commands run against the same `NotesClient` the TUI uses, so
//! reads degrade and writes report failures exactly as they do on screen.
//! Output goes to any `Write` so commands can be tested without a terminal.

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::api::{NotesApi, NotesClient, ServiceError};
use crate::controller::EmptyState;
use crate::models::{DraftError, Note, NoteDraft, NoteId, ViewMode};
use crate::widgets::format_card_date;

/// quill - a terminal notes manager backed by a remote notes service
#[derive(Debug, Parser)]
#[command(name = "quill")]
#[command(about = "A terminal notes manager backed by a remote notes service")]
#[command(version)]
pub struct Cli {
    /// Base URL of the notes service (overrides NOTES_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The command to run; no subcommand means the TUI.
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Tui)
    }
}

/// Available commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Launch interactive terminal UI
    Tui,
    /// List notes in one partition
    List {
        /// List archived notes instead of active ones
        #[arg(long)]
        archived: bool,
    },
    /// Show a single note
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Add a new note
    Add {
        #[arg(value_name = "TITLE")]
        title: String,
        #[arg(value_name = "BODY")]
        body: String,
    },
    /// Move a note to the archive
    Archive {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Move a note out of the archive
    Unarchive {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Delete a note permanently
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
}

/// Failures caused by what the user typed rather than by the system.
#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Invalid(#[from] DraftError),
    #[error("Note not found: {0}")]
    NotFound(NoteId),
}

/// Determines if an error is a user error (exit code 1) rather than an
/// internal or service failure (exit code 2).
pub fn is_user_error(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause.is::<UserError>()
            || matches!(
                cause.downcast_ref::<ServiceError>(),
                Some(ServiceError::InvalidUrl(_))
            )
    })
}

/// Runs a one-shot command.
///
/// # Errors
///
/// Returns an error for invalid input, unknown notes, failed writes, or if
/// called with the interactive `tui` command.
pub fn execute<A: NotesApi>(
    client: &NotesClient<A>,
    command: Commands,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Tui => anyhow::bail!("The tui command must be run interactively"),
        Commands::List { archived } => execute_list(client, ViewMode::of(archived), out),
        Commands::Show { id } => execute_show(client, &NoteId::new(id), out),
        Commands::Add { title, body } => execute_add(client, &NoteDraft::new(title, body), out),
        Commands::Archive { id } => execute_set_archived(client, &NoteId::new(id), true, out),
        Commands::Unarchive { id } => execute_set_archived(client, &NoteId::new(id), false, out),
        Commands::Delete { id } => execute_delete(client, &NoteId::new(id), out),
    }
}

fn write_note(out: &mut impl Write, note: &Note) -> Result<()> {
    let badge = if note.archived { " [Archived]" } else { "" };
    writeln!(out, "{}  {}{badge}", note.id, note.title)?;
    writeln!(out, "    {}", format_card_date(note.created_at))?;
    writeln!(out, "    {}", note.body)?;
    Ok(())
}

/// Lists one partition. A service failure prints the empty state.
pub fn execute_list<A: NotesApi>(
    client: &NotesClient<A>,
    mode: ViewMode,
    out: &mut impl Write,
) -> Result<()> {
    let notes = client.list(mode);
    if notes.is_empty() {
        let empty = match mode {
            ViewMode::Active => EmptyState::NoActiveNotes,
            ViewMode::Archived => EmptyState::NoArchivedNotes,
        };
        writeln!(out, "{empty}")?;
        return Ok(());
    }

    for (i, note) in notes.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_note(out, note)?;
    }
    Ok(())
}

pub fn execute_show<A: NotesApi>(
    client: &NotesClient<A>,
    id: &NoteId,
    out: &mut impl Write,
) -> Result<()> {
    let note = client
        .get(id)
        .ok_or_else(|| UserError::NotFound(id.clone()))?;
    write_note(out, &note)
}

/// Validates locally, then creates the note.
pub fn execute_add<A: NotesApi>(
    client: &NotesClient<A>,
    draft: &NoteDraft,
    out: &mut impl Write,
) -> Result<()> {
    draft.validate().map_err(UserError::from)?;

    let note = client
        .create(draft.trimmed_title(), draft.trimmed_body())
        .context("Failed to add note")?;

    writeln!(out, "Note created (id: {})", note.id)?;
    Ok(())
}

pub fn execute_set_archived<A: NotesApi>(
    client: &NotesClient<A>,
    id: &NoteId,
    archive: bool,
    out: &mut impl Write,
) -> Result<()> {
    if archive {
        client.archive(id).context("Failed to archive note")?;
        writeln!(out, "Note archived (id: {id})")?;
    } else {
        client.unarchive(id).context("Failed to unarchive note")?;
        writeln!(out, "Note unarchived (id: {id})")?;
    }
    Ok(())
}

pub fn execute_delete<A: NotesApi>(
    client: &NotesClient<A>,
    id: &NoteId,
    out: &mut impl Write,
) -> Result<()> {
    client.delete(id).context("Failed to delete note")?;
    writeln!(out, "Note deleted (id: {id})")?;
    Ok(())
}
