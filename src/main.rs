use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use quill::api::{HttpNotesApi, HttpNotesApiBuilder, NotesClient};
use quill::cli::{self, Cli, Commands};
use quill::theme::FileThemeStore;
use quill::{logging, tui, utils};

fn main() {
    // A missing .env file is normal
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let command = cli.command_or_default();

    // The TUI owns the terminal, so it logs to the file only
    let _guard = match utils::get_log_directory()
        .and_then(|dir| logging::init(&dir, command != Commands::Tui))
    {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    if let Err(e) = run(cli.base_url.as_deref(), command) {
        let exit_code = if cli::is_user_error(&e) { 1 } else { 2 };
        tracing::error!(error = %format!("{e:#}"), exit_code, "command failed");
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

fn build_api(base_url: Option<&str>) -> Result<HttpNotesApi> {
    let mut builder = HttpNotesApiBuilder::new();
    if let Some(url) = base_url {
        builder = builder.base_url(url);
    }
    builder
        .build()
        .context("Failed to configure notes service client")
}

fn run(base_url: Option<&str>, command: Commands) -> Result<()> {
    let api = build_api(base_url)?;

    match command {
        Commands::Tui => {
            let theme_path = utils::get_theme_path().context("Failed to get theme path")?;
            tui::run(api, Box::new(FileThemeStore::new(theme_path)))
        }
        other => {
            let client = NotesClient::new(api);
            let mut stdout = io::stdout().lock();
            cli::execute(&client, other, &mut stdout)
        }
    }
}
