//! Command-line client for QuillNote.
//!
//! # Responsibility
//! - Drive the list, view, create, edit, delete and summarize flows against
//!   a configured backend.
//! - Apply toolbar commands to local markdown files offline.

use clap::{Args, Parser, Subcommand};
use log::info;
use quillnote_core::config::{
    API_URL_ENV_VAR, LOG_DIR_ENV_VAR, LOG_LEVEL_ENV_VAR, TIMEOUT_ENV_VAR,
};
use quillnote_core::preview::excerpt;
use quillnote_core::{
    core_version, init_logging, ClientConfig, HttpNotesBackend, ListCoordinator, LogConfig,
    NoteDraft, NoteOperation, NotesService, RefreshSignal, SelectionRange, StaticToken,
    ToolbarCommand,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "quillnote", version, about = "Markdown notes with AI summaries")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalArgs {
    /// Backend base URL.
    #[arg(long, global = true, env = "QUILLNOTE_API_URL")]
    api_url: Option<String>,
    /// Bearer token from the auth provider.
    #[arg(long, global = true, env = "QUILLNOTE_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long, global = true, env = "QUILLNOTE_TIMEOUT_SECS")]
    timeout_secs: Option<String>,
    /// trace|debug|info|warn|error.
    #[arg(long, global = true, env = "QUILLNOTE_LOG_LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; logging is off without it.
    #[arg(long, global = true, env = "QUILLNOTE_LOG_DIR")]
    log_dir: Option<String>,
}

impl GlobalArgs {
    /// Setting named by its environment variable. clap has already layered
    /// the flag over the environment value.
    fn setting(&self, name: &str) -> Option<String> {
        match name {
            API_URL_ENV_VAR => self.api_url.clone(),
            TIMEOUT_ENV_VAR => self.timeout_secs.clone(),
            LOG_LEVEL_ENV_VAR => self.log_level.clone(),
            LOG_DIR_ENV_VAR => self.log_dir.clone(),
            _ => None,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// List notes, optionally filtered by a search query.
    List {
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Show one note with its summary and tags.
    Show {
        id: String,
    },
    /// Create a note.
    New {
        #[arg(long)]
        title: String,
        #[command(flatten)]
        body: BodyArgs,
        /// Tag to attach; repeatable.
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Edit a note's title, content or tags.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        body: BodyArgs,
        /// Tag to add; repeatable.
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Delete a note. This cannot be undone.
    Delete {
        id: String,
        /// Confirm the deletion.
        #[arg(short, long)]
        yes: bool,
    },
    /// Ask the backend for an AI summary of a note.
    Summarize {
        id: String,
    },
    /// Apply a toolbar command to a local markdown file.
    Format {
        /// h1|h2|h3|bold|italic|list|quote|code|hr|link
        command: ToolbarCommand,
        #[arg(long)]
        file: PathBuf,
        /// Selection start as a byte offset.
        #[arg(long, default_value_t = 0)]
        start: usize,
        /// Selection end; defaults to `start`.
        #[arg(long)]
        end: Option<usize>,
        /// Write the result back instead of printing it.
        #[arg(long)]
        write: bool,
    },
}

#[derive(Args)]
#[group(multiple = false)]
struct BodyArgs {
    /// Markdown content.
    #[arg(long)]
    content: Option<String>,
    /// Read markdown content from a file.
    #[arg(long)]
    file: Option<PathBuf>,
}

impl BodyArgs {
    fn read(&self) -> CliResult<Option<String>> {
        if let Some(content) = &self.content {
            return Ok(Some(content.clone()));
        }
        match &self.file {
            Some(path) => Ok(Some(std::fs::read_to_string(path)?)),
            None => Ok(None),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::List { query } => {
            let (service, refresh) = connect(&cli.global)?;
            let mut list = ListCoordinator::new(refresh);
            list.set_query(query);
            service.sync_list(&mut list)?;
            if list.is_empty_result() {
                println!("No notes found.");
            }
            for note in list.notes() {
                let detail = note.summary.as_deref().unwrap_or_default();
                println!("{}\t{}\t{}", note.id, note.title, detail.trim());
            }
        }
        Command::Show { id } => {
            let (service, _) = connect(&cli.global)?;
            let view = service.load_note(&id)?;
            let note = view.note();
            println!("# {}", note.title);
            println!();
            println!("{}", note.content);
            println!();
            println!("Summary: {}", view.summary_display());
            if !note.tags.is_empty() {
                println!("Tags: {}", note.tags.join(", "));
            }
        }
        Command::New { title, body, tags } => {
            let (service, _) = connect(&cli.global)?;
            let content = body.read()?.unwrap_or_default();
            let mut draft = NoteDraft::with_values(title, content, tags);
            let (note, route) = service.create_note(&mut draft)?;
            print_success(NoteOperation::Create);
            println!("{route}");
            if let Some(text) = excerpt(&note.content) {
                println!("{text}");
            }
        }
        Command::Edit {
            id,
            title,
            body,
            tags,
        } => {
            let (service, _) = connect(&cli.global)?;
            let mut view = service.load_note(&id)?;
            let mut draft = NoteDraft::from_note(view.note());
            if let Some(title) = title {
                draft.set_title(title);
            }
            if let Some(content) = body.read()? {
                draft.set_content(content);
            }
            for tag in &tags {
                draft.add_tag(tag);
            }
            service.update_note(&mut view, &mut draft)?;
            print_success(NoteOperation::Update);
        }
        Command::Delete { id, yes } => {
            confirm_delete(yes)?;
            let (service, _) = connect(&cli.global)?;
            let route = service.delete_note(&id)?;
            print_success(NoteOperation::Delete);
            println!("{route}");
        }
        Command::Summarize { id } => {
            let (service, _) = connect(&cli.global)?;
            let mut view = service.load_note(&id)?;
            service.summarize_note(&mut view)?;
            print_success(NoteOperation::Summarize);
            println!("{}", view.summary_display());
        }
        Command::Format {
            command,
            file,
            start,
            end,
            write,
        } => {
            start_logging(&LogConfig::from_lookup(|name| cli.global.setting(name))?)?;
            format_file(command, &file, start, end.unwrap_or(start), write)?;
        }
    }
    Ok(())
}

type Service = NotesService<HttpNotesBackend, StaticToken>;

const DELETE_NOT_CONFIRMED: &str =
    "deleting a note cannot be undone; pass --yes to confirm";

fn confirm_delete(yes: bool) -> CliResult<()> {
    if yes {
        Ok(())
    } else {
        Err(DELETE_NOT_CONFIRMED.into())
    }
}

fn connect(global: &GlobalArgs) -> CliResult<(Service, RefreshSignal)> {
    let config = ClientConfig::from_lookup(|name| global.setting(name))?;
    start_logging(&config.logging)?;
    let refresh = RefreshSignal::new();
    let service = NotesService::new(
        HttpNotesBackend::from_config(&config),
        StaticToken::new(global.token.clone()),
        refresh.clone(),
    );
    Ok((service, refresh))
}

fn start_logging(config: &LogConfig) -> CliResult<()> {
    let Some(dir) = &config.dir else {
        return Ok(());
    };
    let dir = dir
        .to_str()
        .ok_or("log directory must be valid UTF-8")?;
    init_logging(config.level, dir)?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );
    Ok(())
}

fn format_file(
    command: ToolbarCommand,
    file: &Path,
    start: usize,
    end: usize,
    write: bool,
) -> CliResult<()> {
    let content = std::fs::read_to_string(file)?;
    let edit = command.apply(&content, SelectionRange::new(start, end));
    if write {
        std::fs::write(file, &edit.buffer)?;
        println!("{}..{}", edit.selection.start, edit.selection.end);
    } else {
        print!("{}", edit.buffer);
    }
    Ok(())
}

fn print_success(op: NoteOperation) {
    if let Some(message) = op.success_message() {
        println!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::{run, Cli, Command, DELETE_NOT_CONFIRMED};
    use clap::{CommandFactory, Parser};
    use quillnote_core::{ClientConfig, ConfigError, LogConfig, ToolbarCommand};
    use std::time::Duration;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn format_parses_toolbar_command_name() {
        let cli = Cli::try_parse_from(["quillnote", "format", "bold", "--file", "a.md", "--start", "2"])
            .expect("format args should parse");
        match cli.command {
            Command::Format {
                command, start, end, ..
            } => {
                assert_eq!(command, ToolbarCommand::Bold);
                assert_eq!(start, 2);
                assert_eq!(end, None);
            }
            _ => panic!("expected format command"),
        }
    }

    #[test]
    fn content_and_file_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "quillnote", "new", "--title", "t", "--content", "c", "--file", "c.md",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn delete_requires_confirmation() {
        let cli = Cli::try_parse_from(["quillnote", "--api-url", "http://127.0.0.1:9", "delete", "n1"])
            .expect("delete args should parse");
        assert!(matches!(cli.command, Command::Delete { yes: false, .. }));
        let err = run(cli).expect_err("unconfirmed delete must be refused");
        assert_eq!(err.to_string(), DELETE_NOT_CONFIRMED);

        let cli = Cli::try_parse_from(["quillnote", "delete", "n1", "--yes"])
            .expect("confirmed delete should parse");
        assert!(matches!(cli.command, Command::Delete { yes: true, .. }));
    }

    #[test]
    fn flags_resolve_through_client_config() {
        let cli = Cli::try_parse_from([
            "quillnote",
            "--api-url",
            "http://127.0.0.1:3001/",
            "--timeout-secs",
            "30",
            "--log-level",
            "WARNING",
            "show",
            "n1",
        ])
        .expect("global flags should parse");
        let config = ClientConfig::from_lookup(|name| cli.global.setting(name))
            .expect("config should resolve");
        assert_eq!(config.api_base_url, "http://127.0.0.1:3001");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn invalid_log_level_is_rejected_without_log_dir() {
        let cli = Cli::try_parse_from(["quillnote", "--log-level", "loud", "format", "bold", "--file", "a.md"])
            .expect("format args should parse");
        let err = LogConfig::from_lookup(|name| cli.global.setting(name)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }
}
