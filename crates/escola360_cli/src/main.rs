//! Operator CLI over the library store.
//!
//! # Responsibility
//! - Inspect, import and prune library records without the Flutter shell.
//! - Verify `escola360_core` linkage with `ping`.
//!
//! # Invariants
//! - The database path comes from `--db`, else from [`CoreConfig`].
//! - Output is line-oriented and deterministic for scripting.

use clap::{Parser, Subcommand, ValueEnum};
use escola360_core::db::{open_db, DbError};
use escola360_core::{
    core_version, parse_artifact, ping, BimesterPlan, CoreConfig, GenerationError, LibraryError,
    LibraryItemId, LibraryItemType, LibraryService, SqliteKeyValueStore,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "escola360", about = "Escola 360 library tools")]
#[command(version)]
struct Cli {
    /// Library database file (overrides ESCOLA360_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check core linkage and print its version
    Ping,
    /// List saved records, most recent first
    List,
    /// Print one record as JSON
    Show { id: String },
    /// Remove one record
    Delete { id: String },
    /// Save a bimester plan JSON file as a new record
    Import {
        title: String,
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = KindArg::Planning)]
        kind: KindArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Planning,
    Document,
}

impl From<KindArg> for LibraryItemType {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Planning => LibraryItemType::Planning,
            KindArg::Document => LibraryItemType::Document,
        }
    }
}

#[derive(Debug)]
enum CliError {
    Db(DbError),
    Library(LibraryError),
    InvalidId(String),
    NotFound(LibraryItemId),
    Read { path: PathBuf, source: std::io::Error },
    InvalidPlan(GenerationError),
    Output(std::io::Error),
    Json(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "cannot open library database: {err}"),
            Self::Library(err) => write!(f, "{err}"),
            Self::InvalidId(raw) => write!(f, "invalid library item id `{raw}`"),
            Self::NotFound(id) => write!(f, "library item {id} not found"),
            Self::Read { path, source } => write!(f, "cannot read `{}`: {source}", path.display()),
            Self::InvalidPlan(err) => write!(f, "invalid plan file: {err}"),
            Self::Output(err) => write!(f, "cannot write output: {err}"),
            Self::Json(err) => write!(f, "cannot render record: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Library(err) => Some(err),
            Self::Read { source, .. } => Some(source),
            Self::InvalidPlan(err) => Some(err),
            Self::Output(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidId(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<LibraryError> for CliError {
    fn from(value: LibraryError) -> Self {
        Self::Library(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Output(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    match run(cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let config = CoreConfig::from_env();
    if let Commands::Ping = cli.command {
        writeln!(out, "escola360_core ping={}", ping())?;
        writeln!(out, "escola360_core version={}", core_version())?;
        return Ok(());
    }

    let db_path = cli.db.unwrap_or(config.db_path);
    let conn = open_db(&db_path)?;
    let library = LibraryService::with_key(SqliteKeyValueStore::new(&conn), config.library_key);

    match cli.command {
        Commands::Ping => {}
        Commands::List => {
            for item in library.list() {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    item.id,
                    item.kind.as_str(),
                    item.created_at.format("%Y-%m-%d %H:%M"),
                    item.title
                )?;
            }
        }
        Commands::Show { id } => {
            let id = parse_id(&id)?;
            let item = library.get(id).ok_or(CliError::NotFound(id))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&item)?)?;
        }
        Commands::Delete { id } => {
            let id = parse_id(&id)?;
            library.delete(id)?;
            writeln!(out, "deleted {id}")?;
        }
        Commands::Import { title, file, kind } => {
            let raw = std::fs::read_to_string(&file).map_err(|source| CliError::Read {
                path: file.clone(),
                source,
            })?;
            let plan = parse_artifact::<BimesterPlan>(Some(raw.as_str()))
                .map_err(CliError::InvalidPlan)?;
            let item = library.save(kind.into(), title, &plan, serde_json::Value::Null)?;
            writeln!(out, "saved {} ({} units)", item.id, plan.unit_count())?;
        }
    }
    Ok(())
}

fn parse_id(raw: &str) -> Result<LibraryItemId, CliError> {
    LibraryItemId::parse_str(raw.trim()).map_err(|_| CliError::InvalidId(raw.to_string()))
}
