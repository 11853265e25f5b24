//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level library functions to Dart via FRB.
//! - Translate core errors into response envelopes the UI can render.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Plan content crosses the boundary as JSON in the persisted record shape.
//! - Every call opens the database resolved once from [`CoreConfig`].

use escola360_core::db::open_db;
use escola360_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, parse_artifact,
    ping as ping_inner, BimesterPlan, CoreConfig, LibraryItem, LibraryItemId, LibraryItemType,
    LibraryService, SqliteKeyValueStore,
};
use log::warn;
use std::sync::OnceLock;

static CORE_CONFIG: OnceLock<CoreConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive); blank
///   falls back to `ESCOLA360_LOG_LEVEL` or the build-mode default.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = match level.trim() {
        "" => core_config().log_level.as_str(),
        explicit => explicit,
    };
    match init_logging_inner(level, log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Library record header for list screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub id: String,
    /// `PLANNING` or `DOCUMENT`.
    pub kind: String,
    pub title: String,
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub created_at: String,
    /// Free-form metadata as JSON; `null` when absent.
    pub metadata_json: String,
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryListResponse {
    /// Records, most recent first.
    pub items: Vec<LibraryEntry>,
    pub message: String,
}

/// Single-record response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryItemResponse {
    pub ok: bool,
    pub item: Option<LibraryEntry>,
    /// Bimester plan JSON of the record, when found.
    pub content_json: Option<String>,
    pub message: String,
}

/// Mutation response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryActionResponse {
    pub ok: bool,
    /// Id of the saved or deleted record.
    pub item_id: Option<String>,
    pub message: String,
}

impl LibraryActionResponse {
    fn success(message: impl Into<String>, item_id: String) -> Self {
        Self {
            ok: true,
            item_id: Some(item_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item_id: None,
            message: message.into(),
        }
    }
}

/// Lists saved records.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Unreadable storage yields an empty list plus a diagnostic message.
#[flutter_rust_bridge::frb(sync)]
pub fn library_list() -> LibraryListResponse {
    match with_library(|library| Ok(library.list())) {
        Ok(items) => {
            let message = if items.is_empty() {
                "Library is empty.".to_string()
            } else {
                format!("Found {} item(s).", items.len())
            };
            LibraryListResponse {
                items: items.iter().map(to_entry).collect(),
                message,
            }
        }
        Err(err) => LibraryListResponse {
            items: Vec::new(),
            message: format!("library_list failed: {err}"),
        },
    }
}

/// Loads one record with its plan content.
#[flutter_rust_bridge::frb(sync)]
pub fn library_get(id: String) -> LibraryItemResponse {
    let not_found = |message: String| LibraryItemResponse {
        ok: false,
        item: None,
        content_json: None,
        message,
    };

    let item_id = match parse_item_id(&id) {
        Ok(item_id) => item_id,
        Err(err) => return not_found(err),
    };
    let item = match with_library(|library| Ok(library.get(item_id))) {
        Ok(Some(item)) => item,
        Ok(None) => return not_found(format!("Library item {item_id} not found.")),
        Err(err) => return not_found(format!("library_get failed: {err}")),
    };

    match serde_json::to_string(&item.content) {
        Ok(content_json) => LibraryItemResponse {
            ok: true,
            item: Some(to_entry(&item)),
            content_json: Some(content_json),
            message: "Library item loaded.".to_string(),
        },
        Err(err) => not_found(format!("library_get failed: {err}")),
    }
}

/// Saves a plan to the library.
///
/// Input semantics:
/// - `kind`: `planning` or `document` (case-insensitive).
/// - `content_json`: bimester plan in the persisted record shape.
/// - `metadata_json`: optional JSON value; blank means no metadata.
///
/// # FFI contract
/// - Malformed or structurally invalid content is rejected before any write.
/// - Returns the new record id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn library_save(
    kind: String,
    title: String,
    content_json: String,
    metadata_json: Option<String>,
) -> LibraryActionResponse {
    let Some(kind) = LibraryItemType::parse(&kind) else {
        return LibraryActionResponse::failure(format!(
            "library_save failed: unsupported kind `{}`; expected planning|document",
            kind.trim()
        ));
    };
    let title = title.trim();
    if title.is_empty() {
        return LibraryActionResponse::failure("library_save failed: title must not be empty");
    }
    let content = match parse_artifact::<BimesterPlan>(Some(content_json.as_str())) {
        Ok(content) => content,
        Err(err) => return LibraryActionResponse::failure(format!("library_save failed: {err}")),
    };
    let metadata = match parse_metadata(metadata_json.as_deref()) {
        Ok(metadata) => metadata,
        Err(err) => return LibraryActionResponse::failure(format!("library_save failed: {err}")),
    };

    match with_library(|library| {
        library
            .save(kind, title, &content, metadata)
            .map_err(|err| err.to_string())
    }) {
        Ok(item) => LibraryActionResponse::success("Saved to library.", item.id.to_string()),
        Err(err) => LibraryActionResponse::failure(format!("library_save failed: {err}")),
    }
}

/// Deletes one record. Deleting an unknown id succeeds without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn library_delete(id: String) -> LibraryActionResponse {
    let item_id = match parse_item_id(&id) {
        Ok(item_id) => item_id,
        Err(err) => return LibraryActionResponse::failure(err),
    };
    match with_library(|library| library.delete(item_id).map_err(|err| err.to_string())) {
        Ok(()) => LibraryActionResponse::success("Removed from library.", item_id.to_string()),
        Err(err) => LibraryActionResponse::failure(format!("library_delete failed: {err}")),
    }
}

fn core_config() -> &'static CoreConfig {
    CORE_CONFIG.get_or_init(CoreConfig::from_env)
}

fn with_library<T>(
    f: impl FnOnce(&LibraryService<SqliteKeyValueStore<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let config = core_config();
    let conn = open_db(&config.db_path).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error error={err}");
        format!("library DB open failed: {err}")
    })?;
    let library = LibraryService::with_key(
        SqliteKeyValueStore::new(&conn),
        config.library_key.as_str(),
    );
    f(&library)
}

fn parse_item_id(raw: &str) -> Result<LibraryItemId, String> {
    LibraryItemId::parse_str(raw.trim())
        .map_err(|err| format!("invalid library item id `{raw}`: {err}"))
}

fn parse_metadata(raw: Option<&str>) -> Result<serde_json::Value, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(serde_json::Value::Null),
        Some(body) => serde_json::from_str(body).map_err(|err| format!("invalid metadata: {err}")),
    }
}

fn to_entry(item: &LibraryItem) -> LibraryEntry {
    LibraryEntry {
        id: item.id.to_string(),
        kind: item.kind.as_str().to_string(),
        title: item.title.clone(),
        created_at: item
            .created_at
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        metadata_json: item.metadata.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, library_delete, library_get, library_list, library_save, ping,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    const PLAN_JSON: &str = r#"{
        "overview": "Visão geral",
        "plans": [{
            "topic": "Frações",
            "objectives": ["Comparar frações"],
            "content_summary": "Resumo",
            "methodology": "Aula expositiva",
            "bncc_skills": [],
            "activities": [],
            "assessments": []
        }]
    }"#;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn saved_plan_is_listed_and_loadable() {
        let title = unique_token("ffi-save");
        let saved = library_save(
            "planning".to_string(),
            title.clone(),
            PLAN_JSON.to_string(),
            Some(r#"{"subject": "Matemática"}"#.to_string()),
        );
        assert!(saved.ok, "{}", saved.message);
        let item_id = saved.item_id.expect("save should return item_id");

        let listed = library_list();
        let entry = listed
            .items
            .iter()
            .find(|entry| entry.id == item_id)
            .expect("saved item should be listed");
        assert_eq!(entry.title, title);
        assert_eq!(entry.kind, "PLANNING");
        assert!(entry.created_at.ends_with('Z'));

        let loaded = library_get(item_id.clone());
        assert!(loaded.ok, "{}", loaded.message);
        let content: serde_json::Value =
            serde_json::from_str(&loaded.content_json.unwrap()).unwrap();
        assert_eq!(content["plans"][0]["topic"], "Frações");

        let deleted = library_delete(item_id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(!library_get(item_id).ok);
    }

    #[test]
    fn save_rejects_invalid_input_before_writing() {
        let bad_kind = library_save(
            "note".to_string(),
            "x".to_string(),
            PLAN_JSON.to_string(),
            None,
        );
        assert!(!bad_kind.ok);
        assert!(bad_kind.message.contains("unsupported kind"));

        let empty_plan = library_save(
            "document".to_string(),
            "x".to_string(),
            r#"{"overview": "", "plans": []}"#.to_string(),
            None,
        );
        assert!(!empty_plan.ok);

        let broken_metadata = library_save(
            "document".to_string(),
            "x".to_string(),
            PLAN_JSON.to_string(),
            Some("{oops".to_string()),
        );
        assert!(!broken_metadata.ok);
        assert!(broken_metadata.message.contains("metadata"));
    }

    #[test]
    fn malformed_ids_are_reported_not_panicked() {
        assert!(!library_get("not-a-uuid".to_string()).ok);
        let response = library_delete("not-a-uuid".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid library item id"));
    }

    #[test]
    fn deleting_unknown_id_succeeds() {
        let response = library_delete(uuid::Uuid::new_v4().to_string());
        assert!(response.ok, "{}", response.message);
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
