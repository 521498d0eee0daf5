//! SQLite setting repository.
//!
//! `default` and `value` are stored as JSON text so scalar types survive a
//! round trip through the database.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use crate::error::{Result, SettingsError};
use crate::repository::SettingRepository;
use crate::settings::{NewSetting, Scalar, Setting, SettingType};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS settings (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    slug        TEXT    NOT NULL UNIQUE,
    title       TEXT    NOT NULL DEFAULT '',
    description TEXT    NOT NULL DEFAULT '',
    type        TEXT    NOT NULL DEFAULT 'text',
    "default"   TEXT    NOT NULL,
    value       TEXT,
    options     TEXT,
    is_required INTEGER NOT NULL DEFAULT 0,
    is_gui      INTEGER NOT NULL DEFAULT 0,
    module      TEXT    NOT NULL DEFAULT '',
    "order"     INTEGER NOT NULL DEFAULT 0
)
"#;

const SELECT_COLUMNS: &str = r#"id, slug, title, description, type, "default", value, options, is_required, is_gui, module, "order""#;

/// Settings stored in a single SQLite connection.
pub struct SqliteRepository {
    conn: Mutex<Connection>,
}

impl SqliteRepository {
    /// Opens (or creates) the database file and ensures the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::Repository(format!(
                    "cannot create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let conn = Connection::open(path)?;
        info!("Opened settings database at {}", path.display());
        Self::with_connection(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl SettingRepository for SqliteRepository {
    fn get(&self, slug: &str) -> Result<Option<Setting>> {
        let conn = self.conn.lock();
        let sql = format!("SELECT {} FROM settings WHERE slug = ?1", SELECT_COLUMNS);
        let setting = conn
            .query_row(&sql, params![slug], row_to_setting)
            .optional()?;
        Ok(setting)
    }

    fn update(&self, slug: &str, value: &Scalar) -> Result<bool> {
        let encoded = serde_json::to_string(value)?;
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE settings SET value = ?1 WHERE slug = ?2",
            params![encoded, slug],
        )?;
        debug!("Updated setting '{}' ({} row(s))", slug, changed);
        Ok(changed > 0)
    }

    fn get_all(&self) -> Result<Vec<Setting>> {
        let conn = self.conn.lock();
        let sql = format!(
            r#"SELECT {} FROM settings ORDER BY "order", slug"#,
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let settings = stmt
            .query_map([], row_to_setting)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(settings)
    }

    fn insert(&self, setting: NewSetting) -> Result<i64> {
        let default = serde_json::to_string(&setting.default)?;
        let value = setting
            .value
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let conn = self.conn.lock();
        conn.execute(
            r#"INSERT INTO settings
                (slug, title, description, type, "default", value, options, is_required, is_gui, module, "order")
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"#,
            params![
                setting.slug,
                setting.title,
                setting.description,
                setting.kind.as_str(),
                default,
                value,
                setting.options,
                setting.is_required,
                setting.is_gui,
                setting.module,
                setting.order,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!("Inserted setting '{}' with id {}", setting.slug, id);
        Ok(id)
    }

    fn delete(&self, slug: &str) -> Result<bool> {
        let conn = self.conn.lock();
        let changed = conn.execute("DELETE FROM settings WHERE slug = ?1", params![slug])?;
        Ok(changed > 0)
    }
}

fn row_to_setting(row: &Row<'_>) -> rusqlite::Result<Setting> {
    let kind: String = row.get(4)?;
    let default: String = row.get(5)?;
    let value: Option<String> = row.get(6)?;

    Ok(Setting {
        id: row.get(0)?,
        slug: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        kind: SettingType::parse(&kind),
        default: decode_scalar(&default),
        value: value.as_deref().map(decode_scalar),
        options: row.get(7)?,
        is_required: row.get(8)?,
        is_gui: row.get(9)?,
        module: row.get(10)?,
        order: row.get(11)?,
    })
}

/// Reads a JSON-encoded scalar. Anything else written by other tools, plain
/// text or a JSON list included, is kept as a string.
fn decode_scalar(text: &str) -> Scalar {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Bool(b)) => Scalar::Bool(b),
        Ok(serde_json::Value::Number(n)) => match n.as_i64() {
            Some(i) => Scalar::Int(i),
            None => Scalar::Float(n.as_f64().unwrap_or_default()),
        },
        Ok(serde_json::Value::String(s)) => Scalar::String(s),
        _ => Scalar::String(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::StaticConfig;
    use crate::settings::SettingsStore;
    use std::sync::Arc;

    fn repo() -> SqliteRepository {
        SqliteRepository::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let repo = repo();
        let mut new = NewSetting::new("records_per_page");
        new.title = "Records Per Page".to_string();
        new.kind = SettingType::Select;
        new.default = Scalar::Int(25);
        new.options = Some("10=10|25=25|50=50".to_string());
        new.is_gui = true;

        let id = repo.insert(new).unwrap();
        let setting = repo.get("records_per_page").unwrap().unwrap();

        assert_eq!(setting.id, id);
        assert_eq!(setting.kind, SettingType::Select);
        assert_eq!(setting.default, Scalar::Int(25));
        assert!(setting.value.is_none());
        assert_eq!(setting.options.as_deref(), Some("10=10|25=25|50=50"));
        assert!(setting.is_gui);
        assert!(!setting.is_required);
    }

    #[test]
    fn test_get_missing() {
        assert!(repo().get("missing").unwrap().is_none());
    }

    #[test]
    fn test_update_value() {
        let repo = repo();
        repo.insert(NewSetting::new("frontend_enabled")).unwrap();

        assert!(repo.update("frontend_enabled", &Scalar::Bool(false)).unwrap());
        assert!(!repo.update("missing", &Scalar::Bool(false)).unwrap());

        let setting = repo.get("frontend_enabled").unwrap().unwrap();
        assert_eq!(setting.value, Some(Scalar::Bool(false)));
    }

    #[test]
    fn test_duplicate_slug_is_database_error() {
        let repo = repo();
        repo.insert(NewSetting::new("a")).unwrap();
        assert!(matches!(
            repo.insert(NewSetting::new("a")),
            Err(SettingsError::Database(_))
        ));
    }

    #[test]
    fn test_get_all_and_delete() {
        let repo = repo();
        let mut b = NewSetting::new("b");
        b.order = 1;
        let mut a = NewSetting::new("a");
        a.order = 2;
        repo.insert(a).unwrap();
        repo.insert(b).unwrap();

        let slugs: Vec<String> = repo.get_all().unwrap().into_iter().map(|s| s.slug).collect();
        assert_eq!(slugs, vec!["b", "a"]);

        assert!(repo.delete("a").unwrap());
        assert!(!repo.delete("a").unwrap());
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_decode_plain_text() {
        assert_eq!(decode_scalar("hello"), Scalar::from("hello"));
        assert_eq!(decode_scalar("\"hello\""), Scalar::from("hello"));
        assert_eq!(decode_scalar("12"), Scalar::Int(12));
        assert_eq!(decode_scalar("1.5"), Scalar::Float(1.5));
        assert_eq!(decode_scalar("true"), Scalar::Bool(true));
        assert_eq!(decode_scalar("null"), Scalar::from("null"));
    }

    #[test]
    fn test_foreign_list_value_is_read_as_text() {
        let repo = repo();
        repo.insert(NewSetting::new("modules")).unwrap();
        repo.insert(NewSetting::new("site_name")).unwrap();
        repo.conn
            .lock()
            .execute(
                "UPDATE settings SET value = ?1 WHERE slug = 'modules'",
                params![r#"["blog","pages"]"#],
            )
            .unwrap();

        let setting = repo.get("modules").unwrap().unwrap();
        assert_eq!(setting.value, Some(Scalar::from(r#"["blog","pages"]"#)));
        assert_eq!(repo.get_all().unwrap().len(), 2);

        let mut store = SettingsStore::new(Arc::new(repo), Arc::new(StaticConfig::new()));
        assert_eq!(store.get_all().unwrap().len(), 2);
    }
}
