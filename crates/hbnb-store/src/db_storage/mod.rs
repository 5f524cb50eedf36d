//! Relational store backed by SQLite
//!
//! Entities live in one table per Kind. Mutations are staged in a
//! [`Session`] and written by `save()` inside a single transaction, so a
//! commit either lands completely or not at all.

mod session;

use std::collections::BTreeMap;

use hbnb_core::errors::{HbError, HbErrorKind};
use hbnb_core::model::{identity_key, Entity, Kind};
use hbnb_core::rules::validate_all;
use rusqlite::Connection;

use crate::config::DbTarget;
use crate::db;
use crate::engine::{ReloadReport, StorageEngine};
use crate::errors::{from_rusqlite, not_found, session_closed, session_failed, Result};
use crate::migrations::{apply_migrations, drop_all};
use crate::repo::SqliteRepo;

pub use session::Session;

pub struct DbStorage {
    target: DbTarget,
    drop_on_reload: bool,
    conn: Option<Connection>,
    session: Session,
}

impl DbStorage {
    /// Store for `target`; no connection is opened until `reload()`
    pub fn with_target(target: DbTarget) -> Self {
        Self {
            target,
            drop_on_reload: false,
            conn: None,
            session: Session::default(),
        }
    }

    /// Drop every table on `reload()`
    pub fn with_drop_on_reload(mut self, drop: bool) -> Self {
        self.drop_on_reload = drop;
        self
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Number of staged, uncommitted mutations
    pub fn staged_count(&self) -> usize {
        self.session.staged_count()
    }

    fn connection(&self, op: &str) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(|| session_closed(op))
    }

    /// Connection for a mutating operation; refuses while a failed commit
    /// is pending
    fn writable(&self, op: &str) -> Result<&Connection> {
        let conn = self.connection(op)?;
        if self.session.is_failed() {
            return Err(session_failed(op));
        }
        Ok(conn)
    }

    /// Committed rows merged with the session's staged work
    fn view(&self, conn: &Connection, kind: Option<Kind>) -> Result<BTreeMap<String, Entity>> {
        // A staged delete can cascade across Kinds, so it needs the whole graph
        let scan: Vec<Kind> = match kind {
            Some(k) if !self.session.has_deletes() => vec![k],
            _ => Kind::ALL.to_vec(),
        };

        let mut objects = BTreeMap::new();
        for k in scan {
            for entity in SqliteRepo::load_kind(conn, k)? {
                objects.insert(entity.key(), entity);
            }
        }
        self.session.overlay(&mut objects);
        if let Some(k) = kind {
            objects.retain(|_, entity| entity.kind() == k);
        }
        Ok(objects)
    }
}

/// Write the session in one transaction
fn commit(conn: &mut Connection, session: &Session) -> Result<()> {
    let upserts = session.upserts_in_order();
    validate_all(upserts.iter().copied()).map_err(HbError::from)?;

    let tx = conn.transaction().map_err(from_rusqlite)?;
    tx.execute_batch("PRAGMA defer_foreign_keys = ON")
        .map_err(from_rusqlite)?;

    for entity in &upserts {
        SqliteRepo::upsert(&tx, entity)?;
        if let Some(place) = entity.as_place() {
            SqliteRepo::sync_place_amenities(&tx, place)?;
        }
    }
    for (kind, id) in session.deletes() {
        let removed = SqliteRepo::delete(&tx, kind, id)?;
        tracing::debug!(key = %identity_key(kind, id), removed, "row deleted");
    }

    // Deferred foreign keys are checked here
    tx.commit().map_err(from_rusqlite)?;
    Ok(())
}

impl StorageEngine for DbStorage {
    fn backend(&self) -> &'static str {
        "db"
    }

    fn all(&mut self, kind: Option<Kind>) -> Result<BTreeMap<String, Entity>> {
        let conn = self.connection("all")?;
        self.view(conn, kind)
    }

    fn get(&mut self, kind: Kind, id: &str) -> Result<Entity> {
        let conn = self.connection("get")?;
        let key = identity_key(kind, id);
        let found = if self.session.is_empty() {
            SqliteRepo::load_one(conn, kind, id)?
        } else {
            self.view(conn, Some(kind))?.remove(&key)
        };
        found.ok_or_else(|| not_found("get", &key))
    }

    fn count(&mut self, kind: Option<Kind>) -> Result<usize> {
        let conn = self.connection("count")?;
        if !self.session.is_empty() {
            return Ok(self.view(conn, kind)?.len());
        }
        match kind {
            Some(k) => SqliteRepo::count(conn, k),
            None => Kind::ALL
                .into_iter()
                .map(|k| SqliteRepo::count(conn, k))
                .sum(),
        }
    }

    fn new(&mut self, entity: Entity) -> Result<()> {
        self.writable("new")?;
        self.session.stage_upsert(entity);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.writable("save")?;
        if self.session.is_empty() {
            return Ok(());
        }
        let Some(conn) = self.conn.as_mut() else {
            return Err(session_closed("save"));
        };

        match commit(conn, &self.session) {
            Ok(()) => {
                tracing::debug!(staged = self.session.staged_count(), "session committed");
                self.session.clear();
                Ok(())
            }
            Err(err) => {
                self.session.mark_failed();
                tracing::warn!(error = %err, "commit aborted, session needs rollback");
                Err(if err.kind() == HbErrorKind::ConstraintViolation {
                    err.with_op("save")
                } else {
                    HbError::new(HbErrorKind::ConstraintViolation)
                        .with_op("save")
                        .with_message("commit aborted")
                        .with_source(err)
                })
            }
        }
    }

    fn delete(&mut self, entity: &Entity) -> Result<()> {
        let key = entity.key();
        let conn = self.writable("delete")?;
        // Staged deletes and their cascades already hide the key
        if !self.view(conn, Some(entity.kind()))?.contains_key(&key) {
            return Err(not_found("delete", &key));
        }
        let stored = SqliteRepo::exists(conn, entity.kind(), entity.id())?;

        self.session.unstage_upsert(&key);
        if stored {
            self.session.stage_delete(key);
        }
        Ok(())
    }

    fn reload(&mut self) -> Result<ReloadReport> {
        // An in-memory database lives only as long as its connection
        let kept = match self.target {
            DbTarget::Memory => self.conn.take(),
            DbTarget::Path(_) => {
                self.conn = None;
                None
            }
        };
        let mut conn = match kept {
            Some(conn) => conn,
            None => db::open_target(&self.target)?,
        };
        db::configure(&conn)?;
        if self.drop_on_reload {
            drop_all(&conn)?;
        }
        apply_migrations(&mut conn)?;

        self.conn = Some(conn);
        self.session.clear();

        let loaded = self.count(None)?;
        tracing::debug!(db = ?self.target, loaded, "database session opened");
        Ok(ReloadReport {
            loaded,
            skipped: Vec::new(),
        })
    }

    fn close(&mut self) -> Result<()> {
        self.session.clear();
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| from_rusqlite(e))?;
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        let discarded = self.session.staged_count();
        self.session.clear();
        tracing::debug!(discarded, "session rolled back");
        Ok(())
    }
}
