//! SQLite repository implementation
//!
//! Reads and writes entity rows plus the `place_amenity` association.

use std::collections::BTreeMap;

use hbnb_core::codec::{self, Record};
use hbnb_core::errors::{HbError, HbErrorKind};
use hbnb_core::model::{Entity, Kind, Place};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use serde_json::Value;

use crate::errors::{from_rusqlite, Result};
use crate::repo::tables::{table_for, Column, ColumnType, TableDef, PLACE_AMENITY_TABLE};

/// SQLite repository for all entity Kinds
pub struct SqliteRepo;

impl SqliteRepo {
    /// Insert or update one entity row
    ///
    /// Places also need [`SqliteRepo::sync_place_amenities`]; the row itself
    /// carries no amenity links.
    pub fn upsert(conn: &Connection, entity: &Entity) -> Result<()> {
        let table = table_for(entity.kind());
        let record = codec::serialize(entity).map_err(HbError::from)?;
        let values = table
            .columns
            .iter()
            .map(|column| bind_value(&record, column, entity))
            .collect::<Result<Vec<_>>>()?;

        conn.execute(&table.upsert_sql(), params_from_iter(values))
            .map_err(|e| from_rusqlite(e).with_entity_key(entity.key()))?;
        Ok(())
    }

    /// Replace the association rows of `place` with its `amenity_ids`
    pub fn sync_place_amenities(conn: &Connection, place: &Place) -> Result<()> {
        conn.execute(
            &format!("DELETE FROM {} WHERE place_id = ?1", PLACE_AMENITY_TABLE),
            [&place.base.id],
        )
        .map_err(from_rusqlite)?;

        let mut stmt = conn
            .prepare(&format!(
                "INSERT INTO {} (place_id, amenity_id) VALUES (?1, ?2)",
                PLACE_AMENITY_TABLE
            ))
            .map_err(from_rusqlite)?;
        for amenity_id in &place.amenity_ids {
            stmt.execute([&place.base.id, amenity_id])
                .map_err(from_rusqlite)?;
        }
        Ok(())
    }

    /// Delete one row; dependents go with it through `ON DELETE CASCADE`
    ///
    /// Returns the number of rows removed from the Kind's own table.
    pub fn delete(conn: &Connection, kind: Kind, id: &str) -> Result<usize> {
        conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", table_for(kind).name),
            [id],
        )
        .map_err(from_rusqlite)
    }

    pub fn exists(conn: &Connection, kind: Kind, id: &str) -> Result<bool> {
        let found = conn
            .query_row(
                &format!("SELECT 1 FROM {} WHERE id = ?1", table_for(kind).name),
                [id],
                |_| Ok(()),
            )
            .optional()
            .map_err(from_rusqlite)?;
        Ok(found.is_some())
    }

    pub fn count(conn: &Connection, kind: Kind) -> Result<usize> {
        let count: i64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {}", table_for(kind).name),
                [],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;
        Ok(count as usize)
    }

    /// Full table scan of one Kind
    pub fn load_kind(conn: &Connection, kind: Kind) -> Result<Vec<Entity>> {
        let table = table_for(kind);
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM {} ORDER BY id",
                table.column_list(),
                table.name
            ))
            .map_err(from_rusqlite)?;
        let records = stmt
            .query_map([], |row| row_to_record(row, table))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        let mut links = if kind == Kind::Place {
            Self::load_amenity_links(conn, None)?
        } else {
            BTreeMap::new()
        };

        records
            .into_iter()
            .map(|mut record| {
                if kind == Kind::Place {
                    let ids = record
                        .id()
                        .and_then(|id| links.remove(id))
                        .unwrap_or_default();
                    record.insert("amenity_ids", ids);
                }
                decode(record)
            })
            .collect()
    }

    /// One row by id, `None` if absent
    pub fn load_one(conn: &Connection, kind: Kind, id: &str) -> Result<Option<Entity>> {
        let table = table_for(kind);
        let record = conn
            .query_row(
                &format!(
                    "SELECT {} FROM {} WHERE id = ?1",
                    table.column_list(),
                    table.name
                ),
                [id],
                |row| row_to_record(row, table),
            )
            .optional()
            .map_err(from_rusqlite)?;

        let Some(mut record) = record else {
            return Ok(None);
        };
        if kind == Kind::Place {
            let ids = Self::load_amenity_links(conn, Some(id))?
                .remove(id)
                .unwrap_or_default();
            record.insert("amenity_ids", ids);
        }
        decode(record).map(Some)
    }

    /// Amenity ids per place id, in link order
    fn load_amenity_links(
        conn: &Connection,
        place_id: Option<&str>,
    ) -> Result<BTreeMap<String, Vec<String>>> {
        let (sql, params): (String, Vec<&str>) = match place_id {
            Some(id) => (
                format!(
                    "SELECT place_id, amenity_id FROM {} WHERE place_id = ?1 ORDER BY rowid",
                    PLACE_AMENITY_TABLE
                ),
                vec![id],
            ),
            None => (
                format!(
                    "SELECT place_id, amenity_id FROM {} ORDER BY rowid",
                    PLACE_AMENITY_TABLE
                ),
                Vec::new(),
            ),
        };

        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let pairs = stmt
            .query_map(params_from_iter(params), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        let mut links: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (place, amenity) in pairs {
            links.entry(place).or_default().push(amenity);
        }
        Ok(links)
    }
}

fn decode(record: Record) -> Result<Entity> {
    codec::deserialize(record).map_err(|e| HbError::from(e).with_op("load"))
}

fn row_to_record(row: &Row<'_>, table: &TableDef) -> rusqlite::Result<Record> {
    let mut record = Record::tagged(table.kind);
    for (idx, column) in table.columns.iter().enumerate() {
        let value = match column.ty {
            ColumnType::Text => row.get::<_, Option<String>>(idx)?.map(Value::String),
            ColumnType::Integer => row.get::<_, Option<i64>>(idx)?.map(Value::from),
            ColumnType::Real => row.get::<_, Option<f64>>(idx)?.map(Value::from),
        };
        // NULL columns fall back to the Kind default on decode
        if let Some(value) = value.filter(|v| !v.is_null()) {
            record.insert(column.name, value);
        }
    }
    Ok(record)
}

fn bind_value(record: &Record, column: &Column, entity: &Entity) -> Result<SqlValue> {
    let bound = match (record.get(column.name), column.ty) {
        (None, _) | (Some(Value::Null), _) => Some(SqlValue::Null),
        (Some(Value::String(s)), ColumnType::Text) => Some(SqlValue::Text(s.clone())),
        (Some(Value::Number(n)), ColumnType::Integer) => n.as_i64().map(SqlValue::Integer),
        (Some(Value::Number(n)), ColumnType::Real) => n.as_f64().map(SqlValue::Real),
        _ => None,
    };
    bound.ok_or_else(|| {
        HbError::new(HbErrorKind::Schema)
            .with_op("upsert")
            .with_entity_key(entity.key())
            .with_message(format!(
                "attribute '{}' does not fit a {:?} column",
                column.name, column.ty
            ))
    })
}
