//! Cafe use cases: the record store behind every route.

use crate::domain::{Level, Scale};
use crate::error::AppError;
use crate::infra::get_connection;
use crate::infra::DbPool;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

const SELECT_COLUMNS: &str =
    "SELECT id, name, location, rating, wifi, power, created_at, updated_at FROM cafes";

#[derive(Debug, Clone, PartialEq)]
pub struct CafeDto {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub rating: String,
    pub wifi: String,
    pub power: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Validated, writable fields of a cafe. Produced by the form validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CafeFields {
    pub name: String,
    pub location: String,
    pub rating: Level,
    pub wifi: Level,
    pub power: Level,
}

impl CafeFields {
    fn symbols(&self) -> (String, String, String) {
        (
            Scale::Rating.symbol(self.rating),
            Scale::Wifi.symbol(self.wifi),
            Scale::Power.symbol(self.power),
        )
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<CafeDto> {
    Ok(CafeDto {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        rating: row.get(3)?,
        wifi: row.get(4)?,
        power: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Writes that trip the UNIQUE index on `name` become a Conflict.
fn map_write_err(e: rusqlite::Error, name: &str) -> AppError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            AppError::Conflict(format!("cafe name '{}' already exists", name))
        }
        _ => AppError::Db(e.to_string()),
    }
}

/// All cafes in storage order.
pub fn cafe_list(pool: &DbPool) -> Result<Vec<CafeDto>, AppError> {
    let conn = get_connection(pool);
    let mut stmt = conn
        .prepare(&format!("{} ORDER BY id", SELECT_COLUMNS))
        .map_err(|e| AppError::Db(e.to_string()))?;
    let rows = stmt.query_map([], map_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| AppError::Db(e.to_string()))?);
    }
    Ok(out)
}

pub fn cafe_get(pool: &DbPool, id: i64) -> Result<CafeDto, AppError> {
    let conn = get_connection(pool);
    conn.query_row(&format!("{} WHERE id = ?1", SELECT_COLUMNS), [id], map_row)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("cafe {}", id)))
}

pub fn cafe_create(pool: &DbPool, fields: CafeFields) -> Result<CafeDto, AppError> {
    let now = Utc::now().to_rfc3339();
    let (rating, wifi, power) = fields.symbols();

    let conn = get_connection(pool);
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| AppError::Db(e.to_string()))?;
    tx.execute(
        "INSERT INTO cafes (name, location, rating, wifi, power, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![&fields.name, &fields.location, &rating, &wifi, &power, &now],
    )
    .map_err(|e| map_write_err(e, &fields.name))?;
    let id = tx.last_insert_rowid();
    tx.commit().map_err(|e| AppError::Db(e.to_string()))?;

    log::info!("Created cafe {} ({})", id, fields.name);
    Ok(CafeDto {
        id,
        name: fields.name,
        location: fields.location,
        rating,
        wifi,
        power,
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Overwrites every writable field of an existing cafe; `id` and `created_at` are kept.
pub fn cafe_update(pool: &DbPool, id: i64, fields: CafeFields) -> Result<CafeDto, AppError> {
    let now = Utc::now().to_rfc3339();
    let (rating, wifi, power) = fields.symbols();

    let conn = get_connection(pool);
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| AppError::Db(e.to_string()))?;

    let created_at: String = tx
        .query_row("SELECT created_at FROM cafes WHERE id = ?1", [id], |r| r.get(0))
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("cafe {}", id)))?;

    tx.execute(
        "UPDATE cafes SET name = ?1, location = ?2, rating = ?3, wifi = ?4, power = ?5, updated_at = ?6 WHERE id = ?7",
        params![&fields.name, &fields.location, &rating, &wifi, &power, &now, id],
    )
    .map_err(|e| map_write_err(e, &fields.name))?;
    tx.commit().map_err(|e| AppError::Db(e.to_string()))?;

    log::info!("Updated cafe {}", id);
    Ok(CafeDto {
        id,
        name: fields.name,
        location: fields.location,
        rating,
        wifi,
        power,
        created_at,
        updated_at: now,
    })
}

/// Hard delete. NotFound when no row had this id.
pub fn cafe_delete(pool: &DbPool, id: i64) -> Result<(), AppError> {
    let conn = get_connection(pool);
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| AppError::Db(e.to_string()))?;
    let removed = tx.execute("DELETE FROM cafes WHERE id = ?1", [id])?;
    if removed == 0 {
        return Err(AppError::NotFound(format!("cafe {}", id)));
    }
    tx.commit().map_err(|e| AppError::Db(e.to_string()))?;

    log::info!("Deleted cafe {}", id);
    Ok(())
}
