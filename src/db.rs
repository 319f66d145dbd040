// ============================
// session-guard/src/db.rs
// ============================
//! Database collaborator interface.
//!
//! The security core does not persist anything itself; the host layer
//! hands it (and the rest of the application) a [`Database`] implementation.
//! Every operation binds values through named placeholders, and the
//! statement builders iterate bindings in sorted key order so a given
//! field set always produces the same statement shape.
use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::AppError;

/// Named bindings for one statement. Sorted iteration is what makes the
/// statement shape deterministic.
pub type Bindings = BTreeMap<String, Value>;

/// One result row, keyed by column name.
pub type Row = Map<String, Value>;

/// How `select` shapes its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Column-name keyed rows
    Assoc,
    /// Positional values in column order
    Numeric,
}

/// Abstract parameterized-query database.
///
/// Implementations prepare the exact statements produced by the builders
/// below and bind each `:key` placeholder from the matching bindings
/// entry. Unreachable backends surface [`AppError::StorageUnavailable`].
pub trait Database {
    fn select(
        &self,
        query: &str,
        bindings: &Bindings,
        fetch_mode: FetchMode,
    ) -> Result<Vec<Row>, AppError>;

    fn insert(&mut self, table: &str, data: &Bindings) -> Result<(), AppError>;

    fn update(
        &mut self,
        table: &str,
        data: &Bindings,
        where_clause: &str,
        bindings: &Bindings,
    ) -> Result<u64, AppError>;

    fn delete(
        &mut self,
        table: &str,
        where_clause: &str,
        bindings: &Bindings,
        limit: Option<u64>,
    ) -> Result<u64, AppError>;
}

/// `INSERT INTO table (a, b) VALUES (:a, :b)` with fields in sorted order.
pub fn insert_statement(table: &str, data: &Bindings) -> String {
    let fields = data.keys().cloned().collect::<Vec<_>>().join(", ");
    let placeholders = data
        .keys()
        .map(|k| format!(":{k}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {table} ({fields}) VALUES ({placeholders})")
}

/// `UPDATE table SET a=:a, b=:b WHERE ...` with fields in sorted order.
pub fn update_statement(table: &str, data: &Bindings, where_clause: &str) -> String {
    let assignments = data
        .keys()
        .map(|k| format!("{k}=:{k}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("UPDATE {table} SET {assignments} WHERE {where_clause}")
}

/// `DELETE FROM table WHERE ...` with an optional row limit.
pub fn delete_statement(table: &str, where_clause: &str, limit: Option<u64>) -> String {
    match limit {
        Some(n) => format!("DELETE FROM {table} WHERE {where_clause} LIMIT {n}"),
        None => format!("DELETE FROM {table} WHERE {where_clause}"),
    }
}
