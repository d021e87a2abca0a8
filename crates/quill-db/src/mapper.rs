//! Generic row mapper: static table metadata builds parameterized SQL, and
//! a small trait turns rows into entity values and back. Every statement
//! binds its values as parameters; nothing is ever spliced into the SQL
//! text. Mutations return the affected-row count and never raise on zero
//! rows; treating zero-affected as a failure is the caller's call.

use crate::Database;
use anyhow::Result;
use rusqlite::types::Value;
use rusqlite::{Row, params_from_iter};

/// Static description of a mapped table. `columns[0]` must be the primary
/// key; `values()` on the entity follows the same order.
pub struct TableSchema {
    pub table: &'static str,
    pub columns: &'static [&'static str],
    pub primary_key: &'static str,
}

impl TableSchema {
    fn column_list(&self) -> String {
        self.columns.join(", ")
    }

    /// `SELECT ... [WHERE ...] [ORDER BY ...] [LIMIT ? OFFSET ?]`.
    /// Filter clauses use bare `?` placeholders so the paging parameters
    /// can follow them positionally.
    pub fn select_sql(&self, filter: Option<&str>, order_by: Option<&str>, paged: bool) -> String {
        let mut sql = format!("SELECT {} FROM {}", self.column_list(), self.table);
        if let Some(filter) = filter {
            sql.push_str(" WHERE ");
            sql.push_str(filter);
        }
        if let Some(order_by) = order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }
        if paged {
            sql.push_str(" LIMIT ? OFFSET ?");
        }
        sql
    }

    pub fn select_by_id_sql(&self) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = ?",
            self.column_list(),
            self.table,
            self.primary_key
        )
    }

    pub fn count_sql(&self, filter: Option<&str>) -> String {
        let mut sql = format!("SELECT COUNT({}) FROM {}", self.primary_key, self.table);
        if let Some(filter) = filter {
            sql.push_str(" WHERE ");
            sql.push_str(filter);
        }
        sql
    }

    pub fn insert_sql(&self) -> String {
        let placeholders: Vec<String> = (1..=self.columns.len()).map(|i| format!("?{i}")).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            self.column_list(),
            placeholders.join(", ")
        )
    }

    /// Updates every non-key column by primary key. The key binds last.
    pub fn update_sql(&self) -> String {
        let assignments: Vec<String> = self.columns[1..]
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{} = ?{}", col, i + 1))
            .collect();
        format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            self.table,
            assignments.join(", "),
            self.primary_key,
            self.columns.len()
        )
    }

    pub fn delete_sql(&self) -> String {
        format!("DELETE FROM {} WHERE {} = ?1", self.table, self.primary_key)
    }
}

/// A value type mapped onto a table row.
pub trait Entity: Sized {
    fn schema() -> &'static TableSchema;

    /// Build the entity from a full row in schema column order.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Owned bind values in schema column order (primary key first).
    fn values(&self) -> Vec<Value>;
}

impl Database {
    pub fn find_all<E: Entity>(
        &self,
        filter: Option<&str>,
        params: &[Value],
        order_by: Option<&str>,
        page: Option<(u64, u64)>,
    ) -> Result<Vec<E>> {
        let sql = E::schema().select_sql(filter, order_by, page.is_some());
        let mut bound: Vec<Value> = params.to_vec();
        if let Some((offset, limit)) = page {
            bound.push(Value::from(limit as i64));
            bound.push(Value::from(offset as i64));
        }
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(bound), E::from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn find_by_id<E: Entity>(&self, id: &str) -> Result<Option<E>> {
        let sql = E::schema().select_by_id_sql();
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_row([id], E::from_row).optional()
        })
    }

    pub fn count<E: Entity>(&self, filter: Option<&str>, params: &[Value]) -> Result<u64> {
        let sql = E::schema().count_sql(filter);
        self.with_conn(|conn| {
            let n: i64 = conn.query_row(&sql, params_from_iter(params.iter()), |row| row.get(0))?;
            Ok(n as u64)
        })
    }

    pub fn insert<E: Entity>(&self, entity: &E) -> Result<usize> {
        let sql = E::schema().insert_sql();
        let values = entity.values();
        self.with_conn(|conn| Ok(conn.execute(&sql, params_from_iter(values))?))
    }

    pub fn update<E: Entity>(&self, entity: &E) -> Result<usize> {
        let sql = E::schema().update_sql();
        let mut values = entity.values();
        // Key binds last for the WHERE clause.
        let key = values.remove(0);
        values.push(key);
        self.with_conn(|conn| Ok(conn.execute(&sql, params_from_iter(values))?))
    }

    pub fn delete<E: Entity>(&self, id: &str) -> Result<usize> {
        let sql = E::schema().delete_sql();
        self.with_conn(|conn| Ok(conn.execute(&sql, [id])?))
    }
}

/// Extension trait for optional query results
pub(crate) trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
