//! Core traits for the ORM layer
//!
//! Entities implement these by hand next to their `entity_path!` meta-model.
//! SQL stays parameterized: conditions carry `?` placeholders and the values
//! travel alongside as [`SqlValue`]s.

use sqlx::Row;
use sqlx::Sqlite;
use sqlx::sqlite::{SqliteArguments, SqliteRow};

/// Column definition for schema generation.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    /// Column name in the database
    pub name: &'static str,
    /// SQLite column type (TEXT, INTEGER, REAL, BLOB)
    pub sql_type: &'static str,
    /// Whether the column can be NULL
    pub nullable: bool,
    /// Whether this is the primary key
    pub is_primary_key: bool,
    /// Default value expression (e.g., "0")
    pub default: Option<&'static str>,
    /// Referenced table for foreign keys (always its `id` column)
    pub references: Option<&'static str>,
}

impl ColumnDef {
    /// Generate the column definition SQL
    pub fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.sql_type);

        if self.is_primary_key {
            sql.push_str(" PRIMARY KEY AUTOINCREMENT");
        }

        if !self.nullable && !self.is_primary_key {
            sql.push_str(" NOT NULL");
        }

        if let Some(default) = self.default {
            sql.push_str(&format!(" DEFAULT {}", default));
        }

        if let Some(table) = self.references {
            sql.push_str(&format!(" REFERENCES {}(id)", table));
        }

        sql
    }
}

/// Trait for database schema generation and migration.
pub trait DatabaseSchema: DatabaseEntity {
    /// Get all column definitions for this entity's table
    fn columns() -> &'static [ColumnDef];

    /// Generate CREATE TABLE IF NOT EXISTS SQL
    fn create_table_sql() -> String {
        let column_defs: Vec<String> = Self::columns().iter().map(|c| c.to_sql()).collect();

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
            Self::TABLE_NAME,
            column_defs.join(",\n  ")
        )
    }

    /// Get column names that exist in the entity definition
    fn defined_column_names() -> Vec<&'static str> {
        Self::columns().iter().map(|c| c.name).collect()
    }
}

/// Metadata about a database entity (table).
pub trait DatabaseEntity: Sized + Send + Sync {
    /// The SQL table name (e.g., "member")
    const TABLE_NAME: &'static str;

    /// The primary key column name (e.g., "id")
    const PRIMARY_KEY: &'static str;

    /// Alias used when the entity is the root of a query (e.g., "m")
    const DEFAULT_ALIAS: &'static str;

    /// Default sort column for list queries (qualified, e.g. "m.id")
    const DEFAULT_SORT: &'static str;

    /// Default sort direction
    const DEFAULT_SORT_DIR: &'static str = "ASC";

    /// List of all column names in the table
    fn column_names() -> &'static [&'static str];

    /// Aliased projection of every column, each exposed as `{prefix}{column}`
    fn projection(alias: &str, prefix: &str) -> String {
        Self::column_names()
            .iter()
            .map(|c| format!("{}.{} AS {}{}", alias, c, prefix, c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// FROM clause naming the table with its default alias
    fn from_clause() -> String {
        format!("{} {}", Self::TABLE_NAME, Self::DEFAULT_ALIAS)
    }

    /// Build a SELECT query for all columns
    fn select_sql() -> String {
        format!(
            "SELECT {} FROM {}",
            Self::projection(Self::DEFAULT_ALIAS, ""),
            Self::from_clause()
        )
    }
}

/// Trait for applying filters to a SQL query.
///
/// Implemented by search inputs such as `MemberSearchCondition`.
pub trait DatabaseFilter: Send + Sync {
    /// Return the WHERE clause fragments and the values to bind, in order.
    /// Absent fields contribute nothing.
    fn to_sql_conditions(&self) -> (Vec<String>, Vec<SqlValue>);

    /// Check if the filter has any conditions
    fn is_empty(&self) -> bool;

    /// Render the conditions as a WHERE clause (empty string when there are none)
    fn where_sql(&self) -> (String, Vec<SqlValue>) {
        let (conditions, values) = self.to_sql_conditions();
        if conditions.is_empty() {
            (String::new(), values)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), values)
        }
    }
}

/// Trait for decoding a database row into an entity.
pub trait FromSqlRow: Sized {
    /// Decode a row whose columns are exposed as `{prefix}{column}`
    fn from_prefixed_row(row: &SqliteRow, prefix: &str) -> Result<Self, sqlx::Error>;

    /// Decode an unprefixed row into this entity type
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Self::from_prefixed_row(row, "")
    }

    /// Decode the entity from the outer side of a join. A NULL primary key
    /// means the join found no row.
    fn from_optional_prefixed_row(row: &SqliteRow, prefix: &str) -> Result<Option<Self>, sqlx::Error>
    where
        Self: DatabaseEntity,
    {
        let key: Option<i64> = row.try_get(format!("{}{}", prefix, Self::PRIMARY_KEY).as_str())?;
        match key {
            Some(_) => Self::from_prefixed_row(row, prefix).map(Some),
            None => Ok(None),
        }
    }
}

/// Sort direction for ORDER BY clauses.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum OrderDirection {
    /// Ascending order (A-Z, 1-9)
    #[default]
    Asc,
    /// Descending order (Z-A, 9-1)
    Desc,
}

impl OrderDirection {
    /// Convert to SQL order string
    pub fn to_sql(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// Represents a SQL value that can be bound to a query.
///
/// Used by filters to collect values for parameterized queries.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;
type SqliteQueryAs<'q, O> = sqlx::query::QueryAs<'q, Sqlite, O, SqliteArguments<'q>>;
type SqliteQueryScalar<'q, O> = sqlx::query::QueryScalar<'q, Sqlite, O, SqliteArguments<'q>>;

impl SqlValue {
    /// Bind this value as the next positional parameter
    pub fn bind_to_query<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        match self {
            SqlValue::String(s) => query.bind(s.as_str()),
            SqlValue::Int(i) => query.bind(*i),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Bool(b) => query.bind(if *b { 1i32 } else { 0i32 }),
            SqlValue::Null => query.bind(None::<String>),
        }
    }

    /// Bind this value to a typed `query_as`
    pub fn bind_to_query_as<'q, O>(&'q self, query: SqliteQueryAs<'q, O>) -> SqliteQueryAs<'q, O> {
        match self {
            SqlValue::String(s) => query.bind(s.as_str()),
            SqlValue::Int(i) => query.bind(*i),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Bool(b) => query.bind(if *b { 1i32 } else { 0i32 }),
            SqlValue::Null => query.bind(None::<String>),
        }
    }

    /// Bind this value to a `query_scalar` (counts)
    pub fn bind_to_scalar<'q, O>(
        &'q self,
        query: SqliteQueryScalar<'q, O>,
    ) -> SqliteQueryScalar<'q, O> {
        match self {
            SqlValue::String(s) => query.bind(s.as_str()),
            SqlValue::Int(i) => query.bind(*i),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Bool(b) => query.bind(if *b { 1i32 } else { 0i32 }),
            SqlValue::Null => query.bind(None::<String>),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::String(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::String(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(i64::from(value))
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_def_renders_foreign_key() {
        let col = ColumnDef {
            name: "team_id",
            sql_type: "INTEGER",
            nullable: true,
            is_primary_key: false,
            default: None,
            references: Some("team"),
        };
        assert_eq!(col.to_sql(), "team_id INTEGER REFERENCES team(id)");
    }

    #[test]
    fn column_def_renders_not_null_default() {
        let col = ColumnDef {
            name: "age",
            sql_type: "INTEGER",
            nullable: false,
            is_primary_key: false,
            default: Some("0"),
            references: None,
        };
        assert_eq!(col.to_sql(), "age INTEGER NOT NULL DEFAULT 0");
    }

    #[test]
    fn primary_key_skips_not_null() {
        let col = ColumnDef {
            name: "id",
            sql_type: "INTEGER",
            nullable: false,
            is_primary_key: true,
            default: None,
            references: None,
        };
        assert_eq!(col.to_sql(), "id INTEGER PRIMARY KEY AUTOINCREMENT");
    }

    #[test]
    fn optional_values_become_null() {
        assert_eq!(SqlValue::from(None::<i32>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(10)), SqlValue::Int(10));
        assert_eq!(SqlValue::from("member1"), SqlValue::String("member1".into()));
    }
}
