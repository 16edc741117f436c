//! Team entity

use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::orm::{ColumnDef, DatabaseEntity, DatabaseSchema, FromSqlRow};

use super::member::Member;

crate::entity_path!(QTeam, "team", "t", [id, name]);

/// Default team path, aliased `t`
pub const TEAM: QTeam = QTeam::new("t");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

/// A team together with the members that reference it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamWithMembers {
    pub team: Team,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
}

impl NewTeam {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl DatabaseEntity for Team {
    const TABLE_NAME: &'static str = QTeam::TABLE;
    const PRIMARY_KEY: &'static str = "id";
    const DEFAULT_ALIAS: &'static str = "t";
    const DEFAULT_SORT: &'static str = "t.id";

    fn column_names() -> &'static [&'static str] {
        QTeam::COLUMNS
    }
}

impl DatabaseSchema for Team {
    fn columns() -> &'static [ColumnDef] {
        const COLUMNS: &[ColumnDef] = &[
            ColumnDef {
                name: "id",
                sql_type: "INTEGER",
                nullable: false,
                is_primary_key: true,
                default: None,
                references: None,
            },
            ColumnDef {
                name: "name",
                sql_type: "TEXT",
                nullable: false,
                is_primary_key: false,
                default: None,
                references: None,
            },
        ];
        COLUMNS
    }
}

impl FromSqlRow for Team {
    fn from_prefixed_row(row: &SqliteRow, prefix: &str) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(format!("{prefix}id").as_str())?,
            name: row.try_get(format!("{prefix}name").as_str())?,
        })
    }
}
