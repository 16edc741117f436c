//! Member entity
//!
//! A member belongs to at most one team. The owning team is only materialized
//! when the query fetch-joins it; otherwise just `team_id` is populated.

use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::orm::{ColumnDef, DatabaseEntity, DatabaseSchema, FromSqlRow};

use super::team::Team;

crate::entity_path!(QMember, "member", "m", [id, username, age, team_id]);

/// Default member path, aliased `m`
pub const MEMBER: QMember = QMember::new("m");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    /// Loaded only by fetch joins
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub team: Option<Team>,
}

impl Member {
    /// Whether the owning team was loaded together with this member
    pub fn is_team_loaded(&self) -> bool {
        self.team.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
}

impl NewMember {
    /// Member with a name only (age 0, no team)
    pub fn named(username: impl Into<String>) -> Self {
        Self::new(username, 0)
    }

    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self {
            username: Some(username.into()),
            age,
            team_id: None,
        }
    }

    pub fn with_team(username: impl Into<String>, age: i32, team_id: i64) -> Self {
        Self {
            team_id: Some(team_id),
            ..Self::new(username, age)
        }
    }

    /// Member without a username
    pub fn anonymous(age: i32) -> Self {
        Self {
            username: None,
            age,
            team_id: None,
        }
    }
}

impl DatabaseEntity for Member {
    const TABLE_NAME: &'static str = QMember::TABLE;
    const PRIMARY_KEY: &'static str = "id";
    const DEFAULT_ALIAS: &'static str = "m";
    const DEFAULT_SORT: &'static str = "m.id";

    fn column_names() -> &'static [&'static str] {
        QMember::COLUMNS
    }
}

impl DatabaseSchema for Member {
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
                name: "username",
                sql_type: "TEXT",
                nullable: true,
                is_primary_key: false,
                default: None,
                references: None,
            },
            ColumnDef {
                name: "age",
                sql_type: "INTEGER",
                nullable: false,
                is_primary_key: false,
                default: Some("0"),
                references: None,
            },
            ColumnDef {
                name: "team_id",
                sql_type: "INTEGER",
                nullable: true,
                is_primary_key: false,
                default: None,
                references: Some("team"),
            },
        ];
        COLUMNS
    }
}

impl FromSqlRow for Member {
    fn from_prefixed_row(row: &SqliteRow, prefix: &str) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(format!("{prefix}id").as_str())?,
            username: row.try_get(format!("{prefix}username").as_str())?,
            age: row.try_get(format!("{prefix}age").as_str())?,
            team_id: row.try_get(format!("{prefix}team_id").as_str())?,
            team: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_table_sql_has_foreign_key() {
        let sql = Member::create_table_sql();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS member ("));
        assert!(sql.contains("team_id INTEGER REFERENCES team(id)"));
        assert!(sql.contains("username TEXT,"));
    }

    #[test]
    fn new_member_constructors() {
        assert_eq!(NewMember::named("teamA").age, 0);
        assert_eq!(NewMember::with_team("member1", 10, 7).team_id, Some(7));
        assert_eq!(NewMember::anonymous(100).username, None);
    }

    #[test]
    fn path_columns() {
        let sub = QMember::new("ms");
        assert_eq!(MEMBER.team_id(), "m.team_id");
        assert_eq!(sub.age(), "ms.age");
    }
}
