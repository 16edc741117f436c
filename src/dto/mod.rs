//! Projection targets and search input
//!
//! These are plain value holders filled by the query layer; none of them is
//! persisted.

mod search;

pub use search::MemberSearchCondition;

use serde::{Deserialize, Serialize};

use crate::entity::{Member, Team};

/// Username and age of a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberDto {
    pub username: Option<String>,
    pub age: i32,
}

impl MemberDto {
    pub fn new(username: Option<String>, age: i32) -> Self {
        Self { username, age }
    }
}

/// Same data as [`MemberDto`] under different field names; the query aliases
/// its columns to `name` and `age`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserDto {
    pub name: Option<String>,
    pub age: i32,
}

/// One row of a member search: the member and its team, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamDto {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

/// Average member age of one team.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamAverageAge {
    pub team_name: String,
    pub average_age: f64,
}

/// Aggregates over every member's age.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct AgeStatistics {
    pub count: i64,
    pub sum: Option<i64>,
    pub average: Option<f64>,
    pub max: Option<i32>,
    pub min: Option<i32>,
}

/// A member next to the team produced by an outer join.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberWithTeam {
    pub member: Member,
    pub team: Option<Team>,
}

/// A username next to the overall average age.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UsernameWithAverage {
    pub username: Option<String>,
    pub average_age: f64,
}
