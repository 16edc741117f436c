//! Member query patterns
//!
//! [`MemberQueries`] wraps the pool and exposes one method per query
//! pattern. It is cheap to clone and is passed explicitly wherever queries
//! run; there is no shared mutable query state.
//!
//! The methods are grouped by pattern:
//! - [`basic`]: lookups, fetch variants, sorting, paging
//! - [`aggregates`]: count/sum/avg/max/min and group by
//! - [`joins`]: inner, theta, outer-with-condition and fetch joins
//! - [`subqueries`]: subqueries in WHERE and SELECT
//! - [`expressions`]: CASE, constants, concatenation, SQL functions
//! - [`projections`]: scalar, tuple and DTO projections
//! - [`dynamic`]: predicates assembled from optional inputs
//! - [`bulk`]: set-based update and delete

pub mod aggregates;
pub mod basic;
pub mod bulk;
pub mod dynamic;
pub mod expressions;
pub mod joins;
pub mod projections;
pub mod subqueries;

use sqlx::SqlitePool;

use crate::entity::{Member, QMember};
use crate::orm::EntityQuery;

pub use dynamic::{age_eq, all_eq, username_eq};

/// Alias for the second member path used inside subqueries
pub const SUBQUERY_ALIAS: &str = "ms";

/// Column prefix for team columns selected next to member columns
pub const TEAM_PREFIX: &str = "t_";

/// Query handle over the member/team schema.
#[derive(Clone)]
pub struct MemberQueries {
    pool: SqlitePool,
}

impl MemberQueries {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Member path for subqueries, independent of the outer `m`
    pub fn member_sub() -> QMember {
        QMember::new(SUBQUERY_ALIAS)
    }

    fn select_from() -> EntityQuery<Member> {
        EntityQuery::new()
    }
}
