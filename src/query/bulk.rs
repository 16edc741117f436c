//! Set-based updates and deletes
//!
//! These statements bypass any member values already loaded; callers
//! re-query to observe the new state. Bulk statements cannot alias their
//! target table, so columns are unqualified here.

use crate::entity::QMember;
use crate::orm::QueryResult;

use super::MemberQueries;

impl MemberQueries {
    /// Set the username of every member younger than `age`
    pub async fn rename_younger_than(&self, age: i32, username: &str) -> QueryResult<u64> {
        let sql = format!("UPDATE {} SET username = ? WHERE age < ?", QMember::TABLE);
        tracing::debug!(sql = %sql, "Executing bulk update");

        let result = sqlx::query(&sql)
            .bind(username)
            .bind(age)
            .execute(self.pool())
            .await?;
        tracing::info!(rows = result.rows_affected(), "Renamed members younger than {age}");
        Ok(result.rows_affected())
    }

    /// Add `delta` to every member's age
    pub async fn add_age(&self, delta: i32) -> QueryResult<u64> {
        let sql = format!("UPDATE {} SET age = age + ?", QMember::TABLE);
        tracing::debug!(sql = %sql, "Executing bulk update");

        let result = sqlx::query(&sql).bind(delta).execute(self.pool()).await?;
        tracing::info!(rows = result.rows_affected(), delta, "Shifted member ages");
        Ok(result.rows_affected())
    }

    /// Delete every member older than `age`
    pub async fn delete_older_than(&self, age: i32) -> QueryResult<u64> {
        let sql = format!("DELETE FROM {} WHERE age > ?", QMember::TABLE);
        tracing::debug!(sql = %sql, "Executing bulk delete");

        let result = sqlx::query(&sql).bind(age).execute(self.pool()).await?;
        tracing::info!(rows = result.rows_affected(), "Deleted members older than {age}");
        Ok(result.rows_affected())
    }
}
