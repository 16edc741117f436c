//! Scalar, tuple and DTO projections

use crate::dto::{MemberDto, UserDto};
use crate::entity::MEMBER;
use crate::orm::QueryResult;

use super::MemberQueries;

impl MemberQueries {
    pub async fn usernames(&self) -> QueryResult<Vec<Option<String>>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            MEMBER.username(),
            MEMBER.from_clause(),
            MEMBER.id()
        );
        tracing::debug!(sql = %sql, "Executing scalar projection");

        Ok(sqlx::query_scalar::<_, Option<String>>(&sql)
            .fetch_all(self.pool())
            .await?)
    }

    pub async fn username_age_pairs(&self) -> QueryResult<Vec<(Option<String>, i32)>> {
        let sql = format!(
            "SELECT {}, {} FROM {} ORDER BY {}",
            MEMBER.username(),
            MEMBER.age(),
            MEMBER.from_clause(),
            MEMBER.id()
        );
        tracing::debug!(sql = %sql, "Executing tuple projection");

        Ok(sqlx::query_as::<_, (Option<String>, i32)>(&sql)
            .fetch_all(self.pool())
            .await?)
    }

    pub async fn member_dtos(&self) -> QueryResult<Vec<MemberDto>> {
        let sql = format!(
            "SELECT {} AS username, {} AS age FROM {} ORDER BY {}",
            MEMBER.username(),
            MEMBER.age(),
            MEMBER.from_clause(),
            MEMBER.id()
        );
        tracing::debug!(sql = %sql, "Executing dto projection");

        Ok(sqlx::query_as::<_, MemberDto>(&sql)
            .fetch_all(self.pool())
            .await?)
    }

    /// Username exposed under the DTO's `name` field
    pub async fn user_dtos(&self) -> QueryResult<Vec<UserDto>> {
        let sql = format!(
            "SELECT {} AS name, {} AS age FROM {} ORDER BY {}",
            MEMBER.username(),
            MEMBER.age(),
            MEMBER.from_clause(),
            MEMBER.id()
        );
        tracing::debug!(sql = %sql, "Executing dto projection");

        Ok(sqlx::query_as::<_, UserDto>(&sql)
            .fetch_all(self.pool())
            .await?)
    }

    /// Every username paired with the maximum age, computed by a subquery
    /// and aliased into the `age` field.
    pub async fn user_dtos_with_max_age(&self) -> QueryResult<Vec<UserDto>> {
        let sub = Self::member_sub();
        let sql = format!(
            "SELECT {} AS name, (SELECT MAX({}) FROM {}) AS age FROM {} ORDER BY {}",
            MEMBER.username(),
            sub.age(),
            sub.from_clause(),
            MEMBER.from_clause(),
            MEMBER.id()
        );
        tracing::debug!(sql = %sql, "Executing dto projection");

        Ok(sqlx::query_as::<_, UserDto>(&sql)
            .fetch_all(self.pool())
            .await?)
    }
}
