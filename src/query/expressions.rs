//! CASE expressions, constants, concatenation and SQL functions
//!
//! Labels and constants are bound as parameters, never spliced into the SQL.

use crate::entity::MEMBER;
use crate::orm::{QueryResult, SqlValue};

use super::MemberQueries;

impl MemberQueries {
    async fn fetch_labels(&self, sql: &str, values: &[SqlValue]) -> QueryResult<Vec<String>> {
        tracing::debug!(sql = %sql, "Executing expression query");

        let mut query = sqlx::query_scalar::<_, String>(sql);
        for value in values {
            query = value.bind_to_scalar(query);
        }
        Ok(query.fetch_all(self.pool()).await?)
    }

    /// One label per member: the label of the first exact age match in
    /// `cases`, else `otherwise`.
    pub async fn age_labels(
        &self,
        cases: &[(i32, &str)],
        otherwise: &str,
    ) -> QueryResult<Vec<String>> {
        let mut values = Vec::with_capacity(cases.len() * 2 + 1);
        let mut sql = format!("SELECT CASE {}", MEMBER.age());
        for (age, label) in cases {
            sql.push_str(" WHEN ? THEN ?");
            values.push(SqlValue::from(*age));
            values.push(SqlValue::from(*label));
        }
        sql.push_str(&format!(
            " ELSE ? END FROM {} ORDER BY {}",
            MEMBER.from_clause(),
            MEMBER.id()
        ));
        values.push(SqlValue::from(otherwise));

        self.fetch_labels(&sql, &values).await
    }

    /// One label per member: the label of the first inclusive
    /// `(low, high)` range containing the age, else `otherwise`.
    pub async fn age_ranges(
        &self,
        ranges: &[(i32, i32, &str)],
        otherwise: &str,
    ) -> QueryResult<Vec<String>> {
        let mut values = Vec::with_capacity(ranges.len() * 3 + 1);
        let mut sql = String::from("SELECT CASE");
        for (low, high, label) in ranges {
            sql.push_str(&format!(" WHEN {} BETWEEN ? AND ? THEN ?", MEMBER.age()));
            values.push(SqlValue::from(*low));
            values.push(SqlValue::from(*high));
            values.push(SqlValue::from(*label));
        }
        sql.push_str(&format!(
            " ELSE ? END FROM {} ORDER BY {}",
            MEMBER.from_clause(),
            MEMBER.id()
        ));
        values.push(SqlValue::from(otherwise));

        self.fetch_labels(&sql, &values).await
    }

    /// Each username paired with the same constant
    pub async fn usernames_with_constant(
        &self,
        constant: &str,
    ) -> QueryResult<Vec<(Option<String>, String)>> {
        let sql = format!(
            "SELECT {}, ? FROM {} ORDER BY {}",
            MEMBER.username(),
            MEMBER.from_clause(),
            MEMBER.id()
        );
        tracing::debug!(sql = %sql, "Executing constant projection");

        Ok(sqlx::query_as::<_, (Option<String>, String)>(&sql)
            .bind(constant)
            .fetch_all(self.pool())
            .await?)
    }

    /// `{username}_{age}` for members with the given username
    pub async fn username_age_labels(&self, username: &str) -> QueryResult<Vec<String>> {
        let sql = format!(
            "SELECT {name} || '_' || CAST({age} AS TEXT) FROM {from} WHERE {name} = ? ORDER BY {id}",
            name = MEMBER.username(),
            age = MEMBER.age(),
            from = MEMBER.from_clause(),
            id = MEMBER.id(),
        );
        self.fetch_labels(&sql, &[SqlValue::from(username)]).await
    }

    /// Usernames with every occurrence of `from` replaced by `to`
    pub async fn usernames_replaced(&self, from: &str, to: &str) -> QueryResult<Vec<Option<String>>> {
        let sql = format!(
            "SELECT replace({}, ?, ?) FROM {} ORDER BY {}",
            MEMBER.username(),
            MEMBER.from_clause(),
            MEMBER.id()
        );
        tracing::debug!(sql = %sql, "Executing replace projection");

        Ok(sqlx::query_scalar::<_, Option<String>>(&sql)
            .bind(from)
            .bind(to)
            .fetch_all(self.pool())
            .await?)
    }

    /// Usernames already in lower case
    pub async fn lowercase_usernames(&self) -> QueryResult<Vec<String>> {
        let sql = format!(
            "SELECT {name} FROM {from} WHERE {name} = lower({name}) ORDER BY {id}",
            name = MEMBER.username(),
            from = MEMBER.from_clause(),
            id = MEMBER.id(),
        );
        self.fetch_labels(&sql, &[]).await
    }
}
