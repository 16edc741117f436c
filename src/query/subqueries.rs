//! Subqueries in WHERE and SELECT
//!
//! The inner query ranges over its own member path (`ms`) so it does not
//! correlate with the outer `m`.

use crate::dto::UsernameWithAverage;
use crate::entity::{MEMBER, Member};
use crate::orm::{QueryResult, SqlValue};

use super::MemberQueries;

impl MemberQueries {
    /// `SELECT {aggregate}(ms.age) FROM member ms`
    fn age_subquery(aggregate: &str) -> String {
        let sub = Self::member_sub();
        format!("(SELECT {}({}) FROM {})", aggregate, sub.age(), sub.from_clause())
    }

    /// Members whose age equals the maximum age
    pub async fn find_oldest(&self) -> QueryResult<Vec<Member>> {
        Self::select_from()
            .where_clause(format!("{} = {}", MEMBER.age(), Self::age_subquery("MAX")), vec![])
            .default_order()
            .fetch_all(self.pool())
            .await
    }

    /// Members at least as old as the average
    pub async fn find_at_least_average_age(&self) -> QueryResult<Vec<Member>> {
        Self::select_from()
            .where_clause(format!("{} >= {}", MEMBER.age(), Self::age_subquery("AVG")), vec![])
            .default_order()
            .fetch_all(self.pool())
            .await
    }

    /// Members whose age appears among the ages above `age`
    pub async fn find_with_age_in_older_than(&self, age: i32) -> QueryResult<Vec<Member>> {
        let sub = Self::member_sub();
        let condition = format!(
            "{} IN (SELECT {} FROM {} WHERE {} > ?)",
            MEMBER.age(),
            sub.age(),
            sub.from_clause(),
            sub.age()
        );
        Self::select_from()
            .where_clause(condition, vec![SqlValue::from(age)])
            .default_order()
            .fetch_all(self.pool())
            .await
    }

    /// Each username next to the average age of all members
    pub async fn usernames_with_average_age(&self) -> QueryResult<Vec<UsernameWithAverage>> {
        let sql = format!(
            "SELECT {} AS username, {} AS average_age FROM {} ORDER BY {}",
            MEMBER.username(),
            Self::age_subquery("AVG"),
            MEMBER.from_clause(),
            MEMBER.id()
        );
        tracing::debug!(sql = %sql, "Executing select subquery");

        Ok(sqlx::query_as::<_, UsernameWithAverage>(&sql)
            .fetch_all(self.pool())
            .await?)
    }
}
