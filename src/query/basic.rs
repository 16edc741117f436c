//! Lookups, fetch variants, sorting and paging over members

use crate::entity::{MEMBER, Member};
use crate::orm::{OrderDirection, QueryResult, QueryResults, SqlValue};

use super::MemberQueries;

impl MemberQueries {
    /// Single member by username. Errors when the name is not unique.
    pub async fn find_by_username(&self, username: &str) -> QueryResult<Option<Member>> {
        Self::select_from()
            .where_clause(format!("{} = ?", MEMBER.username()), vec![username.into()])
            .fetch_one(self.pool())
            .await
    }

    /// Members matching both the username and the age
    pub async fn find_by_username_and_age(
        &self,
        username: &str,
        age: i32,
    ) -> QueryResult<Vec<Member>> {
        Self::select_from()
            .where_clause(format!("{} = ?", MEMBER.username()), vec![username.into()])
            .where_clause(format!("{} = ?", MEMBER.age()), vec![age.into()])
            .default_order()
            .fetch_all(self.pool())
            .await
    }

    /// Named members of the given age
    pub async fn find_named_with_age(&self, age: i32) -> QueryResult<Vec<Member>> {
        Self::select_from()
            .where_clause(
                format!("{} IS NOT NULL AND {} = ?", MEMBER.username(), MEMBER.age()),
                vec![age.into()],
            )
            .default_order()
            .fetch_all(self.pool())
            .await
    }

    pub async fn find_all(&self) -> QueryResult<Vec<Member>> {
        Self::select_from()
            .default_order()
            .fetch_all(self.pool())
            .await
    }

    /// Lowest-id member, if any
    pub async fn find_first(&self) -> QueryResult<Option<Member>> {
        Self::select_from()
            .default_order()
            .fetch_first(self.pool())
            .await
    }

    pub async fn count(&self) -> QueryResult<i64> {
        Self::select_from().fetch_count(self.pool()).await
    }

    /// Every member together with the total count
    pub async fn fetch_results(&self) -> QueryResult<QueryResults<Member>> {
        Self::select_from()
            .default_order()
            .fetch_results(self.pool())
            .await
    }

    /// Members of the given age, oldest first, then by username with
    /// unnamed members last.
    pub async fn find_by_age_sorted(&self, age: i32) -> QueryResult<Vec<Member>> {
        Self::select_from()
            .where_clause(format!("{} = ?", MEMBER.age()), vec![SqlValue::from(age)])
            .order_by(MEMBER.age(), OrderDirection::Desc)
            .order_by_nulls_last(MEMBER.username(), OrderDirection::Asc)
            .fetch_all(self.pool())
            .await
    }

    /// One page of members ordered by username
    pub async fn page_by_username(&self, offset: i64, limit: i64) -> QueryResult<Vec<Member>> {
        Self::select_from()
            .order_by(MEMBER.username(), OrderDirection::Asc)
            .offset(offset)
            .limit(limit)
            .fetch_all(self.pool())
            .await
    }

    /// Same page as [`page_by_username`](Self::page_by_username) plus the total
    pub async fn page_results_by_username(
        &self,
        offset: i64,
        limit: i64,
    ) -> QueryResult<QueryResults<Member>> {
        Self::select_from()
            .order_by(MEMBER.username(), OrderDirection::Asc)
            .offset(offset)
            .limit(limit)
            .fetch_results(self.pool())
            .await
    }
}
