//! Predicates assembled from optional inputs
//!
//! Two styles build the same conjunction: accumulating conditions on the
//! query one by one, or composing [`Predicate`]s where `None` means "no
//! constraint". [`MemberSearchCondition`] drives the team-aware search used
//! by the HTTP API.

use crate::dto::{MemberSearchCondition, MemberTeamDto};
use crate::entity::{MEMBER, Member, TEAM};
use crate::orm::{DatabaseFilter, Page, PageRequest, Predicate, QueryResult, SqlValue};

use super::MemberQueries;

/// `m.username = ?`, or nothing when no username is given
pub fn username_eq(username: Option<&str>) -> Option<Predicate> {
    username.map(|u| Predicate::equals(MEMBER.username(), u))
}

/// `m.age = ?`, or nothing when no age is given
pub fn age_eq(age: Option<i32>) -> Option<Predicate> {
    age.map(|a| Predicate::equals(MEMBER.age(), a))
}

/// Conjunction of both optional predicates
pub fn all_eq(username: Option<&str>, age: Option<i32>) -> Option<Predicate> {
    match username_eq(username) {
        Some(p) => Some(p.and(age_eq(age))),
        None => age_eq(age),
    }
}

impl MemberQueries {
    /// Members matching whichever of username and age are given
    pub async fn search_members(
        &self,
        username: Option<&str>,
        age: Option<i32>,
    ) -> QueryResult<Vec<Member>> {
        let mut query = Self::select_from();
        if let Some(username) = username {
            query = query.where_clause(format!("{} = ?", MEMBER.username()), vec![username.into()]);
        }
        if let Some(age) = age {
            query = query.where_clause(format!("{} = ?", MEMBER.age()), vec![age.into()]);
        }
        query.default_order().fetch_all(self.pool()).await
    }

    /// Same result as [`search_members`](Self::search_members), written as a
    /// list of optional predicates.
    pub async fn search_members_where(
        &self,
        username: Option<&str>,
        age: Option<i32>,
    ) -> QueryResult<Vec<Member>> {
        Self::select_from()
            .where_opt(username_eq(username))
            .where_opt(age_eq(age))
            .default_order()
            .fetch_all(self.pool())
            .await
    }

    fn search_from(condition: &MemberSearchCondition) -> (String, Vec<SqlValue>) {
        let (where_sql, values) = condition.where_sql();
        let from = format!(
            " FROM {} LEFT JOIN {} ON {} = {}{}",
            MEMBER.from_clause(),
            TEAM.from_clause(),
            MEMBER.team_id(),
            TEAM.id(),
            where_sql
        );
        (from, values)
    }

    async fn search_content(
        &self,
        condition: &MemberSearchCondition,
        paging: Option<&PageRequest>,
    ) -> QueryResult<Vec<MemberTeamDto>> {
        let (from, values) = Self::search_from(condition);
        let mut sql = format!(
            "SELECT {} AS member_id, {} AS username, {} AS age, {} AS team_id, {} AS team_name{} ORDER BY {}",
            MEMBER.id(),
            MEMBER.username(),
            MEMBER.age(),
            TEAM.id(),
            TEAM.name(),
            from,
            MEMBER.id()
        );
        if let Some(paging) = paging {
            sql.push_str(&format!(" LIMIT {} OFFSET {}", paging.size, paging.offset()));
        }
        tracing::debug!(sql = %sql, "Executing member search");

        let mut query = sqlx::query_as::<_, MemberTeamDto>(&sql);
        for value in &values {
            query = value.bind_to_query_as(query);
        }
        Ok(query.fetch_all(self.pool()).await?)
    }

    /// Members with their team, filtered by the condition, in id order
    pub async fn search(&self, condition: &MemberSearchCondition) -> QueryResult<Vec<MemberTeamDto>> {
        self.search_content(condition, None).await
    }

    /// Number of rows [`search`](Self::search) would return
    pub async fn search_count(&self, condition: &MemberSearchCondition) -> QueryResult<i64> {
        let (from, values) = Self::search_from(condition);
        let sql = format!("SELECT COUNT({}){}", MEMBER.id(), from);
        tracing::debug!(sql = %sql, "Executing member search count");

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in &values {
            query = value.bind_to_scalar(query);
        }
        Ok(query.fetch_one(self.pool()).await?)
    }

    /// One page of the search, always running the count query
    pub async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        request: PageRequest,
    ) -> QueryResult<Page<MemberTeamDto>> {
        let request = request.normalized();
        let total = self.search_count(condition).await?;
        let content = self.search_content(condition, Some(&request)).await?;
        Ok(Page::new(content, request, total))
    }

    /// One page of the search. The count query only runs when the total
    /// cannot be derived from the page itself.
    pub async fn search_page_complex(
        &self,
        condition: &MemberSearchCondition,
        request: PageRequest,
    ) -> QueryResult<Page<MemberTeamDto>> {
        let request = request.normalized();
        let content = self.search_content(condition, Some(&request)).await?;
        Page::assemble(content, request, || self.search_count(condition)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_inputs_give_no_predicate() {
        assert_eq!(username_eq(None), None);
        assert_eq!(age_eq(None), None);
        assert_eq!(all_eq(None, None), None);
    }

    #[test]
    fn all_eq_combines_present_inputs() {
        assert_eq!(all_eq(None, Some(10)), age_eq(Some(10)));

        let both = all_eq(Some("member1"), Some(10)).unwrap();
        assert_eq!(both.sql, "(m.username = ?) AND (m.age = ?)");
        assert_eq!(both.values, vec![SqlValue::from("member1"), SqlValue::Int(10)]);
    }
}
