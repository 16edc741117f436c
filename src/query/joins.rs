//! Joins: through the relation, theta joins, outer joins and fetch joins

use sqlx::sqlite::SqliteRow;

use crate::dto::MemberWithTeam;
use crate::entity::{MEMBER, Member, QMember, TEAM, Team};
use crate::orm::{FromSqlRow, QueryError, QueryResult, SqlValue};

use super::{MemberQueries, TEAM_PREFIX};

fn member_with_team(row: &SqliteRow) -> Result<MemberWithTeam, sqlx::Error> {
    Ok(MemberWithTeam {
        member: Member::from_row(row)?,
        team: Team::from_optional_prefixed_row(row, TEAM_PREFIX)?,
    })
}

impl MemberQueries {
    fn member_team_select(join: &str, on: &str) -> String {
        format!(
            "SELECT {}, {} FROM {} {} {} ON {}",
            MEMBER.projection(""),
            TEAM.projection(TEAM_PREFIX),
            MEMBER.from_clause(),
            join,
            TEAM.from_clause(),
            on,
        )
    }

    async fn fetch_members_with_team(
        &self,
        sql: &str,
        values: &[SqlValue],
    ) -> QueryResult<Vec<MemberWithTeam>> {
        tracing::debug!(sql = %sql, "Executing member/team join");

        let mut query = sqlx::query(sql);
        for value in values {
            query = value.bind_to_query(query);
        }
        let rows = query.fetch_all(self.pool()).await?;
        rows.iter()
            .map(|row| member_with_team(row).map_err(QueryError::from))
            .collect()
    }

    /// Members whose team has the given name (inner join over the relation)
    pub async fn find_by_team_name(&self, team_name: &str) -> QueryResult<Vec<Member>> {
        Self::select_from()
            .join(
                format!(
                    "JOIN {} ON {} = {}",
                    TEAM.from_clause(),
                    MEMBER.team_id(),
                    TEAM.id()
                ),
                vec![],
            )
            .where_clause(format!("{} = ?", TEAM.name()), vec![team_name.into()])
            .default_order()
            .fetch_all(self.pool())
            .await
    }

    /// Members whose username equals some team's name. The tables are joined
    /// on that equality alone, without the relation.
    pub async fn find_username_matches_team_name(&self) -> QueryResult<Vec<Member>> {
        Self::select_from()
            .also_from(TEAM.from_clause())
            .where_clause(format!("{} = {}", MEMBER.username(), TEAM.name()), vec![])
            .default_order()
            .fetch_all(self.pool())
            .await
    }

    /// Every member, with its team only when that team has the given name.
    ///
    /// The name is part of the ON clause, so members of other teams (or of
    /// none) are still returned, with `team: None`.
    pub async fn find_all_with_team_named(
        &self,
        team_name: &str,
    ) -> QueryResult<Vec<MemberWithTeam>> {
        let sql = format!(
            "{} ORDER BY {}",
            Self::member_team_select(
                "LEFT JOIN",
                &format!("{} = {} AND {} = ?", MEMBER.team_id(), TEAM.id(), TEAM.name()),
            ),
            MEMBER.id(),
        );
        self.fetch_members_with_team(&sql, &[SqlValue::from(team_name)])
            .await
    }

    /// Every member, with the team whose name equals the member's username.
    pub async fn find_all_with_team_matching_username(
        &self,
    ) -> QueryResult<Vec<MemberWithTeam>> {
        let sql = format!(
            "{} ORDER BY {}, {}",
            Self::member_team_select(
                "LEFT JOIN",
                &format!("{} = {}", MEMBER.username(), TEAM.name()),
            ),
            MEMBER.id(),
            TEAM.id(),
        );
        self.fetch_members_with_team(&sql, &[]).await
    }

    /// Single member by username with its team loaded in the same query.
    ///
    /// Members without a team are not found. Errors when the name is not
    /// unique among members with a team.
    pub async fn find_by_username_fetch_team(
        &self,
        username: &str,
    ) -> QueryResult<Option<Member>> {
        let sql = format!(
            "{} WHERE {} = ? ORDER BY {} LIMIT 2",
            Self::member_team_select("JOIN", &format!("{} = {}", MEMBER.team_id(), TEAM.id())),
            MEMBER.username(),
            MEMBER.id(),
        );
        let mut found = self.fetch_members_with_team(&sql, &[SqlValue::from(username)]).await?;

        if found.len() > 1 {
            return Err(QueryError::NonUniqueResult {
                table: QMember::TABLE,
            });
        }

        Ok(found.pop().map(|MemberWithTeam { mut member, team }| {
            member.team = team;
            member
        }))
    }
}
