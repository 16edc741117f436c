//! Aggregation and grouping

use crate::dto::{AgeStatistics, TeamAverageAge};
use crate::entity::{MEMBER, TEAM};
use crate::orm::QueryResult;

use super::MemberQueries;

impl MemberQueries {
    /// Count, sum, average, maximum and minimum of every member's age.
    ///
    /// On an empty table the count is 0 and every other field is `None`.
    pub async fn age_statistics(&self) -> QueryResult<AgeStatistics> {
        let sql = format!(
            "SELECT COUNT({id}) AS count, SUM({age}) AS sum, AVG({age}) AS average, \
             MAX({age}) AS max, MIN({age}) AS min FROM {from}",
            id = MEMBER.id(),
            age = MEMBER.age(),
            from = MEMBER.from_clause(),
        );
        tracing::debug!(sql = %sql, "Executing age statistics");

        let stats = sqlx::query_as::<_, AgeStatistics>(&sql)
            .fetch_one(self.pool())
            .await?;
        Ok(stats)
    }

    /// Average member age per team, ordered by team name.
    ///
    /// Teams without members do not appear.
    pub async fn average_age_by_team(&self) -> QueryResult<Vec<TeamAverageAge>> {
        let sql = format!(
            "SELECT {name} AS team_name, AVG({age}) AS average_age FROM {member} \
             JOIN {team} ON {team_id} = {id} GROUP BY {name} ORDER BY {name}",
            name = TEAM.name(),
            age = MEMBER.age(),
            member = MEMBER.from_clause(),
            team = TEAM.from_clause(),
            team_id = MEMBER.team_id(),
            id = TEAM.id(),
        );
        tracing::debug!(sql = %sql, "Executing team average age");

        let rows = sqlx::query_as::<_, TeamAverageAge>(&sql)
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }
}
