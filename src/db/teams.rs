//! Teams repository

use anyhow::{Context, Result};
use sqlx::{SqliteConnection, SqlitePool};

use crate::entity::{Member, NewTeam, Team, TeamWithMembers};
use crate::orm::{EntityQuery, OrderDirection, SqlValue};

pub struct TeamRepository {
    pool: SqlitePool,
}

impl TeamRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a team on the given connection (usable inside a transaction)
    pub async fn insert_with(conn: &mut SqliteConnection, team: &NewTeam) -> Result<Team> {
        let id = sqlx::query("INSERT INTO team (name) VALUES (?)")
            .bind(&team.name)
            .execute(&mut *conn)
            .await
            .with_context(|| format!("Failed to insert team {}", team.name))?
            .last_insert_rowid();

        Ok(Team {
            id,
            name: team.name.clone(),
        })
    }

    /// Create a new team
    pub async fn create(&self, team: NewTeam) -> Result<Team> {
        let mut conn = self.pool.acquire().await?;
        let created = Self::insert_with(&mut conn, &team).await?;
        tracing::debug!(team_id = created.id, name = %created.name, "Team created");
        Ok(created)
    }

    /// Get a team by id
    pub async fn get(&self, id: i64) -> Result<Option<Team>> {
        let team = EntityQuery::<Team>::new()
            .where_clause("t.id = ?", vec![SqlValue::Int(id)])
            .fetch_one(&self.pool)
            .await?;
        Ok(team)
    }

    /// Find a team by name. Names are not unique; the lowest id wins.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Team>> {
        let team = EntityQuery::<Team>::new()
            .where_clause("t.name = ?", vec![SqlValue::from(name)])
            .default_order()
            .fetch_first(&self.pool)
            .await?;
        Ok(team)
    }

    /// List every team ordered by name
    pub async fn list(&self) -> Result<Vec<Team>> {
        let teams = EntityQuery::<Team>::new()
            .order_by("t.name", OrderDirection::Asc)
            .fetch_all(&self.pool)
            .await?;
        Ok(teams)
    }

    /// Members that belong to the team, by id
    pub async fn members_of(&self, team_id: i64) -> Result<Vec<Member>> {
        let members = EntityQuery::<Member>::new()
            .where_clause("m.team_id = ?", vec![SqlValue::Int(team_id)])
            .default_order()
            .fetch_all(&self.pool)
            .await?;
        Ok(members)
    }

    /// Get a team with its member collection loaded
    pub async fn get_with_members(&self, id: i64) -> Result<Option<TeamWithMembers>> {
        let Some(team) = self.get(id).await? else {
            return Ok(None);
        };
        let members = self.members_of(id).await?;
        Ok(Some(TeamWithMembers { team, members }))
    }

    /// Count teams
    pub async fn count(&self) -> Result<i64> {
        Ok(EntityQuery::<Team>::new().fetch_count(&self.pool).await?)
    }
}

