//! Members repository
//!
//! Persistence for members. Read-side query patterns live on
//! [`MemberQueries`](crate::query::MemberQueries).

use anyhow::{Context, Result, bail};
use sqlx::{SqliteConnection, SqlitePool};

use crate::entity::{MEMBER, Member, NewMember};
use crate::orm::{EntityQuery, SqlValue};

pub struct MemberRepository {
    pool: SqlitePool,
}

impl MemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a member on the given connection (usable inside a transaction).
    ///
    /// Fails when `team_id` does not reference an existing team.
    pub async fn insert_with(conn: &mut SqliteConnection, member: &NewMember) -> Result<Member> {
        let id = sqlx::query("INSERT INTO member (username, age, team_id) VALUES (?, ?, ?)")
            .bind(member.username.as_deref())
            .bind(member.age)
            .bind(member.team_id)
            .execute(&mut *conn)
            .await
            .with_context(|| {
                format!(
                    "Failed to insert member {:?} (team {:?})",
                    member.username, member.team_id
                )
            })?
            .last_insert_rowid();

        Ok(Member {
            id,
            username: member.username.clone(),
            age: member.age,
            team_id: member.team_id,
            team: None,
        })
    }

    /// Create a new member
    pub async fn create(&self, member: NewMember) -> Result<Member> {
        let mut conn = self.pool.acquire().await?;
        let created = Self::insert_with(&mut conn, &member).await?;
        tracing::debug!(
            member_id = created.id,
            username = ?created.username,
            team_id = ?created.team_id,
            "Member created"
        );
        Ok(created)
    }

    /// Create several members in one transaction
    pub async fn create_all(&self, members: &[NewMember]) -> Result<Vec<Member>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(members.len());
        for member in members {
            created.push(Self::insert_with(&mut tx, member).await?);
        }
        tx.commit().await?;
        Ok(created)
    }

    /// Get a member by id
    pub async fn get(&self, id: i64) -> Result<Option<Member>> {
        let member = EntityQuery::<Member>::new()
            .where_clause(format!("{} = ?", MEMBER.id()), vec![SqlValue::Int(id)])
            .fetch_one(&self.pool)
            .await?;
        Ok(member)
    }

    /// Move a member to another team, or out of any team with `None`
    pub async fn change_team(&self, member_id: i64, team_id: Option<i64>) -> Result<Member> {
        let result = sqlx::query("UPDATE member SET team_id = ? WHERE id = ?")
            .bind(team_id)
            .bind(member_id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to move member {member_id} to team {team_id:?}"))?;

        if result.rows_affected() == 0 {
            bail!("Member {member_id} not found");
        }

        self.get(member_id)
            .await?
            .with_context(|| format!("Member {member_id} vanished after update"))
    }

    /// Count members
    pub async fn count(&self) -> Result<i64> {
        Ok(EntityQuery::<Member>::new().fetch_count(&self.pool).await?)
    }
}
