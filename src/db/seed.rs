//! Sample data for local runs.
//!
//! Creates two teams and one hundred members: `member{i}` aged `i`, even
//! indexes in `teamA`, odd ones in `teamB`. Everything is written in one
//! transaction; a failure leaves the database untouched. A database that
//! already has teams is left as is.

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::{Database, MemberRepository, TeamRepository};
use crate::entity::{NewMember, NewTeam};
use crate::profile::Profile;

/// Number of members created by [`init_members`]
pub const SEED_MEMBER_COUNT: i32 = 100;

/// Result of running seed operations.
#[derive(Debug, Default)]
pub struct SeedResult {
    pub teams_created: u64,
    pub members_created: u64,
    pub errors: Vec<String>,
}

/// Seed the sample teams and members, unless teams already exist.
pub async fn init_members(db: &Database) -> Result<SeedResult> {
    let mut tx = db.pool().begin().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM team")
        .fetch_one(&mut *tx)
        .await
        .context("Failed to count existing teams")?;
    if existing > 0 {
        info!(teams = existing, "Sample data already present, skipping seed");
        return Ok(SeedResult::default());
    }

    let team_a = TeamRepository::insert_with(&mut tx, &NewTeam::new("teamA")).await?;
    let team_b = TeamRepository::insert_with(&mut tx, &NewTeam::new("teamB")).await?;

    for i in 0..SEED_MEMBER_COUNT {
        let team = if i % 2 == 0 { &team_a } else { &team_b };
        let member = NewMember::with_team(format!("member{i}"), i, team.id);
        MemberRepository::insert_with(&mut tx, &member).await?;
    }

    tx.commit().await.context("Failed to commit seed data")?;

    let result = SeedResult {
        teams_created: 2,
        members_created: SEED_MEMBER_COUNT as u64,
        errors: Vec::new(),
    };
    info!(
        teams = result.teams_created,
        members = result.members_created,
        "Seeded sample members"
    );
    Ok(result)
}

/// Run seeds appropriate for the active profile.
///
/// Only the `local` profile gets sample data; errors are collected rather
/// than aborting startup.
pub async fn run_seeds(db: &Database, profile: Profile) -> SeedResult {
    if !profile.seeds_sample_data() {
        info!(profile = %profile, "Skipping sample data for profile");
        return SeedResult::default();
    }

    match init_members(db).await {
        Ok(result) => result,
        Err(e) => {
            let msg = format!("Failed to seed members: {e:#}");
            warn!("{}", msg);
            SeedResult {
                errors: vec![msg],
                ..Default::default()
            }
        }
    }
}
