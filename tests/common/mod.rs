//! Shared fixture for integration tests
//!
//! Every test gets its own in-memory database with the schema synced and
//! four members: member1 (10) and member2 (20) in teamA, member3 (30) and
//! member4 (40) in teamB.

#![allow(dead_code)]

use roster::db::Database;
use roster::db::schema_sync::sync_all_entity_schemas;
use roster::entity::{Member, NewMember, NewTeam, Team};
use roster::query::MemberQueries;

pub struct Fixture {
    pub db: Database,
    pub team_a: Team,
    pub team_b: Team,
    pub members: Vec<Member>,
}

impl Fixture {
    pub fn queries(&self) -> MemberQueries {
        self.db.queries()
    }
}

/// Fresh database with tables but no rows
pub async fn empty_db() -> Database {
    let db = Database::connect_in_memory().await.unwrap();
    let sync = sync_all_entity_schemas(db.pool()).await;
    assert!(sync.is_ok(), "schema sync failed: {:?}", sync.errors);
    db
}

/// Fresh database with the four-member fixture
pub async fn fixture() -> Fixture {
    let db = empty_db().await;

    let team_a = db.teams().create(NewTeam::new("teamA")).await.unwrap();
    let team_b = db.teams().create(NewTeam::new("teamB")).await.unwrap();

    let members = db
        .members()
        .create_all(&[
            NewMember::with_team("member1", 10, team_a.id),
            NewMember::with_team("member2", 20, team_a.id),
            NewMember::with_team("member3", 30, team_b.id),
            NewMember::with_team("member4", 40, team_b.id),
        ])
        .await
        .unwrap();

    Fixture {
        db,
        team_a,
        team_b,
        members,
    }
}

/// Usernames of the given members, in order
pub fn usernames(members: &[Member]) -> Vec<&str> {
    members.iter().filter_map(|m| m.username()).collect()
}

/// Ages of the given members, in order
pub fn ages(members: &[Member]) -> Vec<i32> {
    members.iter().map(|m| m.age).collect()
}
