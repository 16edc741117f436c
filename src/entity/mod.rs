//! Persisted entities and their meta-model paths

pub mod member;
pub mod team;

pub use member::{MEMBER, Member, NewMember, QMember};
pub use team::{NewTeam, QTeam, TEAM, Team, TeamWithMembers};
