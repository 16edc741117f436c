//! roster: typed member/team querying over SQLite
//!
//! Members optionally belong to a team. [`query::MemberQueries`] exposes the
//! query patterns (filters, joins, subqueries, projections, aggregation,
//! dynamic predicates, paging and bulk statements); [`app`] serves member
//! search over HTTP.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod logging;
pub mod orm;
pub mod profile;
pub mod query;

pub use app::AppState;
