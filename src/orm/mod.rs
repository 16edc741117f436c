//! ORM layer
//!
//! Thin typed layer over sqlx:
//! - entity metadata and schema generation (`DatabaseEntity`, `DatabaseSchema`)
//! - row decoding (`FromSqlRow`), including the outer side of joins
//! - search filters (`DatabaseFilter`) rendered as parameterized conditions
//! - the per-entity meta-model (`entity_path!`)
//! - single-entity selects with the fetch family (`EntityQuery`)
//! - pagination results (`QueryResults`, `Page`)
//!
//! ```rust,ignore
//! let member = QMember::default();
//! let found = EntityQuery::<Member>::new()
//!     .where_clause(format!("{} = ?", member.username()), vec!["member1".into()])
//!     .fetch_one(&pool)
//!     .await?;
//! ```

mod builder;
mod error;
pub mod meta;
pub mod pagination;
mod traits;

pub use builder::*;
pub use error::*;
pub use pagination::{Page, PageRequest, QueryResults};
pub use traits::*;
