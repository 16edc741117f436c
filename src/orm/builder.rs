//! SQL query builder for single-entity selects
//!
//! Builds parameterized SELECT statements for a `DatabaseEntity` with joins,
//! conditions, ordering and offset/limit, and executes them through sqlx.

use sqlx::SqlitePool;

use super::error::{QueryError, QueryResult};
use super::pagination::QueryResults;
use super::traits::{DatabaseEntity, DatabaseFilter, FromSqlRow, OrderDirection, SqlValue};

/// A rendered boolean condition with the values for its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

impl Predicate {
    pub fn new(sql: impl Into<String>, values: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            values,
        }
    }

    /// `column = ?`
    pub fn equals(column: impl AsRef<str>, value: impl Into<SqlValue>) -> Self {
        Self::new(format!("{} = ?", column.as_ref()), vec![value.into()])
    }

    /// Conjunction with another predicate; an absent one changes nothing.
    pub fn and(self, other: Option<Predicate>) -> Self {
        match other {
            Some(other) => {
                let mut values = self.values;
                values.extend(other.values);
                Self::new(format!("({}) AND ({})", self.sql, other.sql), values)
            }
            None => self,
        }
    }
}

/// A query builder for database entities.
///
/// Selects every column of `E` under its default alias. Joins and extra FROM
/// items only narrow the rows; they never add columns to the projection.
pub struct EntityQuery<E: DatabaseEntity> {
    _phantom: std::marker::PhantomData<E>,
    from_items: Vec<String>,
    joins: Vec<String>,
    join_values: Vec<SqlValue>,
    where_clauses: Vec<String>,
    values: Vec<SqlValue>,
    order_clauses: Vec<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl<E: DatabaseEntity + FromSqlRow> EntityQuery<E> {
    /// Create a new query builder for the entity type.
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
            from_items: Vec::new(),
            joins: Vec::new(),
            join_values: Vec::new(),
            where_clauses: Vec::new(),
            values: Vec::new(),
            order_clauses: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Add another FROM item (theta join, e.g. `"team t"`).
    pub fn also_from(mut self, from_item: impl Into<String>) -> Self {
        self.from_items.push(from_item.into());
        self
    }

    /// Add a JOIN clause. `values` bind the `?` placeholders of its ON condition.
    pub fn join(mut self, clause: impl Into<String>, values: Vec<SqlValue>) -> Self {
        self.joins.push(clause.into());
        self.join_values.extend(values);
        self
    }

    /// Add a filter to the query.
    pub fn filter<F: DatabaseFilter>(mut self, filter: &F) -> Self {
        if !filter.is_empty() {
            let (conditions, values) = filter.to_sql_conditions();
            self.where_clauses.extend(conditions);
            self.values.extend(values);
        }
        self
    }

    /// Add a raw WHERE condition with its bound values.
    pub fn where_clause(mut self, condition: impl Into<String>, values: Vec<SqlValue>) -> Self {
        self.where_clauses.push(condition.into());
        self.values.extend(values);
        self
    }

    /// Add a WHERE condition only when one is given.
    pub fn where_opt(self, predicate: Option<Predicate>) -> Self {
        match predicate {
            Some(predicate) => self.where_clause(predicate.sql, predicate.values),
            None => self,
        }
    }

    /// Add sorting to the query.
    pub fn order_by(mut self, column: impl AsRef<str>, direction: OrderDirection) -> Self {
        self.order_clauses
            .push(format!("{} {}", column.as_ref(), direction.to_sql()));
        self
    }

    /// Add sorting that places NULLs after every other value.
    pub fn order_by_nulls_last(mut self, column: impl AsRef<str>, direction: OrderDirection) -> Self {
        self.order_clauses
            .push(format!("{} {} NULLS LAST", column.as_ref(), direction.to_sql()));
        self
    }

    /// Add default sorting if no order is specified.
    pub fn default_order(mut self) -> Self {
        if self.order_clauses.is_empty() {
            self.order_clauses
                .push(format!("{} {}", E::DEFAULT_SORT, E::DEFAULT_SORT_DIR));
        }
        self
    }

    /// Set limit directly.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set offset directly.
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    fn push_from_and_where(&self, sql: &mut String) {
        for item in &self.from_items {
            sql.push_str(", ");
            sql.push_str(item);
        }

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }
    }

    /// Build the SQL query string.
    pub fn build_sql(&self) -> String {
        let mut sql = E::select_sql();
        self.push_from_and_where(&mut sql);

        if !self.order_clauses.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_clauses.join(", "));
        }

        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) if offset > 0 => {
                sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
            }
            (Some(limit), _) => sql.push_str(&format!(" LIMIT {}", limit)),
            // SQLite only accepts OFFSET after a LIMIT
            (None, Some(offset)) if offset > 0 => {
                sql.push_str(&format!(" LIMIT -1 OFFSET {}", offset));
            }
            (None, _) => {}
        }

        sql
    }

    /// Build a COUNT query string. Ordering and paging are ignored.
    pub fn build_count_sql(&self) -> String {
        let mut sql = format!("SELECT COUNT(*) FROM {}", E::from_clause());
        self.push_from_and_where(&mut sql);
        sql
    }

    fn bound_values(&self) -> impl Iterator<Item = &SqlValue> {
        self.join_values.iter().chain(self.values.iter())
    }

    /// Execute the query and return all matching entities.
    pub async fn fetch_all(&self, pool: &SqlitePool) -> QueryResult<Vec<E>> {
        let sql = self.build_sql();
        tracing::debug!(sql = %sql, "Executing entity query");

        let mut query = sqlx::query(&sql);
        for value in self.bound_values() {
            query = value.bind_to_query(query);
        }

        let rows = query.fetch_all(pool).await?;
        rows.iter()
            .map(|row| E::from_row(row).map_err(QueryError::from))
            .collect()
    }

    /// Execute the query expecting at most one row.
    ///
    /// Returns `None` when nothing matches and [`QueryError::NonUniqueResult`]
    /// when more than one row does.
    pub async fn fetch_one(self, pool: &SqlitePool) -> QueryResult<Option<E>> {
        let probe = match self.limit {
            Some(limit) => limit.min(2),
            None => 2,
        };
        let mut found = self.limit(probe).fetch_all(pool).await?;

        if found.len() > 1 {
            return Err(QueryError::NonUniqueResult {
                table: E::TABLE_NAME,
            });
        }
        Ok(found.pop())
    }

    /// Execute the query returning only the first row, if any.
    pub async fn fetch_first(self, pool: &SqlitePool) -> QueryResult<Option<E>> {
        let mut found = self.limit(1).fetch_all(pool).await?;
        Ok(found.pop())
    }

    /// Execute a COUNT query.
    pub async fn fetch_count(&self, pool: &SqlitePool) -> QueryResult<i64> {
        let sql = self.build_count_sql();
        tracing::debug!(sql = %sql, "Executing count query");

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in self.bound_values() {
            query = value.bind_to_scalar(query);
        }

        Ok(query.fetch_one(pool).await?)
    }

    /// Run the count and the paged select, returning both.
    pub async fn fetch_results(&self, pool: &SqlitePool) -> QueryResult<QueryResults<E>> {
        let total = self.fetch_count(pool).await?;
        let results = self.fetch_all(pool).await?;

        Ok(QueryResults {
            total,
            limit: self.limit,
            offset: self.offset.unwrap_or(0),
            results,
        })
    }
}

impl<E: DatabaseEntity + FromSqlRow> Default for EntityQuery<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Member, QMember};

    #[test]
    fn select_uses_default_alias() {
        let sql = EntityQuery::<Member>::new().build_sql();
        assert_eq!(
            sql,
            "SELECT m.id AS id, m.username AS username, m.age AS age, m.team_id AS team_id FROM member m"
        );
    }

    #[test]
    fn conditions_order_and_paging() {
        let member = QMember::default();
        let sql = EntityQuery::<Member>::new()
            .where_clause(format!("{} = ?", member.age()), vec![SqlValue::Int(10)])
            .order_by(member.age(), OrderDirection::Desc)
            .order_by_nulls_last(member.username(), OrderDirection::Asc)
            .offset(1)
            .limit(2)
            .build_sql();
        assert!(sql.ends_with(
            "WHERE m.age = ? ORDER BY m.age DESC, m.username ASC NULLS LAST LIMIT 2 OFFSET 1"
        ));
    }

    #[test]
    fn predicate_and_skips_absent_side() {
        let p = Predicate::equals("m.username", "member1");
        assert_eq!(p.clone().and(None), p);

        let both = p.and(Some(Predicate::equals("m.age", 10)));
        assert_eq!(both.sql, "(m.username = ?) AND (m.age = ?)");
        assert_eq!(both.values, vec![SqlValue::from("member1"), SqlValue::Int(10)]);
    }

    #[test]
    fn offset_without_limit_gets_unbounded_limit() {
        let sql = EntityQuery::<Member>::new().offset(3).build_sql();
        assert!(sql.ends_with("LIMIT -1 OFFSET 3"));
    }

    #[test]
    fn count_ignores_order_and_paging() {
        let sql = EntityQuery::<Member>::new()
            .join("JOIN team t ON m.team_id = t.id", vec![])
            .where_clause("t.name = ?", vec![SqlValue::from("teamA")])
            .order_by("m.id", OrderDirection::Asc)
            .limit(5)
            .build_count_sql();
        assert_eq!(
            sql,
            "SELECT COUNT(*) FROM member m JOIN team t ON m.team_id = t.id WHERE t.name = ?"
        );
    }
}
