//! Member search condition

use serde::Deserialize;

use crate::entity::{MEMBER, TEAM};
use crate::orm::{DatabaseFilter, SqlValue};

/// Optional filters for a member search: username, team name and an
/// inclusive age range. Absent fields do not constrain the result.
///
/// Conditions reference the member as `m` and its team as `t`, so the query
/// must left join `team t`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }
}

/// Treat blank strings from query parameters as absent
fn has_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl DatabaseFilter for MemberSearchCondition {
    fn to_sql_conditions(&self) -> (Vec<String>, Vec<SqlValue>) {
        let mut conditions = Vec::new();
        let mut values = Vec::new();

        if let Some(username) = has_text(&self.username) {
            conditions.push(format!("{} = ?", MEMBER.username()));
            values.push(SqlValue::from(username));
        }
        if let Some(team_name) = has_text(&self.team_name) {
            conditions.push(format!("{} = ?", TEAM.name()));
            values.push(SqlValue::from(team_name));
        }
        if let Some(age) = self.age_goe {
            conditions.push(format!("{} >= ?", MEMBER.age()));
            values.push(SqlValue::from(age));
        }
        if let Some(age) = self.age_loe {
            conditions.push(format!("{} <= ?", MEMBER.age()));
            values.push(SqlValue::from(age));
        }

        (conditions, values)
    }

    fn is_empty(&self) -> bool {
        has_text(&self.username).is_none()
            && has_text(&self.team_name).is_none()
            && self.age_goe.is_none()
            && self.age_loe.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_condition_has_no_where() {
        let cond = MemberSearchCondition::default();
        assert!(cond.is_empty());
        assert_eq!(cond.where_sql(), (String::new(), vec![]));
    }

    #[test]
    fn blank_strings_are_ignored() {
        let cond = MemberSearchCondition {
            username: Some("  ".into()),
            ..Default::default()
        };
        assert!(cond.is_empty());
    }

    #[test]
    fn all_fields_in_order() {
        let cond = MemberSearchCondition::default()
            .username("member1")
            .team_name("teamA")
            .age_goe(10)
            .age_loe(40);
        let (sql, values) = cond.where_sql();
        assert_eq!(
            sql,
            " WHERE m.username = ? AND t.name = ? AND m.age >= ? AND m.age <= ?"
        );
        assert_eq!(
            values,
            vec![
                SqlValue::from("member1"),
                SqlValue::from("teamA"),
                SqlValue::Int(10),
                SqlValue::Int(40),
            ]
        );
    }

    #[test]
    fn deserializes_camel_case() {
        let cond: MemberSearchCondition =
            serde_json::from_str(r#"{"teamName":"teamB","ageGoe":35}"#).unwrap();
        assert_eq!(cond, MemberSearchCondition::default().team_name("teamB").age_goe(35));
    }
}
