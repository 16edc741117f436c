//! Query meta-model
//!
//! Each entity gets a path type (`QMember`, `QTeam`) naming a table alias and
//! its columns. Two instances with different aliases refer to the same table
//! independently, which is how subqueries and self joins are written.

/// Define a meta-model path type for an entity table.
///
/// Usage:
/// ```ignore
/// entity_path!(QMember, "member", "m", [id, username, age, team_id]);
///
/// let member = QMember::default();
/// assert_eq!(member.username(), "m.username");
/// let sub = QMember::new("ms");
/// assert_eq!(sub.from_clause(), "member ms");
/// ```
#[macro_export]
macro_rules! entity_path {
    ($path:ident, $table:literal, $default_alias:literal, [$($column:ident),+ $(,)?]) => {
        /// Meta-model path: a table alias plus qualified column accessors
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $path {
            alias: &'static str,
        }

        impl $path {
            /// Table this path refers to
            pub const TABLE: &'static str = $table;

            /// Column names in declaration order
            pub const COLUMNS: &'static [&'static str] = &[$(stringify!($column)),+];

            /// Create a path under the given alias
            pub const fn new(alias: &'static str) -> Self {
                Self { alias }
            }

            pub const fn alias(&self) -> &'static str {
                self.alias
            }

            /// `table alias`, for FROM and JOIN clauses
            pub fn from_clause(&self) -> String {
                format!("{} {}", $table, self.alias)
            }

            /// Every column, aliased as `{prefix}{column}`
            pub fn projection(&self, prefix: &str) -> String {
                Self::COLUMNS
                    .iter()
                    .map(|c| format!("{}.{} AS {}{}", self.alias, c, prefix, c))
                    .collect::<Vec<_>>()
                    .join(", ")
            }

            $(
                pub fn $column(&self) -> String {
                    format!("{}.{}", self.alias, stringify!($column))
                }
            )+
        }

        impl Default for $path {
            fn default() -> Self {
                Self::new($default_alias)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::entity_path!(QSample, "sample", "s", [id, label]);

    #[test]
    fn columns_are_qualified_by_alias() {
        let sample = QSample::default();
        assert_eq!(sample.alias(), "s");
        assert_eq!(sample.id(), "s.id");
        assert_eq!(sample.label(), "s.label");
        assert_eq!(sample.from_clause(), "sample s");
    }

    #[test]
    fn second_alias_is_independent() {
        let sub = QSample::new("sub");
        assert_eq!(sub.label(), "sub.label");
        assert_eq!(sub.projection("x_"), "sub.id AS x_id, sub.label AS x_label");
    }
}
