//! Execution profiles.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Local development: sample data is seeded at startup
    Local,
    Test,
    #[default]
    Default,
}

impl Profile {
    pub fn from_arg(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Some(Profile::Local),
            "test" => Some(Profile::Test),
            "default" => Some(Profile::Default),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Local => "local",
            Profile::Test => "test",
            Profile::Default => "default",
        }
    }

    /// Whether startup seeds the sample teams and members
    pub fn seeds_sample_data(&self) -> bool {
        matches!(self, Profile::Local)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_profiles() {
        assert_eq!(Profile::from_arg("local"), Some(Profile::Local));
        assert_eq!(Profile::from_arg(" LOCAL "), Some(Profile::Local));
        assert_eq!(Profile::from_arg("test"), Some(Profile::Test));
        assert_eq!(Profile::from_arg("prod"), None);
    }

    #[test]
    fn only_local_seeds() {
        assert!(Profile::Local.seeds_sample_data());
        assert!(!Profile::Test.seeds_sample_data());
        assert!(!Profile::Default.seeds_sample_data());
    }
}
