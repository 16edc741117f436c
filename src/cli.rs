//! Minimal CLI parsing for profile overrides.

use crate::profile::Profile;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub profile_override: Option<Profile>,
}

impl CliOptions {
    pub fn from_args() -> Self {
        Self::parse(std::env::args().skip(1))
    }

    pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut options = CliOptions::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--local" => options.profile_override = Some(Profile::Local),
                "--profile" => {
                    if let Some(value) = args.next() {
                        options.profile_override = Profile::from_arg(&value);
                    }
                }
                _ if arg.starts_with("--profile=") => {
                    if let Some(value) = arg.split_once('=').map(|(_, v)| v) {
                        options.profile_override = Profile::from_arg(value);
                    }
                }
                _ => {}
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn profile_flag_forms() {
        assert_eq!(parse(&["--profile", "local"]).profile_override, Some(Profile::Local));
        assert_eq!(parse(&["--profile=test"]).profile_override, Some(Profile::Test));
        assert_eq!(parse(&["--local"]).profile_override, Some(Profile::Local));
    }

    #[test]
    fn unknown_arguments_are_ignored() {
        assert_eq!(parse(&["--verbose", "--profile=nope"]), CliOptions::default());
    }
}
