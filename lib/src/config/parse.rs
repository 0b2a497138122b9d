use std::path::PathBuf;
use std::time::Duration;
use super::ValueParser;

/// Expands a leading `~` to the home directory.
#[derive(Clone, Debug)]
pub struct FilePathParser { }

impl ValueParser<PathBuf> for FilePathParser {
    fn parse(&self, value: &str) -> Result<PathBuf, String> {
        Ok(PathBuf::from(shellexpand::tilde(value).into_owned()))
    }
}

pub const FILE_PATH: FilePathParser = FilePathParser {};

/// Whole milliseconds.
#[derive(Clone, Debug)]
pub struct MillisParser { }

impl ValueParser<Duration> for MillisParser {
    fn parse(&self, value: &str) -> Result<Duration, String> {
        value.trim().parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| format!("invalid number of milliseconds: {value}"))
    }
}

pub const MILLIS: MillisParser = MillisParser {};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis() {
        assert_eq!(MILLIS.parse("1500"), Ok(Duration::from_millis(1500)));
        assert!(MILLIS.parse("-1").is_err());
        assert!(MILLIS.parse("1.5").is_err());
    }

    #[test]
    fn file_path_without_tilde_is_unchanged() {
        assert_eq!(FILE_PATH.parse("/var/lib/x.sqlite"),
                   Ok(PathBuf::from("/var/lib/x.sqlite")));
    }
}
