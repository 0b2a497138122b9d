use std::path::PathBuf;
use super::ValueValidator;

#[derive(Clone, Debug)]
pub struct NonEmptyPathValidator { }

impl ValueValidator<PathBuf> for NonEmptyPathValidator {
    fn validate(&self, path: &PathBuf) -> Result<(), String> {
        if path.as_os_str().is_empty() {
            Err("path must not be empty".to_owned())
        } else {
            Ok(())
        }
    }
}

pub const NON_EMPTY_PATH: &NonEmptyPathValidator = &NonEmptyPathValidator {};
