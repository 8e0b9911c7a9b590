//! Error handling and display for the CLI.

use std::path::PathBuf;

use bilateral_format::FormatError;
use bilateral_pool::PoolError;
use bilateral_select::SelectError;
use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Output directory is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    if let Some(hint) = hint_for(err) {
        eprintln!("\n{}", hint.yellow());
    }
}

fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return match cli_err {
            CliError::InputNotFound(_) => {
                Some("Hint: Pass the path of a project list, e.g. one written by `bilateral generate`.")
            }
            CliError::NotADirectory(_) => Some("Hint: --out-dir must point to a directory."),
        };
    }

    if let Some(format_err) = err.downcast_ref::<FormatError>() {
        return match format_err {
            FormatError::Io(_) => None,
            _ => Some(
                "Hint: The first line holds the team count, followed by one \
                 `<stockholm-id> <london-id>` pair per line.",
            ),
        };
    }

    if let Some(SelectError::TooLarge { .. }) = err.downcast_ref::<SelectError>() {
        return Some("Hint: Use `--strategy greedy` for inputs this large.");
    }

    if let Some(PoolError::InvalidConfig { .. }) = err.downcast_ref::<PoolError>() {
        return Some("Hint: Run `bilateral generate --help` for the accepted ranges.");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_hint_survives_context() {
        let result: Result<(), FormatError> = Err(FormatError::MissingHeader);
        let err = result.context("failed to read project list").unwrap_err();
        assert!(hint_for(&err).unwrap().contains("team count"));
    }

    #[test]
    fn test_hint_for_too_large() {
        let err = anyhow::Error::from(SelectError::TooLarge {
            projects: 40,
            max: 32,
        });
        assert!(hint_for(&err).unwrap().contains("greedy"));
    }

    #[test]
    fn test_no_hint_for_other_errors() {
        let err = anyhow::anyhow!("something else");
        assert!(hint_for(&err).is_none());
    }
}
