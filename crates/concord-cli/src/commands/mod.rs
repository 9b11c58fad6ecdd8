//! Command implementations.

pub mod config;
pub mod run;
pub mod types;
pub mod validate;

pub use self::config::execute_config;
pub use self::run::execute_run;
pub use self::types::execute_types;
pub use self::validate::execute_validate;

use crate::error::{CliError, Result};
use concord_domain::JobSubmission;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Name shown for a submission source.
pub fn source_name(path: &Path) -> String {
    if is_stdin(path) {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

/// Read a submission from a JSON file, or from stdin for `-`.
pub fn read_submission(path: &Path) -> Result<JobSubmission> {
    let contents = if is_stdin(path) {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| {
            CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
        })?
    };

    serde_json::from_str(&contents).map_err(|e| {
        CliError::InvalidInput(format!("{} is not a valid submission: {}", source_name(path), e))
    })
}

/// Reject more than one `-` among the inputs.
pub fn check_sources(files: &[PathBuf]) -> Result<()> {
    if files.iter().filter(|f| is_stdin(f)).count() > 1 {
        return Err(CliError::InvalidInput("stdin (-) can be read only once".into()));
    }
    Ok(())
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}
