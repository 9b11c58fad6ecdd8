//! Validate command implementation.

use super::{check_sources, read_submission, source_name};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use concord_gatekeeper::Gatekeeper;

/// Execute the validate command.
///
/// Returns whether every submission would be admitted.
pub fn execute_validate(args: ValidateArgs, config: &Config, formatter: &Formatter) -> Result<bool> {
    check_sources(&args.files)?;
    let gatekeeper = Gatekeeper::new(config.pipeline.validation.clone())
        .map_err(|e| CliError::Config(e.to_string()))?;

    let mut all_accepted = true;
    for path in &args.files {
        let source = source_name(path);
        match read_submission(path) {
            Ok(submission) => {
                let result = gatekeeper.validate(&submission);
                all_accepted &= result.is_accepted();
                println!("{}", formatter.format_validation(&source, &result)?);
            }
            Err(e) => {
                all_accepted = false;
                println!("{}", formatter.error(&e.to_string()));
            }
        }
    }

    Ok(all_accepted)
}
