//! Types command implementation.

use crate::error::Result;
use crate::output::Formatter;

/// Execute the types command.
pub fn execute_types(formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_types()?);
    Ok(())
}
