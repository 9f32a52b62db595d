//! Shell completion generation for mongo-transformer

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::Write;

use crate::cli::CliArgs;
use crate::error::Result;

/// Binary name used in generated scripts
const BIN_NAME: &str = "mongo-transformer";

/// Write the completion script for `shell` to `out`
pub fn generate_completion<W: Write>(shell: Shell, out: &mut W) -> Result<()> {
    let mut cmd = CliArgs::command();
    generate(shell, &mut cmd, BIN_NAME, out);
    out.flush()?;
    Ok(())
}
