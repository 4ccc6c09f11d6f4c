//! Kernel-source command implementation
//!
//! Emits the CUDA source of the generator for an external driver.

use std::io::Write;
use std::path::Path;

use mtrand_kernel::gpu::{ENTRY_POINTS, MTRAND_KERNEL_SOURCE};
use tracing::info;

use crate::{CliError, Result};

/// Run the kernel-source command
///
/// Writes to `output` when given, otherwise to `out`.
pub fn run<W: Write>(output: Option<&Path>, out: &mut W) -> Result<()> {
    match output {
        Some(path) => {
            if path.is_dir() {
                return Err(CliError::InvalidArgument(format!(
                    "{} is a directory",
                    path.display()
                )));
            }
            std::fs::write(path, MTRAND_KERNEL_SOURCE)?;
            info!(
                path = %path.display(),
                entry_points = ?ENTRY_POINTS,
                "Kernel source written"
            );
        }
        None => {
            out.write_all(MTRAND_KERNEL_SOURCE.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}
