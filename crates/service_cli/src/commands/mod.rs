//! CLI command implementations
//!
//! Each submodule implements a specific CLI command and writes its report
//! to the sink it is given.

pub mod check;
pub mod generate;
pub mod kernel_source;
pub mod launch;
