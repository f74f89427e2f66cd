//! keycalc CLI library
//!
//! Command-line shell around the [`keycalc`] engine.
//!
//! ## Usage
//!
//! ```bash
//! keycalc press 5 + 3 =            # prints 8
//! keycalc press --steps 12.5 sqrt  # display after every key
//! keycalc repl                     # one session, one line of keys at a time
//! keycalc keys                     # keypad layout and key aliases
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
pub mod runner;

pub use commands::{Cli, ColorArg, Commands, FormatArg, PressArgs, ReplArgs};
pub use config::{CliConfig, ColorChoice, OutputFormat, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{Report, Reporter, Step};
