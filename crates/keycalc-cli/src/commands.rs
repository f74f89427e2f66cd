//! CLI command definitions using clap

use crate::config::{CliConfig, ColorChoice, OutputFormat, Verbosity};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// keycalc: keystroke-driven calculator
#[derive(Parser, Debug)]
#[command(name = "keycalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors-only logging, no repl prompt)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Output format (plain, json)
    #[arg(long, value_enum, default_value = "plain", global = true)]
    pub format: FormatArg,

    /// Maximum number of evaluations kept on the session tape
    #[arg(long, env = "KEYCALC_TAPE_SIZE", default_value = "100", global = true)]
    pub tape_size: usize,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Builds the configuration from the global flags
    #[must_use]
    pub fn config(&self) -> CliConfig {
        CliConfig::new()
            .with_verbosity(Verbosity::from_flags(self.verbose, self.quiet))
            .with_color(self.color.into())
            .with_format(self.format.into())
            .with_tape_size(self.tape_size)
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press keys on a fresh calculator and print the display
    ///
    /// Tokens are key labels or aliases (`CE`, `sqrt`, `1/x`, `+/-`), or runs
    /// of single-character keys such as `12.5` or `5+3=`.
    Press(PressArgs),

    /// Read key lines from stdin into one calculator session
    ///
    /// Shell commands: `:tape`, `:clear-tape`, `:quit`.
    Repl(ReplArgs),

    /// Show the keypad layout and accepted key names
    Keys,

    /// Show the effective configuration
    Config,
}

/// Arguments for the press command
#[derive(Args, Debug)]
pub struct PressArgs {
    /// Print the display after every key
    #[arg(long)]
    pub steps: bool,

    /// Print the session tape after the result
    #[arg(long)]
    pub tape: bool,

    /// Key tokens, pressed in order
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}

/// Arguments for the repl command
#[derive(Args, Debug, Default)]
pub struct ReplArgs {
    /// Prompt written before each line (plain output only)
    #[arg(long, default_value = "")]
    pub prompt: String,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Output format argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Display text only
    #[default]
    Plain,
    /// JSON documents
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => Self::Plain,
            FormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_press_command() {
            let cli = Cli::parse_from(["keycalc", "press", "5", "+", "3", "="]);
            if let Commands::Press(args) = cli.command {
                assert_eq!(args.tokens, vec!["5", "+", "3", "="]);
                assert!(!args.steps);
            } else {
                panic!("expected Press command");
            }
        }

        #[test]
        fn test_parse_press_with_minus_tokens() {
            let cli = Cli::parse_from(["keycalc", "press", "9", "-", "4", "+/-", "="]);
            if let Commands::Press(args) = cli.command {
                assert_eq!(args.tokens, vec!["9", "-", "4", "+/-", "="]);
            } else {
                panic!("expected Press command");
            }
        }

        #[test]
        fn test_parse_press_with_steps() {
            let cli = Cli::parse_from(["keycalc", "press", "--steps", "12"]);
            if let Commands::Press(args) = cli.command {
                assert!(args.steps);
                assert_eq!(args.tokens, vec!["12"]);
            } else {
                panic!("expected Press command");
            }
        }

        #[test]
        fn test_press_requires_tokens() {
            assert!(Cli::try_parse_from(["keycalc", "press"]).is_err());
        }

        #[test]
        fn test_parse_repl_command() {
            let cli = Cli::parse_from(["keycalc", "repl", "--prompt", "> "]);
            if let Commands::Repl(args) = cli.command {
                assert_eq!(args.prompt, "> ");
            } else {
                panic!("expected Repl command");
            }
        }

        #[test]
        fn test_parse_keys_and_config() {
            let cli = Cli::parse_from(["keycalc", "keys"]);
            assert!(matches!(cli.command, Commands::Keys));
            let cli = Cli::parse_from(["keycalc", "config"]);
            assert!(matches!(cli.command, Commands::Config));
        }

        #[test]
        fn test_no_subcommand_is_error() {
            assert!(Cli::try_parse_from(["keycalc"]).is_err());
        }
    }

    mod global_flag_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let cli = Cli::parse_from(["keycalc", "keys"]);
            assert_eq!(cli.verbose, 0);
            assert!(!cli.quiet);
            assert_eq!(cli.color, ColorArg::Auto);
            assert_eq!(cli.format, FormatArg::Plain);
            assert_eq!(cli.tape_size, 100);
        }

        #[test]
        fn test_flags_after_subcommand() {
            let cli = Cli::parse_from([
                "keycalc",
                "config",
                "-vv",
                "--color",
                "never",
                "--format",
                "json",
                "--tape-size",
                "3",
            ]);
            let config = cli.config();
            assert_eq!(config.verbosity, Verbosity::Debug);
            assert_eq!(config.color, ColorChoice::Never);
            assert_eq!(config.format, OutputFormat::Json);
            assert_eq!(config.tape_size, 3);
        }

        #[test]
        fn test_quiet_flag() {
            let cli = Cli::parse_from(["keycalc", "-q", "keys"]);
            assert!(cli.config().verbosity.is_quiet());
        }

        #[test]
        fn test_invalid_format_rejected() {
            assert!(Cli::try_parse_from(["keycalc", "--format", "xml", "keys"]).is_err());
        }
    }
}
