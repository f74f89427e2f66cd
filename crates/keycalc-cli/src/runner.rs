//! Command implementations
//!
//! Each command takes its streams as parameters so tests can drive it with
//! in-memory buffers.

use crate::commands::{PressArgs, ReplArgs};
use crate::config::{CliConfig, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output::{Report, Reporter, Step};
use keycalc::prelude::*;
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Shell commands understood by the repl
const TAPE_COMMAND: &str = ":tape";
const CLEAR_TAPE_COMMAND: &str = ":clear-tape";
const QUIT_COMMANDS: [&str; 2] = [":quit", ":q"];

/// Parses every token into keys, in order
pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> CliResult<Vec<Key>> {
    let mut keys = Vec::new();
    for token in tokens {
        keys.extend(parse_keys(token.as_ref())?);
    }
    if keys.is_empty() {
        return Err(CliError::invalid_argument("no keys given"));
    }
    Ok(keys)
}

/// `keycalc press`: run one key sequence on a fresh session
pub fn run_press<W: Write>(config: &CliConfig, args: &PressArgs, out: W) -> CliResult<()> {
    let keys = parse_tokens(&args.tokens)?;
    info!(keys = keys.len(), "pressing keys");

    let mut session = Session::with_tape_capacity(config.tape_size);
    let mut steps = Vec::new();
    for key in keys {
        session.press(key);
        if args.steps {
            steps.push(Step::new(key, session.engine()));
        }
    }

    let mut reporter = Reporter::new(out, config);
    match reporter.format() {
        OutputFormat::Plain => {
            if args.steps {
                for step in &steps {
                    reporter.step(step)?;
                }
            } else {
                reporter.display(session.engine())?;
            }
            if args.tape {
                reporter.tape(session.tape())?;
            }
        }
        OutputFormat::Json => {
            let mut report = Report::new(&session).with_steps(steps);
            if args.tape {
                report = report.with_tape(session.tape());
            }
            reporter.json(&report)?;
        }
    }
    Ok(())
}

/// `keycalc repl`: feed stdin lines into one persistent session
///
/// Lines that name no key are reported on `err` and skipped; the session
/// carries on.
pub fn run_repl<R, W, E>(
    config: &CliConfig,
    args: &ReplArgs,
    input: R,
    out: W,
    mut err: E,
) -> CliResult<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut session = Session::with_tape_capacity(config.tape_size);
    let mut reporter = Reporter::new(out, config);
    let prompt = if config.verbosity.is_quiet() {
        ""
    } else {
        args.prompt.as_str()
    };
    info!(tape_size = session.tape().max_entries(), "repl started");

    let mut lines = input.lines();
    loop {
        reporter.prompt(prompt)?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();

        match line {
            "" => {}
            TAPE_COMMAND => reporter.tape(session.tape())?,
            CLEAR_TAPE_COMMAND => session.clear_tape(),
            quit if QUIT_COMMANDS.contains(&quit) => break,
            command if command.starts_with(':') => {
                warn!(command, "unknown shell command");
                writeln!(err, "Error: unknown command {command}")?;
            }
            text => match parse_keys(text) {
                Ok(keys) => {
                    session.press_all(keys);
                    reporter.display(session.engine())?;
                }
                Err(e) => {
                    warn!(error = %e, "line ignored");
                    writeln!(err, "Error: {}", CliError::from(e))?;
                }
            },
        }
    }

    info!(evaluations = session.tape().len(), "repl finished");
    Ok(())
}

/// One key with every token that names it
#[derive(Debug, Serialize)]
struct KeyNames {
    label: &'static str,
    aliases: &'static [&'static str],
}

/// JSON form of the keypad
#[derive(Debug, Serialize)]
struct KeypadReport {
    rows: Vec<Vec<&'static str>>,
    functions: Vec<&'static str>,
    keys: Vec<KeyNames>,
}

/// `keycalc keys`: print the keypad and accepted key names
pub fn run_keys<W: Write>(config: &CliConfig, out: W) -> CliResult<()> {
    let keypad = Keypad::new();
    let mut reporter = Reporter::new(out, config);

    if reporter.format().is_json() {
        let report = KeypadReport {
            rows: keypad
                .rows()
                .map(|row| row.iter().map(KeypadButton::label).collect())
                .collect(),
            functions: keypad.functions().iter().map(Key::label).collect(),
            keys: Keypad::all_keys()
                .iter()
                .map(|key| KeyNames {
                    label: key.label(),
                    aliases: key.aliases(),
                })
                .collect(),
        };
        return reporter.json(&report);
    }

    for row in keypad.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|button| format!("[{:^5}]", button.label()))
            .collect();
        reporter.line(&cells.join(" "))?;
    }
    reporter.line("")?;
    let functions: Vec<&str> = keypad.functions().iter().map(Key::label).collect();
    reporter.line(&format!("functions: {}", functions.join("  ")))?;
    reporter.line("")?;
    reporter.line("aliases:")?;
    for key in Keypad::all_keys() {
        let aliases = key.aliases();
        if !aliases.is_empty() {
            reporter.line(&format!("  {:<4} {}", key.label(), aliases.join(", ")))?;
        }
    }
    Ok(())
}

/// `keycalc config`: print the effective configuration as JSON
pub fn run_config<W: Write>(config: &CliConfig, out: W) -> CliResult<()> {
    Reporter::new(out, config).json_pretty(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::{ColorChoice, Verbosity};

    fn plain() -> CliConfig {
        CliConfig::new().with_color(ColorChoice::Never)
    }

    fn json() -> CliConfig {
        plain().with_format(OutputFormat::Json)
    }

    fn press(config: &CliConfig, tokens: &[&str], steps: bool, tape: bool) -> String {
        let args = PressArgs {
            steps,
            tape,
            tokens: tokens.iter().map(ToString::to_string).collect(),
        };
        let mut out = Vec::new();
        run_press(config, &args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn repl(config: &CliConfig, input: &str) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        run_repl(
            config,
            &ReplArgs::default(),
            input.as_bytes(),
            &mut out,
            &mut err,
        )
        .unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    // ===== parse_tokens =====

    #[test]
    fn test_parse_tokens_mixes_words_and_runs() {
        let keys = parse_tokens(&["12", "+", "sqrt", "CE"]).unwrap();
        assert_eq!(keys.len(), 5);
        assert_eq!(keys[3], Key::Function(UnaryFn::SquareRoot));
        assert_eq!(keys[4], Key::ClearEntry);
    }

    #[test]
    fn test_parse_tokens_rejects_unknown() {
        let err = parse_tokens(&["5", "%"]).unwrap_err();
        assert!(matches!(err, CliError::InvalidKey(_)));
    }

    #[test]
    fn test_parse_tokens_rejects_blank() {
        let err = parse_tokens(&["  "]).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { .. }));
    }

    // ===== press =====

    #[test]
    fn test_press_prints_final_display() {
        assert_eq!(press(&plain(), &["5", "+", "3", "="], false, false), "8\n");
    }

    #[test]
    fn test_press_single_run_token() {
        assert_eq!(press(&plain(), &["5+3=×2="], false, false), "16\n");
    }

    #[test]
    fn test_press_error_is_output_not_failure() {
        assert_eq!(press(&plain(), &["6", "÷", "0", "="], false, false), "ERROR\n");
    }

    #[test]
    fn test_press_steps() {
        let out = press(&plain(), &["1", "+", "2", "="], true, false);
        let displays: Vec<&str> = out
            .lines()
            .map(|line| line.split("  ").last().unwrap())
            .collect();
        assert_eq!(displays, vec!["1", "1 + ", "1 + 2", "3"]);
    }

    #[test]
    fn test_press_with_tape() {
        let out = press(&plain(), &["2", "×", "3", "=", "sq"], false, true);
        assert_eq!(out, "36\n2 × 3 = 6\nx² 6 = 36\n");
    }

    #[test]
    fn test_press_respects_tape_size() {
        let config = plain().with_tape_size(1);
        let out = press(&config, &["1+1=+1="], false, true);
        assert_eq!(out, "3\n2 + 1 = 3\n");
    }

    #[test]
    fn test_press_with_maximum_tape_size() {
        let config = plain().with_tape_size(usize::MAX);
        let out = press(&config, &["1+1="], false, true);
        assert_eq!(out, "2\n1 + 1 = 2\n");
    }

    #[test]
    fn test_press_json_report() {
        let out = press(&json(), &["9", "÷", "4", "="], true, true);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["display"], "2.25");
        assert_eq!(value["decimal_used"], true);
        assert_eq!(value["steps"].as_array().unwrap().len(), 4);
        assert_eq!(value["tape"][0]["expression"], "9 ÷ 4");
    }

    // ===== repl =====

    #[test]
    fn test_repl_session_persists_across_lines() {
        let (out, err) = repl(&plain(), "5 + 3 =\n× 2 =\n");
        assert_eq!(out, "8\n16\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_repl_tape_commands() {
        let (out, _) = repl(&plain(), "1 + 1 =\n:tape\n:clear-tape\n:tape\n");
        assert_eq!(out, "2\n1 + 1 = 2\n");
    }

    #[test]
    fn test_repl_bad_line_keeps_session() {
        let (out, err) = repl(&plain(), "7 +\nbanana\n2 =\n");
        assert_eq!(out, "7 + \n9\n");
        assert!(err.contains("Unknown key"));
        assert!(err.contains("banana"));
    }

    #[test]
    fn test_repl_unknown_command() {
        let (out, err) = repl(&plain(), ":frobnicate\n4\n");
        assert_eq!(out, "4\n");
        assert!(err.contains(":frobnicate"));
    }

    #[test]
    fn test_repl_quit_stops_reading() {
        let (out, _) = repl(&plain(), "3\n:quit\n4\n");
        assert_eq!(out, "3\n");
    }

    #[test]
    fn test_repl_skips_blank_lines() {
        let (out, _) = repl(&plain(), "\n   \n8\n");
        assert_eq!(out, "8\n");
    }

    #[test]
    fn test_repl_prompt() {
        let args = ReplArgs {
            prompt: "> ".to_string(),
        };
        let mut out = Vec::new();
        run_repl(&plain(), &args, "4\n".as_bytes(), &mut out, Vec::new()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "> 4\n> ");
    }

    #[test]
    fn test_quiet_repl_drops_prompt() {
        let args = ReplArgs {
            prompt: "> ".to_string(),
        };
        let config = plain().with_verbosity(Verbosity::Quiet);
        let mut out = Vec::new();
        run_repl(&config, &args, "4\n".as_bytes(), &mut out, Vec::new()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "4\n");
    }

    #[test]
    fn test_repl_json_lines() {
        let (out, _) = repl(&json(), "1 ÷ 0 =\n");
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["display"], "ERROR");
        assert_eq!(value["error"]["kind"], "division_by_zero");
    }

    // ===== keys and config =====

    #[test]
    fn test_keys_plain_layout() {
        let mut out = Vec::new();
        run_keys(&plain(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let first = out.lines().next().unwrap();
        assert_eq!(first, "[  ←  ] [ CE  ] [  C  ] [  ÷  ]");
        assert!(out.contains("functions: 1/x  x²  √"));
        assert!(out.contains("sqrt"));
    }

    #[test]
    fn test_keys_json() {
        let mut out = Vec::new();
        run_keys(&json(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["rows"].as_array().unwrap().len(), 5);
        assert_eq!(value["rows"][4][3], "=");
        assert_eq!(value["functions"][2], "√");
        assert_eq!(value["keys"].as_array().unwrap().len(), 23);
    }

    #[test]
    fn test_config_is_json() {
        let mut out = Vec::new();
        run_config(&plain().with_tape_size(7), &mut out).unwrap();
        let back: CliConfig = serde_json::from_slice(&out).unwrap();
        assert_eq!(back.tape_size, 7);
        assert_eq!(back.color, ColorChoice::Never);
    }
}
