use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crabsmiles::{parse_smiles, to_smiles, tokenize, ParseTree};

use crate::cli::{Command, InputArgs};
use crate::display::{self, GraphSummary};

#[derive(Debug, Clone, Copy)]
enum View {
    Tokens,
    Tree,
    Graph,
    Write,
}

#[derive(Serialize)]
struct Written<'a> {
    input: &'a str,
    smiles: &'a str,
}

pub fn dispatch(command: Command) -> Result<()> {
    let (view, args) = match command {
        Command::Tokens(args) => (View::Tokens, args),
        Command::Tree(args) => (View::Tree, args),
        Command::Graph(args) => (View::Graph, args),
        Command::Write(args) => (View::Write, args),
    };

    match &args.smiles {
        Some(smiles) => run_one(view, &args, smiles, &mut io::stdout().lock()),
        None => run_lines(view, &args),
    }
}

/// Processes stdin one SMILES per line, reporting failures without stopping.
fn run_lines(view: View, args: &InputArgs) -> Result<()> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("no SMILES argument given and stdin is a terminal");
    }

    let mut out = io::stdout().lock();
    let (total, failures) = run_reader(view, args, stdin.lock(), &mut out)?;
    let failed = failures.len();
    for (line, e) in &failures {
        display::print_line_error(*line, e);
    }

    info!(total, failed, "finished reading stdin");
    if failed > 0 {
        bail!("{failed} of {total} inputs failed");
    }
    Ok(())
}

/// Runs every non-blank line of `input`, returning the number of inputs and
/// the failures keyed by 1-based line number.
///
/// Lines are passed through untrimmed so error positions are byte offsets
/// into the line as written.
fn run_reader(
    view: View,
    args: &InputArgs,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(usize, Vec<(usize, anyhow::Error)>)> {
    let mut total = 0usize;
    let mut failures = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        total += 1;
        if let Err(e) = run_one(view, args, &line, &mut *out) {
            failures.push((index + 1, e));
        }
    }
    Ok((total, failures))
}

fn run_one(view: View, args: &InputArgs, smiles: &str, out: &mut impl Write) -> Result<()> {
    if smiles.len() > args.max_len {
        bail!(
            "input is {} bytes, longer than --max-len {}",
            smiles.len(),
            args.max_len
        );
    }
    debug!(?view, smiles, "processing input");

    match view {
        View::Tokens => {
            let tokens =
                tokenize(smiles).with_context(|| format!("cannot tokenize {smiles:?}"))?;
            if args.json {
                write_json(out, &tokens)?;
            } else {
                display::tokens(out, &tokens)?;
            }
        }
        View::Tree => {
            let tree = parse(smiles)?;
            if args.json {
                write_json(out, &tree)?;
            } else {
                display::tree(out, &tree)?;
            }
        }
        View::Graph => {
            let summary = GraphSummary::new(&parse(smiles)?.to_graph());
            if args.json {
                write_json(out, &summary)?;
            } else {
                display::graph(out, &summary)?;
            }
        }
        View::Write => {
            let written = to_smiles(&parse(smiles)?);
            if args.json {
                write_json(
                    out,
                    &Written {
                        input: smiles,
                        smiles: &written,
                    },
                )?;
            } else {
                writeln!(out, "{written}")?;
            }
        }
    }
    Ok(())
}

fn parse(smiles: &str) -> Result<ParseTree> {
    parse_smiles(smiles).with_context(|| format!("cannot parse {smiles:?}"))
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer(&mut *out, value).context("failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crabsmiles::SmilesError;

    fn args() -> InputArgs {
        InputArgs {
            smiles: None,
            json: false,
            max_len: 4096,
        }
    }

    fn run(view: View, input: &str) -> (String, usize, Vec<(usize, anyhow::Error)>) {
        let mut out = Vec::new();
        let (total, failures) = run_reader(view, &args(), input.as_bytes(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), total, failures)
    }

    #[test]
    fn blank_lines_are_skipped() {
        let (out, total, failures) = run(View::Write, "CCO\n\n   \nC(C)C\n");
        assert_eq!(out, "CCO\nC(C)C\n");
        assert_eq!(total, 2);
        assert!(failures.is_empty());
    }

    #[test]
    fn error_positions_count_leading_whitespace() {
        let (_, total, failures) = run(View::Tree, "C\n  C1CC\n");
        assert_eq!(total, 2);
        assert_eq!(failures.len(), 1);
        let (line, err) = &failures[0];
        assert_eq!(*line, 2);
        let smiles_err = err.downcast_ref::<SmilesError>().unwrap();
        assert_eq!(smiles_err.position(), 6);
    }

    #[test]
    fn long_lines_are_rejected() {
        let mut out = Vec::new();
        let short = InputArgs {
            max_len: 3,
            ..args()
        };
        let (_, failures) =
            run_reader(View::Write, &short, "CCCC\nCC\n".as_bytes(), &mut out).unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, 1);
        assert_eq!(out, b"CC\n");
    }

    #[test]
    fn json_output_per_line() {
        let mut out = Vec::new();
        let json = InputArgs {
            json: true,
            ..args()
        };
        run_reader(View::Graph, &json, "C1CC1\n".as_bytes(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["atoms"], 3);
        assert_eq!(value["rings"], 1);
        assert_eq!(value["bonds"].as_array().map(Vec::len), Some(3));
    }
}
