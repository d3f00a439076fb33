//! Terminal prompter backed by dialoguer.

use std::io::{self, BufRead, ErrorKind, IsTerminal, Write};

use dialoguer::Input;

use crate::error::ScribeError;

use super::Prompter;

const QUESTION: &str = "Commit with this message? [y]es / [e]dit / [r]egenerate / [n]o";
const RULE: &str = "────────────────────────────────────────────────────────────────────────";

/// Interactive prompter on stdin/stderr.
///
/// Falls back to plain line reading when stdin is not a terminal, so answers
/// can be piped in. dialoguer would otherwise read keys from the controlling
/// terminal whenever stderr is one.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn show(&mut self, message: &str) {
        println!();
        println!("{RULE}");
        println!("{message}");
        println!("{RULE}");
    }

    fn ask(&mut self) -> Result<Option<String>, ScribeError> {
        if !io::stdin().is_terminal() {
            return read_plain_line(&mut io::stdin().lock(), &mut io::stderr());
        }

        let answer = Input::<String>::new()
            .with_prompt(QUESTION)
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::from);

        match answer {
            Ok(answer) => Ok(Some(answer)),
            Err(e) if matches!(e.kind(), ErrorKind::Interrupted | ErrorKind::UnexpectedEof) => {
                Ok(None)
            }
            Err(e) if e.kind() == ErrorKind::NotConnected => {
                read_plain_line(&mut io::stdin().lock(), &mut io::stderr())
            }
            Err(e) => Err(ScribeError::Prompt(e)),
        }
    }

    fn notice(&mut self, text: &str) {
        eprintln!("{text}");
    }
}

/// Read one answer line without terminal handling. `None` on EOF.
fn read_plain_line(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Option<String>, ScribeError> {
    write!(output, "{QUESTION}: ")
        .and_then(|()| output.flush())
        .map_err(ScribeError::Prompt)?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(ScribeError::Prompt)?;

    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
