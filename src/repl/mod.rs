//! REPL Module
//!
//! The interactive prompt: reads a line, looks the first word up in the
//! command table and runs it against the session.

mod commands;
mod session;

pub use commands::{catch_probability, Command};
pub use session::{Flow, Pokedex, Session};

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use crate::api::Fetcher;
use crate::error::Result;

/// Prompt printed before every line.
pub const PROMPT: &str = "Pokedex > ";

/// Lowercases `text` and splits it on whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Runs the prompt loop until `exit` or end of input.
pub async fn run<F, R, W>(session: &mut Session<F>, input: R, out: &mut W) -> Result<()>
where
    F: Fetcher,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            info!("input closed, leaving the Pokedex");
            break;
        };
        if session.execute(&line, out).await? == Flow::Exit {
            break;
        }
    }
    Ok(())
}
