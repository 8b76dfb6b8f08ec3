//! Line-based front-end: the same buttons, statistics and history log as a
//! desktop window, over stdin/stdout.
use std::io::{self, BufRead, Write};

use common::model::game::Score;
use itertools::Itertools;
use tracing::info;

use crate::session::GameSession;

const PROMPT: &str = "Make your move [R]ock, [P]aper, [S]cissors (or history, quit): ";

fn stats(score: &Score) -> String {
    format!(
        "Player Wins: {} | Computer Wins: {} | Ties: {}",
        score.player_wins, score.computer_wins, score.ties
    )
}

pub fn run<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: R,
    mut output: W,
) -> io::Result<()> {
    write!(output, "{}", PROMPT)?;
    output.flush()?;
    for line in input.lines() {
        let line = line?;
        let command = line.trim();
        match command.to_ascii_lowercase().as_str() {
            "" => {}
            "q" | "quit" | "exit" => break,
            "history" => {
                if session.history().is_empty() {
                    writeln!(output, "No rounds played yet.")?;
                } else {
                    writeln!(output, "{}", session.history().iter().join("\n"))?;
                }
            }
            _ => match session.play_token(command) {
                Ok(_) => {
                    if let Some(record) = session.history().last() {
                        writeln!(output, "{}", record)?;
                    }
                    writeln!(output, "{}", stats(&session.score()))?;
                }
                Err(e) => writeln!(output, "{}", e)?,
            },
        }
        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }
    writeln!(output)?;
    writeln!(output, "Final score. {}", stats(&session.score()))?;
    info!("Terminal game ended after {} rounds", session.score().rounds());
    Ok(())
}
