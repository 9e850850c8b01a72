// Line protocol bridge for a frontend that forwards raw key press/release events.
//
//   <- KEY_DOWN <keyval> | KEY_UP <keyval> | TICK | SELECT <n> | RESET | EXIT
//   -> UPDATE_DOTS <cells> | COMMIT_CHAR <c> | WORD_BOUNDARY | ARM_TIMER <ms>
//      UPDATE_PREEDIT_TEXT <text> | lookup table commands
use braille_core::core::types::{ChordEvent, KeyResponse};
use braille_core::trace_init::init_tracing;
use braille_core::BrailleEngine;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing::{debug, warn};

fn main() -> io::Result<()> {
    init_tracing();
    debug!("simulator starting");

    let mut engine = BrailleEngine::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let input = line?;
        debug!(input = %input, "<-");
        let parts: Vec<&str> = input.split_whitespace().collect();
        let command = parts.first().copied().unwrap_or("");
        let key = parts
            .get(1)
            .and_then(|s| s.parse::<u32>().ok())
            .and_then(char::from_u32);

        let response = match (command, key) {
            ("KEY_DOWN", Some(key)) => engine.on_key_down(key),
            ("KEY_UP", Some(key)) => engine.on_key_up(key),
            ("TICK", _) => engine.poll(),
            ("SELECT", _) => {
                let n: usize = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(0);
                if let Some(word) = n.checked_sub(1).and_then(|i| engine.suggestions().get(i)).cloned() {
                    let pattern = engine.accept_suggestion(&word);
                    writeln!(stdout, "COMMIT_WORD {word} {pattern}")?;
                    update_ibus(&engine, &mut stdout)?;
                }
                continue;
            }
            ("RESET", _) => {
                engine.reset();
                update_ibus(&engine, &mut stdout)?;
                continue;
            }
            ("EXIT", _) => break,
            _ => {
                warn!(input = %input, "unknown command");
                continue;
            }
        };
        write_response(&engine, &response, &mut stdout)?;
    }
    debug!("simulator shutting down");
    Ok(())
}

fn write_response(engine: &BrailleEngine, response: &KeyResponse, stdout: &mut io::Stdout) -> io::Result<()> {
    writeln!(stdout, "UPDATE_DOTS {}", response.live_dots)?;
    for event in &response.events {
        match event {
            ChordEvent::Character { ch, .. } => writeln!(stdout, "COMMIT_CHAR {ch}")?,
            ChordEvent::WordBoundary => writeln!(stdout, "WORD_BOUNDARY")?,
        }
    }
    if let Some(deadline) = engine.pending_deadline() {
        let wait = deadline.saturating_duration_since(Instant::now());
        writeln!(stdout, "ARM_TIMER {}", wait.as_millis())?;
    }
    if response.suggestions.is_some() {
        update_ibus(engine, stdout)?;
    }
    stdout.flush()
}

fn update_ibus(engine: &BrailleEngine, stdout: &mut io::Stdout) -> io::Result<()> {
    writeln!(stdout, "UPDATE_PREEDIT_TEXT {} 0 true", engine.live_text())?;
    writeln!(stdout, "UPDATE_LOOKUP_TABLE")?;

    let suggestions = engine.suggestions();
    if suggestions.is_empty() {
        writeln!(stdout, "HIDE_LOOKUP_TABLE")?;
    } else {
        for (i, word) in suggestions.iter().enumerate() {
            writeln!(stdout, "ADD_CANDIDATE {} '{}' {}", i, word, engine.encode_word(word))?;
        }
        writeln!(stdout, "SHOW_LOOKUP_TABLE")?;
    }
    stdout.flush()
}
