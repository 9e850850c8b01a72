use braille_core::core::types::{ChordKey, Dot};
use braille_core::persistence::load_lexicon_or_default;
use braille_core::trace_init::init_tracing;
use braille_core::{BrailleEngine, EngineConfig, Lexicon};
use crossterm::style::Stylize;
use crossterm::{cursor, execute, terminal};
use std::io::{stdin, stdout, Write};
use std::path::Path;
use std::sync::Arc;

const LEXICON_PATH: &str = "lexicon.bin";
const CONFIG_PATH: &str = "braille_ime.json";

fn main() -> std::io::Result<()> {
    init_tracing();

    let config = if Path::new(CONFIG_PATH).exists() {
        EngineConfig::from_json_file(Path::new(CONFIG_PATH)).unwrap_or_else(|e| {
            eprintln!("[WARN] Ignoring {CONFIG_PATH}: {e}");
            EngineConfig::default()
        })
    } else {
        EngineConfig::default()
    };
    let lexicon: Lexicon = load_lexicon_or_default(Path::new(LEXICON_PATH));
    let mut engine = BrailleEngine::new(Arc::new(lexicon), &config);
    let mut preedit = String::new();
    let mut selected: Option<(String, String)> = None;

    loop {
        let suggestions = engine.suggest_for_text(&preedit);
        print_ui(&preedit, &suggestions, selected.as_ref(), &engine)?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim_end_matches(&['\r', '\n'][..]);

        match cmd {
            "exit" => break,
            "" => {
                // Enter: accept the top suggestion, or the raw text if there is none.
                let to_commit = suggestions.first().cloned().unwrap_or_else(|| preedit.trim().to_string());
                if !to_commit.is_empty() {
                    let pattern = engine.encode_word(&to_commit);
                    engine.record_accepted(&to_commit);
                    selected = Some((to_commit, pattern));
                }
                preedit.clear();
            }
            s if s.starts_with(':') && s.len() > 1 => {
                if let Ok(n) = s[1..].parse::<usize>() {
                    if n > 0 && n <= suggestions.len() {
                        let chosen = suggestions[n - 1].clone();
                        let pattern = engine.encode_word(&chosen);
                        engine.record_accepted(&chosen);
                        selected = Some((chosen, pattern));
                        preedit.clear();
                    }
                }
            }
            s if s.starts_with("/b ") => {
                // Decode a cell pattern and use it as the pre-edit.
                preedit = engine.decode_word(&s[3..]);
            }
            "/clear" => preedit.clear(),
            s => preedit.push_str(s),
        }
    }

    println!("\nBye.");
    Ok(())
}

fn print_ui(
    preedit: &str,
    suggestions: &[String],
    selected: Option<&(String, String)>,
    engine: &BrailleEngine,
) -> std::io::Result<()> {
    let mut out = stdout();
    execute!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
    println!("{}", "Braille Smart IME (text mode)".bold());
    println!("---------------------------------------------------------------");
    println!("Type text and press [Enter] to accept the top suggestion.");
    println!("Select with ':1', ':2'. '/b <cells>' decodes Braille. 'exit' to quit.");
    println!("Chord keys: {}\n", key_legend(engine).dark_grey());

    let recent: Vec<&str> = engine.history().iter().take(5).collect();
    println!("History: {}", recent.join(", ").dark_grey());

    println!("\nPre-edit: [{}]", preedit.cyan());
    if !preedit.is_empty() {
        println!("Braille -> {}", engine.encode_word(preedit));
    }

    if !suggestions.is_empty() {
        println!("\n{}", "Suggestions:".green());
        for (i, word) in suggestions.iter().enumerate() {
            println!("  :{}: {:<14} {}", i + 1, word, engine.encode_word(word).dark_grey());
        }
    } else if !preedit.is_empty() {
        println!("\nNo suggestions found.");
    }

    if let Some((word, pattern)) = selected {
        println!("\nSelected: {} ({})", word.as_str().yellow(), pattern);
    }
    print!("\n> ");
    out.flush()
}

/// "1=d 2=w ..." for the configured dot keys.
fn key_legend(engine: &BrailleEngine) -> String {
    let bindings = engine.key_bindings();
    Dot::ALL
        .into_iter()
        .filter_map(|dot| {
            let key = bindings.key_for(ChordKey::Dot(dot))?;
            Some(format!("{}={}", dot.number(), key))
        })
        .collect::<Vec<_>>()
        .join(" ")
}
