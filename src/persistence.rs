// File: src/persistence.rs
use crate::core::lexicon::Lexicon;
use crate::error::ImeError;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

const MAGIC: [u8; 4] = *b"BRLX";
const VERSION: u8 = 1;

/// On-disk form of a lexicon: the ordered word list only. The trie is rebuilt on load.
#[derive(serde::Serialize, serde::Deserialize)]
struct LexiconSnapshot {
    magic: [u8; 4],
    version: u8,
    words: Vec<String>,
}

/// Writes atomically: a temp file in the same directory, then rename.
pub fn save_lexicon(lexicon: &Lexicon, path: &Path) -> Result<(), ImeError> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let snapshot = LexiconSnapshot {
        magic: MAGIC,
        version: VERSION,
        words: lexicon.words().to_vec(),
    };

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file_mut());
        bincode::serialize_into(&mut writer, &snapshot)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| ImeError::Io(e.error))?;
    debug!(words = lexicon.len(), path = %path.display(), "lexicon saved");
    Ok(())
}

pub fn load_lexicon(path: &Path) -> Result<Lexicon, ImeError> {
    let reader = BufReader::new(File::open(path)?);
    let snapshot: LexiconSnapshot = bincode::deserialize_from(reader)?;
    if snapshot.magic != MAGIC {
        return Err(ImeError::BadMagic);
    }
    if snapshot.version != VERSION {
        return Err(ImeError::UnsupportedVersion {
            found: snapshot.version,
            expected: VERSION,
        });
    }
    debug!(words = snapshot.words.len(), path = %path.display(), "lexicon loaded");
    Ok(Lexicon::new(snapshot.words))
}

/// Loads the snapshot at `path`, falling back to the built-in list when it is
/// missing or unreadable.
pub fn load_lexicon_or_default(path: &Path) -> Lexicon {
    load_lexicon(path).unwrap_or_else(|e| {
        debug!(error = %e, "using built-in lexicon");
        Lexicon::default_english()
    })
}
