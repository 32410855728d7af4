use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

/// The eight Brainfuck instruction characters, in canonical order.
pub const INSTRUCTIONS: [char; 8] = ['>', '<', '+', '-', '.', ',', '[', ']'];

/// Errors that can occur while loading an instruction map file.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// The map file does not exist.
    #[error("Map file '{path}' not found")]
    NotFound { path: String },

    /// The map file exists but is not a valid JSON object of strings.
    #[error("Invalid JSON in map file '{path}': {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Any other failure reading the map file (permissions, etc.).
    #[error("Failed to read map file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Raw shape of a map file: a JSON object from instruction to replacement text.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct RawMapping(HashMap<String, String>);

/// An immutable table from Brainfuck instruction characters to replacement text.
///
/// Constructed once per run, either from the built-in defaults or from a JSON
/// map file, and read-only afterwards. Replacement values may contain embedded
/// newlines and, in the label modes, placeholder markers. Characters without
/// an entry simply produce no output when transpiled.
#[derive(Debug, Clone)]
pub struct InstructionMapping {
    map: HashMap<char, String>,
}

impl Default for InstructionMapping {
    /// The built-in generic pseudo-assembly mapping.
    fn default() -> Self {
        let map = [
            ('>', "inc p\n"),
            ('<', "dec p\n"),
            ('+', "inc *p\n"),
            ('-', "dec *p\n"),
            ('.', "output\n"),
            (',', "input\n"),
            ('[', "while *p\n"),
            (']', "wend\n"),
        ]
        .into_iter()
        .map(|(ch, text)| (ch, text.to_string()))
        .collect();
        Self { map }
    }
}

impl InstructionMapping {
    /// Load a mapping from a JSON map file.
    ///
    /// The document must be a JSON object with string values. Only
    /// single-character keys are retained; anything else is tolerated but can
    /// never be looked up. A missing file and malformed JSON are distinct
    /// errors so the caller can report them precisely.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MappingError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            let path = path.display().to_string();
            if e.kind() == io::ErrorKind::NotFound {
                MappingError::NotFound { path }
            } else {
                MappingError::Io { path, source: e }
            }
        })?;
        Self::from_json(&content).map_err(|source| MappingError::InvalidJson {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse a mapping from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let RawMapping(raw) = serde_json::from_str(json)?;
        let map = raw
            .into_iter()
            .filter_map(|(key, text)| {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some((ch, text)),
                    _ => None,
                }
            })
            .collect();
        Ok(Self { map })
    }

    /// Replacement text for `ch`, or `None` if the instruction is unmapped.
    pub fn get(&self, ch: char) -> Option<&str> {
        self.map.get(&ch).map(String::as_str)
    }

    /// The required instruction characters absent from this mapping, in
    /// canonical instruction order.
    pub fn missing(&self) -> Vec<char> {
        INSTRUCTIONS
            .iter()
            .copied()
            .filter(|ch| !self.map.contains_key(ch))
            .collect()
    }
}
