use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use crate::emitter::Emit;
use crate::mapping::INSTRUCTIONS;

/// Errors that can occur while driving a transpilation run.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// A header, source, or tail file does not exist.
    #[error("File '{path}' not found")]
    NotFound { path: String },

    /// A header, source, or tail file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The output stream rejected a write.
    #[error("Failed to write output: {source}")]
    Write {
        #[source]
        source: io::Error,
    },
}

/// Transpile one run: optional header passthrough, the instruction-by-
/// instruction transformation of `source` through `emitter`, then optional
/// tail passthrough.
///
/// Header and tail are copied byte-for-byte with no transformation. The
/// source is scanned as a byte stream (instructions are ASCII) and only the
/// eight instruction characters ever reach the emitter; everything else is
/// skipped. Output already streamed stays streamed when a later file fails.
pub fn convert(
    header: Option<&Path>,
    source: &Path,
    tail: Option<&Path>,
    emitter: &mut dyn Emit,
    out: &mut dyn Write,
) -> Result<(), ConvertError> {
    if let Some(path) = header {
        copy_raw(path, out)?;
    }

    let mut reader = BufReader::new(open(source)?);
    let mut buf = [0u8; 8 * 1024];
    loop {
        let n = reader.read(&mut buf).map_err(|e| ConvertError::Read {
            path: source.display().to_string(),
            source: e,
        })?;
        if n == 0 {
            break;
        }
        for &byte in &buf[..n] {
            let ch = byte as char;
            if INSTRUCTIONS.contains(&ch) {
                emitter
                    .emit(ch, out)
                    .map_err(|source| ConvertError::Write { source })?;
            }
        }
    }

    if let Some(path) = tail {
        copy_raw(path, out)?;
    }
    Ok(())
}

fn open(path: &Path) -> Result<File, ConvertError> {
    File::open(path).map_err(|e| {
        let path = path.display().to_string();
        if e.kind() == io::ErrorKind::NotFound {
            ConvertError::NotFound { path }
        } else {
            ConvertError::Read { path, source: e }
        }
    })
}

fn copy_raw(path: &Path, out: &mut dyn Write) -> Result<(), ConvertError> {
    let mut file = open(path)?;
    io::copy(&mut file, out).map_err(|source| ConvertError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}
