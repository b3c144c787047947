//! Log reader - obtains raw compiler output.
//!
//! Sources: a file on disk, standard input (`-`), or the sample log embedded
//! at build time. The text is returned whole; parsing happens elsewhere.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TriageError};

/// Default log file name, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "compile_errors.log";

/// Path value that selects standard input
pub const STDIN_PATH: &str = "-";

/// Maven output captured from a failing `mvn compile`, kept for demos and for
/// re-checking categories without re-running the build.
pub const SAMPLE_LOG: &str = include_str!("../data/sample_compile_errors.log");

/// Where the compiler output comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    File(PathBuf),
    Stdin,
    Embedded,
}

impl LogSource {
    /// Map a CLI path argument to a source; `-` means stdin.
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == STDIN_PATH {
            LogSource::Stdin
        } else {
            LogSource::File(arg.to_path_buf())
        }
    }

    /// Human-readable origin for banners and logs
    pub fn describe(&self) -> String {
        match self {
            LogSource::File(path) => path.display().to_string(),
            LogSource::Stdin => "<stdin>".to_string(),
            LogSource::Embedded => "<embedded sample>".to_string(),
        }
    }

    /// Read the full text of this source.
    pub fn read(&self) -> Result<String> {
        let text = match self {
            LogSource::File(path) => read_file(path)?,
            LogSource::Stdin => read_stdin()?,
            LogSource::Embedded => SAMPLE_LOG.to_string(),
        };
        debug!(source = %self.describe(), bytes = text.len(), "read compiler log");
        Ok(text)
    }
}

impl Default for LogSource {
    fn default() -> Self {
        LogSource::File(PathBuf::from(DEFAULT_LOG_FILE))
    }
}

/// Read a whole file, decoding invalid UTF-8 lossily.
pub fn read_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| TriageError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode(bytes))
}

fn read_stdin() -> Result<String> {
    let mut bytes = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .map_err(|source| TriageError::InputUnavailable {
            path: PathBuf::from(STDIN_PATH),
            source,
        })?;
    Ok(decode(bytes))
}

// Maven on Windows writes the console code page; keep going rather than fail.
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}
