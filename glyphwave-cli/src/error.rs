use glyphwave_core::analyser::AnalyserError;
use glyphwave_core::ConfigError;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum MediaError {
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
    Wav(hound::Error),
    Config(ConfigError),
    Analyser(AnalyserError),
    NotADirectory(PathBuf),
}

impl MediaError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        MediaError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            MediaError::Json(e) => write!(f, "JSON error: {e}"),
            MediaError::Wav(e) => write!(f, "WAV error: {e}"),
            MediaError::Config(e) => write!(f, "{e}"),
            MediaError::Analyser(e) => write!(f, "analyser: {e}"),
            MediaError::NotADirectory(p) => write!(f, "{} is not a directory", p.display()),
        }
    }
}

impl std::error::Error for MediaError {}

impl From<serde_json::Error> for MediaError {
    fn from(e: serde_json::Error) -> Self {
        MediaError::Json(e)
    }
}

impl From<hound::Error> for MediaError {
    fn from(e: hound::Error) -> Self {
        MediaError::Wav(e)
    }
}

impl From<ConfigError> for MediaError {
    fn from(e: ConfigError) -> Self {
        MediaError::Config(e)
    }
}

impl From<AnalyserError> for MediaError {
    fn from(e: AnalyserError) -> Self {
        MediaError::Analyser(e)
    }
}
