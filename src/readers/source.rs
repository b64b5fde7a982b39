use std::fmt;
use std::path::PathBuf;

/// Where the observation table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched, anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::Path(PathBuf::from(location))
        }
    }

    pub fn location(&self) -> String {
        match self {
            DataSource::Path(path) => path.display().to_string(),
            DataSource::Url(url) => url.clone(),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.location())
    }
}
