use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;
use url::Url;

/// Repository URL errors
#[derive(Debug, Error, PartialEq)]
pub enum RepositoryUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),

    #[error("URL injection attempt detected: {0}")]
    UrlInjectionAttempt(String),
}

/// How the location of a repository is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlKind {
    /// `https://`, `http://`, `ssh://`, `git://` or `file://`
    Remote,
    /// `user@host:org/repo.git`
    ScpLike,
    /// A path on the local filesystem
    LocalPath,
}

/// A validated location that can be handed to `git clone`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryUrl {
    url: String,
    kind: UrlKind,
}

const SUPPORTED_SCHEMES: &[&str] = &["https", "http", "ssh", "git", "file"];

fn scp_like_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z0-9._-]+@)?[A-Za-z0-9.-]+:[^/\\].*$").expect("valid scp-like pattern")
    })
}

impl RepositoryUrl {
    /// Parse and validate a repository location.
    pub fn new(url: &str) -> Result<Self, RepositoryUrlError> {
        let trimmed = url.trim();

        if trimmed.is_empty() {
            return Err(RepositoryUrlError::InvalidFormat("Empty URL".to_string()));
        }

        // git would read a leading dash as an option
        if trimmed.starts_with('-') {
            return Err(RepositoryUrlError::UrlInjectionAttempt(trimmed.to_string()));
        }

        if trimmed.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(RepositoryUrlError::UrlInjectionAttempt(trimmed.to_string()));
        }

        let kind = Self::classify(trimmed)?;

        Ok(Self {
            url: trimmed.to_string(),
            kind,
        })
    }

    fn classify(url: &str) -> Result<UrlKind, RepositoryUrlError> {
        if url.contains("://") {
            let parsed =
                Url::parse(url).map_err(|e| RepositoryUrlError::InvalidFormat(format!("{}: {}", url, e)))?;

            if !SUPPORTED_SCHEMES.contains(&parsed.scheme()) {
                return Err(RepositoryUrlError::UnsupportedScheme(parsed.scheme().to_string()));
            }

            if parsed.scheme() != "file" && parsed.host_str().map_or(true, str::is_empty) {
                return Err(RepositoryUrlError::MissingHost(url.to_string()));
            }

            return Ok(UrlKind::Remote);
        }

        if scp_like_pattern().is_match(url) && !Self::looks_like_windows_drive(url) {
            return Ok(UrlKind::ScpLike);
        }

        Ok(UrlKind::LocalPath)
    }

    fn looks_like_windows_drive(url: &str) -> bool {
        let bytes = url.as_bytes();
        bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
    }

    /// The URL exactly as it will be passed to git.
    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> UrlKind {
        self.kind
    }
}

impl fmt::Display for RepositoryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl TryFrom<String> for RepositoryUrl {
    type Error = RepositoryUrlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<RepositoryUrl> for String {
    fn from(value: RepositoryUrl) -> Self {
        value.url
    }
}

impl std::str::FromStr for RepositoryUrl {
    type Err = RepositoryUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_url() {
        let url = RepositoryUrl::new("https://github.com/hypothesis/h.git").unwrap();
        assert_eq!(url.kind(), UrlKind::Remote);
        assert_eq!(url.as_str(), "https://github.com/hypothesis/h.git");
    }

    #[test]
    fn test_scp_like_url() {
        let url = RepositoryUrl::new("git@github.com:hypothesis/client.git").unwrap();
        assert_eq!(url.kind(), UrlKind::ScpLike);
    }

    #[test]
    fn test_local_path() {
        let url = RepositoryUrl::new("/srv/git/via.git").unwrap();
        assert_eq!(url.kind(), UrlKind::LocalPath);

        let relative = RepositoryUrl::new("../remotes/lms").unwrap();
        assert_eq!(relative.kind(), UrlKind::LocalPath);
    }

    #[test]
    fn test_file_url_without_host() {
        let url = RepositoryUrl::new("file:///srv/git/h.git").unwrap();
        assert_eq!(url.kind(), UrlKind::Remote);
    }

    #[test]
    fn test_trims_whitespace() {
        let url = RepositoryUrl::new("  https://example.com/repo.git  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/repo.git");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(RepositoryUrl::new("   "), Err(RepositoryUrlError::InvalidFormat(_))));
    }

    #[test]
    fn test_rejects_option_injection() {
        assert!(matches!(
            RepositoryUrl::new("--upload-pack=touch /tmp/pwned"),
            Err(RepositoryUrlError::UrlInjectionAttempt(_))
        ));
        assert!(matches!(
            RepositoryUrl::new("https://example.com/a b"),
            Err(RepositoryUrlError::UrlInjectionAttempt(_))
        ));
    }

    #[test]
    fn test_rejects_unsupported_scheme() {
        assert_eq!(
            RepositoryUrl::new("ftp://example.com/repo.git"),
            Err(RepositoryUrlError::UnsupportedScheme("ftp".to_string()))
        );
    }

    #[test]
    fn test_deserializes_from_string() {
        let url: RepositoryUrl = serde_json::from_str("\"https://example.com/x.git\"").unwrap();
        assert_eq!(url.as_str(), "https://example.com/x.git");

        let bad: Result<RepositoryUrl, _> = serde_json::from_str("\"-x\"");
        assert!(bad.is_err());
    }
}
