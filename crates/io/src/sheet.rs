// Published sheet fetch over HTTP(S), with local files as a fallback

use std::path::Path;
use std::time::Duration;

use colab_config::SheetSettings;
use colab_recon::{ExternalSource, ReconError, SourceKind};

pub const USER_AGENT: &str = concat!("colab/", env!("CARGO_PKG_VERSION"));

/// Reads the sheet export from a URL or a path on disk.
///
/// Redirects are followed (published Google Sheets answer with one). There is
/// no retry: a failed fetch fails the request that needed it.
#[derive(Debug, Clone)]
pub struct SheetFetcher {
    http: reqwest::blocking::Client,
}

impl SheetFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ReconError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                ReconError::unavailable(SourceKind::External, format!("cannot build HTTP client: {e}"))
            })?;
        Ok(Self { http })
    }

    pub fn from_settings(settings: &SheetSettings) -> Result<Self, ReconError> {
        Self::new(Duration::from_secs(settings.timeout_secs))
    }

    fn fetch_url(&self, url: &str) -> Result<String, ReconError> {
        let unavailable =
            |e: reqwest::Error| ReconError::unavailable(SourceKind::External, format!("{url}: {e}"));

        let resp = self.http.get(url).send().map_err(unavailable)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ReconError::unavailable(
                SourceKind::External,
                format!("{url}: HTTP {}", status.as_u16()),
            ));
        }
        let text = resp.text().map_err(unavailable)?;
        tracing::debug!(url, bytes = text.len(), "fetched sheet");
        Ok(text)
    }

    fn read_file(path: &Path) -> Result<String, ReconError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ReconError::unavailable(SourceKind::External, format!("{}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "read sheet file");
        Ok(text)
    }
}

fn is_http(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl ExternalSource for SheetFetcher {
    fn fetch_sheet(&self, location: &str) -> Result<String, ReconError> {
        let text = if is_http(location) {
            self.fetch_url(location.trim())?
        } else {
            let path = location.strip_prefix("file://").unwrap_or(location);
            Self::read_file(Path::new(path))?
        };
        Ok(match text.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_string(),
            None => text,
        })
    }
}
