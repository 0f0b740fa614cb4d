use std::path::PathBuf;

use tracing::{info, warn};

use crate::classify::is_wikipedia_url;
use crate::extract::{self, ExtractedRecord, ExtractionConfig};
use crate::fetch::{self, FetchError};
use crate::store;

const DATA_DIR: &str = "data";

/// Fetches pages, runs extraction and persists the clipped records.
pub struct Crawler {
    client: reqwest::Client,
    data_dir: PathBuf,
}

impl Crawler {
    pub fn new() -> Self {
        Self::with_data_dir(DATA_DIR)
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Crawler {
            client: reqwest::Client::new(),
            data_dir: data_dir.into(),
        }
    }

    /// Crawl one URL: fetch, pick the extraction strategy from the URL,
    /// extract, persist if anything was found, and return the record.
    ///
    /// Wikipedia pages need no container classes; any other page needs both
    /// or the crawl resolves to `Ok(None)`. HTTP failures propagate as
    /// `FetchError` with the response status. A record is returned even when
    /// persisting it fails; the write is logged and not retried.
    pub async fn crawl(
        &self,
        url: &str,
        content_class: Option<&str>,
        image_class: Option<&str>,
    ) -> Result<Option<ExtractedRecord>, FetchError> {
        let html = fetch::fetch(&self.client, url).await?;

        let config = if is_wikipedia_url(url) {
            ExtractionConfig::Wikipedia
        } else {
            ExtractionConfig::Generic {
                content_class: content_class.unwrap_or_default().to_string(),
                image_class: image_class.unwrap_or_default().to_string(),
            }
        };

        let Some(record) = extract::extract(&html, &config) else {
            info!("No extractable content for {}", url);
            return Ok(None);
        };

        match store::persist(&self.data_dir, &record) {
            Ok(path) => info!("Saved {}", path.display()),
            Err(e) => warn!("Failed to persist record for {}: {}", url, e),
        }

        Ok(Some(record))
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    const MOCK_HTML: &str = "\
        <html><body>\
            <h1>Plain Text</h1>\
            <div class='content_container'><p>Lorem Ipsum</p></div>\
            <div class='image_container'>\
                <img src='http://media.example.com/map-pin-flat.jpg'/>\
            </div>\
        </body></html>";

    /// Serve exactly one canned HTTP response on an ephemeral local port.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "{}\r\ncontent-type: text/html\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        });

        format!("http://{}/", addr)
    }

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("page_clipper_{}_{}", name, std::process::id()))
    }

    #[tokio::test]
    async fn not_found_surfaces_status_and_persists_nothing() {
        let url = serve_once("HTTP/1.1 404 Not Found", "");
        let dir = temp_dir("not_found");
        let crawler = Crawler::with_data_dir(&dir);

        let err = crawler.crawl(&url, None, None).await.unwrap_err();
        match err {
            FetchError::Status { status, .. } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND)
            }
            other => panic!("expected status error, got {}", other),
        }
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn generic_page_without_classes_resolves_to_none() {
        let url = serve_once("HTTP/1.1 200 OK", MOCK_HTML);
        let dir = temp_dir("no_classes");
        let crawler = Crawler::with_data_dir(&dir);

        let record = crawler.crawl(&url, None, None).await.unwrap();
        assert!(record.is_none());
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn generic_page_end_to_end() {
        let url = serve_once("HTTP/1.1 200 OK", MOCK_HTML);
        let dir = temp_dir("end_to_end");
        let crawler = Crawler::with_data_dir(&dir);

        let record = crawler
            .crawl(&url, Some("content_container"), Some("image_container"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.headline, "Plain Text");
        assert_eq!(record.paragraph, "Lorem Ipsum");
        assert_eq!(record.image_url, "http://media.example.com/map-pin-flat.jpg");

        // Exactly one persisted file, decoding back to the returned record.
        let entries: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let path = entries[0].as_ref().unwrap().path();
        let decoded: ExtractedRecord =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(decoded, record);
        assert!(path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .ends_with("-plain-text.json"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
