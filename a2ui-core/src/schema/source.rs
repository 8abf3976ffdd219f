//! Sources the protocol schema document can be loaded from

use super::error::{SchemaError, SchemaResult};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// The schema document shipped with this crate
pub const BUNDLED_SCHEMA: &str = include_str!("../../schemas/server_to_client.json");

/// Location reported for the bundled document
pub const BUNDLED_LOCATION: &str = "bundled:server_to_client.json";

/// Provides a single schema document by location
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Human-readable location used in errors and logs
    fn location(&self) -> &str;

    /// Fetch and parse the document
    async fn fetch(&self) -> SchemaResult<Value>;
}

/// Serves the document compiled into the crate (or any in-memory document)
#[derive(Debug, Clone)]
pub struct BundledSchemaSource {
    location: String,
    raw: String,
}

impl BundledSchemaSource {
    /// The standard-catalog document shipped with this crate
    pub fn new() -> Self {
        Self {
            location: BUNDLED_LOCATION.to_string(),
            raw: BUNDLED_SCHEMA.to_string(),
        }
    }

    /// An in-memory document, mostly useful in tests
    pub fn inline(location: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            raw: raw.into(),
        }
    }
}

impl Default for BundledSchemaSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaSource for BundledSchemaSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> SchemaResult<Value> {
        parse_document(&self.location, &self.raw)
    }
}

/// Reads the document from the local filesystem
#[derive(Debug, Clone)]
pub struct FileSchemaSource {
    path: PathBuf,
    location: String,
}

impl FileSchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.to_string_lossy().to_string();
        Self { path, location }
    }
}

#[async_trait]
impl SchemaSource for FileSchemaSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> SchemaResult<Value> {
        debug!("Reading schema document from {}", self.location);
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SchemaError::source(&self.location, "schema file not found")
            } else {
                SchemaError::source(&self.location, format!("failed to read schema file: {}", e))
            }
        })?;
        parse_document(&self.location, &raw)
    }
}

/// Downloads the document over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpSchemaSource {
    url: url::Url,
    location: String,
    client: reqwest::Client,
}

impl HttpSchemaSource {
    /// Create a source for the given URL
    pub fn new(url: url::Url) -> SchemaResult<Self> {
        let location = url.to_string();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                SchemaError::source(&location, format!("failed to create HTTP client: {}", e))
            })?;
        Ok(Self {
            url,
            location,
            client,
        })
    }
}

#[async_trait]
impl SchemaSource for HttpSchemaSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> SchemaResult<Value> {
        debug!("Fetching schema document from {}", self.location);
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| SchemaError::source(&self.location, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SchemaError::source(
                &self.location,
                format!("unexpected HTTP status {}", status.as_u16()),
            ));
        }

        let raw = response.text().await.map_err(|e| {
            SchemaError::source(&self.location, format!("failed to read body: {}", e))
        })?;
        parse_document(&self.location, &raw)
    }
}

/// Pick a source for a configured location.
///
/// `None` selects the bundled document, `http://` and `https://` URLs are
/// downloaded, anything else is treated as a filesystem path.
pub fn schema_source_for(location: Option<&str>) -> SchemaResult<Box<dyn SchemaSource>> {
    let Some(location) = location else {
        return Ok(Box::new(BundledSchemaSource::new()));
    };

    match url::Url::parse(location) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            Ok(Box::new(HttpSchemaSource::new(url)?))
        }
        Ok(url) if url.scheme() == "file" => {
            let path = url
                .to_file_path()
                .map_err(|_| SchemaError::source(location, "invalid file URL"))?;
            Ok(Box::new(FileSchemaSource::new(path)))
        }
        _ => Ok(Box::new(FileSchemaSource::new(location))),
    }
}

fn parse_document(location: &str, raw: &str) -> SchemaResult<Value> {
    serde_json::from_str(raw)
        .map_err(|e| SchemaError::source(location, format!("failed to decode JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bundled_source_parses() {
        let source = BundledSchemaSource::new();
        let doc = source.fetch().await.unwrap();
        assert!(doc["properties"]["beginRendering"].is_object());
        assert!(doc["$defs"]["Component"].is_object());
        assert_eq!(source.location(), BUNDLED_LOCATION);
    }

    #[tokio::test]
    async fn test_unparsable_document_is_source_error() {
        let source = BundledSchemaSource::inline("memory", "{ not json");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SchemaError::Source { .. }));
        assert!(err.to_string().contains("failed to decode JSON"));
    }

    #[test]
    fn test_source_selection_by_location() {
        assert_eq!(schema_source_for(None).unwrap().location(), BUNDLED_LOCATION);
        assert_eq!(
            schema_source_for(Some("https://example.com/schema.json"))
                .unwrap()
                .location(),
            "https://example.com/schema.json"
        );
        assert_eq!(
            schema_source_for(Some("/etc/a2ui/schema.json"))
                .unwrap()
                .location(),
            "/etc/a2ui/schema.json"
        );
    }
}
