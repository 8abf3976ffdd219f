//! Integration tests for schema document sources

use a2ui_core::protocol::MessageKind;
use a2ui_core::schema::{
    schema_source_for, FileSchemaSource, HttpSchemaSource, SchemaError, SchemaSource, SchemaStore,
    BUNDLED_LOCATION, BUNDLED_SCHEMA,
};
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_http_source_loads_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/schemas/server_to_client.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(BUNDLED_SCHEMA, "application/json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/schemas/server_to_client.json", mock_server.uri());
    let source = HttpSchemaSource::new(url::Url::parse(&url).unwrap()).unwrap();
    let store = SchemaStore::load(&source).await.unwrap();

    assert_eq!(store.location(), url);
    assert!(store.get_schema("surfaceUpdate").is_ok());
    assert!(store.message_validator(MessageKind::DataModelUpdate).is_ok());
}

#[tokio::test]
async fn test_http_error_status_is_source_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing.json", mock_server.uri());
    let source = schema_source_for(Some(&url)).unwrap();
    let err = source.fetch().await.unwrap_err();

    match err {
        SchemaError::Source { location, message } => {
            assert_eq!(location, url);
            assert!(message.contains("404"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_invalid_json_is_source_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let source = schema_source_for(Some(&mock_server.uri())).unwrap();
    assert!(matches!(
        SchemaStore::load(source.as_ref()).await,
        Err(SchemaError::Source { .. })
    ));
}

#[tokio::test]
async fn test_file_source_loads_document() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("server_to_client.json");
    fs::write(&file, BUNDLED_SCHEMA).unwrap();

    let source = FileSchemaSource::new(&file);
    let store = SchemaStore::load(&source).await.unwrap();
    let names = store.names();
    for kind in MessageKind::ALL {
        assert!(names.contains(&kind.key()), "missing {kind}");
    }
    assert!(names.contains(&"BoundValue"));
}

#[tokio::test]
async fn test_missing_file_is_source_error() {
    let dir = TempDir::new().unwrap();
    let source = schema_source_for(Some(dir.path().join("absent.json").to_str().unwrap())).unwrap();
    assert!(matches!(
        source.fetch().await,
        Err(SchemaError::Source { .. })
    ));
}

#[tokio::test]
async fn test_default_location_is_bundled() {
    let source = schema_source_for(None).unwrap();
    assert_eq!(source.location(), BUNDLED_LOCATION);
    let store = SchemaStore::load(source.as_ref()).await.unwrap();
    assert!(store.get_schema("Component").is_ok());
}
