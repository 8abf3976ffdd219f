//! Named schema lookup over one loaded protocol schema document

use super::error::{SchemaError, SchemaResult};
use super::source::SchemaSource;
use crate::protocol::MessageKind;
use jsonschema::{Draft, Validator};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Immutable set of named schemas extracted from one document.
///
/// Built once at startup and shared by reference (usually behind an `Arc`);
/// nothing mutates it after construction, so concurrent readers need no lock.
pub struct SchemaStore {
    location: String,
    schemas: HashMap<String, Value>,
    message_validators: HashMap<MessageKind, Validator>,
}

impl std::fmt::Debug for SchemaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaStore")
            .field("location", &self.location)
            .field("schemas", &self.names())
            .finish()
    }
}

impl SchemaStore {
    /// Fetch the document from `source` and build the store
    pub async fn load(source: &dyn SchemaSource) -> SchemaResult<Self> {
        let document = source.fetch().await?;
        Self::from_document(source.location(), document)
    }

    /// Build the store from an already-parsed document.
    ///
    /// Named schemas come from the document's `properties` (one per message
    /// kind) and its `$defs` section. When a name appears in both, the
    /// `properties` entry is kept.
    pub fn from_document(location: impl Into<String>, document: Value) -> SchemaResult<Self> {
        let location = location.into();

        let properties = document
            .get("properties")
            .and_then(Value::as_object)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                SchemaError::source(&location, "no properties found in schema document")
            })?;

        let defs = document
            .get("$defs")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let mut schemas: HashMap<String, Value> = defs
            .iter()
            .map(|(name, schema)| (name.clone(), schema.clone()))
            .collect();

        for (name, schema) in properties {
            if schemas.insert(name.clone(), schema.clone()).is_some() {
                warn!(
                    "Schema '{}' declared in both properties and $defs of {}; keeping the properties entry",
                    name, location
                );
            }
        }

        let mut message_validators = HashMap::new();
        for kind in MessageKind::ALL {
            let Some(payload_schema) = properties.get(kind.key()) else {
                debug!("Schema document {} declares no '{}' message", location, kind);
                continue;
            };
            let validator = compile_envelope(&location, kind, payload_schema, &defs)?;
            message_validators.insert(kind, validator);
        }

        info!(
            "Loaded {} schemas ({} message kinds) from {}",
            schemas.len(),
            message_validators.len(),
            location
        );

        Ok(Self {
            location,
            schemas,
            message_validators,
        })
    }

    /// Look up a named schema
    pub fn get_schema(&self, name: &str) -> SchemaResult<&Value> {
        self.schemas.get(name).ok_or_else(|| SchemaError::NotFound {
            name: name.to_string(),
            location: self.location.clone(),
        })
    }

    /// Compiled validator for a whole message of the given kind
    pub fn message_validator(&self, kind: MessageKind) -> SchemaResult<&Validator> {
        self.message_validators
            .get(&kind)
            .ok_or_else(|| SchemaError::NotFound {
                name: kind.key().to_string(),
                location: self.location.clone(),
            })
    }

    /// All schema names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Where the document was loaded from
    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Compile a schema that accepts `{ "<kind>": <payload> }` and nothing else.
///
/// The document's `$defs` are attached so `#/$defs/...` references resolve
/// from the envelope root.
fn compile_envelope(
    location: &str,
    kind: MessageKind,
    payload_schema: &Value,
    defs: &Map<String, Value>,
) -> SchemaResult<Validator> {
    let key = kind.key();
    let envelope = json!({
        "type": "object",
        "required": [key],
        "properties": { key: payload_schema },
        "additionalProperties": false,
        "$defs": defs,
    });

    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&envelope)
        .map_err(|e| {
            SchemaError::source(location, format!("schema '{}' does not compile: {}", key, e))
        })
}
