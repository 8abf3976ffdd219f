//! Typed A2UI surface-protocol messages
//!
//! Every message serialises to a JSON object with exactly one top-level key
//! (`beginRendering`, `surfaceUpdate`, `dataModelUpdate` or `deleteSurface`).
//! The design prioritizes:
//! - Type safety through enums for message kinds and component kinds
//! - A wire shape identical to what the renderer client consumes
//! - Literal-or-path binding for every displayed value

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The four kinds of server-to-client message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    BeginRendering,
    SurfaceUpdate,
    DataModelUpdate,
    DeleteSurface,
}

impl MessageKind {
    /// All kinds, in the order the validator probes for them
    pub const ALL: [MessageKind; 4] = [
        MessageKind::BeginRendering,
        MessageKind::SurfaceUpdate,
        MessageKind::DataModelUpdate,
        MessageKind::DeleteSurface,
    ];

    /// The top-level JSON key that identifies this kind
    pub fn key(&self) -> &'static str {
        match self {
            MessageKind::BeginRendering => "beginRendering",
            MessageKind::SurfaceUpdate => "surfaceUpdate",
            MessageKind::DataModelUpdate => "dataModelUpdate",
            MessageKind::DeleteSurface => "deleteSurface",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single server-to-client protocol message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServerMessage {
    /// Declares a surface ready to paint from a root component
    BeginRendering(BeginRendering),
    /// Full component tree for a surface
    SurfaceUpdate(SurfaceUpdate),
    /// Data bound into the component tree
    DataModelUpdate(DataModelUpdate),
    /// Removes a surface
    DeleteSurface(DeleteSurface),
}

/// Payload of a `beginRendering` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginRendering {
    pub surface_id: String,
    /// Id of the root component in the surface's tree
    pub root: String,
    /// Style hints (e.g. `primaryColor`, `font`)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<String, String>,
}

/// Payload of a `surfaceUpdate` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceUpdate {
    pub surface_id: String,
    pub components: Vec<ComponentNode>,
}

/// Payload of a `dataModelUpdate` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataModelUpdate {
    pub surface_id: String,
    /// Data-model path the contents are written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub contents: Vec<DataEntry>,
}

/// Payload of a `deleteSurface` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSurface {
    pub surface_id: String,
}

/// A node in a surface's component tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    /// Identifier other components use to reference this node
    pub id: String,

    /// Relative size inside a Row or Column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    pub component: Component,
}

/// Component kinds of the standard catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Component {
    Column(Container),
    Row(Container),
    Text(Text),
    Image(Image),
    List(List),
    Card(Card),
    Button(Button),
    TextField(TextField),
    DateTimeInput(DateTimeInput),
    Divider(Divider),
}

/// A value that is either a literal or a data-model path reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundValue {
    /// Reference into the data model (e.g. `/title` or `name`)
    Path(String),
    LiteralString(String),
    LiteralNumber(f64),
    LiteralBoolean(bool),
}

/// Children of a container component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Children {
    /// Fixed list of component ids
    ExplicitList(Vec<String>),
    /// Repeat a template component once per entry under a data path
    Template(ChildTemplate),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildTemplate {
    pub component_id: String,
    pub data_binding: String,
}

/// Column and Row share the same shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub children: Children,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub text: BoundValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: BoundValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub children: Children,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Id of the single child component
    pub child: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub child: String,
    #[serde(default)]
    pub primary: bool,
    pub action: Action,
}

/// A user action; its context is resolved against the data model when fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<ActionContextEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionContextEntry {
    pub key: String,
    pub value: BoundValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextField {
    pub label: BoundValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<BoundValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_field_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeInput {
    pub value: BoundValue,
    #[serde(default)]
    pub enable_date: bool,
    #[serde(default)]
    pub enable_time: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<String>,
}

/// One key in a data-model tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataEntry {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_boolean: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_map: Option<Vec<DataEntry>>,
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ServerMessage {
    /// Create a `beginRendering` message
    pub fn begin_rendering(
        surface_id: impl Into<String>,
        root: impl Into<String>,
        styles: BTreeMap<String, String>,
    ) -> Self {
        ServerMessage::BeginRendering(BeginRendering {
            surface_id: surface_id.into(),
            root: root.into(),
            styles,
        })
    }

    /// Create a `surfaceUpdate` message
    pub fn surface_update(surface_id: impl Into<String>, components: Vec<ComponentNode>) -> Self {
        ServerMessage::SurfaceUpdate(SurfaceUpdate {
            surface_id: surface_id.into(),
            components,
        })
    }

    /// Create a `dataModelUpdate` message rooted at `/`
    pub fn data_model_update(surface_id: impl Into<String>, contents: Vec<DataEntry>) -> Self {
        ServerMessage::DataModelUpdate(DataModelUpdate {
            surface_id: surface_id.into(),
            path: Some("/".to_string()),
            contents,
        })
    }

    /// Create a `deleteSurface` message
    pub fn delete_surface(surface_id: impl Into<String>) -> Self {
        ServerMessage::DeleteSurface(DeleteSurface {
            surface_id: surface_id.into(),
        })
    }

    /// The kind of this message
    pub fn kind(&self) -> MessageKind {
        match self {
            ServerMessage::BeginRendering(_) => MessageKind::BeginRendering,
            ServerMessage::SurfaceUpdate(_) => MessageKind::SurfaceUpdate,
            ServerMessage::DataModelUpdate(_) => MessageKind::DataModelUpdate,
            ServerMessage::DeleteSurface(_) => MessageKind::DeleteSurface,
        }
    }

    /// The surface this message addresses
    pub fn surface_id(&self) -> &str {
        match self {
            ServerMessage::BeginRendering(m) => &m.surface_id,
            ServerMessage::SurfaceUpdate(m) => &m.surface_id,
            ServerMessage::DataModelUpdate(m) => &m.surface_id,
            ServerMessage::DeleteSurface(m) => &m.surface_id,
        }
    }
}

impl ComponentNode {
    /// Create a node without a weight
    pub fn new(id: impl Into<String>, component: Component) -> Self {
        Self {
            id: id.into(),
            weight: None,
            component,
        }
    }

    /// Set the layout weight
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

impl BoundValue {
    /// Bind to a data-model path
    pub fn path(path: impl Into<String>) -> Self {
        BoundValue::Path(path.into())
    }

    /// Use a literal string
    pub fn literal(value: impl Into<String>) -> Self {
        BoundValue::LiteralString(value.into())
    }
}

impl Children {
    /// Fixed children from a slice of ids
    pub fn explicit(ids: &[&str]) -> Self {
        Children::ExplicitList(ids.iter().map(|id| id.to_string()).collect())
    }

    /// One instance of `component_id` per entry under `data_binding`
    pub fn template(component_id: impl Into<String>, data_binding: impl Into<String>) -> Self {
        Children::Template(ChildTemplate {
            component_id: component_id.into(),
            data_binding: data_binding.into(),
        })
    }
}

impl Container {
    /// Container with children and no layout hints
    pub fn new(children: Children) -> Self {
        Self {
            children,
            distribution: None,
            alignment: None,
        }
    }
}

impl Text {
    /// Text bound to a value with no usage hint
    pub fn new(text: BoundValue) -> Self {
        Self {
            text,
            usage_hint: None,
        }
    }

    /// Set the usage hint (`h1`..`h5`, `caption`, `body`)
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.usage_hint = Some(hint.into());
        self
    }
}

impl Action {
    /// Action with context entries given as `(key, value)` pairs
    pub fn new(name: impl Into<String>, context: Vec<(&str, BoundValue)>) -> Self {
        Self {
            name: name.into(),
            context: context
                .into_iter()
                .map(|(key, value)| ActionContextEntry {
                    key: key.to_string(),
                    value,
                })
                .collect(),
        }
    }

    /// Look up a context entry by key
    pub fn context_value(&self, key: &str) -> Option<&BoundValue> {
        self.context.iter().find(|e| e.key == key).map(|e| &e.value)
    }
}

impl DataEntry {
    /// String-valued entry
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value_string: Some(value.into()),
            value_number: None,
            value_boolean: None,
            value_map: None,
        }
    }

    /// Nested map entry
    pub fn map(key: impl Into<String>, entries: Vec<DataEntry>) -> Self {
        Self {
            key: key.into(),
            value_string: None,
            value_number: None,
            value_boolean: None,
            value_map: Some(entries),
        }
    }

    /// Find a direct child entry by key (only meaningful for map entries)
    pub fn child(&self, key: &str) -> Option<&DataEntry> {
        self.value_map.as_ref()?.iter().find(|e| e.key == key)
    }
}

impl DataModelUpdate {
    /// Find a top-level entry by key
    pub fn entry(&self, key: &str) -> Option<&DataEntry> {
        self.contents.iter().find(|e| e.key == key)
    }
}

impl SurfaceUpdate {
    /// Find a component by id
    pub fn component(&self, id: &str) -> Option<&ComponentNode> {
        self.components.iter().find(|c| c.id == id)
    }
}
