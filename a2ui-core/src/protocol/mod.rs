//! Protocol module for A2UI surface messages
//!
//! This module defines the server-to-client messages a rendering client
//! consumes, and the schema gate they pass before being trusted:
//! - `types`: strongly typed messages and components
//! - `validator`: per-message schema validation

pub mod types;
pub mod validator;

pub use types::{
    Action, ActionContextEntry, BeginRendering, BoundValue, Button, Card, ChildTemplate, Children,
    Component, ComponentNode, Container, DataEntry, DataModelUpdate, DateTimeInput, DeleteSurface,
    Divider, Image, List, MessageKind, ServerMessage, SurfaceUpdate, Text, TextField,
};
pub use validator::{detect_kind, MessageValidationError, MessageValidator};
