//! Template renderer: typed widgets to surface-protocol messages
//!
//! Each widget expands into exactly three messages, in order:
//! `beginRendering`, `surfaceUpdate` (the whole component tree, declared once)
//! and `dataModelUpdate` (the data bound into that tree). Message order across
//! widgets follows widget order.
//!
//! Surface ids are fixed per widget kind, so two widgets of the same kind in
//! one output address the same surface and the later one wins at the client.

pub mod booking_form;
pub mod confirmation;
pub mod restaurant_list;

use crate::config::StyleConfig;
use crate::protocol::ServerMessage;
use crate::widget::{LlmOutput, Widget, WidgetError, WidgetKind};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Number of messages every widget template emits
pub const MESSAGES_PER_WIDGET: usize = 3;

/// Renders widgets with a fixed set of style hints
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRenderer {
    styles: BTreeMap<String, String>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new(&StyleConfig::default())
    }
}

impl TemplateRenderer {
    /// Create a renderer from style configuration
    pub fn new(styles: &StyleConfig) -> Self {
        let mut hints = BTreeMap::new();
        hints.insert("primaryColor".to_string(), styles.primary_color.clone());
        hints.insert("font".to_string(), styles.font.clone());
        Self { styles: hints }
    }

    /// Style hints sent in every `beginRendering`
    pub fn styles(&self) -> &BTreeMap<String, String> {
        &self.styles
    }

    /// Render every widget in order
    pub fn render(&self, output: &LlmOutput) -> Vec<ServerMessage> {
        let mut messages = Vec::with_capacity(output.widgets.len() * MESSAGES_PER_WIDGET);
        for widget in &output.widgets {
            messages.extend(self.render_widget(widget));
        }
        debug!(
            "Rendered {} widgets into {} messages",
            output.widgets.len(),
            messages.len()
        );
        messages
    }

    /// Render a single widget into its three messages
    pub fn render_widget(&self, widget: &Widget) -> Vec<ServerMessage> {
        match widget {
            Widget::RestaurantList(data) => restaurant_list::render(data, &self.styles),
            Widget::BookingForm(data) => booking_form::render(data, &self.styles),
            Widget::Confirmation(data) => confirmation::render(data, &self.styles),
        }
    }

    /// Parse untyped model output and render it.
    ///
    /// Unknown widget types and payloads that do not fit their kind are
    /// reported, never skipped.
    pub fn render_value(&self, value: Value) -> Result<Vec<ServerMessage>, WidgetError> {
        let output = LlmOutput::from_value(value)?;
        Ok(self.render(&output))
    }

    /// Parse a JSON body and render it
    pub fn render_json(&self, body: &str) -> Result<Vec<ServerMessage>, WidgetError> {
        let output = LlmOutput::from_json_str(body)?;
        Ok(self.render(&output))
    }
}

/// The surface id a widget kind renders to
pub fn surface_id(kind: WidgetKind) -> &'static str {
    match kind {
        WidgetKind::RestaurantList => restaurant_list::SURFACE_ID,
        WidgetKind::BookingForm => booking_form::SURFACE_ID,
        WidgetKind::Confirmation => confirmation::SURFACE_ID,
    }
}
