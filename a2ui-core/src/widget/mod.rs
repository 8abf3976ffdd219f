//! Widget model: the typed form of model-generated UI intent
//!
//! The model emits `{"widgets": [{"type": ..., "data": {...}}]}`. Parsing
//! happens once, here: each widget's `type` selects the strongly typed payload
//! its `data` must deserialize into, and anything that does not fit is an
//! error rather than a silent default.

mod error;

pub use error::WidgetError;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A restaurant as displayed in a list card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub name: String,
    /// Opaque display string, e.g. `★★★★☆`
    pub rating: String,
    pub detail: String,
    pub image_url: String,
    pub address: String,
    pub info_link: String,
}

/// Payload of a `restaurant_list` widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantListData {
    pub restaurants: Vec<Restaurant>,
    #[serde(default = "default_true")]
    pub use_single_column: bool,
}

/// Payload of a `booking_form` widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFormData {
    pub restaurant_name: String,
    pub image_url: String,
    pub address: String,
}

/// Payload of a `confirmation` widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationData {
    pub restaurant_name: String,
    pub party_size: String,
    pub reservation_time: String,
    pub dietary_requirements: String,
    pub image_url: String,
}

/// The closed set of widget kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    RestaurantList,
    BookingForm,
    Confirmation,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 3] = [
        WidgetKind::RestaurantList,
        WidgetKind::BookingForm,
        WidgetKind::Confirmation,
    ];

    /// The `type` string the model uses for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::RestaurantList => "restaurant_list",
            WidgetKind::BookingForm => "booking_form",
            WidgetKind::Confirmation => "confirmation",
        }
    }

    /// Parse a `type` string; `None` for anything outside the closed set
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A widget with its kind-specific payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    RestaurantList(RestaurantListData),
    BookingForm(BookingFormData),
    Confirmation(ConfirmationData),
}

impl Widget {
    pub fn kind(&self) -> WidgetKind {
        match self {
            Widget::RestaurantList(_) => WidgetKind::RestaurantList,
            Widget::BookingForm(_) => WidgetKind::BookingForm,
            Widget::Confirmation(_) => WidgetKind::Confirmation,
        }
    }

    /// Convert the untyped wire form, reporting failures against `index`
    pub fn from_raw(index: usize, raw: RawWidget) -> Result<Self, WidgetError> {
        let kind = WidgetKind::parse(&raw.kind).ok_or_else(|| WidgetError::UnknownKind {
            index,
            kind: raw.kind.clone(),
        })?;

        let data = Value::Object(raw.data);
        let data_error = |source| WidgetError::Data {
            index,
            kind,
            source,
        };

        Ok(match kind {
            WidgetKind::RestaurantList => {
                Widget::RestaurantList(serde_json::from_value(data).map_err(data_error)?)
            }
            WidgetKind::BookingForm => {
                Widget::BookingForm(serde_json::from_value(data).map_err(data_error)?)
            }
            WidgetKind::Confirmation => {
                Widget::Confirmation(serde_json::from_value(data).map_err(data_error)?)
            }
        })
    }
}

/// Wire form of a widget before its payload is typed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWidget {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Map<String, Value>,
}

/// Wire form of the whole model output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLlmOutput {
    pub widgets: Vec<RawWidget>,
}

/// Root of all model-generated UI intent, in widget order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmOutput {
    pub widgets: Vec<Widget>,
}

impl LlmOutput {
    pub fn new(widgets: Vec<Widget>) -> Self {
        Self { widgets }
    }

    /// Parse the JSON body of a UI block
    pub fn from_json_str(body: &str) -> Result<Self, WidgetError> {
        let raw: RawLlmOutput = serde_json::from_str(body).map_err(WidgetError::Malformed)?;
        Self::from_raw(raw)
    }

    /// Parse an already-decoded JSON value
    pub fn from_value(value: Value) -> Result<Self, WidgetError> {
        let raw: RawLlmOutput = serde_json::from_value(value).map_err(WidgetError::Malformed)?;
        Self::from_raw(raw)
    }

    /// Type every widget, stopping at the first failure
    pub fn from_raw(raw: RawLlmOutput) -> Result<Self, WidgetError> {
        let widgets = raw
            .widgets
            .into_iter()
            .enumerate()
            .map(|(index, widget)| Widget::from_raw(index, widget))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { widgets })
    }
}

fn default_true() -> bool {
    true
}
