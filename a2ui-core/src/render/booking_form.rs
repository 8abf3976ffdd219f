//! `booking_form` template: an editable reservation form

use crate::protocol::{
    Action, BoundValue, Button, Children, Component, ComponentNode, Container, DataEntry,
    DateTimeInput, Image, ServerMessage, Text, TextField,
};
use crate::widget::BookingFormData;
use std::collections::BTreeMap;

pub const SURFACE_ID: &str = "booking_form";
pub const ROOT_ID: &str = "booking-form-column";
/// Action fired by the submit button
pub const SUBMIT_ACTION: &str = "submit_booking";
pub const DEFAULT_PARTY_SIZE: &str = "2";

pub(crate) fn render(data: &BookingFormData, styles: &BTreeMap<String, String>) -> Vec<ServerMessage> {
    vec![
        ServerMessage::begin_rendering(SURFACE_ID, ROOT_ID, styles.clone()),
        ServerMessage::surface_update(SURFACE_ID, components()),
        ServerMessage::data_model_update(
            SURFACE_ID,
            vec![
                DataEntry::string("title", format!("Book a Table at {}", data.restaurant_name)),
                DataEntry::string("address", &data.address),
                DataEntry::string("restaurantName", &data.restaurant_name),
                DataEntry::string("partySize", DEFAULT_PARTY_SIZE),
                DataEntry::string("reservationTime", ""),
                DataEntry::string("dietary", ""),
                DataEntry::string("imageUrl", &data.image_url),
            ],
        ),
    ]
}

fn components() -> Vec<ComponentNode> {
    vec![
        ComponentNode::new(
            ROOT_ID,
            Component::Column(Container::new(Children::explicit(&[
                "booking-title",
                "restaurant-image",
                "restaurant-address",
                "party-size-field",
                "datetime-field",
                "dietary-field",
                "submit-button",
            ]))),
        ),
        ComponentNode::new(
            "booking-title",
            Component::Text(Text::new(BoundValue::path("/title")).with_hint("h2")),
        ),
        ComponentNode::new(
            "restaurant-image",
            Component::Image(Image {
                url: BoundValue::path("/imageUrl"),
                fit: None,
            }),
        ),
        ComponentNode::new(
            "restaurant-address",
            Component::Text(Text::new(BoundValue::path("/address"))),
        ),
        ComponentNode::new(
            "party-size-field",
            Component::TextField(TextField {
                label: BoundValue::literal("Party Size"),
                text: Some(BoundValue::path("/partySize")),
                text_field_type: Some("number".to_string()),
            }),
        ),
        ComponentNode::new(
            "datetime-field",
            Component::DateTimeInput(DateTimeInput {
                value: BoundValue::path("/reservationTime"),
                enable_date: true,
                enable_time: true,
            }),
        ),
        ComponentNode::new(
            "dietary-field",
            Component::TextField(TextField {
                label: BoundValue::literal("Dietary Requirements"),
                text: Some(BoundValue::path("/dietary")),
                text_field_type: Some("longText".to_string()),
            }),
        ),
        // Context covers every field the confirmation template consumes
        ComponentNode::new(
            "submit-button",
            Component::Button(Button {
                child: "submit-reservation-text".to_string(),
                primary: true,
                action: Action::new(
                    SUBMIT_ACTION,
                    vec![
                        ("restaurantName", BoundValue::path("/restaurantName")),
                        ("partySize", BoundValue::path("/partySize")),
                        ("reservationTime", BoundValue::path("/reservationTime")),
                        ("dietary", BoundValue::path("/dietary")),
                        ("imageUrl", BoundValue::path("/imageUrl")),
                    ],
                ),
            }),
        ),
        ComponentNode::new(
            "submit-reservation-text",
            Component::Text(Text::new(BoundValue::literal("Submit Reservation"))),
        ),
    ]
}
