//! `confirmation` template: a read-only booking summary card

use crate::protocol::{
    BoundValue, Card, Children, Component, ComponentNode, Container, DataEntry, Divider, Image,
    ServerMessage, Text,
};
use crate::widget::ConfirmationData;
use std::collections::BTreeMap;

pub const SURFACE_ID: &str = "confirmation";
pub const ROOT_ID: &str = "confirmation-card";

pub(crate) fn render(data: &ConfirmationData, styles: &BTreeMap<String, String>) -> Vec<ServerMessage> {
    // Display strings are formatted here, once, not by the client
    let contents = vec![
        DataEntry::string("title", format!("Booking at {}", data.restaurant_name)),
        DataEntry::string(
            "bookingDetails",
            format!("{} people at {}", data.party_size, data.reservation_time),
        ),
        DataEntry::string(
            "dietaryRequirements",
            format!("Dietary Requirements: {}", data.dietary_requirements),
        ),
        DataEntry::string("imageUrl", &data.image_url),
    ];

    vec![
        ServerMessage::begin_rendering(SURFACE_ID, ROOT_ID, styles.clone()),
        ServerMessage::surface_update(SURFACE_ID, components()),
        ServerMessage::data_model_update(SURFACE_ID, contents),
    ]
}

fn components() -> Vec<ComponentNode> {
    let text = |id: &str, path: &str| {
        ComponentNode::new(id, Component::Text(Text::new(BoundValue::path(path))))
    };
    let divider = |id: &str| ComponentNode::new(id, Component::Divider(Divider::default()));

    vec![
        ComponentNode::new(
            ROOT_ID,
            Component::Card(Card {
                child: "confirmation-column".to_string(),
            }),
        ),
        ComponentNode::new(
            "confirmation-column",
            Component::Column(Container::new(Children::explicit(&[
                "confirm-title",
                "confirm-image",
                "divider1",
                "confirm-details",
                "divider2",
                "confirm-dietary",
                "divider3",
                "confirm-text",
            ]))),
        ),
        ComponentNode::new(
            "confirm-title",
            Component::Text(Text::new(BoundValue::path("/title")).with_hint("h2")),
        ),
        ComponentNode::new(
            "confirm-image",
            Component::Image(Image {
                url: BoundValue::path("/imageUrl"),
                fit: None,
            }),
        ),
        text("confirm-details", "/bookingDetails"),
        text("confirm-dietary", "/dietaryRequirements"),
        ComponentNode::new(
            "confirm-text",
            Component::Text(
                Text::new(BoundValue::literal("We look forward to seeing you!")).with_hint("h5"),
            ),
        ),
        divider("divider1"),
        divider("divider2"),
        divider("divider3"),
    ]
}
