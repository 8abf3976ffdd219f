//! `restaurant_list` template: a heading over a vertical list of cards

use crate::protocol::{
    Action, BoundValue, Button, Card, Children, Component, ComponentNode, Container, DataEntry,
    Image, List, ServerMessage, Text,
};
use crate::widget::{Restaurant, RestaurantListData};
use std::collections::BTreeMap;

pub const SURFACE_ID: &str = "restaurant_list";
pub const ROOT_ID: &str = "root-column";
pub const TITLE: &str = "Found Restaurants";
/// Action fired by a card's "Book Now" button
pub const BOOK_ACTION: &str = "book_restaurant";

pub(crate) fn render(data: &RestaurantListData, styles: &BTreeMap<String, String>) -> Vec<ServerMessage> {
    vec![
        ServerMessage::begin_rendering(SURFACE_ID, ROOT_ID, styles.clone()),
        ServerMessage::surface_update(SURFACE_ID, components()),
        ServerMessage::data_model_update(
            SURFACE_ID,
            vec![
                DataEntry::string("title", TITLE),
                DataEntry::map("items", items(&data.restaurants)),
            ],
        ),
    ]
}

fn components() -> Vec<ComponentNode> {
    vec![
        ComponentNode::new(
            ROOT_ID,
            Component::Column(Container::new(Children::explicit(&[
                "title-heading",
                "item-list",
            ]))),
        ),
        ComponentNode::new(
            "title-heading",
            Component::Text(Text::new(BoundValue::path("/title")).with_hint("h1")),
        ),
        ComponentNode::new(
            "item-list",
            Component::List(List {
                children: Children::template("item-card-template", "/items"),
                direction: Some("vertical".to_string()),
                alignment: None,
            }),
        ),
        ComponentNode::new(
            "item-card-template",
            Component::Card(Card {
                child: "card-layout".to_string(),
            }),
        ),
        ComponentNode::new(
            "card-layout",
            Component::Row(Container::new(Children::explicit(&[
                "template-image",
                "card-details",
            ]))),
        ),
        ComponentNode::new(
            "template-image",
            Component::Image(Image {
                url: BoundValue::path("imageUrl"),
                fit: Some("cover".to_string()),
            }),
        )
        .with_weight(1.0),
        ComponentNode::new(
            "card-details",
            Component::Column(Container::new(Children::explicit(&[
                "template-name",
                "template-rating",
                "template-detail",
                "template-link",
                "template-book-button",
            ]))),
        )
        .with_weight(2.0),
        ComponentNode::new(
            "template-name",
            Component::Text(Text::new(BoundValue::path("name")).with_hint("h3")),
        ),
        ComponentNode::new(
            "template-rating",
            Component::Text(Text::new(BoundValue::path("rating"))),
        ),
        ComponentNode::new(
            "template-detail",
            Component::Text(Text::new(BoundValue::path("detail"))),
        ),
        ComponentNode::new(
            "template-link",
            Component::Text(Text::new(BoundValue::path("infoLink"))),
        ),
        // Carries exactly what a booking_form render needs
        ComponentNode::new(
            "template-book-button",
            Component::Button(Button {
                child: "book-now-text".to_string(),
                primary: true,
                action: Action::new(
                    BOOK_ACTION,
                    vec![
                        ("restaurantName", BoundValue::path("name")),
                        ("imageUrl", BoundValue::path("imageUrl")),
                        ("address", BoundValue::path("address")),
                    ],
                ),
            }),
        ),
        ComponentNode::new(
            "book-now-text",
            Component::Text(Text::new(BoundValue::literal("Book Now"))),
        ),
    ]
}

/// One `itemN` map per restaurant, numbered from 1 in input order
fn items(restaurants: &[Restaurant]) -> Vec<DataEntry> {
    restaurants
        .iter()
        .enumerate()
        .map(|(i, r)| {
            DataEntry::map(
                format!("item{}", i + 1),
                vec![
                    DataEntry::string("name", &r.name),
                    DataEntry::string("rating", &r.rating),
                    DataEntry::string("detail", &r.detail),
                    DataEntry::string("infoLink", &r.info_link),
                    DataEntry::string("imageUrl", &r.image_url),
                    DataEntry::string("address", &r.address),
                ],
            )
        })
        .collect()
}
