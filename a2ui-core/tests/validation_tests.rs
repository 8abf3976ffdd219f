//! Rendered output must always satisfy the bundled protocol schema

use a2ui_core::protocol::{MessageKind, MessageValidationError, MessageValidator, ServerMessage};
use a2ui_core::schema::{SchemaStore, BUNDLED_LOCATION, BUNDLED_SCHEMA};
use a2ui_core::widget::{
    BookingFormData, ConfirmationData, LlmOutput, Restaurant, RestaurantListData, Widget,
};
use a2ui_core::TemplateRenderer;
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn bundled_validator() -> MessageValidator {
    let doc = serde_json::from_str(BUNDLED_SCHEMA).unwrap();
    let store = SchemaStore::from_document(BUNDLED_LOCATION, doc).unwrap();
    MessageValidator::new(Arc::new(store))
}

fn text() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "\\PC{0,24}"]
}

fn restaurant() -> impl Strategy<Value = Restaurant> {
    (text(), text(), text(), text(), text(), text()).prop_map(
        |(name, rating, detail, image_url, address, info_link)| Restaurant {
            name,
            rating,
            detail,
            image_url,
            address,
            info_link,
        },
    )
}

fn widget() -> impl Strategy<Value = Widget> {
    prop_oneof![
        (prop::collection::vec(restaurant(), 0..6), any::<bool>()).prop_map(
            |(restaurants, use_single_column)| {
                Widget::RestaurantList(RestaurantListData {
                    restaurants,
                    use_single_column,
                })
            }
        ),
        (text(), text(), text()).prop_map(|(restaurant_name, image_url, address)| {
            Widget::BookingForm(BookingFormData {
                restaurant_name,
                image_url,
                address,
            })
        }),
        (text(), text(), text(), text(), text()).prop_map(
            |(restaurant_name, party_size, reservation_time, dietary_requirements, image_url)| {
                Widget::Confirmation(ConfirmationData {
                    restaurant_name,
                    party_size,
                    reservation_time,
                    dietary_requirements,
                    image_url,
                })
            }
        ),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rendered_messages_always_validate(widgets in prop::collection::vec(widget(), 0..4)) {
        let output = LlmOutput::new(widgets);
        let messages = TemplateRenderer::default().render(&output);
        prop_assert_eq!(messages.len(), output.widgets.len() * 3);
        prop_assert!(bundled_validator().validate_typed(&messages).is_ok());
    }
}

#[test]
fn test_every_kind_has_a_validator() {
    let doc = serde_json::from_str(BUNDLED_SCHEMA).unwrap();
    let store = SchemaStore::from_document(BUNDLED_LOCATION, doc).unwrap();
    for kind in MessageKind::ALL {
        assert!(store.message_validator(kind).is_ok(), "no validator for {kind}");
    }
}

#[test]
fn test_delete_surface_validates() {
    let messages = vec![ServerMessage::delete_surface("booking_form")];
    assert!(bundled_validator().validate_typed(&messages).is_ok());
}

#[test]
fn test_empty_component_list_is_rejected() {
    let messages = vec![json!({"surfaceUpdate": {"surfaceId": "x", "components": []}})];
    let err = bundled_validator().validate(&messages).unwrap_err();
    assert!(matches!(
        err,
        MessageValidationError::SchemaViolation { kind: MessageKind::SurfaceUpdate, .. }
    ));
}

#[test]
fn test_unknown_component_is_rejected() {
    let messages = vec![json!({"surfaceUpdate": {"surfaceId": "x", "components": [
        {"id": "a", "component": {"Carousel": {}}}
    ]}})];
    assert!(bundled_validator().validate(&messages).is_err());
}

#[test]
fn test_validation_stops_at_first_invalid_message() {
    let messages = vec![
        json!({"deleteSurface": {"surfaceId": "ok"}}),
        json!({"beginRendering": {"surfaceId": "x", "root": "r", "unexpected": 1}}),
        json!({"nothing": {}}),
    ];
    match bundled_validator().validate(&messages).unwrap_err() {
        MessageValidationError::SchemaViolation { index, .. } => assert_eq!(index, 1),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_empty_sequence_is_valid() {
    assert!(bundled_validator().validate(&[]).is_ok());
}
