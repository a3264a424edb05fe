//! Detail-panel view models.
//!
//! The panel renders either the current result list or one selected place,
//! and feeds `route_to` / `clear_selection` intents back into the explorer.
//! Suggestions render in the search dropdown, not here.

use danamap_core::{geo, Category, Coordinate, Place};

use crate::results::ResultSet;
use crate::selection::SelectionState;

#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    Hidden,
    List(Vec<PlaceSummary>),
    Single(PlaceCard),
}

/// One row of the result list.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSummary {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub distance_label: String,
}

/// The expanded view of one place.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCard {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub image_urls: Vec<String>,
    pub distance_label: Option<String>,
    pub has_panorama: bool,
}

/// Derives the panel view from the current state.
pub fn panel_for(state: &SelectionState, origin: Coordinate) -> PanelView {
    match state.results() {
        ResultSet::Places(places) if !places.is_empty() => {
            PanelView::List(places.iter().map(|p| summary_for(p, origin)).collect())
        }
        ResultSet::Single(place) => PanelView::Single(card_for(place, origin)),
        _ => PanelView::Hidden,
    }
}

fn summary_for(place: &Place, origin: Coordinate) -> PlaceSummary {
    PlaceSummary {
        id: place.id,
        name: place.name.clone(),
        address: place.address().map(str::to_owned),
        rating: place.rating(),
        distance_label: geo::format_distance(place.distance_from(origin)),
    }
}

fn card_for(place: &Place, origin: Coordinate) -> PlaceCard {
    let distance = place.distance_from(origin);
    PlaceCard {
        id: place.id,
        name: place.name.clone(),
        category: place.category,
        address: place.address().map(str::to_owned),
        rating: place.rating(),
        description: place
            .details
            .get("description")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned),
        image_urls: place.images.iter().map(|i| i.url.clone()).collect(),
        distance_label: distance.is_finite().then(|| geo::format_distance(distance)),
        has_panorama: place.has_panorama(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Coordinate {
        Coordinate::new(16.054, 108.247).unwrap()
    }

    fn place(id: i64) -> Place {
        Place {
            id,
            name: format!("place {id}"),
            coordinate: Coordinate::new(16.06, 108.25),
            category: Category::Attraction,
            images: Vec::new(),
            details: serde_json::json!({
                "address": "Bạch Đằng",
                "rating": 4.5,
                "description": "Riverside walk"
            }),
            embed_url: None,
            distance: Some(800.0),
        }
    }

    #[test]
    fn empty_state_hides_panel() {
        let state = SelectionState::new();
        assert_eq!(panel_for(&state, origin()), PanelView::Hidden);
    }

    #[test]
    fn list_results_render_summaries_with_distance_labels() {
        let mut state = SelectionState::new();
        let t = state.set_radius(5);
        state.apply_radius_places(t.token, origin(), 5, Ok(vec![place(1), place(2)]));
        match panel_for(&state, origin()) {
            PanelView::List(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].distance_label, "800 m");
                assert_eq!(rows[0].address.as_deref(), Some("Bạch Đằng"));
                assert_eq!(rows[0].rating, Some(4.5));
            }
            other => panic!("expected List, got {other:?}"),
        }
    }

    #[test]
    fn single_selection_renders_card() {
        let mut state = SelectionState::new();
        state.select_place(place(7));
        match panel_for(&state, origin()) {
            PanelView::Single(card) => {
                assert_eq!(card.id, 7);
                assert_eq!(card.description.as_deref(), Some("Riverside walk"));
                assert!(!card.has_panorama);
            }
            other => panic!("expected Single, got {other:?}"),
        }
    }

    #[test]
    fn card_omits_distance_label_when_unresolvable() {
        let mut p = place(7);
        p.coordinate = None;
        p.distance = None;
        let mut state = SelectionState::new();
        state.select_place(p);
        match panel_for(&state, origin()) {
            PanelView::Single(card) => assert!(card.distance_label.is_none()),
            other => panic!("expected Single, got {other:?}"),
        }
    }
}
