//! Terminal rendering of the explorer's view state.

use danamap_core::geo::format_distance;
use danamap_explorer::{Camera, Explorer, PanelView, RouteState};

pub fn districts(explorer: &Explorer) {
    if explorer.districts().is_empty() {
        println!("(no districts)");
        return;
    }
    for district in explorer.districts() {
        println!("{:>4}  {}", district.id, district.name);
    }
}

pub fn suggestions(explorer: &Explorer) {
    let suggestions = explorer.results().suggestions();
    if suggestions.is_empty() {
        println!("(no suggestions)");
        return;
    }
    for s in suggestions {
        println!(
            "{:>6}  {}  [{}]  {}",
            s.id,
            s.name,
            s.category,
            s.address.as_deref().unwrap_or("—")
        );
    }
}

pub fn view(explorer: &Explorer) {
    camera(explorer);

    let surface = explorer.surface();
    if let Some(boundary) = surface.boundary() {
        println!("boundary: {}", boundary.name);
    }
    if let Some(circle) = surface.circle() {
        println!("radius circle: {}", format_distance(circle.radius_meters));
    }
    println!("markers: {}", surface.markers().len());

    match explorer.panel() {
        PanelView::Hidden => {}
        PanelView::List(rows) => {
            for row in rows {
                let rating = row
                    .rating
                    .map_or_else(String::new, |r| format!("  ★{r:.1}"));
                println!(
                    "{:>6}  {:<40} {:>9}{}  {}",
                    row.id,
                    row.name,
                    row.distance_label,
                    rating,
                    row.address.as_deref().unwrap_or("")
                );
            }
        }
        PanelView::Single(card) => {
            println!("{}  [{}]", card.name, card.category);
            if let Some(address) = &card.address {
                println!("  {address}");
            }
            if let Some(rating) = card.rating {
                println!("  ★{rating:.1}");
            }
            if let Some(distance) = &card.distance_label {
                println!("  {distance} from origin");
            }
            if let Some(description) = &card.description {
                println!("  {description}");
            }
            for url in &card.image_urls {
                println!("  image: {url}");
            }
            if card.has_panorama {
                if let Some(pano) = explorer.surface().panorama() {
                    println!("  panorama: {pano}");
                }
            }
        }
    }
}

pub fn route(explorer: &Explorer) {
    match explorer.route_state() {
        RouteState::Rendered { route, .. } => {
            println!(
                "route: {} ({:.0} min, {} points)",
                format_distance(route.distance_meters),
                route.duration_secs / 60.0,
                route.points.len()
            );
            for turn in &route.turns {
                let direction = turn
                    .modifier
                    .as_deref()
                    .map_or_else(String::new, |m| format!(" {m}"));
                let road = if turn.road.is_empty() { "—" } else { turn.road.as_str() };
                println!(
                    "  {}{}  {}  ({})",
                    turn.maneuver,
                    direction,
                    road,
                    format_distance(turn.distance_meters)
                );
            }
        }
        RouteState::Requesting { .. } => println!("route: still requesting"),
        RouteState::Idle => println!("(no route)"),
    }
}

pub fn notices(explorer: &mut Explorer) {
    for notice in explorer.take_notices() {
        eprintln!("! {notice}");
    }
}

fn camera(explorer: &Explorer) {
    match explorer.camera() {
        Camera::FitBounds {
            bounds, max_zoom, ..
        } => {
            let center = bounds.center();
            println!(
                "view: fit ({:.4}, {:.4})–({:.4}, {:.4}) center ({:.4}, {:.4}) max zoom {max_zoom}",
                bounds.south, bounds.west, bounds.north, bounds.east, center.lat, center.lng
            );
        }
        Camera::Center { target, zoom } => {
            println!("view: center ({:.4}, {:.4}) zoom {zoom}", target.lat, target.lng);
        }
    }
}
