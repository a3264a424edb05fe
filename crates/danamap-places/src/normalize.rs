//! Normalization from repository wire records to core domain types.

use danamap_core::{Category, Coordinate, DistrictBoundary, Place, PlaceImage, Suggestion};

use crate::error::PlacesError;
use crate::types::{RawGeom, RawPlace};

/// Normalizes a raw location record into a [`Place`].
///
/// Soft-failure policy: a record never fails to normalize. Missing or
/// partial geometry becomes an absent coordinate, an unknown category
/// becomes [`Category::Other`], and a blank `embed_url` becomes `None`.
pub fn normalize_place(raw: RawPlace) -> Place {
    let coordinate = raw.geom.as_ref().and_then(coordinate_from_geom);
    let category = raw
        .tourism_type
        .as_deref()
        .map_or(Category::Other, Category::from_wire);

    // Display order follows image_order; records without one sort last,
    // keeping their relative order.
    let mut images = raw.images;
    images.sort_by_key(|img| img.image_order.map_or(i64::MAX, i64::from));
    let images = images
        .into_iter()
        .map(|img| PlaceImage {
            id: img.id,
            url: img.url,
            caption: img.caption,
        })
        .collect();

    Place {
        id: raw.id,
        name: display_name(&raw.name, raw.name_vi.as_deref()),
        coordinate,
        category,
        images,
        details: raw.details.unwrap_or(serde_json::Value::Null),
        embed_url: raw.embed_url.filter(|url| !url.trim().is_empty()),
        distance: raw.distance.filter(|d| d.is_finite()),
    }
}

/// Normalizes a raw record into a search [`Suggestion`].
pub fn normalize_suggestion(raw: RawPlace) -> Suggestion {
    let address = raw
        .details
        .as_ref()
        .and_then(|d| {
            d.get("address").or_else(|| {
                d.get("basic_info").and_then(|b| b.get("address"))
            })
        })
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned);

    Suggestion {
        id: raw.id,
        name: display_name(&raw.name, raw.name_vi.as_deref()),
        address,
        category: raw
            .tourism_type
            .as_deref()
            .map_or(Category::Other, Category::from_wire),
    }
}

/// Parses a district's GeoJSON-as-string `geom` field into a boundary.
///
/// Accepts a bare geometry object or a Feature wrapping one.
///
/// # Errors
///
/// Returns [`PlacesError::BadGeometry`] when the string is not valid GeoJSON
/// or the feature carries no geometry.
pub fn parse_boundary(name: &str, geom: &str) -> Result<DistrictBoundary, PlacesError> {
    let bad = |reason: String| PlacesError::BadGeometry {
        district: name.to_owned(),
        reason,
    };

    let parsed: geojson::GeoJson = geom.parse().map_err(|e: geojson::Error| bad(e.to_string()))?;
    let geometry = match parsed {
        geojson::GeoJson::Geometry(g) => g,
        geojson::GeoJson::Feature(f) => f
            .geometry
            .ok_or_else(|| bad("feature has no geometry".to_owned()))?,
        geojson::GeoJson::FeatureCollection(_) => {
            return Err(bad("expected a geometry, got a feature collection".to_owned()));
        }
    };
    let geometry = geo_types::Geometry::<f64>::try_from(geometry)
        .map_err(|e| bad(e.to_string()))?;

    Ok(DistrictBoundary {
        name: name.to_owned(),
        geometry,
    })
}

fn display_name(name: &str, name_vi: Option<&str>) -> String {
    match name_vi {
        Some(vi) if !vi.trim().is_empty() => vi.to_owned(),
        _ => name.to_owned(),
    }
}

fn coordinate_from_geom(geom: &RawGeom) -> Option<Coordinate> {
    match (geom.lat, geom.lng) {
        (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
        _ => None,
    }
}
