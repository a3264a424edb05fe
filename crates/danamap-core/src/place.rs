//! Domain types for points of interest.

use serde::{Deserialize, Serialize};

use crate::geo;

/// A WGS84 position in degrees.
///
/// Construction is validated: latitude must lie in `[-90, 90]` and longitude
/// in `[-180, 180]`, both finite. A position with a missing or out-of-range
/// component is represented as an absent `Option<Coordinate>`, never as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Builds a coordinate, returning `None` for out-of-range or non-finite
    /// components.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let candidate = Self { lat, lng };
        candidate.is_valid().then_some(candidate)
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Tourism category of a place.
///
/// The wire format uses snake_case strings (`tourism_type` in the repository
/// API). Records with an unknown or missing category normalize to [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Attraction,
    Museum,
    ThemePark,
    Viewpoint,
    Other,
}

impl Category {
    /// Maps a repository `tourism_type` string onto a category.
    ///
    /// Unknown strings become [`Category::Other`] so a record never fails to
    /// normalize over its category alone.
    pub fn from_wire(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Other)
    }

    /// Parses a user-supplied category identifier.
    ///
    /// Accepts the wire names and the Vietnamese display labels used by the
    /// site UI. Returns `None` for anything else, including the empty string —
    /// callers treat that as an invalid selection.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "attraction" | "điểm tham quan" => Some(Self::Attraction),
            "museum" | "bảo tàng" => Some(Self::Museum),
            "theme_park" | "công viên giải trí" => Some(Self::ThemePark),
            "viewpoint" | "điểm ngắm cảnh" => Some(Self::Viewpoint),
            "other" | "khác" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Attraction => "attraction",
            Self::Museum => "museum",
            Self::ThemePark => "theme_park",
            Self::Viewpoint => "viewpoint",
            Self::Other => "other",
        }
    }

    /// Vietnamese display label, as shown in the site's filter bar.
    pub fn label_vi(&self) -> &'static str {
        match self {
            Self::Attraction => "Điểm tham quan",
            Self::Museum => "Bảo tàng",
            Self::ThemePark => "Công viên giải trí",
            Self::Viewpoint => "Điểm ngắm cảnh",
            Self::Other => "Khác",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// One image attached to a place, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceImage {
    pub id: i64,
    pub url: String,
    pub caption: Option<String>,
}

/// A normalized point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Stable repository identifier.
    pub id: i64,
    /// Display name. Normalization prefers the localized name when present.
    pub name: String,
    pub coordinate: Option<Coordinate>,
    pub category: Category,
    pub images: Vec<PlaceImage>,
    /// Opaque structured metadata (address, description, opening hours,
    /// rating, embed media). Kept as raw JSON; typed accessors below.
    pub details: serde_json::Value,
    /// 360° panorama embed URL, when the place has one.
    pub embed_url: Option<String>,
    /// Distance from the query origin in meters. Populated only by
    /// proximity queries; otherwise computed lazily via [`Place::distance_from`].
    pub distance: Option<f64>,
}

impl Place {
    /// Street address out of `details`, checking both shapes the repository
    /// has used (`details.address` and `details.basic_info.address`).
    pub fn address(&self) -> Option<&str> {
        self.details
            .get("address")
            .and_then(serde_json::Value::as_str)
            .or_else(|| {
                self.details
                    .get("basic_info")
                    .and_then(|b| b.get("address"))
                    .and_then(serde_json::Value::as_str)
            })
    }

    pub fn rating(&self) -> Option<f64> {
        self.details.get("rating").and_then(serde_json::Value::as_f64)
    }

    pub fn has_panorama(&self) -> bool {
        self.embed_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Distance from `origin` in meters.
    ///
    /// Uses the repository-supplied distance when present, otherwise the
    /// haversine distance to this place's coordinate. A place without a
    /// coordinate yields `+∞`, so sorting by this value pushes it last.
    pub fn distance_from(&self, origin: Coordinate) -> f64 {
        match self.distance {
            Some(d) if d.is_finite() => d,
            _ => geo::distance_meters_opt(Some(origin), self.coordinate),
        }
    }
}

/// A ranked free-text search suggestion.
///
/// Suggestions are lightweight: picking one triggers a full detail fetch
/// before the place becomes the active selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub category: Category,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_new_rejects_out_of_range_latitude() {
        assert!(Coordinate::new(90.1, 0.0).is_none());
        assert!(Coordinate::new(-90.1, 0.0).is_none());
    }

    #[test]
    fn coordinate_new_rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_none());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_none());
    }

    #[test]
    fn coordinate_new_accepts_danang() {
        let c = Coordinate::new(16.0598, 108.2257).expect("valid coordinate");
        assert!((c.lat - 16.0598).abs() < f64::EPSILON);
    }

    #[test]
    fn category_from_wire_unknown_is_other() {
        assert_eq!(Category::from_wire("night_market"), Category::Other);
        assert_eq!(Category::from_wire(""), Category::Other);
    }

    #[test]
    fn category_parse_accepts_vietnamese_labels() {
        assert_eq!(Category::parse("Bảo tàng"), Some(Category::Museum));
        assert_eq!(Category::parse("Điểm tham quan"), Some(Category::Attraction));
    }

    #[test]
    fn category_parse_rejects_empty_and_unknown() {
        assert_eq!(Category::parse(""), None);
        assert_eq!(Category::parse("  "), None);
        assert_eq!(Category::parse("beach"), None);
    }

    fn place_with_details(details: serde_json::Value) -> Place {
        Place {
            id: 1,
            name: "Chùa Linh Ứng".to_owned(),
            coordinate: Coordinate::new(16.1, 108.277),
            category: Category::Attraction,
            images: Vec::new(),
            details,
            embed_url: None,
            distance: None,
        }
    }

    #[test]
    fn address_reads_flat_shape() {
        let place = place_with_details(serde_json::json!({ "address": "Bãi Bụt, Sơn Trà" }));
        assert_eq!(place.address(), Some("Bãi Bụt, Sơn Trà"));
    }

    #[test]
    fn address_reads_nested_basic_info_shape() {
        let place =
            place_with_details(serde_json::json!({ "basic_info": { "address": "Hải Châu" } }));
        assert_eq!(place.address(), Some("Hải Châu"));
    }

    #[test]
    fn has_panorama_ignores_blank_embed_url() {
        let mut place = place_with_details(serde_json::Value::Null);
        place.embed_url = Some("   ".to_owned());
        assert!(!place.has_panorama());
        place.embed_url = Some("https://example.com/pano".to_owned());
        assert!(place.has_panorama());
    }

    #[test]
    fn distance_from_prefers_repository_distance() {
        let mut place = place_with_details(serde_json::Value::Null);
        place.distance = Some(1234.0);
        let origin = Coordinate::new(16.0, 108.0).unwrap();
        assert!((place.distance_from(origin) - 1234.0).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_from_missing_coordinate_is_infinite() {
        let mut place = place_with_details(serde_json::Value::Null);
        place.coordinate = None;
        let origin = Coordinate::new(16.0, 108.0).unwrap();
        assert!(place.distance_from(origin).is_infinite());
    }
}
