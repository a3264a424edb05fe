//! User-visible, non-blocking notices.
//!
//! Every recoverable failure in the explorer surfaces as one of these; the
//! UI drains them after each operation. Stale responses never produce a
//! notice — they are dropped silently by the token rule.

use danamap_core::Category;
use danamap_places::PlacesError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The place repository could not be reached or answered non-2xx.
    RepositoryUnreachable { context: String },
    /// The repository answered with an unexpected body shape.
    MalformedResponse { context: String },
    /// The district's boundary is missing or unparsable.
    BoundaryUnavailable { district: String },
    NoPlacesInDistrict { district: String },
    NoPlacesWithinRadius { km: u32 },
    NoPlacesForCategory { category: Category },
    DistrictCatalogUnavailable,
    PlaceDetailUnavailable { id: i64 },
    /// The routing service failed; the route simply does not appear.
    RouteUnavailable,
}

impl Notice {
    /// Maps a repository error to the notice taxonomy: malformed responses
    /// and network failures are distinct classes.
    pub fn from_places_error(err: &PlacesError, context: &str) -> Self {
        if err.is_malformed() {
            Self::MalformedResponse {
                context: context.to_owned(),
            }
        } else {
            Self::RepositoryUnreachable {
                context: context.to_owned(),
            }
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RepositoryUnreachable { context } => {
                write!(f, "Có lỗi xảy ra khi lấy dữ liệu ({context}). Vui lòng thử lại.")
            }
            Self::MalformedResponse { context } => {
                write!(f, "Lỗi: Dữ liệu từ server không đúng định dạng ({context}).")
            }
            Self::BoundaryUnavailable { district } => {
                write!(f, "Không thể tải ranh giới cho quận {district}.")
            }
            Self::NoPlacesInDistrict { district } => {
                write!(f, "Không có địa điểm nào trong quận {district}.")
            }
            Self::NoPlacesWithinRadius { km } => {
                write!(f, "Không tìm thấy địa điểm nào trong bán kính {km}km.")
            }
            Self::NoPlacesForCategory { category } => {
                write!(
                    f,
                    "Không tìm thấy địa điểm nào cho loại hình \"{}\".",
                    category.label_vi()
                )
            }
            Self::DistrictCatalogUnavailable => {
                write!(f, "Lỗi khi lấy danh sách quận/huyện.")
            }
            Self::PlaceDetailUnavailable { id } => {
                write!(f, "Lỗi khi lấy thông tin địa điểm (id {id}).")
            }
            Self::RouteUnavailable => write!(f, "Không thể tìm tuyến đường. Vui lòng thử lại."),
        }
    }
}
