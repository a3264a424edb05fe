//! Selection modes and the transition half of the state machine.
//!
//! Exactly one [`SelectionMode`] is active at a time — the central invariant
//! of the explorer. Every transition is total: it resets the result set,
//! invalidates any in-flight query by bumping the request token, and returns
//! a [`Transition`] describing the single query the new mode needs (if any).
//! The response side lives in [`crate::results`].

use danamap_core::{Category, DistrictBoundary, Place};

use crate::notice::Notice;
use crate::results::ResultSet;

/// Radius options offered by the "near me" picker, in kilometers.
pub const RADIUS_OPTIONS_KM: [u32; 3] = [5, 10, 15];

/// Minimum query length before a suggestion request is issued.
pub const SUGGESTION_MIN_CHARS: usize = 2;

/// Maximum number of suggestions requested.
pub const SUGGESTION_LIMIT: u32 = 5;

/// Monotonically increasing request identity.
///
/// A response is applied only while its token is still the current one;
/// anything else is a stale response and is dropped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryToken(u64);

/// Lifecycle of a district boundary within [`SelectionMode::District`].
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryState {
    /// The boundary query has been issued and not yet resolved.
    Pending,
    Loaded(DistrictBoundary),
    /// The boundary is missing or failed to load; the mode shows an empty
    /// result set and the camera falls back to the default view.
    Missing,
}

/// The single active way results are being filtered.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectionMode {
    #[default]
    None,
    TextSearch {
        query: String,
    },
    Category {
        category: Category,
    },
    District {
        name: String,
        boundary: BoundaryState,
    },
    Radius {
        km: u32,
    },
    /// Explicit pick, from a search-suggestion or a map-pin click.
    SinglePlace {
        place: Place,
    },
}

/// The one query a mode transition needs issued, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryPlan {
    None,
    Suggestions { query: String },
    CategoryNearOrigin { category: Category },
    /// Boundary first, then places constrained to the district.
    DistrictFlow { name: String },
    WithinRadius { km: u32 },
    /// Full-record fetch after a suggestion pick.
    PlaceDetail { id: i64 },
}

/// Outcome of a transition: the token guarding the new query, plus what to
/// fetch. `plan == None` means the transition is complete synchronously.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub token: QueryToken,
    pub plan: QueryPlan,
}

/// The single source of truth for the active filter and its derived results.
#[derive(Debug, Default)]
pub struct SelectionState {
    mode: SelectionMode,
    results: ResultSet,
    loading: bool,
    notices: Vec<Notice>,
    epoch: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &SelectionMode {
        &self.mode
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    /// `true` while a query for the current mode is unresolved. The UI shows
    /// the new mode's loading state immediately — old results are cleared
    /// synchronously at transition time, never left on screen.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn active_boundary(&self) -> Option<&DistrictBoundary> {
        match &self.mode {
            SelectionMode::District {
                boundary: BoundaryState::Loaded(b),
                ..
            } => Some(b),
            _ => None,
        }
    }

    /// Drains accumulated user-visible notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Current token; responses carrying an older one are stale.
    pub(crate) fn current_token(&self) -> QueryToken {
        QueryToken(self.epoch)
    }

    pub(crate) fn is_current(&self, token: QueryToken) -> bool {
        token == self.current_token()
    }

    pub(crate) fn finish_loading(&mut self) {
        self.loading = false;
    }

    pub(crate) fn set_results(&mut self, results: ResultSet) {
        self.results = results;
    }

    pub(crate) fn set_boundary(&mut self, state: BoundaryState) {
        if let SelectionMode::District { boundary, .. } = &mut self.mode {
            *boundary = state;
        }
    }

    /// Resets everything a new mode does not own and invalidates in-flight
    /// queries. Every transition funnels through here.
    fn reset_for(&mut self, mode: SelectionMode, loading: bool) -> QueryToken {
        self.epoch += 1;
        self.mode = mode;
        self.results = ResultSet::Empty;
        self.loading = loading;
        self.current_token()
    }

    fn done(token: QueryToken, plan: QueryPlan) -> Transition {
        Transition { token, plan }
    }

    /// Returns to [`SelectionMode::None`] and drops any in-flight query.
    pub fn clear(&mut self) -> Transition {
        let token = self.reset_for(SelectionMode::None, false);
        Self::done(token, QueryPlan::None)
    }

    /// Enters free-text search mode.
    ///
    /// Below [`SUGGESTION_MIN_CHARS`] no query is issued and the result set
    /// is empty; an all-whitespace query clears the selection entirely.
    pub fn set_text_search(&mut self, query: &str) -> Transition {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return self.clear();
        }
        let issue = trimmed.chars().count() >= SUGGESTION_MIN_CHARS;
        let token = self.reset_for(
            SelectionMode::TextSearch {
                query: trimmed.to_owned(),
            },
            issue,
        );
        let plan = if issue {
            QueryPlan::Suggestions {
                query: trimmed.to_owned(),
            }
        } else {
            QueryPlan::None
        };
        Self::done(token, plan)
    }

    /// Enters category mode, or leaves it when `category` is already active
    /// (toggle semantics: re-selecting deactivates rather than re-running).
    pub fn set_category(&mut self, category: Category) -> Transition {
        if matches!(&self.mode, SelectionMode::Category { category: current } if *current == category)
        {
            return self.clear();
        }
        let token = self.reset_for(SelectionMode::Category { category }, true);
        Self::done(token, QueryPlan::CategoryNearOrigin { category })
    }

    /// Enters district mode with the boundary pending, or leaves it when
    /// `name` is already active. An empty name clears the selection.
    pub fn set_district(&mut self, name: &str) -> Transition {
        let name = name.trim();
        if name.is_empty() {
            return self.clear();
        }
        if matches!(&self.mode, SelectionMode::District { name: current, .. } if current == name) {
            return self.clear();
        }
        let token = self.reset_for(
            SelectionMode::District {
                name: name.to_owned(),
                boundary: BoundaryState::Pending,
            },
            true,
        );
        Self::done(
            token,
            QueryPlan::DistrictFlow {
                name: name.to_owned(),
            },
        )
    }

    /// Enters radius mode. A value outside [`RADIUS_OPTIONS_KM`] is an
    /// invalid selection and clears instead.
    pub fn set_radius(&mut self, km: u32) -> Transition {
        if !RADIUS_OPTIONS_KM.contains(&km) {
            return self.clear();
        }
        let token = self.reset_for(SelectionMode::Radius { km }, true);
        Self::done(token, QueryPlan::WithinRadius { km })
    }

    /// Directly enters single-place mode with a fully known record
    /// (map-pin click, or a resolved suggestion pick).
    pub fn select_place(&mut self, place: Place) {
        self.reset_for(
            SelectionMode::SinglePlace {
                place: place.clone(),
            },
            false,
        );
        self.results = ResultSet::Single(place);
    }

    /// Issues the detail fetch for a picked suggestion.
    ///
    /// The mode does not change yet — it transitions to
    /// [`SelectionMode::SinglePlace`] when the detail arrives, and stays
    /// unchanged if the fetch fails. The token still invalidates whatever
    /// query was in flight.
    pub fn begin_suggestion_pick(&mut self, id: i64) -> Transition {
        self.epoch += 1;
        self.loading = true;
        Self::done(self.current_token(), QueryPlan::PlaceDetail { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn museum() -> Category {
        Category::Museum
    }

    #[test]
    fn default_mode_is_none() {
        let state = SelectionState::new();
        assert_eq!(*state.mode(), SelectionMode::None);
        assert!(state.results().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn set_category_enters_mode_and_plans_query() {
        let mut state = SelectionState::new();
        let t = state.set_category(museum());
        assert!(matches!(state.mode(), SelectionMode::Category { .. }));
        assert!(state.is_loading());
        assert_eq!(
            t.plan,
            QueryPlan::CategoryNearOrigin { category: museum() }
        );
    }

    #[test]
    fn same_category_twice_toggles_back_to_none() {
        let mut state = SelectionState::new();
        state.set_category(museum());
        let t = state.set_category(museum());
        assert_eq!(*state.mode(), SelectionMode::None);
        assert_eq!(t.plan, QueryPlan::None);
        assert!(!state.is_loading());
    }

    #[test]
    fn different_category_is_a_new_query_not_a_toggle() {
        let mut state = SelectionState::new();
        state.set_category(museum());
        let t = state.set_category(Category::Viewpoint);
        assert!(matches!(
            state.mode(),
            SelectionMode::Category { category: Category::Viewpoint }
        ));
        assert_ne!(t.plan, QueryPlan::None);
    }

    #[test]
    fn same_district_twice_toggles_back_to_none() {
        let mut state = SelectionState::new();
        state.set_district("Sơn Trà");
        let t = state.set_district("Sơn Trà");
        assert_eq!(*state.mode(), SelectionMode::None);
        assert_eq!(t.plan, QueryPlan::None);
    }

    #[test]
    fn empty_district_name_clears_selection() {
        let mut state = SelectionState::new();
        state.set_category(museum());
        let t = state.set_district("  ");
        assert_eq!(*state.mode(), SelectionMode::None);
        assert_eq!(t.plan, QueryPlan::None);
    }

    #[test]
    fn unsupported_radius_clears_selection() {
        let mut state = SelectionState::new();
        state.set_category(museum());
        let t = state.set_radius(7);
        assert_eq!(*state.mode(), SelectionMode::None);
        assert_eq!(t.plan, QueryPlan::None);
    }

    #[test]
    fn supported_radius_enters_mode() {
        let mut state = SelectionState::new();
        let t = state.set_radius(10);
        assert_eq!(*state.mode(), SelectionMode::Radius { km: 10 });
        assert_eq!(t.plan, QueryPlan::WithinRadius { km: 10 });
    }

    #[test]
    fn short_query_plans_no_network_call() {
        let mut state = SelectionState::new();
        let t = state.set_text_search("h");
        assert!(matches!(state.mode(), SelectionMode::TextSearch { .. }));
        assert_eq!(t.plan, QueryPlan::None);
        assert!(!state.is_loading());
        assert!(state.results().is_empty());
    }

    #[test]
    fn two_char_query_plans_suggestions() {
        let mut state = SelectionState::new();
        let t = state.set_text_search("hà");
        assert_eq!(
            t.plan,
            QueryPlan::Suggestions {
                query: "hà".to_owned()
            }
        );
    }

    #[test]
    fn blank_query_clears_selection() {
        let mut state = SelectionState::new();
        state.set_category(museum());
        state.set_text_search("   ");
        assert_eq!(*state.mode(), SelectionMode::None);
    }

    #[test]
    fn every_transition_invalidates_previous_token() {
        let mut state = SelectionState::new();
        let t1 = state.set_category(museum());
        let t2 = state.set_district("Hải Châu");
        assert!(!state.is_current(t1.token));
        assert!(state.is_current(t2.token));
    }

    #[test]
    fn suggestion_pick_keeps_mode_but_invalidates_token() {
        let mut state = SelectionState::new();
        let t1 = state.set_category(museum());
        let t2 = state.begin_suggestion_pick(9);
        assert!(matches!(state.mode(), SelectionMode::Category { .. }));
        assert!(!state.is_current(t1.token));
        assert!(state.is_current(t2.token));
        assert_eq!(t2.plan, QueryPlan::PlaceDetail { id: 9 });
    }
}
