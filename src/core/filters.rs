use std::collections::BTreeSet;

use crate::models::{ScoringPolicy, VenueRecord};

/// Preference names from `prefs` whose flag is set on the venue
///
/// Returned in the query's (sorted) order.
#[inline]
pub fn matched_preferences(venue: &VenueRecord, prefs: &BTreeSet<String>) -> Vec<String> {
    prefs
        .iter()
        .filter(|pref| venue.has_flag(pref))
        .cloned()
        .collect()
}

/// Whether the venue's trimmed type is one the user accepts
#[inline]
pub fn matches_type(venue: &VenueRecord, types: &BTreeSet<String>) -> bool {
    types.contains(venue.venue_type())
}

/// Exact string comparison; no zip normalisation is applied
#[inline]
pub fn matches_zip(venue: &VenueRecord, zip: &str) -> bool {
    venue.zip_code() == zip
}

/// Final filter stage: keep scores strictly above the floor
#[inline]
pub fn passes_score_floor(score: i32, policy: &ScoringPolicy) -> bool {
    score > policy.score_floor
}
