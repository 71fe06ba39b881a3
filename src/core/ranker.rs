use crate::core::{filters::passes_score_floor, scoring::calculate_match_score};
use crate::models::{ScoredVenue, ScoringPolicy, UserQuery, VenueRecord};

/// Rank a catalog with the canonical scoring policy
pub fn rank(catalog: &[VenueRecord], query: &UserQuery) -> Vec<ScoredVenue> {
    Ranker::with_default_policy().rank(catalog, query)
}

/// Ranking pass orchestrator
///
/// # Pipeline Stages
/// 1. Score every venue against the query
/// 2. Drop venues at or below the score floor
/// 3. Stable sort by score, descending
/// 4. Truncate to the policy limit
///
/// A `Ranker` holds only its policy, so one instance can serve concurrent
/// passes over the same shared catalog.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    policy: ScoringPolicy,
}

impl Ranker {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn with_default_policy() -> Self {
        Self {
            policy: ScoringPolicy::default(),
        }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Score, filter, order and truncate the catalog for one query
    ///
    /// The catalog is only borrowed; every result is a new value holding a
    /// copy of its venue. Equal scores keep catalog order.
    pub fn rank(&self, catalog: &[VenueRecord], query: &UserQuery) -> Vec<ScoredVenue> {
        let mut scored: Vec<ScoredVenue> = catalog
            .iter()
            .filter_map(|venue| {
                let breakdown = calculate_match_score(venue, query, &self.policy);
                let score = breakdown.total();

                if passes_score_floor(score, &self.policy) {
                    Some(ScoredVenue {
                        venue: venue.clone(),
                        match_score: score,
                        matched_preferences: breakdown.matched_preferences,
                    })
                } else {
                    None
                }
            })
            .collect();

        let kept = scored.len();

        // `sort_by` is stable
        scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        scored.truncate(self.policy.limit);

        tracing::debug!(
            "Ranked {} venues: {} above floor, returning {}",
            catalog.len(),
            kept,
            scored.len()
        );

        scored
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_policy()
    }
}
