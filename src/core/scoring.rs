use crate::core::filters::{matched_preferences, matches_type, matches_zip};
use crate::models::{BudgetTier, ScoreBreakdown, ScoringPolicy, UserQuery, VenueRecord};

/// Calculate the match score of a venue for a query
///
/// Signals, highest priority first, summed without normalisation:
/// score = (
///     preference_bonus * matched_prefs +  # each flagged preference
///     type_bonus       * type_match +     # category accepted
///     zip_bonus        * zip_match +      # exact zip code
///     budget_weight                       # see below
/// )
pub fn calculate_match_score(
    venue: &VenueRecord,
    query: &UserQuery,
    policy: &ScoringPolicy,
) -> ScoreBreakdown {
    // Signal 1: preference flags
    let matched = matched_preferences(venue, &query.prefs);
    let matched_count = i32::try_from(matched.len()).unwrap_or(i32::MAX);
    let preferences = policy.preference_bonus.saturating_mul(matched_count);

    // Signal 2: venue type
    let type_match = if matches_type(venue, &query.types) {
        policy.type_bonus
    } else {
        0
    };

    // Signal 3: zip code
    let zip_match = if matches_zip(venue, &query.zip) {
        policy.zip_bonus
    } else {
        0
    };

    // Signal 4: budget
    let budget = venue
        .price_tier()
        .map(|tier| calculate_budget_weight(query.budget, tier, policy))
        .unwrap_or(0);

    ScoreBreakdown {
        preferences,
        type_match,
        zip_match,
        budget,
        matched_preferences: matched,
    }
}

/// Budget contribution for a venue with a known tier
///
/// A venue above the user's ceiling takes the over-budget penalty. Otherwise
/// the exact-tier bonus shrinks by one step for every tier the venue is
/// cheaper than the ceiling, floored at zero.
#[inline]
pub fn calculate_budget_weight(user: BudgetTier, venue: BudgetTier, policy: &ScoringPolicy) -> i32 {
    let diff = user.rank() - venue.rank();

    if diff < 0 {
        return policy.over_budget_penalty.saturating_neg();
    }

    policy
        .budget_exact_bonus
        .saturating_sub(diff.saturating_mul(policy.budget_step_penalty))
        .max(0)
}
