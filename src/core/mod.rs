// Core algorithm exports
pub mod filters;
pub mod ranker;
pub mod scoring;

pub use filters::{matched_preferences, matches_type, matches_zip, passes_score_floor};
pub use ranker::{rank, Ranker};
pub use scoring::{calculate_budget_weight, calculate_match_score};
