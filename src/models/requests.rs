use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{BudgetTier, UserQuery};

/// Request to rank venues for a quiz submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1, max = 10))]
    pub zip: String,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub prefs: Vec<String>,
}

impl RecommendRequest {
    /// Build the ranking query, applying the default `$` budget
    pub fn to_query(&self) -> UserQuery {
        UserQuery::new(
            self.zip.trim(),
            BudgetTier::from_label_or_default(self.budget.as_deref()),
        )
        .with_types(self.types.iter().cloned())
        .with_prefs(self.prefs.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_query_defaults_budget() {
        let req = RecommendRequest {
            zip: " 15201 ".to_string(),
            budget: Some("fancy".to_string()),
            types: vec!["Club".to_string()],
            prefs: vec![],
        };

        let query = req.to_query();
        assert_eq!(query.zip, "15201");
        assert_eq!(query.budget, BudgetTier::Budget);
        assert!(query.types.contains("Club"));
        assert!(query.prefs.is_empty());
    }

    #[test]
    fn test_empty_zip_rejected() {
        let req: RecommendRequest = serde_json::from_str(r#"{"zip": ""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_missing_lists_default_empty() {
        let req: RecommendRequest = serde_json::from_str(r#"{"zip": "15201", "budget": "$$"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.types.is_empty());
        assert_eq!(req.to_query().budget, BudgetTier::Moderate);
    }
}
