use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Column holding the venue category
pub const TYPE_FIELD: &str = "type";
/// Column holding the budget tier label
pub const PRICE_FIELD: &str = "price";
/// Column holding the venue zip code
pub const ZIP_FIELD: &str = "Zip Code";

/// Default preference vocabulary offered in the quiz
pub const DEFAULT_PREFERENCES: [&str; 3] = ["LGBT +", "Adult Club", "Activity"];

/// One row of the venue catalog
///
/// The field set is open: every header column becomes a key. Values are kept
/// as they were read and trimmed on access, so an absent field and an empty
/// one look the same to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueRecord {
    fields: BTreeMap<String, String>,
}

impl VenueRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for tests and fixtures
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a field. A repeated name overwrites the earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Trimmed value of `name`, or `""` when the field is absent
    #[inline]
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(|v| v.trim()).unwrap_or("")
    }

    /// Whether a preference flag is set: non-empty and not the literal "0"
    #[inline]
    pub fn has_flag(&self, name: &str) -> bool {
        let value = self.field(name);
        !value.is_empty() && value != "0"
    }

    pub fn venue_type(&self) -> &str {
        self.field(TYPE_FIELD)
    }

    pub fn zip_code(&self) -> &str {
        self.field(ZIP_FIELD)
    }

    /// Budget tier of the venue, `None` when the label is missing or unknown
    pub fn price_tier(&self) -> Option<BudgetTier> {
        BudgetTier::from_label(self.field(PRICE_FIELD))
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}

impl<K, V> FromIterator<(K, V)> for VenueRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = VenueRecord::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

/// Ordinal price category of a venue or of a user's ceiling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BudgetTier {
    #[default]
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    HighEnd,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Budget, BudgetTier::Moderate, BudgetTier::HighEnd];

    /// Parse a tier label exactly as it appears in the catalog
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "$" => Some(BudgetTier::Budget),
            "$$" => Some(BudgetTier::Moderate),
            "$$$" => Some(BudgetTier::HighEnd),
            _ => None,
        }
    }

    /// Parse a user-supplied ceiling; anything unrecognised means `$`
    ///
    /// The label must match exactly, surrounding whitespace included.
    pub fn from_label_or_default(label: Option<&str>) -> Self {
        label.and_then(Self::from_label).unwrap_or_default()
    }

    #[inline]
    pub fn rank(self) -> i32 {
        match self {
            BudgetTier::Budget => 1,
            BudgetTier::Moderate => 2,
            BudgetTier::HighEnd => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BudgetTier::Budget => "$",
            BudgetTier::Moderate => "$$",
            BudgetTier::HighEnd => "$$$",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Input to one ranking pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuery {
    pub zip: String,
    #[serde(default)]
    pub budget: BudgetTier,
    #[serde(default)]
    pub types: BTreeSet<String>,
    #[serde(default)]
    pub prefs: BTreeSet<String>,
}

impl UserQuery {
    pub fn new(zip: impl Into<String>, budget: BudgetTier) -> Self {
        Self {
            zip: zip.into(),
            budget,
            types: BTreeSet::new(),
            prefs: BTreeSet::new(),
        }
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn with_prefs<I, S>(mut self, prefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefs.extend(prefs.into_iter().map(Into::into));
        self
    }
}

/// A venue paired with its computed match score
///
/// The record stays nested under `venue` so catalog columns can never
/// collide with the score fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredVenue {
    pub venue: VenueRecord,
    #[serde(rename = "matchScore")]
    pub match_score: i32,
    #[serde(rename = "matchedPreferences", default)]
    pub matched_preferences: Vec<String>,
}

/// Per-signal contributions of one scored record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub preferences: i32,
    pub type_match: i32,
    pub zip_match: i32,
    pub budget: i32,
    pub matched_preferences: Vec<String>,
}

impl ScoreBreakdown {
    /// Sum of all signals, saturating at the `i32` bounds
    #[inline]
    pub fn total(&self) -> i32 {
        self.preferences
            .saturating_add(self.type_match)
            .saturating_add(self.zip_match)
            .saturating_add(self.budget)
    }
}

/// Weights and thresholds for a ranking pass
///
/// The default values are the canonical configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub preference_bonus: i32,
    pub type_bonus: i32,
    pub zip_bonus: i32,
    pub budget_exact_bonus: i32,
    pub budget_step_penalty: i32,
    pub over_budget_penalty: i32,
    /// Records must score strictly above this to be kept
    pub score_floor: i32,
    pub limit: usize,
}

impl ScoringPolicy {
    pub fn is_canonical(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            preference_bonus: 50,
            type_bonus: 30,
            zip_bonus: 20,
            budget_exact_bonus: 15,
            budget_step_penalty: 5,
            over_budget_penalty: 1000,
            score_floor: -100,
            limit: 3,
        }
    }
}

/// Immutable catalog snapshot
#[derive(Debug, Clone)]
pub struct Catalog {
    venues: Vec<VenueRecord>,
    source: String,
    loaded_at: chrono::DateTime<chrono::Utc>,
}

impl Catalog {
    pub fn new(source: impl Into<String>, venues: Vec<VenueRecord>) -> Self {
        Self {
            venues,
            source: source.into(),
            loaded_at: chrono::Utc::now(),
        }
    }

    pub fn empty(source: impl Into<String>) -> Self {
        Self::new(source, Vec::new())
    }

    pub fn venues(&self) -> &[VenueRecord] {
        &self.venues
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    /// Sorted, de-duplicated, non-empty venue types
    pub fn unique_types(&self) -> Vec<String> {
        self.venues
            .iter()
            .map(VenueRecord::venue_type)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Venues that carry both coordinates
    pub fn with_coordinates(&self) -> Vec<VenueRecord> {
        self.venues
            .iter()
            .filter(|v| !v.field("latitude").is_empty() && !v.field("longitude").is_empty())
            .cloned()
            .collect()
    }
}
