//! Synonym groups in flat and advanced form

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Interchangeable tokens, shortest first.
pub type FlatGroup = Vec<String>;

/// A synonym group with the metadata carried by the advanced table form.
///
/// Parsing never fails on an object. Fields the schema doesn't know about,
/// and known fields holding a value of the wrong type, are kept verbatim in
/// `extra` and written back out unchanged; `validation::validate_group`
/// reports them. A group whose `tokens` is malformed has no tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct AdvancedGroup {
    /// Member phrases. The first one anchors the group when merging.
    pub tokens: Vec<String>,
    pub full: Option<String>,
    pub canonical: Option<String>,
    pub note: Option<String>,
    pub only_countries: Option<Vec<String>>,
    pub only_layers: Option<Vec<String>>,
    pub only_use_while: Option<Vec<String>>,
    pub prefer_full: Option<bool>,
    /// Tokens and `full` are regular expressions rather than literal phrases.
    pub regex: Option<bool>,
    pub reduce_relevance: Option<bool>,
    pub skip_boundaries: Option<bool>,
    pub skip_diacritic_stripping: Option<bool>,
    /// Boundary count every non-canonical phrase is expected to span.
    pub span_boundaries: Option<u32>,
    /// The `type` field.
    pub group_type: Option<String>,
    pub extra: Map<String, Value>,
}

/// `value` as a `T`, or `None` if it is null or the wrong shape.
fn parse<T: DeserializeOwned>(value: &Value) -> Option<T> {
    if value.is_null() {
        return None;
    }
    T::deserialize(value).ok()
}

/// Fill `slot` from `value`; false if `value` didn't fit.
fn store<T: DeserializeOwned>(slot: &mut Option<T>, value: &Value) -> bool {
    *slot = parse(value);
    slot.is_some()
}

impl From<Map<String, Value>> for AdvancedGroup {
    fn from(object: Map<String, Value>) -> Self {
        let mut group = AdvancedGroup::default();
        for (key, value) in object {
            let typed = match key.as_str() {
                "tokens" => parse(&value).map(|tokens| group.tokens = tokens).is_some(),
                "full" => store(&mut group.full, &value),
                "canonical" => store(&mut group.canonical, &value),
                "note" => store(&mut group.note, &value),
                "onlyCountries" => store(&mut group.only_countries, &value),
                "onlyLayers" => store(&mut group.only_layers, &value),
                "onlyUseWhile" => store(&mut group.only_use_while, &value),
                "preferFull" => store(&mut group.prefer_full, &value),
                "regex" => store(&mut group.regex, &value),
                "reduceRelevance" => store(&mut group.reduce_relevance, &value),
                "skipBoundaries" => store(&mut group.skip_boundaries, &value),
                "skipDiacriticStripping" => store(&mut group.skip_diacritic_stripping, &value),
                "spanBoundaries" => store(&mut group.span_boundaries, &value),
                "type" => store(&mut group.group_type, &value),
                _ => false,
            };
            if !typed {
                group.extra.insert(key, value);
            }
        }
        group
    }
}

impl From<AdvancedGroup> for Map<String, Value> {
    fn from(group: AdvancedGroup) -> Self {
        fn put<T: Into<Value>>(object: &mut Map<String, Value>, key: &str, value: Option<T>) {
            if let Some(value) = value {
                object.insert(key.to_string(), value.into());
            }
        }

        let mut object = Map::new();
        object.insert("tokens".to_string(), group.tokens.into());
        put(&mut object, "full", group.full);
        put(&mut object, "canonical", group.canonical);
        put(&mut object, "note", group.note);
        put(&mut object, "onlyCountries", group.only_countries);
        put(&mut object, "onlyLayers", group.only_layers);
        put(&mut object, "onlyUseWhile", group.only_use_while);
        put(&mut object, "preferFull", group.prefer_full);
        put(&mut object, "regex", group.regex);
        put(&mut object, "reduceRelevance", group.reduce_relevance);
        put(&mut object, "skipBoundaries", group.skip_boundaries);
        put(&mut object, "skipDiacriticStripping", group.skip_diacritic_stripping);
        put(&mut object, "spanBoundaries", group.span_boundaries);
        put(&mut object, "type", group.group_type);
        // Ill-typed originals replace the typed placeholder in place.
        for (key, value) in group.extra {
            object.insert(key, value);
        }
        object
    }
}

impl AdvancedGroup {
    /// Build a bare group: `full` is the longest token, `canonical` the shortest.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let full = tokens.iter().max_by_key(|t| t.chars().count()).cloned();
        let canonical = tokens.iter().min_by_key(|t| t.chars().count()).cloned();

        AdvancedGroup {
            tokens,
            full,
            canonical,
            ..AdvancedGroup::default()
        }
    }

    pub fn is_singleton(&self) -> bool {
        self.tokens.len() < 2
    }

    pub fn is_regex(&self) -> bool {
        self.regex.unwrap_or(false)
    }

    /// Groups compared under special rules never take part in merging.
    pub fn skips_merge(&self) -> bool {
        self.skip_boundaries.unwrap_or(false) || self.skip_diacritic_stripping.unwrap_or(false)
    }

    /// The `type` field, if set to a known value.
    pub fn kind(&self) -> Option<GroupType> {
        self.group_type.as_deref().and_then(|t| t.parse().ok())
    }

    /// The `onlyUseWhile` phases that parse; unknown values are skipped.
    pub fn use_phases(&self) -> Vec<UsePhase> {
        self.only_use_while
            .iter()
            .flatten()
            .filter_map(|p| p.parse().ok())
            .collect()
    }
}

/// Raised when a string names no known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value '{}'", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

/// Allowed values of the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupType {
    Box,
    Cardinal,
    Number,
    Ordinal,
    Unit,
    Way,
    Determiner,
}

impl GroupType {
    pub const ALL: [GroupType; 7] = [
        GroupType::Box,
        GroupType::Cardinal,
        GroupType::Number,
        GroupType::Ordinal,
        GroupType::Unit,
        GroupType::Way,
        GroupType::Determiner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Box => "box",
            GroupType::Cardinal => "cardinal",
            GroupType::Number => "number",
            GroupType::Ordinal => "ordinal",
            GroupType::Unit => "unit",
            GroupType::Way => "way",
            GroupType::Determiner => "determiner",
        }
    }
}

impl FromStr for GroupType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Allowed values of the `onlyUseWhile` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsePhase {
    Processing,
    Indexing,
    Querying,
}

impl UsePhase {
    pub const ALL: [UsePhase; 3] = [UsePhase::Processing, UsePhase::Indexing, UsePhase::Querying];

    pub fn as_str(&self) -> &'static str {
        match self {
            UsePhase::Processing => "processing",
            UsePhase::Indexing => "indexing",
            UsePhase::Querying => "querying",
        }
    }
}

impl FromStr for UsePhase {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UsePhase::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}
