//! Root-cause categories for compiler diagnostics.
//!
//! Classification walks an ordered rule list; the first rule whose
//! substrings all occur in the message wins, and anything unmatched lands in
//! [`Category::Other`]. Rule order is significant: narrower rules must come
//! before broader ones such as the `incompatible types` fallback.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::record::ErrorRecord;

/// Error category, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "UUID_to_String")]
    UuidToString,
    #[serde(rename = "String_to_UUID")]
    StringToUuid,
    #[serde(rename = "UUID_to_Long")]
    UuidToLong,
    #[serde(rename = "Long_to_UUID")]
    LongToUuid,
    #[serde(rename = "DateTime_conversion")]
    DateTimeConversion,
    #[serde(rename = "Method_not_found")]
    MethodNotFound,
    #[serde(rename = "Abstract_method")]
    AbstractMethod,
    #[serde(rename = "List_type_conversion")]
    ListTypeConversion,
    #[serde(rename = "Other_type_conversion")]
    OtherTypeConversion,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::UuidToString,
        Category::StringToUuid,
        Category::UuidToLong,
        Category::LongToUuid,
        Category::DateTimeConversion,
        Category::MethodNotFound,
        Category::AbstractMethod,
        Category::ListTypeConversion,
        Category::OtherTypeConversion,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::UuidToString => "UUID_to_String",
            Category::StringToUuid => "String_to_UUID",
            Category::UuidToLong => "UUID_to_Long",
            Category::LongToUuid => "Long_to_UUID",
            Category::DateTimeConversion => "DateTime_conversion",
            Category::MethodNotFound => "Method_not_found",
            Category::AbstractMethod => "Abstract_method",
            Category::ListTypeConversion => "List_type_conversion",
            Category::OtherTypeConversion => "Other_type_conversion",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// One classification rule: every substring must occur in the message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub contains: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: Category, contains: &[&str]) -> Self {
        Self {
            category,
            contains: contains.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn matches(&self, message: &str) -> bool {
        !self.contains.is_empty()
            && self
                .contains
                .iter()
                .all(|needle| message.contains(needle.as_str()))
    }
}

const UUID_TO_STRING: &str = "UUID cannot be converted to java.lang.String";
const STRING_TO_UUID: &str = "String cannot be converted to java.util.UUID";
const UUID_TO_LONG: &str = "UUID cannot be converted to java.lang.Long";
const LONG_TO_UUID: &str = "Long cannot be converted to java.util.UUID";
const DATETIME: &str = "LocalDateTime cannot be converted to java.time.LocalDate";
const ABSTRACT: &str = "does not override abstract method";
const LIST_UUID: &str = "List<java.util.UUID> cannot be converted";
const INCOMPATIBLE: &str = "incompatible types";

/// Ordered rule list; first match wins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<CategoryRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Every known rule, narrowest first.
    pub fn full() -> Self {
        Self::new(vec![
            CategoryRule::new(Category::UuidToString, &[UUID_TO_STRING]),
            CategoryRule::new(Category::StringToUuid, &[STRING_TO_UUID]),
            CategoryRule::new(Category::UuidToLong, &[UUID_TO_LONG]),
            CategoryRule::new(Category::LongToUuid, &[LONG_TO_UUID]),
            CategoryRule::new(Category::DateTimeConversion, &[DATETIME]),
            CategoryRule::new(Category::MethodNotFound, &["cannot find symbol", "method"]),
            CategoryRule::new(Category::AbstractMethod, &[ABSTRACT]),
            CategoryRule::new(Category::ListTypeConversion, &[LIST_UUID]),
            CategoryRule::new(Category::OtherTypeConversion, &[INCOMPATIBLE]),
        ])
    }

    /// Rules for the per-file sampling report: no list bucket, generic
    /// `incompatible types` fallback.
    pub fn compact() -> Self {
        Self::full().without(&[Category::ListTypeConversion])
    }

    /// Rules for the exhaustive listing: list bucket, no `Long_to_UUID`, no
    /// generic fallback.
    pub fn detailed() -> Self {
        Self::full().without(&[Category::LongToUuid, Category::OtherTypeConversion])
    }

    fn without(mut self, dropped: &[Category]) -> Self {
        self.rules.retain(|r| !dropped.contains(&r.category));
        self
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Category of a single message.
    pub fn classify(&self, message: &str) -> Category {
        self.rules
            .iter()
            .find(|rule| rule.matches(message))
            .map_or(Category::Other, |rule| rule.category)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::full()
    }
}

/// Records bucketed by category; buckets iterate in category order and keep
/// input order inside
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Categorized {
    buckets: BTreeMap<Category, Vec<ErrorRecord>>,
}

impl Categorized {
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn get(&self, category: Category) -> &[ErrorRecord] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count(&self, category: Category) -> usize {
        self.get(category).len()
    }

    /// Non-empty buckets in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ErrorRecord])> {
        self.buckets
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(category, records)| (*category, records.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Assign every record to exactly one category.
pub fn categorize(records: &[ErrorRecord], rules: &RuleSet) -> Categorized {
    let mut buckets: BTreeMap<Category, Vec<ErrorRecord>> = BTreeMap::new();
    for record in records {
        let category = rules.classify(&record.message);
        buckets.entry(category).or_default().push(record.clone());
    }

    let out = Categorized { buckets };
    debug!(
        total = out.total(),
        categories = out.iter().count(),
        "categorized diagnostics"
    );
    out
}
