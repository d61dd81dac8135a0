//! Keyword classifier for citizen reports.
//!
//! Each category owns a list of keywords. A description is lower-cased and the
//! categories are tried in declaration order; the first category with a
//! keyword occurring anywhere in the text wins. Matching is plain substring
//! search, so "light" also matches inside "delight".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Service category assigned to a ticket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Sanitation,
    #[serde(rename = "Roads & Infrastructure")]
    RoadsInfrastructure,
    #[serde(rename = "Water Supply")]
    WaterSupply,
    Electricity,
    #[serde(rename = "Public Safety")]
    PublicSafety,
    Other,
}

impl Category {
    /// All categories in matching order. `Other` is last and never matches a keyword.
    pub const ALL: [Category; 6] = [
        Category::Sanitation,
        Category::RoadsInfrastructure,
        Category::WaterSupply,
        Category::Electricity,
        Category::PublicSafety,
        Category::Other,
    ];

    /// Human readable label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Sanitation => "Sanitation",
            Category::RoadsInfrastructure => "Roads & Infrastructure",
            Category::WaterSupply => "Water Supply",
            Category::Electricity => "Electricity",
            Category::PublicSafety => "Public Safety",
            Category::Other => "Other",
        }
    }

    /// Keywords that route a description to this category.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Sanitation => &["garbage", "trash", "waste", "dirty", "smell", "dump"],
            Category::RoadsInfrastructure => &[
                "pothole", "road", "street", "crack", "pavement", "sidewalk", "bridge",
            ],
            Category::WaterSupply => &["water", "leak", "pipe", "tap", "supply", "drainage"],
            Category::Electricity => &[
                "light",
                "electricity",
                "power",
                "streetlight",
                "lamp",
                "wire",
            ],
            Category::PublicSafety => &["safety", "danger", "crime", "accident", "emergency"],
            Category::Other => &[],
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords().iter().any(|keyword| lowered.contains(keyword))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a stored label does not name a known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Classify a free-text description into a category.
///
/// Never fails: text without any known keyword (including the empty string)
/// is classified as [`Category::Other`].
pub fn classify(description: &str) -> Category {
    let lowered = description.to_lowercase();

    Category::ALL
        .into_iter()
        .find(|category| category.matches(&lowered))
        .unwrap_or(Category::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_category_keywords() {
        assert_eq!(classify("Overflowing garbage bin"), Category::Sanitation);
        assert_eq!(
            classify("Large pothole near market"),
            Category::RoadsInfrastructure
        );
        assert_eq!(classify("No supply since morning"), Category::WaterSupply);
        assert_eq!(classify("Power cut in the colony"), Category::Electricity);
        assert_eq!(classify("Frequent crime at night"), Category::PublicSafety);
    }

    #[test]
    fn test_every_keyword_routes_to_its_category_or_earlier() {
        for category in Category::ALL {
            for keyword in category.keywords() {
                let found = classify(&format!("report about {}", keyword));
                let found_pos = Category::ALL.iter().position(|c| *c == found).unwrap();
                let own_pos = Category::ALL.iter().position(|c| c == &category).unwrap();
                assert!(
                    found_pos <= own_pos,
                    "keyword {:?} classified as {:?}",
                    keyword,
                    found
                );
            }
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("TRASH EVERYWHERE"), Category::Sanitation);
        assert_eq!(classify("Broken Bridge"), Category::RoadsInfrastructure);
    }

    #[test]
    fn test_earlier_category_wins() {
        // "leak" (water) and "road" (roads): roads is declared first.
        assert_eq!(
            classify("Water pipe leaking causing road flooding"),
            Category::RoadsInfrastructure
        );
        // "waste" (sanitation) and "danger" (safety).
        assert_eq!(
            classify("Toxic waste is a danger to kids"),
            Category::Sanitation
        );
        // "street" matches before the electricity keyword "streetlight".
        assert_eq!(classify("Streetlight broken"), Category::RoadsInfrastructure);
    }

    #[test]
    fn test_substring_matches_inside_words() {
        assert_eq!(classify("What a delight"), Category::Electricity);
    }

    #[test]
    fn test_no_keyword_is_other() {
        assert_eq!(classify("Stray dogs near the school"), Category::Other);
        assert_eq!(classify(""), Category::Other);
    }

    #[test]
    fn test_label_round_trips_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
        }
        assert!("Parks".parse::<Category>().is_err());
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&Category::RoadsInfrastructure).unwrap();
        assert_eq!(json, "\"Roads & Infrastructure\"");
    }
}
