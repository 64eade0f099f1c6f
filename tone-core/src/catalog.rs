//! # Frequency Catalog Module
//!
//! This module holds the curated catalog of named healing frequencies and the
//! lookup operations used by the rest of the application. Each entry carries
//! the display metadata (description, benefits, origin, map location, research
//! references) shown by the browsing pages.
//!
//! ## Features
//! - Curated set of well-known tones (Solfeggio scale plus Verdi's A)
//! - Lookup by id and filtering by category
//! - Insertion-deduplicated category listing
//! - Idempotent append for user-added tones

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Category a catalog entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Healing,
    Meditation,
    Ancient,
    Scientific,
    Spiritual,
}

impl Category {
    /// Human-readable label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Healing => "Healing",
            Category::Meditation => "Meditation",
            Category::Ancient => "Ancient",
            Category::Scientific => "Scientific",
            Category::Spiritual => "Spiritual",
        }
    }
}

/// A research reference attached to a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

/// Geographic origin shown on the map page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// A single named frequency with its display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    pub id: String,
    pub name: String,
    pub hz: f64,
    pub description: String,
    pub benefits: Vec<String>,
    pub origin: String,
    pub location: Location,
    pub image_url: String,
    pub category: Category,
    pub color: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn entry(
    id: &str,
    name: &str,
    hz: f64,
    description: &str,
    benefits: &[&str],
    origin: &str,
    location: (&str, f64, f64),
    category: Category,
    color: &str,
) -> Frequency {
    Frequency {
        id: id.to_string(),
        name: name.to_string(),
        hz,
        description: description.to_string(),
        benefits: strings(benefits),
        origin: origin.to_string(),
        location: Location {
            name: location.0.to_string(),
            lat: location.1,
            lng: location.2,
        },
        image_url: "/placeholder.svg".to_string(),
        category,
        color: color.to_string(),
        references: Vec::new(),
    }
}

/// The curated catalog, built once at startup.
///
/// Insertion order is preserved and is significant for the matcher's
/// tie-break rule; `hz` values are assumed unique but never enforced.
static CURATED: Lazy<Vec<Frequency>> = Lazy::new(|| {
    let mut entries = vec![
        entry(
            "528hz",
            "Miracle Tone",
            528.0,
            "Known as the 'Love Frequency,' 528 Hz is said to restore human consciousness \
             and bring positive transformation. It's connected to the heart chakra and is \
             believed to heal DNA.",
            &[
                "DNA repair",
                "Increased energy",
                "Enhanced clarity",
                "Spiritual awakening",
                "Stress reduction",
            ],
            "Dr. Joseph Puleo discovered the Solfeggio Frequencies in the 1970s, including \
             the 528 Hz, by decoding the Book of Numbers.",
            ("New York, USA", 40.7128, -74.006),
            Category::Healing,
            "#4CAF50",
        ),
        entry(
            "432hz",
            "Verdi's A",
            432.0,
            "Also known as 'Verdi's A', 432 Hz is said to be mathematically consistent \
             with the patterns of the universe, resonating with the golden ratio and \
             vibrating in harmony with nature.",
            &[
                "Calming effect",
                "Heart chakra activation",
                "Enhanced musical experience",
                "Alignment with natural frequencies",
                "Reduced anxiety",
            ],
            "Giuseppe Verdi, the famous Italian composer, tuned his instruments to \
             A=432 Hz. This tuning was later championed by various acoustic researchers.",
            ("Milan, Italy", 45.4642, 9.19),
            Category::Ancient,
            "#2196F3",
        ),
        entry(
            "396hz",
            "Liberation Tone",
            396.0,
            "The 396 Hz frequency is associated with liberating guilt and fear, helping \
             to remove subconscious blockages and empowering the achievement of goals.",
            &[
                "Liberation from guilt and fear",
                "Grounding energy",
                "Turn grief into joy",
                "Cleansing trauma",
                "Security and safety",
            ],
            "Part of the ancient Solfeggio frequencies discovered by Dr. Joseph Puleo, \
             396 Hz corresponds to the 'Ut' tone in the original Solfeggio musical scale.",
            ("Rome, Italy", 41.9028, 12.4964),
            Category::Meditation,
            "#9C27B0",
        ),
        entry(
            "639hz",
            "Connection Tone",
            639.0,
            "The 639 Hz frequency is associated with harmonious interpersonal \
             relationships, encouraging connection, understanding, tolerance, and love.",
            &[
                "Improved relationships",
                "Enhanced communication",
                "Heart chakra balancing",
                "Promoting love and compassion",
                "Harmonious community connections",
            ],
            "This Solfeggio frequency corresponds to the 'Fa' tone in the original \
             six-tone scale used in ancient sacred music.",
            ("Athens, Greece", 37.9838, 23.7275),
            Category::Healing,
            "#FF9800",
        ),
        entry(
            "852hz",
            "Spiritual Tone",
            852.0,
            "The 852 Hz frequency is said to awaken intuition and return spiritual \
             order. It's associated with the third eye chakra and helps raise awareness \
             and consciousness.",
            &[
                "Spiritual awakening",
                "Enhanced intuition",
                "Cell regeneration",
                "Third eye activation",
                "Higher consciousness",
            ],
            "This frequency is part of the Solfeggio scale and corresponds to the 'La' \
             tone. It has been used in Gregorian chants and spiritual music throughout \
             history.",
            ("Giza, Egypt", 29.9792, 31.1342),
            Category::Spiritual,
            "#673AB7",
        ),
        entry(
            "417hz",
            "Change Facilitator",
            417.0,
            "The 417 Hz frequency is associated with facilitating change, undoing \
             situations, and breaking down crystallized emotional patterns.",
            &[
                "Facilitating positive change",
                "Clearing traumatic experiences",
                "Breaking negative patterns",
                "Sacral chakra activation",
                "Creative expression",
            ],
            "Part of the Solfeggio frequencies, 417 Hz corresponds to the 'Re' tone and \
             has been used in sacred music to help release negative energy.",
            ("Mecca, Saudi Arabia", 21.4225, 39.8262),
            Category::Meditation,
            "#F44336",
        ),
        entry(
            "963hz",
            "Divine Frequency",
            963.0,
            "The 963 Hz frequency is connected to the Crown Chakra and is said to \
             enable direct experience with the divine, awakening perfect state and \
             oneness.",
            &[
                "Crown chakra activation",
                "Connection to divine consciousness",
                "Enlightenment and wisdom",
                "Spiritual awakening",
                "Pure awareness",
            ],
            "This is the highest of the Solfeggio frequencies, corresponding to the \
             'Si' tone. It has been used in sacred ceremonies to connect with higher \
             spiritual realms.",
            ("Agra, India", 27.1751, 78.0421),
            Category::Spiritual,
            "#9C27B0",
        ),
        entry(
            "174hz",
            "Pain Reduction",
            174.0,
            "The 174 Hz frequency is the lowest of the Solfeggio frequencies and is \
             associated with pain reduction, energy flow, and a sense of security and \
             comfort.",
            &[
                "Natural anesthetic effect",
                "Foundation for physical healing",
                "Stress reduction",
                "Root chakra activation",
                "Grounding energy",
            ],
            "While not part of the original six Solfeggio tones, 174 Hz has been \
             recognized for its healing properties and is now included in the extended \
             Solfeggio scale.",
            ("Los Angeles, USA", 34.0522, -118.2437),
            Category::Healing,
            "#FF5722",
        ),
    ];

    entries[0].references = vec![Reference {
        title: "Effect of 528 Hz music on the endocrine system and autonomic nervous system".to_string(),
        url: "https://doi.org/10.1016/j.explore.2017.12.002".to_string(),
        authors: Some("Akimoto, K., Hu, A., Yamaguchi, T., Kobayashi, H.".to_string()),
        year: Some(2018),
        publisher: Some("Health".to_string()),
    }];
    entries[1].references = vec![Reference {
        title: "Music tuned to 440 Hz versus 432 Hz and the health effects".to_string(),
        url: "https://doi.org/10.1016/j.explore.2019.04.001".to_string(),
        authors: Some("Calamassi, D., Pomponi, G. P.".to_string()),
        year: Some(2019),
        publisher: Some("Explore".to_string()),
    }];

    entries
});

/// The catalog of named frequencies.
///
/// Created once at application start and passed by reference to whatever
/// needs lookups; user-added entries are appended at runtime.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<Frequency>,
}

impl Catalog {
    /// Creates a catalog populated with the curated entries.
    pub fn curated() -> Self {
        Self {
            entries: CURATED.clone(),
        }
    }

    /// Creates an empty catalog. Used by pages that build their own lists.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[Frequency] {
        &self.entries
    }

    /// Finds an entry by its id.
    ///
    /// # Arguments
    /// * `id` - Entry id, e.g. "528hz"
    ///
    /// # Returns
    /// * `Some(&Frequency)` - The matching entry
    /// * `None` - No entry with that id
    pub fn get_by_id(&self, id: &str) -> Option<&Frequency> {
        self.entries.iter().find(|f| f.id == id)
    }

    /// All entries belonging to the given category, in insertion order.
    pub fn in_category(&self, category: Category) -> Vec<&Frequency> {
        self.entries
            .iter()
            .filter(|f| f.category == category)
            .collect()
    }

    /// The distinct categories present, deduplicated in insertion order.
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for f in &self.entries {
            if !seen.contains(&f.category) {
                seen.push(f.category);
            }
        }
        seen
    }

    /// Appends a new entry unless its id already exists.
    ///
    /// A duplicate id is reported as a warning and the operation is silently
    /// ignored - append is idempotent by id, never an overwrite.
    pub fn append(&mut self, frequency: Frequency) {
        if self.get_by_id(&frequency.id).is_some() {
            eprintln!(
                "[CATALOG] Ignoring append: id '{}' already exists",
                frequency.id
            );
            return;
        }
        self.entries.push(frequency);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(id: &str, hz: f64, category: Category) -> Frequency {
        entry(id, id, hz, "", &[], "", ("Nowhere", 0.0, 0.0), category, "#FFFFFF")
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::curated();
        assert_eq!(catalog.get_by_id("432hz").unwrap().hz, 432.0);
        assert!(catalog.get_by_id("440hz").is_none());
    }

    #[test]
    fn test_categories_deduplicated_in_insertion_order() {
        let catalog = Catalog::curated();
        let categories = catalog.categories();

        // First entries are Healing (528), Ancient (432), Meditation (396),
        // then Spiritual (852); later repeats must not reappear.
        assert_eq!(
            categories,
            vec![
                Category::Healing,
                Category::Ancient,
                Category::Meditation,
                Category::Spiritual,
            ]
        );
    }

    #[test]
    fn test_category_filter() {
        let catalog = Catalog::curated();
        let healing = catalog.in_category(Category::Healing);
        assert_eq!(healing.len(), 3);
        assert!(healing.iter().all(|f| f.category == Category::Healing));
    }

    #[test]
    fn test_append_ignores_duplicate_id() {
        let mut catalog = Catalog::empty();
        catalog.append(minimal("alpha", 220.0, Category::Scientific));
        catalog.append(minimal("alpha", 440.0, Category::Scientific));

        assert_eq!(catalog.entries().len(), 1);
        assert_eq!(catalog.get_by_id("alpha").unwrap().hz, 220.0);
    }

    #[test]
    fn test_append_new_entry() {
        let mut catalog = Catalog::curated();
        let before = catalog.entries().len();
        catalog.append(minimal("custom", 285.0, Category::Scientific));
        assert_eq!(catalog.entries().len(), before + 1);
        assert!(catalog.categories().contains(&Category::Scientific));
    }
}
