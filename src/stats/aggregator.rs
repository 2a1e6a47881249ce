//! Color Aggregator Module
//! Groups tagged card records by color identity and produces the per-color
//! summary feeding one chart panel: type-ratio table, creature mana-value
//! curve buckets, and non-creature effect ratios.

use super::calculator::{describe_counts, ratio};
use crate::data::CardRecord;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Card-type categories tested via substring match on the type line.
/// Categories overlap; an "Artifact Creature" counts in both.
pub const CARD_TYPES: [&str; 5] = ["Creature", "Enchantment", "Instant", "Sorcery", "Artifact"];

/// The six color-identity filters: five colors plus the colorless sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFilter {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
}

impl ColorFilter {
    pub const ALL: [ColorFilter; 6] = [
        ColorFilter::White,
        ColorFilter::Blue,
        ColorFilter::Black,
        ColorFilter::Red,
        ColorFilter::Green,
        ColorFilter::Colorless,
    ];

    /// The symbol this filter looks for inside the serialized color identity.
    pub fn symbol(&self) -> char {
        match self {
            ColorFilter::White => 'W',
            ColorFilter::Blue => 'U',
            ColorFilter::Black => 'B',
            ColorFilter::Red => 'R',
            ColorFilter::Green => 'G',
            ColorFilter::Colorless => 'C',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorFilter::White => "white",
            ColorFilter::Blue => "blue",
            ColorFilter::Black => "black",
            ColorFilter::Red => "red",
            ColorFilter::Green => "green",
            ColorFilter::Colorless => "colorless",
        }
    }

    /// Containment, not set equality: a multicolor card matches each of its
    /// colors' filters.
    pub fn matches(&self, color_identity: &str) -> bool {
        color_identity.contains(self.symbol())
    }
}

/// One mana-value bucket of the creature curve: descriptive statistics of
/// per-set creature counts plus the display ratio.
#[derive(Debug, Clone, Serialize)]
pub struct CurveBucket {
    pub mana_value: f64,
    /// Number of sets with at least one creature at this mana value.
    pub sets: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
    /// Bucket mean divided by the sum of all bucket means for this color.
    pub count_ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeRatio {
    pub card_type: String,
    pub ratio: f64,
}

/// Everything one chart panel needs for a single color filter.
///
/// Every ratio with a zero denominator is NaN (see [`ratio`]); the renderer
/// prints those as `n/a`.
#[derive(Debug, Clone, Serialize)]
pub struct ColorSummary {
    pub color: ColorFilter,
    pub cards: usize,
    pub type_ratios: Vec<TypeRatio>,
    pub creature_ratio: f64,
    pub creature_evasion_ratio: f64,
    pub curve: Vec<CurveBucket>,
    pub noncreature_removal_ratio: f64,
    pub noncreature_combat_trick_ratio: f64,
}

/// Aggregate the table for one color filter.
pub fn summarize_color(cards: &[CardRecord], color: ColorFilter) -> ColorSummary {
    let slice: Vec<&CardRecord> = cards
        .iter()
        .filter(|c| color.matches(&c.color_identity))
        .collect();

    // Commons per set within the color slice; the denominator for every
    // type ratio.
    let mut commons_per_set: BTreeMap<&str, usize> = BTreeMap::new();
    for card in &slice {
        *commons_per_set.entry(card.set_name.as_str()).or_insert(0) += 1;
    }

    let type_ratios: Vec<TypeRatio> = CARD_TYPES
        .iter()
        .map(|&card_type| {
            let mut per_set: HashMap<&str, usize> = HashMap::new();
            for card in &slice {
                if card.type_line.contains(card_type) {
                    *per_set.entry(card.set_name.as_str()).or_insert(0) += 1;
                }
            }
            // Sets present in the slice but without the category contribute 0.
            let sum: f64 = commons_per_set
                .iter()
                .map(|(set, commons)| {
                    per_set.get(set).copied().unwrap_or(0) as f64 / *commons as f64
                })
                .sum();
            let mean = if commons_per_set.is_empty() {
                f64::NAN
            } else {
                sum / commons_per_set.len() as f64
            };
            TypeRatio {
                card_type: card_type.to_string(),
                ratio: mean,
            }
        })
        .collect();

    let creature_ratio = type_ratios
        .iter()
        .find(|t| t.card_type == "Creature")
        .map(|t| t.ratio)
        .unwrap_or(f64::NAN);

    let (creatures, noncreatures): (Vec<&CardRecord>, Vec<&CardRecord>) =
        slice.iter().copied().partition(|c| c.is_creature());

    // Observed (set, mana value) pairs only; a mana value absent from a set
    // does not contribute a zero sample to that bucket.
    let mut per_set_curve: HashMap<(&str, u64), usize> = HashMap::new();
    for card in &creatures {
        let key = (card.set_name.as_str(), card.mana_value.to_bits());
        *per_set_curve.entry(key).or_insert(0) += 1;
    }

    // Bit order equals numeric order for the non-negative mana values.
    let mut counts_by_value: BTreeMap<u64, Vec<f64>> = BTreeMap::new();
    for ((_, bits), count) in &per_set_curve {
        counts_by_value.entry(*bits).or_default().push(*count as f64);
    }

    let mut curve: Vec<CurveBucket> = counts_by_value
        .iter()
        .map(|(bits, counts)| {
            let stats = describe_counts(counts);
            CurveBucket {
                mana_value: f64::from_bits(*bits),
                sets: stats.count,
                mean: stats.mean,
                min: stats.min,
                max: stats.max,
                std: stats.std,
                count_ratio: f64::NAN,
            }
        })
        .collect();

    let mean_total: f64 = curve.iter().map(|b| b.mean).sum();
    if mean_total > 0.0 {
        for bucket in &mut curve {
            bucket.count_ratio = bucket.mean / mean_total;
        }
    }

    let creature_evasion_ratio = ratio(
        creatures.iter().filter(|c| c.evasion).count(),
        creatures.len(),
    );
    let noncreature_removal_ratio = ratio(
        noncreatures.iter().filter(|c| c.removal).count(),
        noncreatures.len(),
    );
    let noncreature_combat_trick_ratio = ratio(
        noncreatures.iter().filter(|c| c.combat_trick).count(),
        noncreatures.len(),
    );

    ColorSummary {
        color,
        cards: slice.len(),
        type_ratios,
        creature_ratio,
        creature_evasion_ratio,
        curve,
        noncreature_removal_ratio,
        noncreature_combat_trick_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{normalize_colors, TagRules};

    fn card(set_name: &str, color_identity: &str, type_line: &str, mana_value: f64) -> CardRecord {
        CardRecord {
            name: String::new(),
            set_name: set_name.to_string(),
            mana_value,
            type_line: type_line.to_string(),
            oracle_text: String::new(),
            keywords: String::new(),
            color_identity: color_identity.to_string(),
            evasion: false,
            removal: false,
            combat_trick: false,
        }
    }

    #[test]
    fn white_scenario_ratios() {
        let mut flyer = card("SET1", "[W]", "Creature", 2.0);
        flyer.keywords = "['Flying']".to_string();
        let mut bolt = card("SET1", "[W]", "Instant", 1.0);
        bolt.oracle_text = "Destroy target creature.".to_string();
        let trinket = card("SET1", "[]", "Artifact", 3.0);

        let mut cards = vec![flyer, bolt, trinket];
        normalize_colors(&mut cards);
        TagRules::default().tag_cards(&mut cards);

        let white = summarize_color(&cards, ColorFilter::White);
        assert_eq!(white.cards, 2);
        assert!((white.creature_ratio - 0.5).abs() < 1e-9);
        assert!((white.creature_evasion_ratio - 1.0).abs() < 1e-9);
        assert!((white.noncreature_removal_ratio - 1.0).abs() < 1e-9);
        assert!((white.noncreature_combat_trick_ratio).abs() < 1e-9);

        // The normalizer rewrote [] to [C], so the colorless filter sees the
        // artifact.
        let colorless = summarize_color(&cards, ColorFilter::Colorless);
        assert_eq!(colorless.cards, 1);
    }

    #[test]
    fn curve_ratios_sum_to_one() {
        let cards = vec![
            card("A", "[G]", "Creature", 1.0),
            card("A", "[G]", "Creature", 2.0),
            card("A", "[G]", "Creature", 2.0),
            card("B", "[G]", "Creature", 2.0),
            card("B", "[G]", "Creature", 3.0),
        ];
        let green = summarize_color(&cards, ColorFilter::Green);

        let total: f64 = green.curve.iter().map(|b| b.count_ratio).sum();
        assert!((total - 1.0).abs() < 1e-9);

        // Buckets come out sorted by mana value.
        let values: Vec<f64> = green.curve.iter().map(|b| b.mana_value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);

        // Two-drops: set A has 2, set B has 1.
        let two = green.curve.iter().find(|b| b.mana_value == 2.0).unwrap();
        assert_eq!(two.sets, 2);
        assert!((two.mean - 1.5).abs() < 1e-9);
        assert!((two.min - 1.0).abs() < 1e-9);
        assert!((two.max - 2.0).abs() < 1e-9);
    }

    #[test]
    fn multicolor_cards_count_under_each_color() {
        let cards = vec![card("A", "[U, W]", "Creature", 1.0)];
        assert_eq!(summarize_color(&cards, ColorFilter::White).cards, 1);
        assert_eq!(summarize_color(&cards, ColorFilter::Blue).cards, 1);
        assert_eq!(summarize_color(&cards, ColorFilter::Black).cards, 0);
    }

    #[test]
    fn artifact_creatures_count_in_both_categories() {
        let cards = vec![card("A", "[C]", "Artifact Creature", 2.0)];
        let summary = summarize_color(&cards, ColorFilter::Colorless);
        let get = |t: &str| {
            summary
                .type_ratios
                .iter()
                .find(|r| r.card_type == t)
                .unwrap()
                .ratio
        };
        assert!((get("Creature") - 1.0).abs() < 1e-9);
        assert!((get("Artifact") - 1.0).abs() < 1e-9);
        assert!((get("Instant")).abs() < 1e-9);
    }

    #[test]
    fn zero_denominators_yield_nan() {
        let cards = vec![card("A", "[R]", "Creature", 1.0)];

        // All red cards are creatures, so the non-creature ratios have no
        // denominator.
        let red = summarize_color(&cards, ColorFilter::Red);
        assert!(red.noncreature_removal_ratio.is_nan());
        assert!(red.noncreature_combat_trick_ratio.is_nan());

        // No black cards at all.
        let black = summarize_color(&cards, ColorFilter::Black);
        assert_eq!(black.cards, 0);
        assert!(black.creature_ratio.is_nan());
        assert!(black.creature_evasion_ratio.is_nan());
        assert!(black.curve.is_empty());
    }

    #[test]
    fn type_ratios_stay_within_unit_interval() {
        let cards = vec![
            card("A", "[B]", "Creature", 1.0),
            card("A", "[B]", "Sorcery", 2.0),
            card("B", "[B]", "Enchantment", 3.0),
            card("B", "[B]", "Creature", 2.0),
        ];
        let black = summarize_color(&cards, ColorFilter::Black);
        for tr in &black.type_ratios {
            assert!(tr.ratio >= 0.0 && tr.ratio <= 1.0, "{:?}", tr);
        }
    }
}
