//! Feature Tagger Module
//! Converts free-text card fields into boolean effect-category flags.
//!
//! The three flags are independent: a card can be evasive removal, a combat
//! trick that removes, all three, or none. Matching is any-pattern-matches
//! over lowercased oracle text.

use crate::data::CardRecord;
use regex::Regex;

/// Keyword abilities that help a creature avoid being blocked.
pub const EVASION_KEYWORDS: [&str; 12] = [
    "Flying",
    "Trample",
    "Menace",
    "Plainswalk",
    "Islandwalk",
    "Forestwalk",
    "Mountainwalk",
    "Swampwalk",
    "Skulk",
    "Shadow",
    "Fear",
    "Intimidate",
];

/// A match pattern with an optional veto.
///
/// The rule fires iff `matcher` hits and `veto` (when present) does not.
/// Vetoes stand in for negative lookaheads, which the `regex` crate does not
/// support.
pub struct TextPattern {
    matcher: Regex,
    veto: Option<Regex>,
}

impl TextPattern {
    fn new(pattern: &str, veto: Option<&str>) -> Self {
        Self {
            matcher: Regex::new(pattern).expect("invalid built-in pattern"),
            veto: veto.map(|v| Regex::new(v).expect("invalid built-in veto pattern")),
        }
    }

    fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text) && !self.veto.as_ref().map_or(false, |v| v.is_match(text))
    }
}

/// Classification rules: the evasion keyword list plus the removal and
/// combat-trick pattern lists. Constructed once and passed in; the rules are
/// data, not ambient state.
pub struct TagRules {
    evasion_keywords: Vec<&'static str>,
    removal: Vec<TextPattern>,
    combat_tricks: Vec<TextPattern>,
}

impl Default for TagRules {
    fn default() -> Self {
        let removal = vec![
            // white removal
            TextPattern::new(
                r"enchanted (creature|permanent) can't attack",
                Some(r"enchanted (creature|permanent) can't attack until end of turn"),
            ),
            TextPattern::new(r"exile target", Some(r"exile target card")),
            // blue removal
            TextPattern::new(r"enchanted creature doesn't untap", None),
            TextPattern::new(
                r"return target (creature|nonland permanent) to its owner's hand",
                None,
            ),
            TextPattern::new(r"put target (creature|permanent)", None),
            TextPattern::new(r"counter target .*spell", None),
            // black removal
            TextPattern::new(r"destroy target (creature|permanent)", None),
            TextPattern::new(r"target (player|opponent) sacrifice", None),
            TextPattern::new(r"[+-][0-9]+/-[0-9]+ until end of turn", None),
            // red removal
            TextPattern::new(r"deals [0-9]+ damage", None),
            // green removal
            TextPattern::new(r"deals damage equal", None),
            TextPattern::new(r"target creature .*controls? fight", None),
        ];

        let combat_tricks = vec![
            TextPattern::new(r"target creature .*gets [+-][0-9]+/[+-][0-9]+", None),
            TextPattern::new(r"tap target creature", None),
            TextPattern::new(r"tap up to (two|three|four) target creature", None),
            TextPattern::new(r"target creature can't block this turn", None),
            TextPattern::new(r"creatures can't block", None),
            TextPattern::new(r"target creature blocks this turn if able", None),
            TextPattern::new(r"target creature gains .*until end of turn", None),
            TextPattern::new(r"\+1/\+1 counters? on target creature", None),
            TextPattern::new(r"untap target creature", None),
            TextPattern::new(r"creatures you control .*until end of turn", None),
        ];

        Self {
            evasion_keywords: EVASION_KEYWORDS.to_vec(),
            removal,
            combat_tricks,
        }
    }
}

impl TagRules {
    /// True iff the serialized keyword list names at least one evasion ability.
    pub fn has_evasion(&self, keywords: &str) -> bool {
        self.evasion_keywords.iter().any(|kw| keywords.contains(kw))
    }

    /// True iff the lowercased rules text matches any removal pattern.
    pub fn is_removal(&self, oracle_text: &str) -> bool {
        let text = oracle_text.to_lowercase();
        self.removal.iter().any(|p| p.is_match(&text))
    }

    /// True iff the lowercased rules text matches any combat-trick pattern.
    pub fn is_combat_trick(&self, oracle_text: &str) -> bool {
        let text = oracle_text.to_lowercase();
        self.combat_tricks.iter().any(|p| p.is_match(&text))
    }

    /// Fill in all three flags for every record. Identifying fields are left
    /// untouched.
    pub fn tag_cards(&self, cards: &mut [CardRecord]) {
        for card in cards {
            card.evasion = self.has_evasion(&card.keywords);
            card.removal = self.is_removal(&card.oracle_text);
            card.combat_trick = self.is_combat_trick(&card.oracle_text);
        }
    }
}

/// Rewrite the empty color-identity marker `[]` to the colorless sentinel
/// `[C]`. Idempotent; non-empty identities pass through unchanged.
pub fn normalize_color_identity(color_identity: &str) -> String {
    color_identity.replace("[]", "[C]")
}

/// Apply the color-identity normalizer to the whole table.
pub fn normalize_colors(cards: &mut [CardRecord]) {
    for card in cards {
        card.color_identity = normalize_color_identity(&card.color_identity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evasion_requires_a_listed_keyword() {
        let rules = TagRules::default();
        assert!(rules.has_evasion("['Flying']"));
        assert!(rules.has_evasion("['Haste', 'Trample']"));
        assert!(!rules.has_evasion("['Haste']"));
        assert!(!rules.has_evasion("[]"));
        assert!(!rules.has_evasion(""));
    }

    #[test]
    fn destroy_effects_are_removal() {
        let rules = TagRules::default();
        assert!(rules.is_removal("Destroy target creature."));
        assert!(rules.is_removal("Destroy target permanent with mana value 3 or less."));
        assert!(!rules.is_removal("Destroy all artifacts."));
    }

    #[test]
    fn exile_veto_spares_graveyard_effects() {
        let rules = TagRules::default();
        assert!(rules.is_removal("Exile target creature."));
        assert!(!rules.is_removal("Exile target card from a graveyard."));
    }

    #[test]
    fn pacifism_veto_spares_temporary_effects() {
        let rules = TagRules::default();
        assert!(rules.is_removal("Enchanted creature can't attack or block."));
        assert!(!rules.is_removal("Enchanted creature can't attack until end of turn."));
    }

    #[test]
    fn counterspells_and_burn_are_removal() {
        let rules = TagRules::default();
        assert!(rules.is_removal("Counter target spell."));
        assert!(rules.is_removal("Counter target noncreature spell."));
        assert!(rules.is_removal("Lightning Strike deals 3 damage to any target."));
        assert!(rules.is_removal("It deals damage equal to its power to target creature."));
    }

    #[test]
    fn stat_pumps_are_combat_tricks() {
        let rules = TagRules::default();
        assert!(rules.is_combat_trick("Target creature gets +1/+1 until end of turn."));
        assert!(rules.is_combat_trick("Target creature you control gets +2/-1."));
        assert!(rules.is_combat_trick("Untap target creature."));
        assert!(rules.is_combat_trick("Put two +1/+1 counters on target creature."));
        assert!(!rules.is_combat_trick("Draw two cards."));
    }

    #[test]
    fn empty_text_matches_nothing() {
        let rules = TagRules::default();
        assert!(!rules.is_removal(""));
        assert!(!rules.is_combat_trick(""));
    }

    #[test]
    fn flags_are_independent() {
        // A card can be both removal and a combat trick.
        let rules = TagRules::default();
        let text = "Target creature gets -2/-2 until end of turn.";
        assert!(rules.is_removal(text));
        assert!(rules.is_combat_trick(text));
    }

    #[test]
    fn color_normalization_is_idempotent() {
        assert_eq!(normalize_color_identity("[]"), "[C]");
        assert_eq!(normalize_color_identity(&normalize_color_identity("[]")), "[C]");
        assert_eq!(normalize_color_identity("[W]"), "[W]");
        assert_eq!(normalize_color_identity("[W, U]"), "[W, U]");
    }
}
