//! Track version classification
//!
//! Every version label falls into one tier; versions of the same track are
//! ordered by tier first, then by a tier-specific subkey.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Reverse;

static TIMED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\s*second").expect("timed version pattern is valid"));

/// Coarse version bucket, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionTier {
    /// Canonical full-length version ("Full")
    Full = 0,
    /// Version without an element ("No Drums")
    Without = 1,
    /// Timed cut-down ("30 second")
    Timed = 2,
    /// Stem ("Stem Mix")
    Stem = 3,
    /// Anything else ("Instrumental")
    Other = 4,
}

/// Tie-breaker within a tier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionSubkey {
    None,
    /// Lowercased version label, compared lexicographically
    Label(String),
    /// Duration in seconds; longer durations sort first
    Seconds(Reverse<u64>),
}

/// Sort rank of a version label
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionRank {
    pub tier: VersionTier,
    pub subkey: VersionSubkey,
}

impl VersionRank {
    /// Classify a version label.
    ///
    /// # Examples
    ///
    /// ```
    /// use plx_schedule::version::{VersionRank, VersionTier};
    ///
    /// assert_eq!(VersionRank::classify("Full").tier, VersionTier::Full);
    /// assert_eq!(VersionRank::classify("No Drums").tier, VersionTier::Without);
    /// assert!(VersionRank::classify("30 second") < VersionRank::classify("15 second"));
    /// ```
    pub fn classify(version: &str) -> Self {
        let label = version.trim().to_lowercase();

        if label.contains("full") {
            return Self {
                tier: VersionTier::Full,
                subkey: VersionSubkey::None,
            };
        }

        if label.starts_with("no ") {
            return Self {
                tier: VersionTier::Without,
                subkey: VersionSubkey::Label(label),
            };
        }

        if let Some(captures) = TIMED_PATTERN.captures(&label) {
            // Digit runs too long for u64 are longer than any real duration
            let seconds = captures[1].parse::<u64>().unwrap_or(u64::MAX);
            return Self {
                tier: VersionTier::Timed,
                subkey: VersionSubkey::Seconds(Reverse(seconds)),
            };
        }

        let tier = if label.contains("stem") {
            VersionTier::Stem
        } else {
            VersionTier::Other
        };
        Self {
            tier,
            subkey: VersionSubkey::Label(label),
        }
    }

    /// Whether this is the canonical full version
    pub fn is_full(&self) -> bool {
        self.tier == VersionTier::Full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers() {
        assert_eq!(VersionRank::classify("Full").tier, VersionTier::Full);
        assert_eq!(VersionRank::classify("FULL MIX").tier, VersionTier::Full);
        assert_eq!(VersionRank::classify("Full Length").tier, VersionTier::Full);
        assert_eq!(VersionRank::classify("No Drums").tier, VersionTier::Without);
        assert_eq!(VersionRank::classify("no vox").tier, VersionTier::Without);
        assert_eq!(VersionRank::classify("30 second").tier, VersionTier::Timed);
        assert_eq!(VersionRank::classify("15seconds").tier, VersionTier::Timed);
        assert_eq!(VersionRank::classify("Stem Mix").tier, VersionTier::Stem);
        assert_eq!(VersionRank::classify("Drum STEM").tier, VersionTier::Stem);
        assert_eq!(VersionRank::classify("Instrumental").tier, VersionTier::Other);
        assert_eq!(VersionRank::classify("").tier, VersionTier::Other);
    }

    #[test]
    fn test_full_wins_over_other_markers() {
        assert!(VersionRank::classify("No Drums Full").is_full());
        assert!(VersionRank::classify("Full Stem").is_full());
    }

    #[test]
    fn test_no_prefix_requires_space() {
        assert_eq!(VersionRank::classify("Nocturne").tier, VersionTier::Other);
    }

    #[test]
    fn test_timed_must_start_with_digits() {
        assert_eq!(VersionRank::classify("Alt 30 second").tier, VersionTier::Other);
        assert_eq!(VersionRank::classify("60 sec").tier, VersionTier::Other);
    }

    #[test]
    fn test_total_order() {
        let labels = ["Instrumental", "15 second", "Stem Mix", "Full", "30 second", "No Drums"];
        let mut ranked: Vec<_> = labels.iter().map(|l| (VersionRank::classify(l), *l)).collect();
        ranked.sort();
        let ordered: Vec<_> = ranked.into_iter().map(|(_, l)| l).collect();

        assert_eq!(
            ordered,
            vec!["Full", "No Drums", "30 second", "15 second", "Stem Mix", "Instrumental"]
        );
    }

    #[test]
    fn test_longer_duration_first() {
        assert!(VersionRank::classify("60 second") < VersionRank::classify("30 second"));
        assert!(VersionRank::classify("120 second") < VersionRank::classify("60 second"));
        assert!(
            VersionRank::classify("99999999999999999999999 second")
                < VersionRank::classify("60 second")
        );
    }

    #[test]
    fn test_labels_compare_case_insensitively() {
        assert_eq!(VersionRank::classify("No Bass"), VersionRank::classify("no bass"));
        assert!(VersionRank::classify("No Bass") < VersionRank::classify("No Drums"));
        assert!(VersionRank::classify("Alt Mix") < VersionRank::classify("Instrumental"));
    }
}
