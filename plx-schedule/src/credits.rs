//! Composer and publisher credit parsing
//!
//! A credit field holds comma-separated party entries of the form
//!
//! ```text
//! <name> (<pro>) <digits>% [<cae/ipi>]
//! ```
//!
//! e.g. `"Jane Doe (ASCAP) 50% [123-456-789], John Roe (BMI) 50% [987]"`.
//!
//! Composer and publisher fields tolerate malformed entries differently:
//! an unmatched composer entry is kept with its raw text as the name, while
//! an unmatched publisher entry is left out of the output.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Separator placed between parties in every joined output field
pub const PARTY_SEPARATOR: &str = " / ";

/// Entry grammar, anchored at the start of the trimmed segment
static CREDIT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?)\s*\((.*?)\)\s*([0-9]+)%\s*\[(.*?)\]").expect("credit pattern is valid")
});

/// One party parsed from a credit field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartyCredit {
    pub name: String,
    /// Share formatted as `"NN%"`, empty when unknown
    pub share: String,
    /// Performing rights organization, empty when unknown
    pub pro: String,
    /// CAE/IPI code, empty when unknown
    pub cae_ipi: String,
}

impl PartyCredit {
    /// Party carrying only a name (entry that did not match the grammar)
    pub fn unparsed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// `"{name} ({share})"`, or the bare name when the share is unknown
    pub fn display(&self) -> String {
        if self.share.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.share)
        }
    }
}

/// Match one entry against the credit grammar.
///
/// Returns `None` when the entry does not follow the grammar; callers decide
/// whether to keep or drop it.
pub fn match_credit(segment: &str) -> Option<PartyCredit> {
    let captures = CREDIT_PATTERN.captures(segment.trim())?;
    let group = |i: usize| captures.get(i).map_or("", |m| m.as_str());

    Some(PartyCredit {
        name: group(1).to_string(),
        pro: group(2).to_string(),
        share: format!("{}%", group(3)),
        cae_ipi: group(4).trim().to_string(),
    })
}

/// Non-blank text of a credit field, `None` for absent or blank fields
fn non_blank(field: Option<&str>) -> Option<&str> {
    field.filter(|f| !f.trim().is_empty())
}

/// Parse every entry of a credit field, keeping unmatched entries.
///
/// Unmatched entries come back as [`PartyCredit::unparsed`] with the trimmed
/// entry text as their name, so the result always has one party per
/// comma-separated entry.
pub fn parse_credits(field: &str) -> Vec<PartyCredit> {
    if field.trim().is_empty() {
        return Vec::new();
    }

    field
        .split(',')
        .map(|segment| {
            let segment = segment.trim();
            match_credit(segment).unwrap_or_else(|| {
                debug!(entry = %segment, "Credit entry does not match grammar, keeping raw text");
                PartyCredit::unparsed(segment)
            })
        })
        .collect()
}

/// Joined composer output columns
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposerCredits {
    /// `"{name} ({share})"` per party
    pub composers: String,
    /// CAE/IPI code per party
    pub cae_ipis: String,
    /// PRO per party
    pub pros: String,
}

/// Parse a composer field into its three joined output columns.
///
/// `None` stands for a cell that is not text at all (blank or numeric).
/// Every party occupies a slot in all three columns, so a party without a
/// code still produces its separator in `cae_ipis`.
///
/// # Examples
///
/// ```
/// use plx_schedule::credits::parse_composers;
///
/// let credits = parse_composers(Some("Jane Doe (ASCAP) 50% [123-456-789], Bob"));
/// assert_eq!(credits.composers, "Jane Doe (50%) / Bob");
/// assert_eq!(credits.cae_ipis, "123-456-789 / ");
/// assert_eq!(credits.pros, "ASCAP / ");
/// ```
pub fn parse_composers(field: Option<&str>) -> ComposerCredits {
    let Some(field) = non_blank(field) else {
        return ComposerCredits::default();
    };

    let parties = parse_credits(field);
    let join = |f: fn(&PartyCredit) -> String| {
        parties.iter().map(f).collect::<Vec<_>>().join(PARTY_SEPARATOR)
    };

    ComposerCredits {
        composers: join(PartyCredit::display),
        cae_ipis: join(|p: &PartyCredit| p.cae_ipi.clone()),
        pros: join(|p: &PartyCredit| p.pro.clone()),
    }
}

/// Parse a publisher field into its joined display column.
///
/// Only entries that match the grammar are included.
pub fn parse_publishers(field: Option<&str>) -> String {
    let Some(field) = non_blank(field) else {
        return String::new();
    };

    field
        .split(',')
        .filter_map(|segment| {
            let parsed = match_credit(segment);
            if parsed.is_none() {
                debug!(entry = %segment.trim(), "Publisher entry does not match grammar, skipping");
            }
            parsed
        })
        .map(|p| p.display())
        .collect::<Vec<_>>()
        .join(PARTY_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_full_grammar() {
        let party = match_credit("Jane Doe (ASCAP) 50% [123-456-789]").unwrap();
        assert_eq!(party.name, "Jane Doe");
        assert_eq!(party.pro, "ASCAP");
        assert_eq!(party.share, "50%");
        assert_eq!(party.cae_ipi, "123-456-789");
    }

    #[test]
    fn test_match_without_optional_whitespace() {
        let party = match_credit("Jane Doe(PRS)100%[ 00123 ]").unwrap();
        assert_eq!(party.name, "Jane Doe");
        assert_eq!(party.pro, "PRS");
        assert_eq!(party.share, "100%");
        assert_eq!(party.cae_ipi, "00123");
    }

    #[test]
    fn test_match_ignores_trailing_text() {
        let party = match_credit("  Jane Doe (ASCAP) 50% [1] extra ").unwrap();
        assert_eq!(party.cae_ipi, "1");
    }

    #[test]
    fn test_match_failures() {
        assert_eq!(match_credit("Jane Doe"), None);
        assert_eq!(match_credit("Jane Doe (ASCAP)"), None);
        assert_eq!(match_credit("Jane Doe (ASCAP) fifty% [1]"), None);
        assert_eq!(match_credit("Jane Doe (ASCAP) 50% 123"), None);
        assert_eq!(match_credit(""), None);
    }

    #[test]
    fn test_composers_empty_and_absent() {
        assert_eq!(parse_composers(Some("")), ComposerCredits::default());
        assert_eq!(parse_composers(Some("   ")), ComposerCredits::default());
        assert_eq!(parse_composers(None), ComposerCredits::default());
    }

    #[test]
    fn test_composers_fallback_keeps_entry() {
        let credits = parse_composers(Some("Jane Doe"));
        assert_eq!(credits.composers, "Jane Doe");
        assert_eq!(credits.cae_ipis, "");
        assert_eq!(credits.pros, "");
    }

    #[test]
    fn test_composers_single_match() {
        let credits = parse_composers(Some("Jane Doe (ASCAP) 50% [123-456-789]"));
        assert_eq!(credits.composers, "Jane Doe (50%)");
        assert_eq!(credits.cae_ipis, "123-456-789");
        assert_eq!(credits.pros, "ASCAP");
    }

    #[test]
    fn test_composers_multi_party_join_in_order() {
        let credits = parse_composers(Some(
            "Jane Doe (ASCAP) 50% [111], John Roe (BMI) 50% [222]",
        ));
        assert_eq!(credits.composers, "Jane Doe (50%) / John Roe (50%)");
        assert_eq!(credits.cae_ipis, "111 / 222");
        assert_eq!(credits.pros, "ASCAP / BMI");
    }

    #[test]
    fn test_composers_mixed_keeps_slot_positions() {
        let credits = parse_composers(Some("Anon, Jane Doe (ASCAP) 50% [111]"));
        assert_eq!(credits.composers, "Anon / Jane Doe (50%)");
        assert_eq!(credits.cae_ipis, " / 111");
        assert_eq!(credits.pros, " / ASCAP");
    }

    #[test]
    fn test_parse_credits_one_party_per_entry() {
        let parties = parse_credits("A (PRS) 10% [1], B,  ");
        assert_eq!(parties.len(), 3);
        assert_eq!(parties[1], PartyCredit::unparsed("B"));
        assert_eq!(parties[2], PartyCredit::unparsed(""));
        assert!(parse_credits(" ").is_empty());
    }

    #[test]
    fn test_publishers_skip_unmatched() {
        let publishers = parse_publishers(Some(
            "Big Music (ASCAP) 50% [9], Unknown Publisher, Small Music (BMI) 50% [8]",
        ));
        assert_eq!(publishers, "Big Music (50%) / Small Music (50%)");
    }

    #[test]
    fn test_publishers_empty_and_absent() {
        assert_eq!(parse_publishers(None), "");
        assert_eq!(parse_publishers(Some(" ")), "");
        assert_eq!(parse_publishers(Some("nobody")), "");
    }

    #[test]
    fn test_display() {
        let party = PartyCredit {
            name: "Jane".to_string(),
            share: "25%".to_string(),
            ..PartyCredit::default()
        };
        assert_eq!(party.display(), "Jane (25%)");
        assert_eq!(PartyCredit::unparsed("Jane").display(), "Jane");
    }
}
