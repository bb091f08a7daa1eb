//! Fixed registration rule tables.
//!
//! Read-only data; the evaluator owns one `RegistrationPolicy` and never mutates it.

/// Employers whose staff pass the credential bar outright. Exact, case-sensitive match.
pub const PREFERRED_EMPLOYERS: &[&str] = &["Microsoft", "Google", "Fog Creek Software", "37Signals"];

/// Email domains that disqualify a speaker who misses the credential bar.
/// Matched case-sensitively against the text after the last '@'.
pub const RESTRICTED_DOMAINS: &[&str] = &["aol.com", "hotmail.com", "prodigy.com", "CompuServe.com"];

/// Session topics we do not accept. Scanned in this order.
pub const LEGACY_TECHNOLOGIES: &[&str] = &["Cobol", "Punch Cards", "Commodore", "VBScript"];

/// Internet Explorer below this major version counts as a legacy browser.
pub const MIN_IE_MAJOR_VERSION: i32 = 9;

pub const FEE_TIERS: &[FeeTier] = &[
    FeeTier::new(0, 1, 500),
    FeeTier::new(2, 3, 250),
    FeeTier::new(4, 5, 100),
    FeeTier::new(6, 9, 50),
];

/// Inclusive experience range and the fee charged for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeTier {
    pub min_years: i32,
    pub max_years: i32,
    pub fee: i32,
}

impl FeeTier {
    pub const fn new(min_years: i32, max_years: i32, fee: i32) -> Self {
        Self {
            min_years,
            max_years,
            fee,
        }
    }

    pub fn contains(&self, years: i32) -> bool {
        self.min_years <= years && years <= self.max_years
    }
}

/// Rule tables consulted by the registration evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationPolicy {
    pub preferred_employers: &'static [&'static str],
    pub restricted_domains: &'static [&'static str],
    pub legacy_technologies: &'static [&'static str],
    pub min_ie_major_version: i32,
    pub fee_tiers: &'static [FeeTier],
}

impl RegistrationPolicy {
    pub const fn standard() -> Self {
        Self {
            preferred_employers: PREFERRED_EMPLOYERS,
            restricted_domains: RESTRICTED_DOMAINS,
            legacy_technologies: LEGACY_TECHNOLOGIES,
            min_ie_major_version: MIN_IE_MAJOR_VERSION,
            fee_tiers: FEE_TIERS,
        }
    }

    /// Fee of the first tier containing `years`. `None` when no tier matches or years is absent.
    pub fn fee_for(&self, years: Option<i32>) -> Option<i32> {
        let years = years?;
        self.fee_tiers
            .iter()
            .find(|tier| tier.contains(years))
            .map(|tier| tier.fee)
    }
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
