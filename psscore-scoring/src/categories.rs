//! Category labels and the fixed weight each contributes to a priority score.

use std::fmt::{self, Display};

///
/// Labels assigned by the three classifiers.
///
/// - splice impact: `S4`..=`S11`
/// - clinical concordance: `S1`, `S2`, `UpperS2`, `S3`, `S15`
/// - canonical recalibration: `S12`, `S13`, `S14`, `S0`
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    S0,
    S1,
    S2,
    /// The literal `S2`, emitted when same-motif calls only match a lowercase
    /// `pathogenic`. It is distinct from `s2` and carries no weight.
    UpperS2,
    S3,
    S4,
    S5,
    S6,
    S7,
    S8,
    S9,
    S10,
    S11,
    S12,
    S13,
    S14,
    S15,
}

impl Category {
    ///
    /// Signed contribution of this category to the priority score.
    ///
    /// `None` only for [Category::UpperS2].
    ///
    pub fn weight(&self) -> Option<i32> {
        let weight = match self {
            Category::S1 => 9,
            Category::S2 => 6,
            Category::S3 => 0,
            Category::S4 => -5,
            Category::S5 => -3,
            Category::S6 => 0,
            Category::S7 => 2,
            Category::S8 => 3,
            Category::S9 => 2,
            Category::S10 => 4,
            Category::S11 => 2,
            Category::S12 => -1,
            Category::S13 => 0,
            Category::S14 => 1,
            Category::S15 => -5,
            Category::S0 => 0,
            Category::UpperS2 => return None,
        };
        Some(weight)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::S0 => "s0",
            Category::S1 => "s1",
            Category::S2 => "s2",
            Category::UpperS2 => "S2",
            Category::S3 => "s3",
            Category::S4 => "s4",
            Category::S5 => "s5",
            Category::S6 => "s6",
            Category::S7 => "s7",
            Category::S8 => "s8",
            Category::S9 => "s9",
            Category::S10 => "s10",
            Category::S11 => "s11",
            Category::S12 => "s12",
            Category::S13 => "s13",
            Category::S14 => "s14",
            Category::S15 => "s15",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
