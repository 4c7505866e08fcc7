//! Best-effort classification of free-text disposal methods into a fixed
//! taxonomy.
//!
//! The dataset's disposal column is free text (with both English and
//! accented French spellings observed), so matching is case-insensitive
//! substring with a fixed precedence: recycling, then landfill, then
//! incineration, then compost, else other.

use serde::Serialize;

/// Fixed disposal category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DisposalCategory {
    Recycling,
    Landfill,
    Incineration,
    Compost,
    Other,
}

impl DisposalCategory {
    /// All categories, in taxonomy precedence order.
    pub const ALL: [DisposalCategory; 5] = [
        DisposalCategory::Recycling,
        DisposalCategory::Landfill,
        DisposalCategory::Incineration,
        DisposalCategory::Compost,
        DisposalCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DisposalCategory::Recycling => "Recycling",
            DisposalCategory::Landfill => "Landfill",
            DisposalCategory::Incineration => "Incineration",
            DisposalCategory::Compost => "Compost",
            DisposalCategory::Other => "Other",
        }
    }
}

const RECYCLING_KEYWORDS: &[&str] = &["recycl"];
const LANDFILL_KEYWORDS: &[&str] = &["landfill", "décharge", "decharge", "dump", "depos"];
const INCINERATION_KEYWORDS: &[&str] = &["incin", "incinér"];
const COMPOST_KEYWORDS: &[&str] = &["compost"];

/// Classifies a free-text disposal method.
///
/// Empty or unrecognized text maps to [`DisposalCategory::Other`].
pub fn classify(method: &str) -> DisposalCategory {
    let t = method.to_lowercase();
    if t.is_empty() {
        return DisposalCategory::Other;
    }

    let matches = |keys: &[&str]| keys.iter().any(|k| t.contains(k));

    if matches(RECYCLING_KEYWORDS) {
        DisposalCategory::Recycling
    } else if matches(LANDFILL_KEYWORDS) {
        DisposalCategory::Landfill
    } else if matches(INCINERATION_KEYWORDS) {
        DisposalCategory::Incineration
    } else if matches(COMPOST_KEYWORDS) {
        DisposalCategory::Compost
    } else {
        DisposalCategory::Other
    }
}
