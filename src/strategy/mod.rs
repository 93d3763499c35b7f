pub mod apply;
pub mod normalize;

pub use apply::{apply_strategies, collect_suggestions, AppliedMenu, ChangeLedger, ItemChange};
pub use normalize::{normalize_strategies, RawStrategy};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One proposed menu-profitability intervention, as a closed sum type.
///
/// The upstream LLM emits loosely-tagged JSON objects; `normalize` is the
/// single site converting those into this enum. Every variant carries a
/// stable `id` used as the toggle key and as the basis for synthetic item ids.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Strategy {
    /// Always synthesizes a new item in "Extras & Sides"; never mutates an
    /// existing item, so `applies_to` is empty by construction.
    AddExtra {
        id: String,
        label: String,
        applies_to: Vec<String>,
        extra_name: String,
        extra_price: f64,
    },
    /// Synthesizes a new item in "Combos" bundling the listed item ids.
    BundleCombo {
        id: String,
        label: String,
        items: Vec<String>,
        bundle_title: String,
        bundle_price: f64,
    },
    /// Adjusts an existing item's price by `pct` percent.
    Reprice {
        id: String,
        label: String,
        applies_to: Vec<String>,
        pct: f64,
    },
    /// Retitles existing items per `rename_map` (item id -> new title).
    Rename {
        id: String,
        label: String,
        applies_to: Vec<String>,
        rename_map: HashMap<String, String>,
    },
    /// Freeform advice with no menu mutation; surfaced as a banner.
    ReframeSuggestion {
        id: String,
        label: String,
        suggestion_text: String,
    },
}

impl Strategy {
    pub fn id(&self) -> &str {
        match self {
            Strategy::AddExtra { id, .. }
            | Strategy::BundleCombo { id, .. }
            | Strategy::Reprice { id, .. }
            | Strategy::Rename { id, .. }
            | Strategy::ReframeSuggestion { id, .. } => id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Strategy::AddExtra { label, .. }
            | Strategy::BundleCombo { label, .. }
            | Strategy::Reprice { label, .. }
            | Strategy::Rename { label, .. }
            | Strategy::ReframeSuggestion { label, .. } => label,
        }
    }
}
