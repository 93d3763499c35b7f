use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// One sellable line on a restaurant menu.
///
/// A price of `0.0` means the price is communicated via instruction text only
/// (synthesized extra/combo lines use this).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
}

/// Upstream extraction shape, as produced by the LLM extractor or the
/// fallback scanner. Prices arrive as display strings like "$12.99".
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawMenuItem {
    #[serde(default)]
    pub dish_title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
}

/// Result of menu extraction, whether from the LLM pass or the fallback
/// scanner.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedMenu {
    #[serde(default)]
    pub items: Vec<RawMenuItem>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub total_items: usize,
}

/// Strip everything that is not a digit or a dot, then parse.
/// Unparseable or missing prices default to 0.0.
pub fn parse_price(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().unwrap_or(0.0)
}

impl MenuItem {
    /// Build a menu item from the upstream shape. `index` provides the stable
    /// id (`item_<index>`) for this snapshot.
    pub fn from_raw(raw: &RawMenuItem, index: usize) -> Self {
        let title = raw
            .dish_title
            .as_deref()
            .or(raw.name.as_deref())
            .unwrap_or("")
            .trim()
            .to_string();
        MenuItem {
            id: format!("item_{}", index),
            title,
            price: raw.price.as_deref().map(parse_price).unwrap_or(0.0),
            category: raw
                .category
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(DEFAULT_CATEGORY)
                .trim()
                .to_string(),
            ingredients: raw.ingredients.clone().filter(|v| !v.is_empty()),
        }
    }
}

/// Snapshot-wide conversion, preserving upstream order so ids are stable
/// across re-runs over the same extraction output.
pub fn menu_from_raw(raw_items: &[RawMenuItem]) -> Vec<MenuItem> {
    raw_items
        .iter()
        .enumerate()
        .map(|(i, raw)| MenuItem::from_raw(raw, i))
        .collect()
}
