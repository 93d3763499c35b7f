use serde::Serialize;
use std::collections::HashMap;

use crate::menu::MenuItem;
use crate::strategy::normalize::format_pct;
use crate::strategy::Strategy;

pub const EXTRAS_CATEGORY: &str = "Extras & Sides";
pub const COMBOS_CATEGORY: &str = "Combos";

/// What happened to one item during strategy application: an accumulated
/// price delta (summed across strategies) and descriptive badges, in
/// application order.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct ItemChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_delta: Option<f64>,
    pub badges: Vec<String>,
}

/// Item id -> change record. Entries exist only for touched items; untouched
/// items are simply absent.
pub type ChangeLedger = HashMap<String, ItemChange>;

#[derive(Debug, Serialize, Clone)]
pub struct AppliedMenu {
    pub updated: Vec<MenuItem>,
    pub changes: ChangeLedger,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Fold the enabled strategies left-to-right over a cloned menu snapshot.
///
/// Pure function: callers re-run it on every toggle change and must get the
/// same result for the same inputs. Unresolved references (a strategy naming
/// an item absent from the working array, or a missing rename_map entry)
/// degrade to a per-strategy no-op; a stale or malformed strategy never
/// aborts the fold. No variant removes items, so the updated menu is never
/// shorter than the base.
pub fn apply_strategies(base: &[MenuItem], enabled: &[Strategy]) -> AppliedMenu {
    let mut working: Vec<MenuItem> = base.to_vec();
    let mut changes: ChangeLedger = HashMap::new();

    for strategy in enabled {
        match strategy {
            Strategy::AddExtra {
                id, extra_name, ..
            } => {
                let item_id = format!("extra_{}", id);
                working.push(MenuItem {
                    id: item_id.clone(),
                    title: extra_name.clone(),
                    price: 0.0,
                    category: EXTRAS_CATEGORY.to_string(),
                    ingredients: None,
                });
                changes.entry(item_id).or_default();
            }
            Strategy::BundleCombo {
                id, bundle_title, ..
            } => {
                let item_id = format!("combo_{}", id);
                working.push(MenuItem {
                    id: item_id.clone(),
                    title: bundle_title.clone(),
                    price: 0.0,
                    category: COMBOS_CATEGORY.to_string(),
                    ingredients: None,
                });
                changes.entry(item_id).or_default();
            }
            Strategy::Reprice {
                applies_to, pct, ..
            } => {
                if *pct == 0.0 {
                    continue;
                }
                let Some(target_id) = applies_to.first() else {
                    continue;
                };
                // Looked up in the working array so earlier strategies'
                // mutations are visible.
                let Some(item) = working.iter_mut().find(|it| &it.id == target_id) else {
                    continue;
                };
                let delta = round2(item.price * pct / 100.0);
                item.price = round2(item.price + delta);
                let entry = changes.entry(target_id.clone()).or_default();
                entry.price_delta = Some(round2(entry.price_delta.unwrap_or(0.0) + delta));
                entry.badges.push(format!("{} price", format_pct(*pct)));
            }
            Strategy::Rename {
                applies_to,
                rename_map,
                ..
            } => {
                let Some(target_id) = applies_to.first() else {
                    continue;
                };
                let Some(new_title) = rename_map.get(target_id) else {
                    continue;
                };
                let Some(item) = working.iter_mut().find(|it| &it.id == target_id) else {
                    continue;
                };
                if &item.title == new_title {
                    continue;
                }
                item.title = new_title.clone();
                changes
                    .entry(target_id.clone())
                    .or_default()
                    .badges
                    .push("Renamed".to_string());
            }
            Strategy::ReframeSuggestion { .. } => {}
        }
    }

    AppliedMenu { updated: working, changes }
}

/// Gather the texts of all active freeform suggestions for banner display.
pub fn collect_suggestions(enabled: &[Strategy]) -> Vec<String> {
    enabled
        .iter()
        .filter_map(|s| match s {
            Strategy::ReframeSuggestion { suggestion_text, .. } if !suggestion_text.is_empty() => {
                Some(suggestion_text.clone())
            }
            _ => None,
        })
        .collect()
}
