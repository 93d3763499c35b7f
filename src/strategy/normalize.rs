use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::menu::MenuItem;
use crate::strategy::Strategy;

/// Loosely-typed strategy descriptor as emitted by the strategy-generation
/// LLM pass. Every field except `dish` is optional on the wire.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawStrategy {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub dish: String,
    #[serde(default)]
    pub action_instruction: Option<String>,
    #[serde(default)]
    pub new_price: Option<f64>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub rationale: Option<String>,
}

static RENAME_QUOTED_SINGLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bto\s+'([^']+)'").unwrap());
static RENAME_QUOTED_DOUBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bto\s+"([^"]+)""#).unwrap());
static RENAME_BARE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bto\s+(.+)$").unwrap());

/// Case-insensitive substring match of `dish` against item titles; first
/// match wins. `None` when nothing matches (never a sentinel id).
pub fn resolve_dish(dish: &str, menu: &[MenuItem]) -> Option<String> {
    let needle = dish.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    menu.iter()
        .find(|item| item.title.to_lowercase().contains(&needle))
        .map(|item| item.id.clone())
}

/// Pull the new dish name out of a free-text instruction like
/// `Rename 'Fries' to 'Golden Hand-Cut Fries'`. First matching pattern wins;
/// the caller falls back to the original dish name when none match.
fn extract_new_name(instruction: &str) -> Option<String> {
    for re in [&*RENAME_QUOTED_SINGLE, &*RENAME_QUOTED_DOUBLE, &*RENAME_BARE] {
        if let Some(caps) = re.captures(instruction) {
            let name = caps[1].trim().trim_end_matches('.').to_string();
            if !name.is_empty() {
                return Some(name);
            }
        }
    }
    None
}

/// Name for a synthesized extra/combo line, taken from the instruction with a
/// leading "Add " stripped, falling back to the dish field.
fn synthetic_name(instruction: Option<&str>, dish: &str) -> String {
    let base = instruction.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(dish);
    let lowered = base.to_lowercase();
    let stripped = if lowered.starts_with("add ") { &base[4..] } else { base };
    stripped.trim().trim_end_matches('.').to_string()
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Render a percentage the way badges and labels show it: `+25%`, `-10%`,
/// `+12.5%` (one decimal only when the value is not whole).
pub fn format_pct(pct: f64) -> String {
    let sign = if pct >= 0.0 { "+" } else { "" };
    if pct.fract() == 0.0 {
        format!("{}{}%", sign, pct as i64)
    } else {
        format!("{}{:.1}%", sign, pct)
    }
}

/// Map one raw descriptor to exactly one `Strategy` variant. `id` is the
/// stable toggle key assigned by `normalize_strategies`. Pure: no global
/// state, so re-normalizing the same input is bit-identical.
pub fn normalize_strategy(raw: &RawStrategy, menu: &[MenuItem], id: String) -> Strategy {
    let tag = raw.tag.as_deref().or(raw.action.as_deref()).unwrap_or("");
    let resolved = resolve_dish(&raw.dish, menu);

    match tag {
        "New Extra" => {
            let extra_name = synthetic_name(raw.action_instruction.as_deref(), &raw.dish);
            let extra_price = raw.new_price.unwrap_or(0.0);
            let label = if extra_price > 0.0 {
                format!("Add extra: {} (+${:.2})", extra_name, extra_price)
            } else {
                format!("Add extra: {}", extra_name)
            };
            Strategy::AddExtra {
                id,
                label,
                applies_to: Vec::new(),
                extra_name,
                extra_price,
            }
        }
        "New Combo" => {
            let bundle_title = synthetic_name(raw.action_instruction.as_deref(), &raw.dish);
            let bundle_price = raw.new_price.unwrap_or(0.0);
            let label = if bundle_price > 0.0 {
                format!("Bundle: {} (${:.2})", bundle_title, bundle_price)
            } else {
                format!("Bundle: {}", bundle_title)
            };
            Strategy::BundleCombo {
                id,
                label,
                items: resolved.into_iter().collect(),
                bundle_title,
                bundle_price,
            }
        }
        "Up Price" | "Up price" => {
            // The percentage is derived here, never passed through, so the
            // normalizer stays the single source of truth even when upstream
            // supplies an inconsistent currentPrice.
            let current = raw.current_price.unwrap_or(0.0);
            let pct = if current > 0.0 {
                round1((raw.new_price.unwrap_or(0.0) - current) / current * 100.0)
            } else {
                0.0
            };
            Strategy::Reprice {
                id,
                label: format!("Reprice: {} {}", raw.dish, format_pct(pct)),
                applies_to: resolved.into_iter().collect(),
                pct,
            }
        }
        "Reframe" => {
            let new_name = raw
                .action_instruction
                .as_deref()
                .and_then(extract_new_name)
                .unwrap_or_else(|| raw.dish.clone());
            let label = format!("Rename: {} -> {}", raw.dish, new_name);
            let mut rename_map = HashMap::new();
            let applies_to: Vec<String> = resolved.into_iter().collect();
            if let Some(item_id) = applies_to.first() {
                rename_map.insert(item_id.clone(), new_name);
            }
            Strategy::Rename {
                id,
                label,
                applies_to,
                rename_map,
            }
        }
        _ => {
            let suggestion_text = raw
                .rationale
                .as_deref()
                .or(raw.action_instruction.as_deref())
                .unwrap_or("")
                .to_string();
            let label = if raw.dish.trim().is_empty() {
                "Suggestion".to_string()
            } else {
                format!("Suggestion: {}", raw.dish)
            };
            Strategy::ReframeSuggestion {
                id,
                label,
                suggestion_text,
            }
        }
    }
}

/// Normalize a whole batch, assigning deterministic ids (`strategy_<index>`)
/// over the upstream order.
pub fn normalize_strategies(raws: &[RawStrategy], menu: &[MenuItem]) -> Vec<Strategy> {
    raws.iter()
        .enumerate()
        .map(|(i, raw)| normalize_strategy(raw, menu, format!("strategy_{}", i)))
        .collect()
}
