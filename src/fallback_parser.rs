//! Deterministic line scanner used when the LLM extraction response cannot
//! be parsed. Heuristics only: category headers by case, prices by trailing
//! numeric patterns, dish/ingredient split on common separators.

use regex::Regex;
use std::sync::LazyLock;

use crate::menu::{ExtractedMenu, RawMenuItem, DEFAULT_CATEGORY};

static TRAILING_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[$€£]?\s*(\d{1,4}(?:[.,]\d{1,2})?)\s*$").unwrap()
});
static LEADER_DOTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.\u{2026}]{2,}\s*$").unwrap());

const INGREDIENT_SEPARATORS: &[&str] = &[" - ", " – ", ": ", " | ", " • "];

fn looks_like_category_header(line: &str) -> bool {
    if line.ends_with(':') {
        return true;
    }
    if line.len() > 40 || line.split_whitespace().count() > 4 {
        return false;
    }
    let letters: Vec<char> = line.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return false;
    }
    let upper = letters.iter().filter(|c| c.is_uppercase()).count();
    // All-caps short lines read as section headers on real menus.
    upper == letters.len()
}

/// Split "Margherita Pizza - tomato, mozzarella, basil" into the dish title
/// and its ingredient list. First separator found wins.
fn split_dish_line(line: &str) -> (String, Option<Vec<String>>) {
    for sep in INGREDIENT_SEPARATORS {
        if let Some((title, rest)) = line.split_once(sep) {
            let ingredients: Vec<String> = rest
                .split([',', ';', '·'])
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            let ingredients = if ingredients.is_empty() { None } else { Some(ingredients) };
            return (title.trim().to_string(), ingredients);
        }
    }
    (line.trim().to_string(), None)
}

/// Best-effort extraction from raw menu text. Never fails; at worst it
/// returns an empty item list.
pub fn scan_menu_text(text: &str) -> ExtractedMenu {
    let mut items: Vec<RawMenuItem> = Vec::new();
    let mut categories: Vec<String> = Vec::new();
    let mut current_category: Option<String> = None;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let price_match = TRAILING_PRICE.captures(line);

        if price_match.is_none() && looks_like_category_header(line) {
            let name = line.trim_end_matches(':').trim().to_string();
            if !categories.iter().any(|c| c == &name) {
                categories.push(name.clone());
            }
            current_category = Some(name);
            continue;
        }

        let (body, price) = match price_match {
            Some(caps) => {
                let whole = caps.get(0).map(|m| m.start()).unwrap_or(line.len());
                let price_str = caps[1].replace(',', ".");
                (line[..whole].trim_end(), Some(format!("${}", price_str)))
            }
            None => (line, None),
        };

        // Dotted leaders between the dish name and its price.
        let body = LEADER_DOTS.replace(body, "").trim_end().to_string();
        if body.is_empty() {
            continue;
        }

        let (title, ingredients) = split_dish_line(&body);
        if title.is_empty() {
            continue;
        }

        items.push(RawMenuItem {
            dish_title: Some(title),
            name: None,
            price,
            category: current_category
                .clone()
                .or_else(|| Some(DEFAULT_CATEGORY.to_string())),
            ingredients,
        });
    }

    let total_items = items.len();
    ExtractedMenu {
        items,
        categories,
        total_items,
    }
}
