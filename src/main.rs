use anyhow::{Context, Result};
use menu_profit::api_connection::endpoints::Provider;
use menu_profit::cli::parse_args;
use menu_profit::fallback_parser::scan_menu_text;
use menu_profit::menu::{menu_from_raw, MenuItem};
use menu_profit::menu_extractor::extract_menu;
use menu_profit::pdf_convert::pdf_to_text;
use menu_profit::strategy::{
    apply_strategies, collect_suggestions, normalize_strategies, AppliedMenu, RawStrategy,
    Strategy,
};
use menu_profit::strategy_generator::generate_strategies;
use std::path::Path;
use tokio::fs;

const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

fn render_report(applied: &AppliedMenu, suggestions: &[String]) {
    println!("\nUpdated menu:");

    // Categories in first-seen order, so synthetic sections land last.
    let mut categories: Vec<String> = Vec::new();
    for item in &applied.updated {
        if !categories.contains(&item.category) {
            categories.push(item.category.clone());
        }
    }

    for category in &categories {
        println!("\n  {}", category);
        for item in applied.updated.iter().filter(|it| &it.category == category) {
            let mut line = format!("    {}", item.title);
            if item.price > 0.0 {
                line.push_str(&format!("  ${:.2}", item.price));
            }
            if let Some(change) = applied.changes.get(&item.id) {
                if let Some(delta) = change.price_delta {
                    let sign = if delta >= 0.0 { "+" } else { "-" };
                    line.push_str(&format!("  ({}${:.2})", sign, delta.abs()));
                }
                if !change.badges.is_empty() {
                    line.push_str(&format!("  [{}]", change.badges.join(", ")));
                }
            }
            println!("{}", line);
        }
    }

    if !suggestions.is_empty() {
        println!("\nSuggestions:");
        for suggestion in suggestions {
            println!("  - {}", suggestion);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = parse_args();
    println!("Reading menu file: {}", cli.menu_file);

    let menu_text = if cli.text || cli.scan {
        fs::read_to_string(&cli.menu_file)
            .await
            .with_context(|| format!("Failed to read menu text file '{}'", cli.menu_file))?
    } else {
        let pdf_bytes = fs::read(&cli.menu_file)
            .await
            .with_context(|| format!("Failed to read menu PDF '{}'", cli.menu_file))?;
        let filename = Path::new(&cli.menu_file)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "menu.pdf".to_string());
        println!("Converting PDF to text...");
        pdf_to_text(&pdf_bytes, &filename)
            .await
            .context("PDF conversion failed")?
    };

    let provider = Provider::openai(API_KEY_ENV_VAR);
    let progress = |message: String| {
        println!("{}", message);
    };

    let extracted = if cli.scan {
        scan_menu_text(&menu_text)
    } else {
        extract_menu(&menu_text, &provider, &progress)
            .await
            .context("Menu extraction failed")?
    };

    let menu: Vec<MenuItem> = menu_from_raw(&extracted.items);
    if menu.is_empty() {
        println!("No menu items found; nothing to analyze.");
        return Ok(());
    }
    println!("\nWorking with {} menu items.", menu.len());

    let raw_strategies: Vec<RawStrategy> = match &cli.strategies_file {
        Some(path) => {
            let json = fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read strategies file '{}'", path))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Strategies file '{}' is not a JSON array", path))?
        }
        None => generate_strategies(&menu, &provider, &progress).await,
    };

    let strategies = normalize_strategies(&raw_strategies, &menu);
    let enabled: Vec<Strategy> = strategies
        .iter()
        .filter(|s| !cli.disabled.iter().any(|d| d == s.id()))
        .cloned()
        .collect();

    if !strategies.is_empty() {
        println!("\nStrategies:");
        for strategy in &strategies {
            let state = if enabled.iter().any(|s| s.id() == strategy.id()) {
                "on "
            } else {
                "off"
            };
            println!("  [{}] {}  {}", state, strategy.id(), strategy.label());
        }
    }

    let applied = apply_strategies(&menu, &enabled);
    let suggestions = collect_suggestions(&enabled);
    render_report(&applied, &suggestions);

    Ok(())
}
