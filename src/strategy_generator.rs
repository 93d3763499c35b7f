use crate::api_connection::endpoints::{ChatCompletionRequest, ChatMessage, Provider};
use crate::menu::MenuItem;
use crate::strategy::RawStrategy;

pub const STRATEGY_MODEL: &str = "gpt-4o-mini";

fn strategy_request(menu: &[MenuItem]) -> ChatCompletionRequest {
    let system_prompt = "\
You are a restaurant profitability consultant. Given a menu as JSON, propose profitization \
strategies. Return ONLY a JSON array of objects, each with the properties: 'tag' (one of \
\"New Extra\", \"New Combo\", \"Up Price\", \"Reframe\", or a short freeform label), 'dish' \
(the menu item the strategy concerns), 'actionInstruction' (one imperative sentence; for \
Reframe use the form: Rename '<old>' to '<new>'), 'currentPrice' and 'newPrice' (numbers, \
where applicable), and 'rationale' (one sentence). Aim for 4-8 strategies mixing the tags. \
No markdown fences, no surrounding text."
        .to_string();

    let menu_json = serde_json::to_string_pretty(menu).unwrap_or_else(|_| "[]".to_string());

    ChatCompletionRequest {
        model: STRATEGY_MODEL.to_string(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: system_prompt,
            },
            ChatMessage {
                role: "user".to_string(),
                content: menu_json,
            },
        ],
        response_format: None,
        temperature: Some(0.4),
        max_tokens: Some(2048),
    }
}

/// Second LLM pass: synthesize raw profitization strategies for the menu.
///
/// Strategies are advisory, so every failure mode (API error, empty response,
/// unparseable JSON) degrades to an empty list rather than an error; the
/// caller proceeds with an unannotated menu.
pub async fn generate_strategies(
    menu: &[MenuItem],
    provider: &Provider,
    progress_updater: &(impl Fn(String) + Send + Sync),
) -> Vec<RawStrategy> {
    let content = match provider.call_for_content(strategy_request(menu)).await {
        Ok(content) => content,
        Err(e) => {
            progress_updater(format!("Strategy generation call failed: {}", e));
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<RawStrategy>>(&content) {
        Ok(raws) => {
            progress_updater(format!("Generated {} raw strategies", raws.len()));
            raws
        }
        Err(e) => {
            progress_updater(format!(
                "Strategy generation output was not a JSON array ({}); continuing without strategies",
                e
            ));
            Vec::new()
        }
    }
}
