use std::collections::HashMap;

use crate::api_connection::connection::ApiConnectionError;
use crate::api_connection::endpoints::{
    ChatCompletionRequest, ChatMessage, JsonSchema, JsonSchemaDefinition, JsonSchemaProperty,
    Provider, ResponseFormat,
};
use crate::fallback_parser::scan_menu_text;
use crate::menu::ExtractedMenu;

pub const EXTRACTION_MODEL: &str = "gpt-4o-mini";

fn get_menu_json_schema() -> JsonSchemaDefinition {
    let item_schema = JsonSchema {
        schema_type: "object".to_string(),
        properties: None,
        required: None,
        additional_properties: None,
    };
    let category_schema = JsonSchema {
        schema_type: "string".to_string(),
        properties: None,
        required: None,
        additional_properties: None,
    };

    let mut properties = HashMap::new();
    properties.insert(
        "items".to_string(),
        JsonSchemaProperty {
            property_type: "array".to_string(),
            description: Some(
                "Menu items. Each is an object with string properties 'dishTitle', 'price' \
                 (display string like \"$12.99\"), 'category', and an optional 'ingredients' \
                 array of strings."
                    .to_string(),
            ),
            r#enum: None,
            items: Some(Box::new(item_schema)),
        },
    );
    properties.insert(
        "categories".to_string(),
        JsonSchemaProperty {
            property_type: "array".to_string(),
            description: Some("Distinct category names in menu order.".to_string()),
            r#enum: None,
            items: Some(Box::new(category_schema)),
        },
    );
    properties.insert(
        "totalItems".to_string(),
        JsonSchemaProperty {
            property_type: "integer".to_string(),
            description: Some("Number of entries in 'items'.".to_string()),
            r#enum: None,
            items: None,
        },
    );

    JsonSchemaDefinition {
        name: "extracted_menu_schema".to_string(),
        strict: Some(true),
        schema: JsonSchema {
            schema_type: "object".to_string(),
            properties: Some(properties),
            required: Some(vec![
                "items".to_string(),
                "categories".to_string(),
                "totalItems".to_string(),
            ]),
            additional_properties: Some(false),
        },
    }
}

fn extraction_request(menu_text: &str) -> ChatCompletionRequest {
    let system_prompt = "\
You are a restaurant-menu extraction assistant. Parse the given menu text and return a single \
JSON object with the properties 'items', 'categories', and 'totalItems'. Each element of 'items' \
must have 'dishTitle' (string), 'price' (the display price string, e.g. \"$12.99\", or an empty \
string when no price is printed), 'category' (string; use \"Uncategorized\" when the menu gives \
none), and optionally 'ingredients' (array of strings). The JSON object must be the only content \
in your response: no explanations, no markdown fences."
        .to_string();

    ChatCompletionRequest {
        model: EXTRACTION_MODEL.to_string(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: system_prompt,
            },
            ChatMessage {
                role: "user".to_string(),
                content: menu_text.to_string(),
            },
        ],
        response_format: Some(ResponseFormat {
            format_type: "json_schema".to_string(),
            json_schema: Some(get_menu_json_schema()),
        }),
        temperature: Some(0.0),
        max_tokens: Some(4096),
    }
}

/// Extract structured menu items from raw menu text.
///
/// The LLM pass is the primary path; when its output fails to parse as the
/// expected shape, the deterministic line scanner takes over so the pipeline
/// always produces a menu. API-level failures (missing key, network, HTTP
/// error) still propagate.
pub async fn extract_menu(
    menu_text: &str,
    provider: &Provider,
    progress_updater: &(impl Fn(String) + Send + Sync),
) -> Result<ExtractedMenu, ApiConnectionError> {
    let content = provider
        .call_for_content(extraction_request(menu_text))
        .await?;

    match serde_json::from_str::<ExtractedMenu>(&content) {
        Ok(mut menu) => {
            menu.total_items = menu.items.len();
            progress_updater(format!(
                "Extracted {} items across {} categories (LLM)",
                menu.total_items,
                menu.categories.len()
            ));
            Ok(menu)
        }
        Err(e) => {
            progress_updater(format!(
                "LLM extraction output was not valid menu JSON ({}); falling back to line scanner",
                e
            ));
            let menu = scan_menu_text(menu_text);
            progress_updater(format!(
                "Extracted {} items across {} categories (fallback scanner)",
                menu.total_items,
                menu.categories.len()
            ));
            Ok(menu)
        }
    }
}
