use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use dotenv::dotenv;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

pub const PDF_CONVERTER_API_KEY_ENV_VAR: &str = "PDF_CONVERTER_API_KEY";
const PDF_CONVERTER_URL_ENV_VAR: &str = "PDF_CONVERTER_URL";
const DEFAULT_CONVERTER_URL: &str = "https://api.pdfconvert.dev/v1/pdf-to-text";

/// Conversion failures are fatal: without extracted text there is nothing
/// for the rest of the pipeline to work on.
#[derive(Debug, Error)]
pub enum PdfConvertError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Conversion API error {status}: {error_body}")]
    Api {
        status: reqwest::StatusCode,
        error_body: String,
    },

    #[error("Conversion API returned no text")]
    EmptyText,
}

#[derive(Debug, Serialize)]
struct ConversionRequest {
    file: String,
    filename: String,
}

#[derive(Debug, Deserialize)]
struct ConversionResponse {
    text: String,
}

/// Send base64-encoded PDF bytes to the conversion API and return the
/// extracted text.
pub async fn pdf_to_text(pdf_bytes: &[u8], filename: &str) -> Result<String, PdfConvertError> {
    dotenv().ok();
    let api_key = env::var(PDF_CONVERTER_API_KEY_ENV_VAR)
        .map_err(|_| PdfConvertError::MissingApiKey(PDF_CONVERTER_API_KEY_ENV_VAR.to_string()))?;
    let url =
        env::var(PDF_CONVERTER_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONVERTER_URL.to_string());

    let request = ConversionRequest {
        file: BASE64.encode(pdf_bytes),
        filename: filename.to_string(),
    };

    let client = Client::new();
    let response = client
        .post(&url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        return Err(PdfConvertError::Api { status, error_body });
    }

    let body = response.json::<ConversionResponse>().await?;
    if body.text.trim().is_empty() {
        return Err(PdfConvertError::EmptyText);
    }
    Ok(body.text)
}
