//! Remote translators: LibreTranslate (primary) and Google's public
//! `translate_a/single` endpoint (secondary).

use crate::remote::{CallError, ProviderClient, ProviderRequest};
use serde_json::{json, Value};
use std::time::Duration;

use super::types::TranslationQuery;

// ─── LibreTranslate ─────────────────────────────────────────────

pub fn libretranslate_request(url: &str, query: &TranslationQuery, timeout: Duration) -> ProviderRequest {
    ProviderRequest::post_json(
        url,
        json!({
            "q": query.text,
            "source": query.source_lang,
            "target": query.target_lang,
            "format": "text",
        }),
    )
    .timeout(timeout)
}

/// `{"translatedText": "..."}` → text. Missing field yields an empty string.
pub fn parse_libretranslate(body: &Value) -> String {
    body.get("translatedText")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub fn libretranslate(
    client: &dyn ProviderClient,
    url: &str,
    query: &TranslationQuery,
    timeout: Duration,
) -> Result<String, CallError> {
    let body = client.call(&libretranslate_request(url, query, timeout))?;
    Ok(parse_libretranslate(&body))
}

// ─── Google ─────────────────────────────────────────────────────

pub fn google_request(url: &str, query: &TranslationQuery, timeout: Duration) -> ProviderRequest {
    ProviderRequest::get(url)
        .param("client", "gtx")
        .param("sl", &query.source_lang)
        .param("tl", &query.target_lang)
        .param("dt", "t")
        .param("q", &query.text)
        .timeout(timeout)
}

/// The response is a nested array; `body[0]` lists sentence segments as
/// `[translated, original, ...]`. Segments are joined in order.
pub fn parse_google(body: &Value) -> String {
    body.get(0)
        .and_then(Value::as_array)
        .map(|segments| {
            segments
                .iter()
                .filter_map(|seg| seg.get(0).and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default()
}

pub fn google(
    client: &dyn ProviderClient,
    url: &str,
    query: &TranslationQuery,
    timeout: Duration,
) -> Result<String, CallError> {
    let body = client.call(&google_request(url, query, timeout))?;
    Ok(parse_google(&body))
}
