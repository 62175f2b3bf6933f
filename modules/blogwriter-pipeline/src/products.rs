use std::sync::LazyLock;

use ai_client::util::strip_code_fences;
use regex::Regex;
use schemars::schema_for;
use serde_json::Value;
use tracing::{info, warn};

use blogwriter_common::{BlogWriterError, Product, Summary};

use crate::generation::TextGenerationClient;
use crate::summarizer::render_summaries;

pub const PRODUCT_MAX_TOKENS: u32 = 1024;

// Where an array of objects (or an empty array) could start inside prose.
static RE_ARRAY_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\s*[\{\]]").unwrap());

/// Products plus the non-fatal warning raised when the reply was unusable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductExtraction {
    pub products: Vec<Product>,
    pub warning: Option<String>,
}

fn product_prompt(summaries: &[Summary]) -> String {
    let schema = serde_json::to_string_pretty(&schema_for!(Vec<Product>)).unwrap_or_default();
    format!(
        "From the competitor blog summaries below, list every specific product that is \
recommended or reviewed. Only include genuine product mentions (brand and model, e.g. \
\"Salomon X Ultra 4 GTX\"), never generic categories such as \"hiking boots\" or \
\"rain jackets\". Include the product URL when a summary gives one.

Respond with ONLY a JSON array of objects with \"name\" and \"url\" fields, matching this \
schema:
{schema}

If no products are mentioned, respond with [].

COMPETITOR SUMMARIES:
{}
",
        render_summaries(summaries)
    )
}

/// Parse a model reply into products. Tries the whole reply, then the first
/// embedded array that parses. Entries without a non-empty `name` are dropped.
pub fn parse_products(response: &str) -> blogwriter_common::Result<Vec<Product>> {
    let cleaned = strip_code_fences(response);

    let entries: Vec<Value> = match serde_json::from_str(cleaned) {
        Ok(entries) => entries,
        Err(_) => embedded_array(cleaned).ok_or_else(|| {
            BlogWriterError::Parse("no JSON array in product response".to_string())
        })?,
    };

    Ok(entries.iter().filter_map(product_from_value).collect())
}

/// First array in `text` that deserializes, ignoring whatever follows it.
fn embedded_array(text: &str) -> Option<Vec<Value>> {
    RE_ARRAY_START.find_iter(text).find_map(|start| {
        serde_json::Deserializer::from_str(&text[start.start()..])
            .into_iter::<Vec<Value>>()
            .next()
            .and_then(|parsed| parsed.ok())
    })
}

fn product_from_value(value: &Value) -> Option<Product> {
    let name = value.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    let url = value
        .get("url")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|u| !u.is_empty());
    Some(Product::new(name, url))
}

/// Extract products, reporting why the list is empty when the model reply
/// could not be parsed. Never fails.
pub async fn extract_products_reported(
    client: &TextGenerationClient,
    summaries: &[Summary],
    api_key: &str,
) -> ProductExtraction {
    if summaries.is_empty() || api_key.trim().is_empty() {
        return ProductExtraction::default();
    }

    let Some(response) = client
        .generate(&product_prompt(summaries), api_key, PRODUCT_MAX_TOKENS)
        .await
    else {
        return ProductExtraction {
            products: Vec::new(),
            warning: Some("Product extraction failed: no response from the model".to_string()),
        };
    };

    match parse_products(&response) {
        Ok(products) => {
            info!(count = products.len(), "Products extracted");
            ProductExtraction {
                products,
                warning: None,
            }
        }
        Err(e) => {
            warn!(error = %e, "Could not parse product list");
            ProductExtraction {
                products: Vec::new(),
                warning: Some(format!("Could not parse product list: {e}")),
            }
        }
    }
}

pub async fn extract_products(
    client: &TextGenerationClient,
    summaries: &[Summary],
    api_key: &str,
) -> Vec<Product> {
    extract_products_reported(client, summaries, api_key)
        .await
        .products
}
