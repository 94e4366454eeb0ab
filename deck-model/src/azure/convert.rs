//! Wire conversion for the chat completions API.

use crate::error::{ModelError, Result};
use crate::types::{LlmRequest, LlmResponse, Usage};
use serde_json::{Value, json};

/// Build the JSON body for a chat completions call
pub fn build_request_body(request: &LlmRequest) -> Value {
    let mut body = json!({ "messages": request.messages });

    if let Some(temperature) = request.temperature {
        body["temperature"] = json!(temperature);
    }
    if let Some(max_tokens) = request.max_tokens {
        body["max_tokens"] = json!(max_tokens);
    }
    if let Some(schema) = &request.response_schema {
        body["response_format"] = json!({
            "type": "json_schema",
            "json_schema": {
                "name": schema.name,
                "schema": schema.schema,
                "strict": true,
            }
        });
    }

    body
}

/// Parse a non-streaming chat completions response
pub fn parse_response(body: &Value) -> Result<LlmResponse> {
    if let Some(error) = body.get("error") {
        let message = error.get("message").and_then(Value::as_str).unwrap_or("unknown error");
        return Err(ModelError::Model(message.to_string()));
    }

    let choice = body
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .ok_or_else(|| ModelError::Model("response contained no choices".to_string()))?;

    let message = choice.get("message");
    let text = |key: &str| message.and_then(|m| m.get(key)).and_then(Value::as_str).map(str::to_string);

    let usage = body.get("usage").and_then(|u| serde_json::from_value::<Usage>(u.clone()).ok());

    Ok(LlmResponse {
        content: text("content"),
        refusal: text("refusal"),
        finish_reason: choice.get("finish_reason").and_then(Value::as_str).map(str::to_string),
        usage,
    })
}
