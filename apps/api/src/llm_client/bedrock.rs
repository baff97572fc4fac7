//! Bedrock runtime backend speaking the Amazon Titan text body format.

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{LlmError, ModelInvocation, TextModel, MODEL_ID};
use crate::config::Config;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TitanRequest<'a> {
    input_text: &'a str,
    text_generation_config: TitanGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TitanGenerationConfig {
    max_token_count: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitanResponse {
    #[serde(default)]
    results: Vec<TitanResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitanResult {
    output_text: Option<String>,
    token_count: Option<u32>,
    completion_reason: Option<String>,
}

/// Bedrock runtime client. Built once per process and cloned into handlers;
/// the SDK client pools connections and retries internally.
#[derive(Clone)]
pub struct BedrockTextModel {
    client: Client,
    model_id: String,
}

impl BedrockTextModel {
    /// Constructs a client pinned to the configured region, with the SDK's
    /// standard retry strategy capped at `bedrock_max_attempts`.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.bedrock_region.clone()))
            .retry_config(RetryConfig::standard().with_max_attempts(config.bedrock_max_attempts));

        if let Some(endpoint) = &config.bedrock_endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;

        Self {
            client: Client::new(&sdk_config),
            model_id: MODEL_ID.to_string(),
        }
    }
}

#[async_trait]
impl TextModel for BedrockTextModel {
    async fn complete(&self, invocation: &ModelInvocation<'_>) -> Result<String, LlmError> {
        let body = titan_request_body(invocation)?;

        let output = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type(invocation.content_type)
            .accept(invocation.accept)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error()
                    .is_some_and(|se| se.is_throttling_exception())
                {
                    warn!("Bedrock throttled the request after all retry attempts");
                }
                LlmError::Invoke(DisplayErrorContext(&e).to_string())
            })?;

        parse_titan_output(output.body().as_ref())
    }
}

fn titan_request_body(invocation: &ModelInvocation<'_>) -> Result<Vec<u8>, LlmError> {
    let request = TitanRequest {
        input_text: invocation.prompt,
        text_generation_config: TitanGenerationConfig {
            max_token_count: invocation.params.max_tokens,
            temperature: invocation.params.temperature,
            top_p: invocation.params.top_p,
        },
    };
    Ok(serde_json::to_vec(&request)?)
}

/// Pulls `results[0].outputText` out of a Titan response body.
fn parse_titan_output(body: &[u8]) -> Result<String, LlmError> {
    let response: TitanResponse = serde_json::from_slice(body)?;

    let result = response.results.into_iter().next().ok_or(LlmError::EmptyContent)?;

    debug!(
        "Titan call succeeded: output_tokens={:?}, completion_reason={:?}",
        result.token_count, result.completion_reason
    );

    result.output_text.ok_or(LlmError::EmptyContent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::GenerationParams;

    #[test]
    fn test_titan_request_body_shape() {
        let params = GenerationParams::default();
        let invocation = ModelInvocation::json("Plan something", params);

        let body = titan_request_body(&invocation).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(value["inputText"], "Plan something");
        let cfg = &value["textGenerationConfig"];
        assert_eq!(cfg["maxTokenCount"], 2048);
        assert!((cfg["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
        assert!((cfg["topP"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_parse_titan_output_takes_first_result() {
        let body = br#"{
            "inputTextTokenCount": 12,
            "results": [
                {"tokenCount": 30, "outputText": "{\"title\": \"x\"}", "completionReason": "FINISH"}
            ]
        }"#;
        assert_eq!(parse_titan_output(body).unwrap(), "{\"title\": \"x\"}");
    }

    #[test]
    fn test_parse_titan_output_without_results_is_empty_content() {
        let err = parse_titan_output(br#"{"inputTextTokenCount": 3}"#).unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));

        let err = parse_titan_output(br#"{"results": [{"tokenCount": 0}]}"#).unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[test]
    fn test_parse_titan_output_rejects_non_json_body() {
        let err = parse_titan_output(b"<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }
}
