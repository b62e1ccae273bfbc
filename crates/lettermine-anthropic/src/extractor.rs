// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LLM-backed company extraction over the Messages API.

use async_trait::async_trait;
use lettermine_core::{
    CompanyExtractor, CompanyMention, Extraction, ExtractionMetadata, LettermineError,
};
use tracing::debug;

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

const SYSTEM_PROMPT: &str = "You are a venture analyst. You identify private companies and \
startups mentioned in newsletter content. You respond with a JSON array and nothing else.";

/// Extracts company mentions from cleaned newsletter text with one
/// non-streaming Messages API call per input.
pub struct AnthropicExtractor {
    client: AnthropicClient,
    max_tokens: u32,
}

impl AnthropicExtractor {
    pub fn new(client: AnthropicClient, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }

    fn build_prompt(text: &str, source_name: &str) -> String {
        format!(
            "Identify every company mentioned in this newsletter issue from \"{source_name}\".\n\
             Respond with a JSON array of objects, one per company:\n\
             {{\"name\": string, \"description\": string, \"context\": string, \
             \"sentiment\": \"positive\"|\"negative\"|\"neutral\", \"confidence\": number 0-1}}\n\
             Return [] if no companies are mentioned.\n\n\
             Newsletter content:\n{text}"
        )
    }
}

#[async_trait]
impl CompanyExtractor for AnthropicExtractor {
    async fn extract_companies(
        &self,
        text: &str,
        source_name: &str,
    ) -> Result<Extraction, LettermineError> {
        let request = MessageRequest {
            model: self.client.default_model().to_string(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: Self::build_prompt(text, source_name),
            }],
            system: Some(SYSTEM_PROMPT.to_string()),
            max_tokens: self.max_tokens,
        };

        let response = self.client.complete_message(&request).await?;
        let companies = parse_company_array(&response.text())?;
        debug!(
            source = source_name,
            companies = companies.len(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "company extraction complete"
        );

        Ok(Extraction {
            companies,
            metadata: ExtractionMetadata {
                model: response.model,
                source_name: source_name.to_string(),
                input_chars: text.len(),
            },
        })
    }
}

/// Locate and parse the JSON array in the model output.
///
/// Models occasionally wrap the array in prose or a code fence, so the
/// parse targets the outermost `[...]` span rather than the whole body.
fn parse_company_array(output: &str) -> Result<Vec<CompanyMention>, LettermineError> {
    let start = output.find('[');
    let end = output.rfind(']');
    let span = match (start, end) {
        (Some(s), Some(e)) if s < e => &output[s..=e],
        _ => {
            return Err(LettermineError::Provider {
                message: format!("no JSON array in extraction response: {output:.200}"),
                source: None,
            });
        }
    };
    serde_json::from_str(span).map_err(|e| LettermineError::Provider {
        message: format!("malformed extraction response: {e}"),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lettermine_core::Sentiment;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn extractor(base_url: &str) -> AnthropicExtractor {
        let client = AnthropicClient::new(
            "test-key".into(),
            "2023-06-01".into(),
            "claude-haiku-4-5-20250901".into(),
        )
        .unwrap()
        .with_base_url(base_url.to_string());
        AnthropicExtractor::new(client, 2048)
    }

    fn response_with(text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "msg_x",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": text}],
            "model": "claude-haiku-4-5-20250901",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 200, "output_tokens": 40}
        })
    }

    #[tokio::test]
    async fn parses_a_clean_company_array() {
        let server = MockServer::start().await;
        let body = r#"[{"name": "Glossier", "description": "DTC beauty brand",
            "context": "raised a new round", "sentiment": "positive", "confidence": 0.92}]"#;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_with(body)))
            .mount(&server)
            .await;

        let extraction = extractor(&server.uri())
            .extract_companies("Glossier raised...", "The Diff")
            .await
            .unwrap();
        assert_eq!(extraction.companies.len(), 1);
        assert_eq!(extraction.companies[0].name, "Glossier");
        assert_eq!(extraction.companies[0].sentiment, Sentiment::Positive);
        assert_eq!(extraction.metadata.source_name, "The Diff");
    }

    #[tokio::test]
    async fn tolerates_prose_around_the_array() {
        let server = MockServer::start().await;
        let body = "Here are the companies:\n```json\n[{\"name\": \"Ramp\"}]\n```";
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_with(body)))
            .mount(&server)
            .await;

        let extraction = extractor(&server.uri())
            .extract_companies("text", "src")
            .await
            .unwrap();
        assert_eq!(extraction.companies.len(), 1);
        assert_eq!(extraction.companies[0].name, "Ramp");
        // Omitted fields take their defaults.
        assert_eq!(extraction.companies[0].sentiment, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn empty_array_yields_no_companies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_with("[]")))
            .mount(&server)
            .await;

        let extraction = extractor(&server.uri())
            .extract_companies("nothing here", "src")
            .await
            .unwrap();
        assert!(extraction.companies.is_empty());
    }

    #[tokio::test]
    async fn missing_array_is_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(response_with("I could not find any companies.")),
            )
            .mount(&server)
            .await;

        let err = extractor(&server.uri())
            .extract_companies("text", "src")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no JSON array"), "got: {err}");
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(parse_company_array("[{\"name\": }]").is_err());
    }
}
