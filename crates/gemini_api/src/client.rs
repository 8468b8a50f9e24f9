use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::config::GeminiApiConfig;
use crate::error::{parse_error_message, GeminiApiError};
use crate::headers::build_headers;
use crate::payload::{GenerateContentRequest, GenerateContentResponse};
use crate::url::normalize_generate_content_url;

#[derive(Debug)]
pub struct GeminiApiClient {
    http: Client,
    config: GeminiApiConfig,
}

impl GeminiApiClient {
    pub fn new(config: GeminiApiConfig) -> Result<Self, GeminiApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(GeminiApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GeminiApiConfig {
        &self.config
    }

    pub fn normalized_endpoint(&self) -> String {
        normalize_generate_content_url(&self.config.base_url, &self.config.model)
    }

    pub fn build_headers(&self) -> Result<HeaderMap, GeminiApiError> {
        let headers = build_headers(&self.config)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                    GeminiApiError::InvalidHeader(format!("invalid header key: {key}"))
                })?,
                HeaderValue::from_str(&value).map_err(|_| {
                    GeminiApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<reqwest::RequestBuilder, GeminiApiError> {
        validate_request_payload_shape(request)?;

        let headers = self.build_headers()?;
        Ok(self
            .http
            .post(self.normalized_endpoint())
            .headers(headers)
            .json(request))
    }

    /// Performs one `generateContent` round trip.
    ///
    /// Exactly one attempt: transient failures surface immediately as typed
    /// errors so callers decide what a failure means for their conversation.
    pub async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiApiError> {
        let response = self.build_request(request)?.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            return Err(GeminiApiError::Status(
                status,
                parse_error_message(status, &body),
            ));
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<GenerateContentResponse>(&body)?;
        Ok(parsed)
    }

    /// Performs one round trip and extracts the reply text.
    ///
    /// Safety-blocked prompts and candidate-less responses are errors here:
    /// the endpoint answered, but there is no assistant utterance to show.
    pub async fn generate_text(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiApiError> {
        let response = self.generate(request).await?;

        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
            .filter(|reason| !reason.trim().is_empty())
        {
            return Err(GeminiApiError::Blocked {
                reason: reason.to_owned(),
            });
        }

        response
            .primary_text()
            .ok_or_else(|| GeminiApiError::EmptyResponse {
                finish_reason: response.primary_finish_reason().map(ToOwned::to_owned),
            })
    }
}

fn validate_request_payload_shape(
    request: &GenerateContentRequest,
) -> Result<(), GeminiApiError> {
    if request.contents.is_empty() {
        return Err(GeminiApiError::Unknown(
            "'contents' must carry at least one message".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::GeminiApiConfig;
    use crate::payload::{Content, GenerateContentRequest};

    use super::{validate_request_payload_shape, GeminiApiClient};

    #[test]
    fn empty_contents_are_rejected_before_any_network_io() {
        let request = GenerateContentRequest::new(Vec::new(), None);
        let error = validate_request_payload_shape(&request)
            .expect_err("empty contents should be rejected");

        assert!(error.to_string().contains("'contents'"));
    }

    #[test]
    fn client_normalizes_endpoint_from_config() {
        let client = GeminiApiClient::new(
            GeminiApiConfig::new("test-key").with_model("gemini-2.5-flash"),
        )
        .expect("client should build");

        assert_eq!(
            client.normalized_endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn build_request_fails_without_api_key() {
        let client =
            GeminiApiClient::new(GeminiApiConfig::default()).expect("client should build");
        let request = GenerateContentRequest::new(vec![Content::user("hello")], None);

        let error = client
            .build_request(&request)
            .err()
            .expect("missing API key should fail header construction");
        assert_eq!(error.to_string(), "API key is required");
    }
}
