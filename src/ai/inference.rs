use anyhow::{Context, Result};
use reqwest::Response;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = r#"You sort bookmarked social-media posts into exactly one of the categories listed in the user message.
Answer with a single JSON object and nothing else, shaped {"category": "<name>", "needsUrlContent": true|false}.
Set needsUrlContent to true only when the post itself is too thin to act on without reading its links."#;

pub fn build_request(model: String, prompt: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system".into(),
                content: SYSTEM_PROMPT.into(),
            },
            ChatMessage {
                role: "user".into(),
                content: prompt.to_string(),
            },
        ],
        temperature: 0.2,
        top_p: 1.0,
        max_tokens: 256,
        response_format: ResponseFormat {
            r#type: "json_object".into(),
        },
    }
}

pub async fn parse_response(response: Response) -> Result<String> {
    let completion: ChatCompletionResponse = response.json().await?;
    first_content(completion)
}

fn first_content(completion: ChatCompletionResponse) -> Result<String> {
    let choice = completion
        .choices
        .into_iter()
        .next()
        .context("chat completion did not contain any choices")?;

    choice
        .message
        .and_then(|msg| msg.content)
        .context("chat completion missing message content")
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: i32,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub r#type: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatCompletionMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionMessage {
    pub content: Option<String>,
}
