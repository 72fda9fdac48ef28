//! Turns a natural-language description into a [`FormSchema`].

use async_trait::async_trait;
use formforge_form::FormSchema;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::GeminiConfig;

#[async_trait]
pub trait FormGenerator: Send + Sync {
    /// A non-blank `title` replaces whatever title the generator came up with.
    async fn generate(&self, prompt: &str, title: Option<&str>) -> anyhow::Result<FormSchema>;
}

const INSTRUCTIONS: &str = r#"Convert the description below into a JSON form definition.
Reply with the JSON object only.

Shape:
{"title": string, "description": string (optional), "fields": [
  {"name": camelCase string, "label": string,
   "type": "text" | "email" | "number" | "textarea" | "select" | "checkbox" | "radio" | "file" | "date",
   "required": boolean,
   "options": [string] (select and radio only),
   "placeholder": string (optional),
   "accept": string (file only, e.g. "image/*" or ".pdf,.doc,.docx"),
   "multiple": boolean (file only)}
]}

Use "file" whenever the description mentions uploads, documents, photos or images.

Description: "#;

/// Google Gemini `generateContent` client.
pub struct GeminiGenerator {
    client: Client,
    config: GeminiConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl FormGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str, title: Option<&str>) -> anyhow::Result<FormSchema> {
        if self.config.api_key.is_empty() {
            anyhow::bail!("gemini api key is not configured");
        }

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": format!("{INSTRUCTIONS}{prompt}") }],
            }],
            "generationConfig": {
                "temperature": 0.7,
                "topK": 40,
                "topP": 0.95,
                "maxOutputTokens": 2048,
            },
        });

        let response: GenerateContentResponse = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        parse_schema(&text, title)
    }
}

fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // optional language tag, e.g. ```json
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parses a generator reply, tolerating a surrounding markdown code fence.
pub fn parse_schema(text: &str, title: Option<&str>) -> anyhow::Result<FormSchema> {
    let mut schema: FormSchema = serde_json::from_str(strip_code_fence(text))?;

    if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
        schema.title = title.to_owned();
    }

    schema.check()?;

    Ok(schema)
}

#[cfg(test)]
mod tests {
    use formforge_form::FieldType;

    use super::*;

    const REPLY: &str = r#"{
        "title": "Job Application",
        "fields": [
            {"name": "fullName", "label": "Full Name", "type": "text", "required": true},
            {"name": "resume", "label": "Resume", "type": "file", "required": true, "accept": ".pdf", "multiple": false}
        ]
    }"#;

    #[test]
    fn parses_bare_json() {
        let schema = parse_schema(REPLY, None).unwrap();

        assert_eq!(schema.title, "Job Application");
        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.fields[1].field_type, FieldType::File);
        assert_eq!(schema.fields[1].accept.as_deref(), Some(".pdf"));
    }

    #[test]
    fn strips_code_fences() {
        let fenced = format!("```json\n{REPLY}\n```");
        assert!(parse_schema(&fenced, None).is_ok());

        let plain_fence = format!("```\n{REPLY}\n```\n");
        assert!(parse_schema(&plain_fence, None).is_ok());
    }

    #[test]
    fn supplied_title_wins() {
        let schema = parse_schema(REPLY, Some("Careers")).unwrap();
        assert_eq!(schema.title, "Careers");

        let schema = parse_schema(REPLY, Some("   ")).unwrap();
        assert_eq!(schema.title, "Job Application");
    }

    #[test]
    fn rejects_prose() {
        assert!(parse_schema("Sure! Here is your form.", None).is_err());
    }

    #[test]
    fn rejects_select_without_options() {
        let reply = r#"{"title": "Poll", "fields": [
            {"name": "choice", "label": "Choice", "type": "select", "required": true}
        ]}"#;

        assert!(parse_schema(reply, None).is_err());
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_network() {
        let generator = GeminiGenerator::new(GeminiConfig::default());

        assert!(generator.generate("contact form", None).await.is_err());
    }
}
