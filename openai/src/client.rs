use anyhow::{anyhow, Result};
use serde::Deserialize;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    project: Option<String>,
    organization: Option<String>,
    pub model: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            project: None,
            organization: None,
            model,
        }
    }

    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = project.filter(|p| !p.is_empty());
        self
    }

    pub fn with_organization(mut self, organization: Option<String>) -> Self {
        self.organization = organization.filter(|o| !o.is_empty());
        self
    }

    /// One-shot chat completion: system + user message in, the first
    /// choice's content (trimmed) out.
    pub async fn chat(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "max_tokens": max_tokens,
            "temperature": temperature,
        });

        let mut req = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json");
        if let Some(project) = &self.project {
            req = req.header("OpenAI-Project", project);
        }
        if let Some(org) = &self.organization {
            req = req.header("OpenAI-Organization", org);
        }

        tracing::debug!(model = %self.model, "requesting chat completion");
        let resp = req.json(&body).send().await.map_err(|e| anyhow!(e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("openai http {status}: {text}"));
        }

        let parsed: ChatResponse = resp.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("openai response contained no choices"))?;
        Ok(choice.message.content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_project_and_org_are_dropped() {
        let client = OpenAiClient::new("sk-test".into(), "gpt-4".into())
            .with_project(Some(String::new()))
            .with_organization(Some("org-1".into()));
        assert!(client.project.is_none());
        assert_eq!(client.organization.as_deref(), Some("org-1"));
    }

    #[test]
    fn response_shape_deserializes() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":" hi "}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(parsed.choices[0].message.content, " hi ");
    }
}
