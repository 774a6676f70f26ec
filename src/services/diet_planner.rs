//! Diet-plan generation: formats the user's stored profile plus submitted
//! survey answers into a prompt, calls the external generative model, and
//! maps the response into a plan document. No retries; any failure surfaces
//! as a single PlannerError.

use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use crate::config::PlannerConfig;
use crate::database::models::User;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("generative API key not configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("request to generative API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generative API returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("generative API response contained no plan text")]
    EmptyResponse,
}

pub struct PlannerService {
    http: reqwest::Client,
    config: PlannerConfig,
}

impl PlannerService {
    pub fn new(config: &PlannerConfig) -> Result<Self, PlannerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { http, config: config.clone() })
    }

    /// Build the prompt, call the model, and return the plan document
    pub async fn generate_plan(&self, user: &User, form: &Value) -> Result<Value, PlannerError> {
        let api_key = self.config.api_key.as_deref().ok_or(PlannerError::MissingApiKey)?;

        let prompt = build_prompt(user, form);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlannerError::Upstream { status: status.as_u16(), body });
        }

        let payload: Value = response.json().await?;
        extract_plan(&payload)
    }
}

/// Format the stored profile and the raw survey answers into one prompt
fn build_prompt(user: &User, form: &Value) -> String {
    let mut profile = Vec::new();
    profile.push(format!("Name: {}", user.name));
    if let Some(age) = user.age {
        profile.push(format!("Age: {}", age));
    }
    if let Some(gender) = &user.gender {
        profile.push(format!("Gender: {}", gender));
    }
    if let Some(weight) = user.weight_kg {
        profile.push(format!("Weight: {} kg", weight));
    }
    if let Some(height) = user.height_cm {
        profile.push(format!("Height: {} cm", height));
    }
    if let Some(goals) = &user.fitness_goals {
        profile.push(format!("Fitness goals: {}", goals));
    }
    if let Some(activity) = &user.activity_level {
        profile.push(format!("Activity level: {}", activity));
    }
    if let Some(disliked) = &user.disliked_foods {
        profile.push(format!("Disliked foods: {}", disliked));
    }
    if let Some(allergies) = &user.allergies {
        profile.push(format!("Allergies: {}", allergies));
    }
    if let Some(conditions) = &user.health_conditions {
        profile.push(format!("Health conditions: {}", conditions));
    }
    if let Some(sleep) = &user.sleep_hours {
        profile.push(format!("Sleep hours: {}", sleep));
    }
    if let Some(stress) = &user.stress_level {
        profile.push(format!("Stress level: {}", stress));
    }

    format!(
        "You are a professional dietitian. Create a personalized 7-day diet plan \
         for the following client.\n\nClient profile:\n{}\n\nSurvey answers:\n{}\n\n\
         Respond with a single JSON object containing a \"days\" array; each day has \
         \"meals\" with name, foods, calories, protein_g, carbs_g and fat_g. \
         Respect the allergies and disliked foods strictly.",
        profile.join("\n"),
        form
    )
}

/// Pull the plan out of a generateContent response. The model is asked for
/// JSON but markdown fences and plain text still show up, so fall back to
/// wrapping the raw text.
fn extract_plan(payload: &Value) -> Result<Value, PlannerError> {
    let text = payload
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.pointer("/content/parts/0/text"))
        .and_then(Value::as_str)
        .ok_or(PlannerError::EmptyResponse)?;

    Ok(parse_plan_text(text))
}

fn parse_plan_text(text: &str) -> Value {
    let trimmed = text.trim();
    let stripped = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    match serde_json::from_str(stripped) {
        Ok(plan) => plan,
        Err(_) => json!({ "plan_text": trimmed }),
    }
}
