//! # grompt-web
//!
//! Form front end of `grompt`. One page collects an API key, a prompt (Basic) or a prompt canvas (Advanced) and the
//! model settings; submitting it runs a single optimization and shows the result on the same page.
//!
//! The API key travels with the form and is handed to the client of that request only.

pub mod page;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Router};
use grompt::utils::llm::ModelParams;
use grompt::{rephrase_prompt, GroqClient, PromptCanvas, Settings};
use log::{info, warn};
use serde::Deserialize;

pub const MISSING_API_KEY: &str = "Please enter your GROQ API Key in the sidebar.";
pub const MISSING_PROMPT: &str = "Please enter a prompt to optimize.";
pub const TEMPERATURE_RANGE: (f32, f32) = (0.0, 1.0);
pub const MAX_TOKENS_RANGE: (u32, u32) = (1, 32768);

/// The shared application state.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

/// Creates the router with all the application routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/optimize", post(optimize))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Everything the page submits. Numbers stay strings until [OptimizeForm::model_params] checks them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OptimizeForm {
    pub api_key: String,
    pub user_prompt: String,
    pub persona: String,
    pub audience: String,
    pub task: String,
    pub steps: String,
    pub context: String,
    pub references: String,
    pub output_format: String,
    pub tonality: String,
    pub canvas_prompt: String,
    pub model: String,
    pub temperature: String,
    pub max_tokens: String,
}

impl OptimizeForm {
    /// An empty form preset with the configured model defaults.
    pub fn with_defaults(settings: &Settings) -> Self {
        Self {
            model: settings.default_model.clone(),
            temperature: settings.default_temperature.to_string(),
            max_tokens: settings.default_max_tokens.to_string(),
            ..Self::default()
        }
    }

    /// Steps and references come from text areas, one entry per line.
    pub fn canvas(&self) -> PromptCanvas {
        PromptCanvas {
            persona: self.persona.clone(),
            audience: self.audience.clone(),
            task: self.task.clone(),
            steps: PromptCanvas::parse_lines(&self.steps),
            context: self.context.clone(),
            references: PromptCanvas::parse_lines(&self.references),
            output_format: self.output_format.clone(),
            tonality: self.tonality.clone(),
        }
    }

    pub fn model_params(&self, settings: &Settings) -> Result<ModelParams, String> {
        let defaults = settings.model_params();
        let model = match self.model.trim() {
            "" => defaults.model,
            model => model.to_string(),
        };

        let temperature = match self.temperature.trim() {
            "" => defaults.temperature,
            value => value
                .parse::<f32>()
                .ok()
                .filter(|t| (TEMPERATURE_RANGE.0..=TEMPERATURE_RANGE.1).contains(t))
                .ok_or_else(|| format!("Temperature must be a number between {} and {}.", TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1))?,
        };

        let max_tokens = match self.max_tokens.trim() {
            "" => defaults.max_tokens,
            value => value
                .parse::<u32>()
                .ok()
                .filter(|n| (MAX_TOKENS_RANGE.0..=MAX_TOKENS_RANGE.1).contains(n))
                .and_then(|n| u16::try_from(n).ok())
                .ok_or_else(|| format!("Max Tokens must be a whole number between {} and {}.", MAX_TOKENS_RANGE.0, MAX_TOKENS_RANGE.1))?,
        };

        Ok(ModelParams::new(model, temperature, max_tokens))
    }
}

/// What a submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Optimized(String),
    Warning(String),
    Invalid(String),
    Failed(String),
}

impl Outcome {
    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::Optimized(_) | Outcome::Warning(_) => StatusCode::OK,
            Outcome::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Outcome::Failed(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Validate a submission and run it. A non-empty canvas prompt selects Advanced mode.
///
/// Blank checks look at trimmed text; the prompt itself is rendered as submitted.
pub async fn run_optimization(settings: &Settings, form: &OptimizeForm) -> Outcome {
    let api_key = form.api_key.trim();
    if api_key.is_empty() {
        return Outcome::Invalid(MISSING_API_KEY.to_string());
    }
    let canvas_mode = !form.canvas_prompt.trim().is_empty();
    if form.user_prompt.trim().is_empty() && !canvas_mode {
        return Outcome::Warning(MISSING_PROMPT.to_string());
    }
    let params = match form.model_params(settings) {
        Ok(params) => params,
        Err(message) => return Outcome::Invalid(message),
    };

    let result = match GroqClient::new(api_key, &settings.base_url) {
        Ok(client) if canvas_mode => {
            info!("optimizing canvas prompt with {}", params.model);
            let canvas = form.canvas();
            rephrase_prompt(&client, &form.canvas_prompt, &params, Some(&canvas)).await
        }
        Ok(client) => {
            info!("optimizing prompt with {}", params.model);
            rephrase_prompt(&client, &form.user_prompt, &params, None).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(optimized) => Outcome::Optimized(optimized),
        Err(e) => {
            warn!("optimization failed: {}", e);
            Outcome::Failed(e.to_string())
        }
    }
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let form = OptimizeForm::with_defaults(&state.settings);
    Html(page::render(&state.settings, &form, None))
}

async fn optimize(State(state): State<AppState>, Form(form): Form<OptimizeForm>) -> (StatusCode, Html<String>) {
    let outcome = run_optimization(&state.settings, &form).await;
    (outcome.status(), Html(page::render(&state.settings, &form, Some(&outcome))))
}

async fn health_check() -> &'static str {
    "OK"
}
