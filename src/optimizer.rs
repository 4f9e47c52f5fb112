//! # Optimizer
//! Turns a bare prompt or a [PromptCanvas] into a system message and has the model rephrase it.
//!
//! The bare prompt template:
//!
//! ```text
//! You are a professional prompt engineer. Optimize this prompt by making it clearer, more concise, and more effective.
//!     User request: "{{prompt}}"
//!     Rephrased:
//! ```
//!
//! With a canvas, the message is built from the canvas fields alone; the bare prompt is not part of it.

use lazy_static::lazy_static;
use log::{debug, warn};

use crate::canvas::PromptCanvas;
use crate::filler::{Fill, FillPlaceholders};
use crate::prompt::errors::PromptError;
use crate::prompt::{PartialPrompt, PromptTemplate};
use crate::utils::llm::{ChatCompletion, ModelParams};
use crate::utils::token::tiktoken::{fits_context, Tiktoken};
use crate::utils::token::count_tokens_by_len;
use self::errors::OptimizeError;

const REPHRASE_TEMPLATE_STR: &str = r#"You are a professional prompt engineer. Optimize this prompt by making it clearer, more concise, and more effective.
    User request: "{{prompt}}"
    Rephrased:"#;

const CANVAS_TEMPLATE_STR: &str = r#"You are a {{persona}} focused on delivering results for {{audience}}.

Task: {{task}}

Step-by-Step Approach:
{{steps}}

Context: {{context}}

References: {{references}}

Output Requirements:
- Format: {{output_format}}
- Tone: {{tonality}}"#;

lazy_static! {
    static ref REPHRASE_TEMPLATE: PromptTemplate = PromptTemplate::new(REPHRASE_TEMPLATE_STR);
    static ref CANVAS_TEMPLATE: PromptTemplate = PromptTemplate::new(CANVAS_TEMPLATE_STR);
}

/// The user's own prompt, as a filler of the rephrase template.
#[derive(Debug, Clone, Copy)]
pub struct UserPrompt<'a>(pub &'a str);

const PROMPT_PLACEHOLDERS: [&str; 1] = ["prompt"];

impl FillPlaceholders for UserPrompt<'_> {
    fn placeholders_to_fill(&self) -> &'static [&'static str] {
        &PROMPT_PLACEHOLDERS
    }
}

impl Fill for UserPrompt<'_> {
    fn fill(&self, partial_prompt: &mut PartialPrompt) -> Result<(), PromptError> {
        partial_prompt.try_fill(PROMPT_PLACEHOLDERS[0], self.0)?;
        Ok(())
    }
}

fn render(template: &PromptTemplate, filler: &impl Fill) -> Result<String, PromptError> {
    let mut partial_prompt = template.construct_prompt();
    filler.fill(&mut partial_prompt)?;
    partial_prompt.complete()
}

/// Build the system message for a request: from the canvas when there is one, otherwise from the bare prompt.
pub fn craft_system_message(canvas: Option<&PromptCanvas>, prompt: &str) -> Result<String, PromptError> {
    match canvas {
        Some(canvas) => render(&CANVAS_TEMPLATE, canvas),
        None => get_rephrased_user_prompt(prompt),
    }
}

/// Build the system message asking the model to act as a prompt engineer and optimize `prompt`.
pub fn get_rephrased_user_prompt(prompt: &str) -> Result<String, PromptError> {
    render(&REPHRASE_TEMPLATE, &UserPrompt(prompt))
}

lazy_static! {
    static ref ESTIMATOR: Option<Tiktoken> = match Tiktoken::new("gpt-4") {
        Ok(counter) => Some(counter),
        Err(e) => {
            warn!("tiktoken is unavailable, estimating tokens by length: {}", e);
            None
        }
    };
}

/// Rough token count of a system message, good enough for budgeting.
pub fn estimate_tokens(message: &str) -> usize {
    match ESTIMATOR.as_ref() {
        Some(counter) => counter.count_msg_token(message),
        None => count_tokens_by_len(message),
    }
}

/// Warn when the message and the requested reply would overflow the model's context window.
///
/// Returns `false` only when the window is known and exceeded; the request is sent either way.
fn check_context_budget(message: &str, params: &ModelParams) -> bool {
    let estimated = estimate_tokens(message);
    debug!("system message is ~{} tokens, max_tokens={}", estimated, params.max_tokens);
    match fits_context(&params.model, estimated, usize::from(params.max_tokens)) {
        Some(false) => {
            warn!("~{} prompt tokens + max_tokens {} exceed the context window of {}",
                estimated, params.max_tokens, params.model);
            false
        }
        _ => true,
    }
}

/// Rephrase `prompt` with the model behind `client`.
///
/// The crafted system message is sent as the only message of one chat-completion request; the reply comes back with
/// surrounding whitespace trimmed. Every failure is reported as an [OptimizeError].
pub async fn rephrase_prompt<C>(client: &C,
                                prompt: &str,
                                params: &ModelParams,
                                canvas: Option<&PromptCanvas>) -> Result<String, OptimizeError>
    where C: ChatCompletion + ?Sized {
    let system_message = craft_system_message(canvas, prompt)?;
    check_context_budget(&system_message, params);
    let reply = client.complete(system_message, params).await?;
    Ok(reply.trim().to_string())
}

pub mod errors {
    use async_openai::error::OpenAIError;
    use thiserror::Error;

    use crate::prompt::errors::PromptError;

    /// The single failure surfaced to callers of the optimizer. Every variant reads as
    /// `Prompt engineering error: <cause>`.
    #[derive(Debug, Error)]
    pub enum OptimizeError {
        #[error("Prompt engineering error: {0}")]
        Prompt(#[from] PromptError),
        #[error("Prompt engineering error: {0}")]
        Api(#[from] OpenAIError),
        #[error("Prompt engineering error: invalid Groq base URL: {0}")]
        InvalidBaseUrl(#[from] url::ParseError),
        #[error("Prompt engineering error: The api_key client option must be set either by passing api_key to the client or by setting the GROQ_API_KEY environment variable")]
        MissingApiKey,
        #[error("Prompt engineering error: the model returned no content")]
        EmptyReply,
    }
}
