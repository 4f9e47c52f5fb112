use std::collections::HashMap;
use anyhow::Result;
pub use tiktoken_rs::{cl100k_base, get_bpe_from_model, CoreBPE};
use log::debug;

use crate::utils::token::CountToken;
use lazy_static::lazy_static;

const TOKENS_PER_MESSAGE: usize = 3;

lazy_static! {
    /// const map from model name to context window size.
    pub static ref MODEL_TO_MAX_TOKENS: HashMap<&'static str, usize> = HashMap::from([
        ("llama-3.3-70b-versatile", 131072),
        ("llama3-groq-8b-8192-tool-use-preview", 8192),
        ("llama3-70b-8192", 8192),
        ("llama3-8b-8192", 8192),
    ]);
}

/// Context window of a known model.
pub fn context_window(model: &str) -> Option<usize> {
    MODEL_TO_MAX_TOKENS.get(model).copied()
}

/// Whether `prompt_tokens` of request leave room for `max_tokens` of reply in the context window of `model`.
///
/// Returns `None` when the context window of the model is unknown.
pub fn fits_context(model: &str, prompt_tokens: usize, max_tokens: usize) -> Option<bool> {
    context_window(model).map(|window| prompt_tokens + max_tokens <= window)
}

/// Counter using the Tiktoken tokenizer.
///
/// Models without a tiktoken encoding (every Groq-hosted model) are counted with `cl100k_base`, which is close enough
/// to budget a request but not exact.
#[derive(Clone)]
#[readonly::make]
pub struct Tiktoken {
    /// The model name the counter was created for. read-only.
    #[readonly]
    pub model: String,
    /// The tokenizer. read-only.
    #[readonly]
    pub bpe: CoreBPE,
}

impl Tiktoken {
    /// Create a new Tiktoken counter.
    pub fn new(model: impl Into<String>) -> Result<Self> {
        let model = model.into();
        let bpe = match get_bpe_from_model(model.as_str()) {
            Ok(bpe) => bpe,
            Err(_) => {
                debug!("no tiktoken encoding for model {}, falling back to cl100k_base", model);
                cl100k_base()?
            }
        };
        Ok(Tiktoken {
            model,
            bpe,
        })
    }

    /// Count the number of tokens of a single chat message carrying `content`.
    pub fn count_msg_token(&self, content: &str) -> usize {
        self.count_token(content) + TOKENS_PER_MESSAGE
    }
}

impl CountToken for Tiktoken {
    fn count_token(&self, string: &str) -> usize {
        self.bpe.encode_with_special_tokens(string).len()
    }
}
