//! # grompt
//!
//! Prompt optimizer backed by Groq-hosted LLMs.
//!
//! `grompt` takes a prompt you wrote and asks a chat-completion model to rewrite it so that it is clearer, more
//! concise and more effective. It ships as a library, a command-line tool (`grompt`) and a small form-based web front
//! end (the `grompt-web` workspace member).
//!
//! ## Usage
//! ```bash
//! export GROQ_API_KEY=...
//! grompt "write me something about rust lifetimes"
//! ```
//!
//! ## Concepts and Design
//! Everything is a small pipeline:
//!
//! ```text
//! PromptCanvas / user prompt -> PromptTemplate -> PartialPrompt -> system message -> LLM -> rephrased prompt
//! ```
//!
//! ### Prompt Template and Placeholder
//!
//! A template looks like
//!
//! ```text
//! You are a {{persona}} focused on delivering results for {{audience}}.
//! ```
//!
//! `{{persona}}` is a placeholder, a slot to be filled, named `"persona"`. Names can be any string except those
//! containing line breaks.
//!
//! ### Partial Prompt
//!
//! A [`PartialPrompt`](crate::prompt::PartialPrompt) comes only from
//! [`PromptTemplate::construct_prompt`](crate::prompt::PromptTemplate::construct_prompt). It records which placeholder
//! gets filled by what value. Once every placeholder is filled it can be turned into a concrete prompt with
//! [`PartialPrompt::complete`](crate::prompt::PartialPrompt::complete).
//!
//! ### Filler
//!
//! Anything that implements [`Fill`](crate::filler::Fill). The [`PromptCanvas`](crate::canvas::PromptCanvas) is a
//! filler: persona, audience, task, steps, context, references, output format and tone go straight into their
//! placeholders.
//!
//! ### Endpoint
//!
//! The completed system message is sent as the only message of a chat-completion request. See
//! [`rephrase_prompt`](crate::optimizer::rephrase_prompt) and [`GroqClient`](crate::utils::llm::groq::GroqClient).
//!
//! ## Configuration
//!
//! | Variable                     | Default                   |
//! |------------------------------|---------------------------|
//! | `GROMPT_DEFAULT_MODEL`       | `llama-3.3-70b-versatile` |
//! | `GROMPT_DEFAULT_TEMPERATURE` | `0.5`                     |
//! | `GROMPT_DEFAULT_MAX_TOKENS`  | `1024`                    |
//! | `GROQ_API_KEY`               |                           |
//! | `GROQ_BASE_URL`              | `https://api.groq.com`    |
//! | `GROMPT_WEB_ADDR`            | `127.0.0.1:8501`          |
//!
//! A `.env` file in the working directory is honored by both binaries.
//!
//! ## Attribution
//! * `tiktoken-rs`: In [crate::utils::token::tiktoken], we re-export parts of the `tiktoken-rs` crate.


pub mod prompt;
pub mod filler;
pub mod canvas;
pub mod optimizer;
pub mod config;
pub mod utils;

pub use canvas::PromptCanvas;
pub use config::Settings;
pub use optimizer::{craft_system_message, get_rephrased_user_prompt, rephrase_prompt};
pub use optimizer::errors::OptimizeError;
pub use utils::llm::{ChatCompletion, ModelParams};
pub use utils::llm::groq::GroqClient;
