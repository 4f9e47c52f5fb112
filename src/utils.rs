pub mod token;
pub mod llm;
#[cfg(feature = "terminal_printing")]
pub mod printing;
pub(crate) mod prompt_processing;
