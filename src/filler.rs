use crate::prompt::errors::PromptError;
use crate::prompt::PartialPrompt;

/// Names the placeholders a filler is responsible for.
pub trait FillPlaceholders {
    fn placeholders_to_fill(&self) -> &'static [&'static str];
}

pub trait Fill: FillPlaceholders {
    fn fill(&self, partial_prompt: &mut PartialPrompt) -> Result<(), PromptError>;
}
