//! # Prompt Canvas
//! A structured description of the prompt you want: who the model should be, who it talks to, what it should do and
//! how the answer should look.
//!
//! A [PromptCanvas] is plain data. It is built once from user input, filled into the canvas template and dropped.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::filler::{Fill, FillPlaceholders};
use crate::prompt::errors::PromptError;
use crate::prompt::PartialPrompt;

/// Rendered in place of an empty list of steps or references.
pub const EMPTY_SECTION: &str = "None";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptCanvas {
    pub persona: String,
    pub audience: String,
    pub task: String,
    pub steps: Vec<String>,
    pub context: String,
    pub references: Vec<String>,
    pub output_format: String,
    pub tonality: String,
}

impl PromptCanvas {
    pub const PERSONA: &'static str = "persona";
    pub const AUDIENCE: &'static str = "audience";
    pub const TASK: &'static str = "task";
    pub const STEPS: &'static str = "steps";
    pub const CONTEXT: &'static str = "context";
    pub const REFERENCES: &'static str = "references";
    pub const OUTPUT_FORMAT: &'static str = "output_format";
    pub const TONALITY: &'static str = "tonality";

    const PLACEHOLDERS: [&'static str; 8] = [
        Self::PERSONA,
        Self::AUDIENCE,
        Self::TASK,
        Self::STEPS,
        Self::CONTEXT,
        Self::REFERENCES,
        Self::OUTPUT_FORMAT,
        Self::TONALITY,
    ];

    /// Split a multi-line text area into entries, one per non-blank line, trimmed.
    pub fn parse_lines(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Steps as a markdown list, or [EMPTY_SECTION].
    pub fn steps_section(&self) -> String {
        if self.steps.is_empty() {
            EMPTY_SECTION.to_string()
        } else {
            self.steps
                .iter()
                .map(|step| format!("- {step}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }

    /// References separated by commas, or [EMPTY_SECTION].
    pub fn references_section(&self) -> String {
        if self.references.is_empty() {
            EMPTY_SECTION.to_string()
        } else {
            self.references.join(", ")
        }
    }
}

impl FillPlaceholders for PromptCanvas {
    fn placeholders_to_fill(&self) -> &'static [&'static str] {
        &Self::PLACEHOLDERS
    }
}

impl Fill for PromptCanvas {
    fn fill(&self, partial_prompt: &mut PartialPrompt) -> Result<(), PromptError> {
        partial_prompt
            .try_fill(Self::PERSONA, self.persona.as_str())?
            .try_fill(Self::AUDIENCE, self.audience.as_str())?
            .try_fill(Self::TASK, self.task.as_str())?
            .try_fill(Self::STEPS, self.steps_section())?
            .try_fill(Self::CONTEXT, self.context.as_str())?
            .try_fill(Self::REFERENCES, self.references_section())?
            .try_fill(Self::OUTPUT_FORMAT, self.output_format.as_str())?
            .try_fill(Self::TONALITY, self.tonality.as_str())?;
        Ok(())
    }
}

/// Output formats offered by the form front end. The canvas itself accepts any string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    NaturalText,
    TechnicalDocumentation,
    Code,
    Markdown,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::NaturalText,
        OutputFormat::TechnicalDocumentation,
        OutputFormat::Code,
        OutputFormat::Markdown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::NaturalText => "Natural Text",
            OutputFormat::TechnicalDocumentation => "Technical Documentation",
            OutputFormat::Code => "Code",
            OutputFormat::Markdown => "Markdown",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::NaturalText
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
