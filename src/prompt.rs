//! # Prompt
//! A prompt is simply a string
//! ## PromptTemplate
//! A prompt template is a string with placeholders.
//!
//! ## Placeholder
//! A placeholder is a string that is in the format of `{{name}}`. It can be filled with a value.
//! It has a name, which is the string inside the double braces.
//!
//! ## PartialPrompt
//! A partial prompt is a prompt template with some placeholders filled. A partial prompt can be only constructed from a prompt template via [PromptTemplate::construct_prompt].
//!
//! The placeholders in a partial prompt can be filled with values via [PartialPrompt::try_fill]. You can also use this method to update the filling values of the placeholders.
//! When all placeholders are filled, the partial prompt can be completed via [PartialPrompt::complete], in which the placeholders in a template are **actually** replaced with the filling values.
//!
//! ### Counting tokens
//! A partial prompt can be used to count the number of tokens in the prompt, see [PartialPrompt::current_token_num].


use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use crate::prompt::errors::PromptError;
use crate::utils::prompt_processing::{get_placeholders, replace_placeholders};
use crate::utils::token::CountToken;
use log::warn;


/// A prompt template with some placeholders filled. A partial prompt can be only constructed from a prompt template via [PromptTemplate::construct_prompt].
#[derive(Debug, Clone)]
#[readonly::make]
pub struct PartialPrompt {
    /// The template of the partial prompt, readonly
    #[readonly]
    pub template: PromptTemplate,

    /// Mapping from placeholder name to its filling value
    pub(crate) placeholder_to_vals: HashMap<String, Option<String>>,

    /// Record the placeholders that are not filled yet
    pub(crate) unfilled_placeholders: HashSet<String>,
}

impl PartialPrompt {
    /// Fill the placeholder in the partial prompt with the given value.
    /// Returns an error if the placeholder does not exist.
    pub fn try_fill(&mut self, placeholder: impl Into<String>, value: impl Into<String>) -> Result<&mut Self, PromptError> {
        let placeholder = placeholder.into();
        if self.placeholder_to_vals.contains_key(&placeholder) {
            self.unfilled_placeholders.remove(&placeholder);
            self.placeholder_to_vals.insert(placeholder, Some(value.into()));
            Ok(self)
        } else {
            Err(PromptError::placeholder_not_exist(placeholder, &self.template.placeholders))
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.unfilled_placeholders.is_empty()
    }

    /// Count the number of tokens in the prompt as it currently stands. Unfilled placeholders are counted with their markup.
    pub fn current_token_num(&self, counter: &impl CountToken) -> usize {
        counter.count_token(&replace_placeholders(self.template.str(), &self.placeholder_to_vals))
    }

    /// Complete the partial prompt and return the completed prompt.
    /// Returns an error if there are still unfilled placeholders.
    pub fn complete(&self) -> Result<String, PromptError> {
        if self.is_complete() {
            Ok(replace_placeholders(self.template.str(), &self.placeholder_to_vals))
        } else {
            Err(PromptError::UnfilledPlaceholders {
                required: sorted(self.template.placeholders.iter()),
                unfilled: sorted(self.unfilled_placeholders.iter()),
            })
        }
    }
}

/// A prompt template with placeholders.
#[derive(Debug, Clone)]
#[readonly::make]
pub struct PromptTemplate {
    /// The template string, immutable
    template: Arc<String>,

    /// The placeholders in the template, readonly
    #[readonly]
    pub placeholders: HashSet<String>,
}

impl PromptTemplate {
    /// Create a prompt template from a string. Warns if the template does not have any placeholder.
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let placeholders = get_placeholders(&template);
        if placeholders.is_empty() {
            warn!("Your prompt template does not have a placeholder. If this is intended, ignore this message. \
            Otherwise, check whether you have written placeholders correctly.\n\
            Got prompt template:\n\
            {}", template);
        }
        Self {
            template: Arc::new(template),
            placeholders,
        }
    }

    /// Get the prompt template as a string.
    #[inline]
    pub fn str(&self) -> &str {
        &self.template
    }

    /// Construct a partial prompt from the prompt template.
    pub fn construct_prompt(&self) -> PartialPrompt {
        PartialPrompt {
            template: self.clone(),
            placeholder_to_vals: self.placeholders.iter().map(|p| (p.clone(), None)).collect(),
            unfilled_placeholders: self.placeholders.clone(),
        }
    }
}

fn sorted<'a>(names: impl Iterator<Item=&'a String>) -> Vec<String> {
    let mut names: Vec<String> = names.cloned().collect();
    names.sort();
    names
}

pub mod errors {
    use std::collections::HashSet;
    use thiserror::Error;

    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum PromptError {
        /// Tried to fill a placeholder that does not exist in the prompt template of the partial prompt.
        #[error("PlaceholderNotExist: try to fill placeholder = {placeholder}, but available placeholders are {available:?}")]
        PlaceholderNotExist {
            placeholder: String,
            available: Vec<String>,
        },
        /// Tried to complete a partial prompt but there are still unfilled placeholders.
        #[error("UnfilledPlaceholders: to complete the prompt template,\n  Requires Placeholders:{required:?}\n  Unfilled Placeholders:{unfilled:?}")]
        UnfilledPlaceholders {
            required: Vec<String>,
            unfilled: Vec<String>,
        },
    }

    impl PromptError {
        pub(crate) fn placeholder_not_exist(placeholder: impl Into<String>, available: &HashSet<String>) -> Self {
            PromptError::PlaceholderNotExist {
                placeholder: placeholder.into(),
                available: super::sorted(available.iter()),
            }
        }
    }
}

#[cfg(test)]
mod test_prompt {
    use super::errors::PromptError;
    use super::PromptTemplate;
    use crate::utils::token::count_tokens_by_len;

    #[test]
    fn test_construct_and_complete() {
        let template = PromptTemplate::new("Hello {{name}}, today is {{day}}. Bye {{name}}.");
        let mut prompt = template.construct_prompt();
        assert!(!prompt.is_complete());
        prompt
            .try_fill("name", "Ada").unwrap()
            .try_fill("day", "Monday").unwrap();
        assert!(prompt.is_complete());
        assert_eq!("Hello Ada, today is Monday. Bye Ada.", prompt.complete().unwrap());
    }

    #[test]
    fn test_refill_overwrites() {
        let template = PromptTemplate::new("{{a}}");
        let mut prompt = template.construct_prompt();
        prompt.try_fill("a", "first").unwrap();
        prompt.try_fill("a", "second").unwrap();
        assert_eq!("second", prompt.complete().unwrap());
    }

    #[test]
    fn test_fill_unknown_placeholder() {
        let template = PromptTemplate::new("{{a}} {{b}}");
        let mut prompt = template.construct_prompt();
        let err = prompt.try_fill("c", "x").unwrap_err();
        assert_eq!(
            PromptError::PlaceholderNotExist {
                placeholder: "c".to_string(),
                available: vec!["a".to_string(), "b".to_string()],
            },
            err
        );
    }

    #[test]
    fn test_complete_with_unfilled() {
        let template = PromptTemplate::new("{{a}} {{b}}");
        let mut prompt = template.construct_prompt();
        prompt.try_fill("b", "bob").unwrap();
        match prompt.complete() {
            Err(PromptError::UnfilledPlaceholders { required, unfilled }) => {
                assert_eq!(vec!["a".to_string(), "b".to_string()], required);
                assert_eq!(vec!["a".to_string()], unfilled);
            }
            other => panic!("expected UnfilledPlaceholders, got {:?}", other),
        }
    }

    #[test]
    fn test_current_token_num() {
        let template = PromptTemplate::new("ab {{x}}");
        let mut prompt = template.construct_prompt();
        assert_eq!("ab {{x}}".len(), prompt.current_token_num(&count_tokens_by_len));
        prompt.try_fill("x", "c").unwrap();
        assert_eq!(4, prompt.current_token_num(&count_tokens_by_len));
    }

    #[test]
    fn test_template_without_placeholder() {
        let template = PromptTemplate::new("no slots here");
        assert!(template.placeholders.is_empty());
        assert_eq!("no slots here", template.construct_prompt().complete().unwrap());
    }
}
