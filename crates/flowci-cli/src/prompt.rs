use std::collections::VecDeque;

use anyhow::{Result, anyhow};
use inquire::Confirm;

pub trait PromptDriver {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;
}

#[derive(Debug, Default)]
pub struct InquirePromptDriver;

impl InquirePromptDriver {
    pub fn new() -> Self {
        Self
    }
}

impl PromptDriver for InquirePromptDriver {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(message).with_default(default).prompt()?)
    }
}

#[derive(Debug, Default)]
pub struct ScriptedPromptDriver {
    responses: VecDeque<bool>,
}

impl ScriptedPromptDriver {
    pub fn new(responses: Vec<bool>) -> Self {
        Self {
            responses: responses.into(),
        }
    }
}

impl PromptDriver for ScriptedPromptDriver {
    fn confirm(&mut self, _message: &str, _default: bool) -> Result<bool> {
        self.responses
            .pop_front()
            .ok_or_else(|| anyhow!("prompt response queue is empty"))
    }
}
