//! Configuration module for finance_assistant
//!
//! This module contains:
//! - `prompts`: Prompt templates and per-task output limits

mod prompts;

pub use prompts::{expense_prompt, investment_prompt, EXPENSE_MAX_TOKENS, INVESTMENT_MAX_TOKENS};
