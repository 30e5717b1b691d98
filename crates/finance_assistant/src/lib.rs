//! finance_assistant: personal finance questions answered by a completion model
//!
//! This library provides:
//! - Prompt formatting for investment return calculations and expense categorization
//! - An OpenAI-compatible completion client behind the `CompletionApi` trait
//! - A mock backend for offline use and tests
//!
//! # Example
//!
//! ```no_run
//! use finance_assistant::{FinanceAssistant, InvestmentQuery, ModelConfig};
//!
//! #[tokio::main]
//! async fn main() -> finance_assistant::Result<()> {
//!     let config = ModelConfig::default().with_api_key("YOUR_API_KEY");
//!     let assistant = FinanceAssistant::from_config(config);
//!
//!     let text = assistant
//!         .calculate_investment_returns(&InvestmentQuery::new(10000.0, 10.0, 7.0))
//!         .await?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

// Core modules
pub mod error;

// Configuration module
pub mod config;

// Core functionality
pub mod assistant;
pub mod model;

pub use error::{ApiError, FinanceError, OpenAIError, Result};

pub use config::{expense_prompt, investment_prompt, EXPENSE_MAX_TOKENS, INVESTMENT_MAX_TOKENS};

pub use model::{
    CompletionApi, CompletionRequest, MockCompletion, ModelClient, ModelConfig, ModelResponse,
};

pub use assistant::{ExpenseQuery, FinanceAssistant, InvestmentQuery};
