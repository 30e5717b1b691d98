//! Finance assistant tasks built on a completion backend

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{expense_prompt, investment_prompt, EXPENSE_MAX_TOKENS, INVESTMENT_MAX_TOKENS};
use crate::error::Result;
use crate::model::{CompletionApi, CompletionRequest, ModelClient, ModelConfig};

/// Inputs of an investment return calculation.
///
/// Values are passed through to the prompt as given; negative, zero and
/// fractional values are all accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentQuery {
    pub initial_investment: f64,
    pub years: f64,
    pub expected_return: f64,
}

impl Default for InvestmentQuery {
    fn default() -> Self {
        Self {
            initial_investment: 10000.0,
            years: 10.0,
            expected_return: 7.0,
        }
    }
}

impl InvestmentQuery {
    pub fn new(initial_investment: f64, years: f64, expected_return: f64) -> Self {
        Self {
            initial_investment,
            years,
            expected_return,
        }
    }

    /// Render the instruction sent to the model
    pub fn prompt(&self) -> String {
        investment_prompt(self.initial_investment, self.years, self.expected_return)
    }

    /// Completion parameters for this query
    pub fn to_request(&self) -> CompletionRequest {
        CompletionRequest::new(self.prompt(), INVESTMENT_MAX_TOKENS)
    }
}

/// An expense to categorize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseQuery {
    pub description: String,
    pub amount: f64,
    /// Caller's own category guess; not sent to the model
    pub category: String,
}

impl ExpenseQuery {
    pub fn new(description: impl Into<String>, amount: f64, category: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
        }
    }

    /// Completion parameters for this expense
    pub fn to_request(&self) -> CompletionRequest {
        CompletionRequest::new(expense_prompt(&self.description), EXPENSE_MAX_TOKENS)
    }

    /// One-line summary of a categorized expense
    pub fn summary(&self, categorized: &str) -> String {
        format!(
            "Expense '{}' of ${:.2} categorized as '{}'",
            self.description, self.amount, categorized
        )
    }
}

/// Runs finance tasks against a completion backend.
///
/// The backend is created once and reused for every call.
pub struct FinanceAssistant<C: CompletionApi = ModelClient> {
    backend: C,
}

impl FinanceAssistant<ModelClient> {
    /// Create an assistant talking to an OpenAI-compatible endpoint
    pub fn from_config(config: ModelConfig) -> Self {
        Self::new(ModelClient::new(config))
    }
}

impl<C: CompletionApi> FinanceAssistant<C> {
    pub fn new(backend: C) -> Self {
        Self { backend }
    }

    /// Get the underlying completion backend
    pub fn backend(&self) -> &C {
        &self.backend
    }

    /// Ask the model to work out the returns of an investment.
    ///
    /// Returns the model's text with surrounding whitespace removed.
    pub async fn calculate_investment_returns(&self, query: &InvestmentQuery) -> Result<String> {
        debug!(?query, "Calculating investment returns");
        let response = self.backend.complete(query.to_request()).await?;
        Ok(response.text.trim().to_string())
    }

    /// Ask the model to categorize an expense
    pub async fn categorize_expense(&self, expense: &ExpenseQuery) -> Result<String> {
        debug!(?expense, "Categorizing expense");
        let response = self.backend.complete(expense.to_request()).await?;
        Ok(response.text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinanceError;
    use crate::model::MockCompletion;

    #[test]
    fn test_default_query_matches_example_invocation() {
        let query = InvestmentQuery::default();
        assert_eq!(query, InvestmentQuery::new(10000.0, 10.0, 7.0));

        let prompt = query.prompt();
        let investment = prompt.find("investment of 10000").unwrap();
        let years = prompt.find("over 10 years").unwrap();
        let rate = prompt.find("return of 7%").unwrap();
        assert!(investment < years && years < rate);
    }

    #[test]
    fn test_investment_request_limits_are_fixed() {
        for query in [
            InvestmentQuery::default(),
            InvestmentQuery::new(-1.0, 0.0, 250.75),
            InvestmentQuery::new(0.0, -3.5, f64::MAX),
        ] {
            let request = query.to_request();
            assert_eq!(request.max_tokens, 500);
            assert!(request.stop_sequences.is_empty());
        }
    }

    #[test]
    fn test_expense_summary() {
        let expense = ExpenseQuery::new("Grocery shopping at Whole Foods", 75.25, "Food");
        assert_eq!(
            expense.summary("Groceries"),
            "Expense 'Grocery shopping at Whole Foods' of $75.25 categorized as 'Groceries'"
        );
    }

    #[tokio::test]
    async fn test_calculate_investment_returns_sends_one_request() {
        let mock = MockCompletion::new(vec!["\n\nAfter 10 years: $19,671.51\n".to_string()]);
        let assistant = FinanceAssistant::new(mock);

        let text = assistant
            .calculate_investment_returns(&InvestmentQuery::default())
            .await
            .unwrap();

        assert_eq!(text, "After 10 years: $19,671.51");

        let requests = assistant.backend().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].max_tokens, 500);
        assert!(requests[0].stop_sequences.is_empty());
        assert!(requests[0].prompt.contains("10000"));
    }

    #[tokio::test]
    async fn test_categorize_expense_uses_description_only() {
        let mock = MockCompletion::new(vec![" Housing".to_string()]);
        let assistant = FinanceAssistant::new(mock);
        let expense = ExpenseQuery::new("Paid rent for May", 1200.0, "Rent");

        let category = assistant.categorize_expense(&expense).await.unwrap();
        assert_eq!(category, "Housing");

        let requests = assistant.backend().requests();
        assert_eq!(
            requests[0].prompt,
            "Categorize the following expense: Paid rent for May"
        );
        assert_eq!(requests[0].max_tokens, 50);
        assert!(!requests[0].prompt.contains("Rent"));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let assistant = FinanceAssistant::new(MockCompletion::default());
        let result = assistant
            .calculate_investment_returns(&InvestmentQuery::default())
            .await;

        assert!(matches!(result, Err(FinanceError::EmptyResponse(_))));
    }
}
