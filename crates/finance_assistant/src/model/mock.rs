//! Mock completion backend returning predefined responses

use async_trait::async_trait;
use std::sync::Mutex;

use super::client::{CompletionApi, CompletionRequest, ModelResponse};
use crate::error::{FinanceError, Result};

/// Completion backend that cycles through canned responses and records
/// every request it receives.
#[derive(Debug, Default)]
pub struct MockCompletion {
    responses: Vec<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletion {
    /// Create a mock with predefined responses
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl CompletionApi for MockCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<ModelResponse> {
        let index = {
            let mut requests = self.requests.lock().unwrap_or_else(|e| e.into_inner());
            requests.push(request);
            requests.len() - 1
        };

        if self.responses.is_empty() {
            return Err(FinanceError::EmptyResponse(
                "mock has no responses".to_string(),
            ));
        }

        Ok(ModelResponse {
            text: self.responses[index % self.responses.len()].clone(),
            finish_reason: Some("stop".to_string()),
            total_time: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_cycles_responses() {
        let mock = MockCompletion::new(vec!["first".to_string(), "second".to_string()]);

        let a = mock.complete(CompletionRequest::new("a", 1)).await.unwrap();
        let b = mock.complete(CompletionRequest::new("b", 1)).await.unwrap();
        let c = mock.complete(CompletionRequest::new("c", 1)).await.unwrap();

        assert_eq!(a.text, "first");
        assert_eq!(b.text, "second");
        assert_eq!(c.text, "first");
        assert_eq!(mock.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_mock_without_responses_fails() {
        let mock = MockCompletion::default();
        let result = mock.complete(CompletionRequest::new("a", 1)).await;

        assert!(matches!(result, Err(FinanceError::EmptyResponse(_))));
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_recovers_from_poisoned_lock() {
        let mock = std::sync::Arc::new(MockCompletion::new(vec!["ok".to_string()]));

        let poisoner = std::sync::Arc::clone(&mock);
        let joined = std::thread::spawn(move || {
            let _guard = poisoner.requests.lock().unwrap();
            panic!("panic while holding the request log");
        })
        .join();
        assert!(joined.is_err());
        assert!(mock.requests.is_poisoned());

        let response = mock.complete(CompletionRequest::new("a", 1)).await.unwrap();
        assert_eq!(response.text, "ok");
        assert_eq!(mock.requests().len(), 1);
    }
}
