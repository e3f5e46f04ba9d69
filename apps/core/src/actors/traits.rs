use crate::actors::messages::ChatRequest;
use crate::error::AppError;
use async_trait::async_trait;

/// Defines the public interface for the text generation backend.
///
/// This trait abstracts the specific implementation of the backend, allowing
/// the HTTP client to be swapped for an in-process fake in tests.
#[async_trait]
pub trait ChatBackend: Send + Sync + 'static {
    /// Sends one user message, with its mode and recent history, and returns
    /// the assistant's reply.
    async fn generate(&self, request: ChatRequest) -> Result<String, AppError>;
}
