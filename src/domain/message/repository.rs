use async_trait::async_trait;
use crate::{domain::message::model::Message, utils::errors::ApiError};

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn send_message(&self, message: Message) -> Result<(), ApiError>;
    async fn get_received(&self, receiver: &str) -> Result<Vec<Message>, ApiError>;
    async fn get_sent(&self, sender: &str) -> Result<Vec<Message>, ApiError>;
}
