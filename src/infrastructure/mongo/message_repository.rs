use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};

use crate::domain::message::{model::Message, repository::MessageRepository};
use crate::infrastructure::database::mongo_context::{MongoContext, MESSAGES_COLLECTION};
use crate::utils::errors::ApiError;

pub struct MongoMessageRepository {
    messages: mongodb::Collection<Message>
}

impl MongoMessageRepository {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            messages: context.collection(MESSAGES_COLLECTION)
        }
    }

    async fn find_newest_first(&self, filter: Document) -> Result<Vec<Message>, ApiError> {
        let cursor = self.messages.find(filter).sort(doc! { "dt": -1 }).await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl MessageRepository for MongoMessageRepository {

    async fn send_message(&self, message: Message) -> Result<(), ApiError> {
        self.messages.insert_one(&message).await?;
        Ok(())
    }

    async fn get_received(&self, receiver: &str) -> Result<Vec<Message>, ApiError> {
        self.find_newest_first(doc! { "receiver_id": receiver }).await
    }

    async fn get_sent(&self, sender: &str) -> Result<Vec<Message>, ApiError> {
        self.find_newest_first(doc! { "sender_id": sender }).await
    }
}
