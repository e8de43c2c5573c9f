use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use mongodb::bson::oid::ObjectId;

use crate::domain::user::model::normalize_handle;
use crate::utils::errors::ApiError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub sender_id: String,
    pub receiver_id: String,
    #[serde(rename = "texto")]
    pub text: String,
    #[serde(rename = "dt", with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub sent_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageReceive {
    pub receiver_id: String,
    #[serde(rename = "texto")]
    pub text: String,
}

impl Message {
    pub fn new(sender: &str, receive: MessageReceive) -> Result<Self, ApiError> {
        let text = receive.text.trim();
        if text.is_empty() {
            return Err(ApiError::InvalidData("Message text cannot be empty".to_string()));
        }
        Ok(Message {
            id: None,
            sender_id: sender.to_string(),
            receiver_id: normalize_handle(&receive.receiver_id),
            text: text.to_string(),
            sent_at: Utc::now(),
        })
    }
}
