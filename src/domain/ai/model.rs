use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Returned to the caller when no API key is configured.
pub const NO_KEY_MESSAGE: &str = "Erro de Chave API.";

/// Returned to the caller when every model in the list failed.
pub const OFFLINE_MESSAGE: &str = "IA Offline.";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Model returned no text")]
    EmptyResponse,
}

/// Image bytes ready to be sent inline to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AiAnswer {
    pub texto: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClinicListing {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "nota")]
    pub rating: String,
    #[serde(rename = "avaliacao")]
    pub review: String,
    #[serde(rename = "pros")]
    pub pros: String,
    #[serde(rename = "contras")]
    pub cons: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClinicSearchResult {
    pub locais: Vec<ClinicListing>,
    /// Raw model answer, kept for when nothing could be parsed.
    pub texto: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ClinicQuery {
    #[serde(default)]
    pub busca: String,
}

/// Reads `NOME|NOTA|AVAL|PROS|CONTRAS` lines. Lines with fewer than five
/// fields are skipped, extra fields are ignored.
pub fn parse_clinic_listings(text: &str) -> Vec<ClinicListing> {
    text.lines()
        .filter(|line| line.contains('|'))
        .filter_map(|line| {
            let line = line
                .trim()
                .trim_start_matches(|c: char| c == '-' || c == '*' || c == '•')
                .trim();
            let fields: Vec<&str> = line
                .trim_matches('|')
                .split('|')
                .map(|field| field.trim().trim_matches('*').trim())
                .collect();

            if fields.len() < 5 || fields[0].is_empty() {
                return None;
            }
            // markdown table separators, e.g. |---|---|
            if fields.iter().all(|field| field.chars().all(|c| c == '-' || c == ':')) {
                return None;
            }

            Some(ClinicListing {
                name: fields[0].to_string(),
                rating: fields[1].to_string(),
                review: fields[2].to_string(),
                pros: fields[3].to_string(),
                cons: fields[4].to_string(),
            })
        })
        .collect()
}
