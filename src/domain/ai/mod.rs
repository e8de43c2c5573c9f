pub mod model;
pub mod photo;
pub mod prompts;
pub mod service;
