pub mod database;
pub mod gemini;
pub mod mongo;
