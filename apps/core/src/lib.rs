//! MindWise backend.
//!
//! A small wellness companion: a keyword chatbot with crisis resources, a
//! searchable content catalog, a per-user journal with sentiment feedback,
//! and a relay that turns recorded voice notes into text.

pub mod accounts;
pub mod brain;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fs_manager;
pub mod journal;
pub mod models;
pub mod server;
pub mod storage;
pub mod telemetry;
pub mod transcription;

#[cfg(test)]
mod tests;
