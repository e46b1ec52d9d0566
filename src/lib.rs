//! Travel Insight API Library
//!
//! This library provides the core functionality for the Travel Insight API:
//! prompt assembly, the model provider client, insight extraction from raw
//! model output, and the HTTP handlers for both deployment variants
//! (streaming and batch).
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers and router constructors.
//! - `insights`: Insight extraction from model output.
//! - `model_client`: Model provider client.
//! - `models`: Core data models.
//! - `prompts`: Analysis prompt templates.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod insights;
pub mod model_client;
pub mod models;
pub mod prompts;
