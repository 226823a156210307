//! Agent Runtime - LLM-powered change detection for employee records
//!
//! This crate turns a free-text request about an employee into at most one
//! pending change request:
//! 1. **Fetch** - look the employee up in the record store
//! 2. **Classify** (`classifier`) - prompt the model and parse its reply
//!    against the `NO_CHANGE` / `CHANGE|field|value` grammar
//! 3. **Persist** (`pipeline`) - record a pending change request when the
//!    value actually differs
//!
//! # Key Types
//!
//! - `ChangePipeline` - Orchestrates one request end to end
//! - `LlmClient` - Pluggable completion seam (Ollama over HTTP, or static)
//! - `ChangeOutcome` - Terminal state that renders the reply text
//!
//! # Safety Principle
//!
//! The LLM is strictly a translator. It never writes employee records; it
//! can only cause a pending request that someone else approves.

pub mod classifier;
pub mod llm;
pub mod pipeline;

pub use classifier::{parse_classification, Classification, IntentClassifier, MalformedReason};
pub use llm::{LlmClient, LlmError, OllamaClient, StaticLlmClient};
pub use pipeline::{ChangeOutcome, ChangePipeline};
