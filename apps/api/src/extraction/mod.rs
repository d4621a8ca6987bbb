// Event extraction pipeline.
// Implements: mode prompts, reply interpretation, date resolution, orchestration,
// and the in-memory event list behind the HTTP handlers.
// All LLM calls go through llm_client — no direct HTTP calls here.

pub mod date_resolver;
pub mod extractor;
pub mod handlers;
pub mod interpreter;
pub mod prompts;
pub mod store;
