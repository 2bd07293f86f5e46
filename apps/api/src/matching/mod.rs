// Role Matching Engine and recommendation ranking.
// engine.rs is pure — no I/O. recommend.rs is the only place where scoring
// meets persistence. All LLM work happens upstream in extraction.

pub mod categories;
pub mod engine;
pub mod handlers;
pub mod levels;
pub mod recommend;
pub mod tags;
