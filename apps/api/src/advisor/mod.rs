//! The context-aware retrieval and recommendation engine, plus the turn
//! orchestrator that drives one full pass per inbound chat message.
//!
//! Everything except `turn` and `handlers` is pure computation.

pub mod assembler;
pub mod handlers;
pub mod intent;
pub mod lexicon;
pub mod prediction;
pub mod prompts;
pub mod retrieval;
pub mod turn;
