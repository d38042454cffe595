//! Context-similarity feature variants

pub mod bow;
pub mod dbow;
pub mod llm;
pub mod crp;

pub use bow::BowContext;
pub use dbow::DbowContext;
pub use llm::LlmDbowContext;
pub use crp::CrpDbowContext;
