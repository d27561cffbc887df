//! Output templating for the Parley dialog engine.
//!
//! This crate provides the templating engine boundary (with a minijinja
//! implementation), the context builder that turns conversation memory into
//! template variables, and the lifecycle task that templates a turn's output.

pub mod context;
pub mod engine;
pub mod task;

pub use context::{ContextBuilder, MemoryItemConverter};
pub use engine::{
    MiniJinjaTemplatingEngine, TemplateContext, TemplateEngineError, TemplateMode,
    TemplatingEngine,
};
pub use task::OutputTemplateTask;
