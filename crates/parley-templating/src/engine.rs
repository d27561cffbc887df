//! Templating engine boundary and its minijinja implementation.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use parley_core::TemplatingConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Variables visible to templates.
pub type TemplateContext = Map<String, Value>;

/// How rendered values are escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateMode {
    /// No escaping.
    Text,
    /// Interpolated values are HTML-escaped.
    Html,
}

/// Rendering failure for a single template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to render template '{template}': {cause}")]
pub struct TemplateEngineError {
    /// The template text that failed.
    pub template: String,
    pub cause: String,
}

impl TemplateEngineError {
    pub fn new(template: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self {
            template: template.into(),
            cause: cause.to_string(),
        }
    }
}

/// Renders template text against a context.
pub trait TemplatingEngine: Send + Sync {
    fn process_template(
        &self,
        template: &str,
        context: &TemplateContext,
        mode: TemplateMode,
    ) -> Result<String, TemplateEngineError>;
}

/// Jinja-syntax engine backed by minijinja, with one environment per mode.
pub struct MiniJinjaTemplatingEngine {
    text: Environment<'static>,
    html: Environment<'static>,
}

impl MiniJinjaTemplatingEngine {
    pub fn new(config: &TemplatingConfig) -> Self {
        Self {
            text: build_environment(config, TemplateMode::Text),
            html: build_environment(config, TemplateMode::Html),
        }
    }
}

impl Default for MiniJinjaTemplatingEngine {
    fn default() -> Self {
        Self::new(&TemplatingConfig::default())
    }
}

fn build_environment(config: &TemplatingConfig, mode: TemplateMode) -> Environment<'static> {
    let mut env = Environment::new();
    if config.strict_undefined {
        env.set_undefined_behavior(UndefinedBehavior::Strict);
    }
    env.set_trim_blocks(config.trim_blocks);
    env.set_auto_escape_callback(move |_name: &str| match mode {
        TemplateMode::Text => AutoEscape::None,
        TemplateMode::Html => AutoEscape::Html,
    });
    env
}

impl TemplatingEngine for MiniJinjaTemplatingEngine {
    fn process_template(
        &self,
        template: &str,
        context: &TemplateContext,
        mode: TemplateMode,
    ) -> Result<String, TemplateEngineError> {
        let env = match mode {
            TemplateMode::Text => &self.text,
            TemplateMode::Html => &self.html,
        };
        env.render_str(template, context)
            .map_err(|e| TemplateEngineError::new(template, e))
    }
}
