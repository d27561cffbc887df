//! Output templating task.
//!
//! Renders templated placeholders in the current step's output texts and
//! quick replies, keeping `<key>:preTemplated` / `<key>:postTemplated`
//! snapshots of every templated item.

use std::sync::Arc;

use parley_core::memory::join_key;
use parley_core::output::{
    KEY_OUTPUT, KEY_OUTPUT_HTML, KEY_QUICK_REPLIES, POST_TEMPLATED, PRE_TEMPLATED, QuickReply,
    is_template_snapshot_key,
};
use parley_core::{
    ConversationMemory, ConversationStep, Data, ExtensionDescriptor, LifecycleTask, Result,
    TemplatingConfig,
};
use serde_json::{Map, Value};

use crate::context::{ContextBuilder, MemoryItemConverter};
use crate::engine::{
    MiniJinjaTemplatingEngine, TemplateContext, TemplateEngineError, TemplateMode,
    TemplatingEngine,
};

const TARGET: &str = "parley::templating";

/// Lifecycle task that templates output texts and quick replies.
///
/// A failing output text is left out of the `output` group; a failing quick
/// reply becomes `null` in the `quickReplies` group. Neither aborts the turn.
pub struct OutputTemplateTask {
    templating_engine: Arc<dyn TemplatingEngine>,
    context_builder: Arc<dyn ContextBuilder>,
}

impl OutputTemplateTask {
    pub const ID: &'static str = "parley.templating";
    pub const TYPE: &'static str = KEY_OUTPUT;

    pub fn new(
        templating_engine: Arc<dyn TemplatingEngine>,
        context_builder: Arc<dyn ContextBuilder>,
    ) -> Self {
        Self {
            templating_engine,
            context_builder,
        }
    }

    /// minijinja engine with [`MemoryItemConverter`] as context builder.
    pub fn from_config(config: &TemplatingConfig) -> Self {
        Self::new(
            Arc::new(MiniJinjaTemplatingEngine::new(config)),
            Arc::new(MemoryItemConverter::new()),
        )
    }

    fn template_output_texts(
        &self,
        step: &mut ConversationStep,
        output_data: Vec<Data>,
        context: &TemplateContext,
    ) {
        for mut output in output_data {
            let Some(mode) = template_mode(&output.key) else {
                tracing::trace!(target: TARGET, key = %output.key, "Skipping non-templated output key");
                continue;
            };

            let pre_templated = source_template(step, &output);
            match self.render_value(&pre_templated, context, mode) {
                Ok(post_templated) => {
                    output.set_result(post_templated.clone());
                    store_snapshots(step, &output.key, pre_templated, Some(post_templated.clone()));
                    step.store_data(output);
                    step.add_conversation_output_value(KEY_OUTPUT, post_templated);
                }
                Err(e) => {
                    tracing::error!(
                        target: TARGET,
                        key = %output.key,
                        template = %e.template,
                        "Failed to template output: {}",
                        e
                    );
                    store_snapshots(step, &output.key, pre_templated, None);
                }
            }
        }
    }

    fn template_quick_replies(
        &self,
        step: &mut ConversationStep,
        quick_reply_data: Vec<Data>,
        context: &TemplateContext,
    ) -> Result<()> {
        for mut data in quick_reply_data {
            let pre_templated = source_template(step, &data);
            let Value::Array(entries) = &pre_templated else {
                tracing::error!(
                    target: TARGET,
                    key = %data.key,
                    "Quick reply data is not a list, skipping"
                );
                continue;
            };

            let mut post_templated = Vec::with_capacity(entries.len());
            for entry in entries {
                post_templated.push(self.template_quick_reply_entry(&data.key, entry, context)?);
            }

            let post_value = Value::Array(post_templated.clone());
            data.set_result(post_value.clone());
            store_snapshots(step, &data.key, pre_templated, Some(post_value));
            step.store_data(data);
            step.add_conversation_output_list(KEY_QUICK_REPLIES, post_templated);
        }
        Ok(())
    }

    /// Renders one list entry; a null, malformed or failing entry becomes
    /// `null` so the list keeps its length.
    fn template_quick_reply_entry(
        &self,
        key: &str,
        entry: &Value,
        context: &TemplateContext,
    ) -> Result<Value> {
        if entry.is_null() {
            return Ok(Value::Null);
        }
        // Deserializing hands out a copy; the stored original stays untouched.
        let quick_reply: QuickReply = match serde_json::from_value(entry.clone()) {
            Ok(quick_reply) => quick_reply,
            Err(e) => {
                tracing::error!(
                    target: TARGET,
                    key = %key,
                    "Quick reply entry is malformed: {}",
                    e
                );
                return Ok(Value::Null);
            }
        };
        match self.template_quick_reply(quick_reply, context) {
            Ok(templated) => Ok(serde_json::to_value(templated)?),
            Err(e) => {
                tracing::error!(
                    target: TARGET,
                    key = %key,
                    template = %e.template,
                    "Failed to template quick reply: {}",
                    e
                );
                Ok(Value::Null)
            }
        }
    }

    fn template_quick_reply(
        &self,
        mut quick_reply: QuickReply,
        context: &TemplateContext,
    ) -> std::result::Result<QuickReply, TemplateEngineError> {
        quick_reply.value =
            self.templating_engine
                .process_template(&quick_reply.value, context, TemplateMode::Text)?;
        quick_reply.expressions = self.templating_engine.process_template(
            &quick_reply.expressions,
            context,
            TemplateMode::Text,
        )?;
        Ok(quick_reply)
    }

    /// Strings are rendered whole; for objects only string-valued entries are
    /// rendered. Other payloads pass through unchanged.
    fn render_value(
        &self,
        value: &Value,
        context: &TemplateContext,
        mode: TemplateMode,
    ) -> std::result::Result<Value, TemplateEngineError> {
        match value {
            Value::String(template) => Ok(Value::String(
                self.templating_engine
                    .process_template(template, context, mode)?,
            )),
            Value::Object(entries) => {
                let mut rendered = Map::with_capacity(entries.len());
                for (key, entry) in entries {
                    let entry = match entry {
                        Value::String(template) => Value::String(
                            self.templating_engine
                                .process_template(template, context, mode)?,
                        ),
                        other => other.clone(),
                    };
                    rendered.insert(key.clone(), entry);
                }
                Ok(Value::Object(rendered))
            }
            other => Ok(other.clone()),
        }
    }
}

impl LifecycleTask for OutputTemplateTask {
    fn id(&self) -> &str {
        Self::ID
    }

    fn task_type(&self) -> &str {
        Self::TYPE
    }

    fn execute(&self, memory: &mut ConversationMemory) -> Result<()> {
        let context = self.context_builder.build(memory)?;

        let current_step = memory.current_step();
        let output_data = templatable_data(current_step, KEY_OUTPUT);
        let quick_reply_data = templatable_data(current_step, KEY_QUICK_REPLIES);

        let current_step = memory.current_step_mut();
        if !output_data.is_empty() {
            current_step.reset_conversation_output(KEY_OUTPUT);
        }
        self.template_output_texts(current_step, output_data, &context);

        if !quick_reply_data.is_empty() {
            current_step.reset_conversation_output(KEY_QUICK_REPLIES);
        }
        self.template_quick_replies(current_step, quick_reply_data, &context)
    }

    fn extension_descriptor(&self) -> ExtensionDescriptor {
        ExtensionDescriptor::new(Self::ID, "Templating")
    }
}

/// Exact `output` renders as text, `output:html*` as HTML; anything else is
/// not templated.
fn template_mode(key: &str) -> Option<TemplateMode> {
    if key == KEY_OUTPUT {
        Some(TemplateMode::Text)
    } else if key.starts_with(KEY_OUTPUT_HTML) {
        Some(TemplateMode::Html)
    } else {
        None
    }
}

/// Items under `prefix`, excluding snapshots written by earlier runs.
fn templatable_data(step: &ConversationStep, prefix: &str) -> Vec<Data> {
    step.get_all_data(prefix)
        .into_iter()
        .filter(|data| !is_template_snapshot_key(&data.key))
        .cloned()
        .collect()
}

/// The template an item was written with. After a first run the item holds
/// rendered text, so later runs in the same step render from the
/// `preTemplated` snapshot instead.
fn source_template(step: &ConversationStep, data: &Data) -> Value {
    step.get_data(&join_key(&data.key, PRE_TEMPLATED))
        .map(|snapshot| snapshot.result.clone())
        .unwrap_or_else(|| data.result.clone())
}

/// Writes both snapshots. Without a rendered value, a `postTemplated`
/// snapshot left by an earlier run is overwritten with `null`.
fn store_snapshots(
    step: &mut ConversationStep,
    key: &str,
    pre_templated: Value,
    post_templated: Option<Value>,
) {
    step.store_data(
        Data::new(join_key(key, PRE_TEMPLATED), pre_templated).with_origin(OutputTemplateTask::ID),
    );
    let post_key = join_key(key, POST_TEMPLATED);
    let post_templated = match post_templated {
        Some(post_templated) => post_templated,
        None if step.get_data(&post_key).is_some() => Value::Null,
        None => return,
    };
    step.store_data(Data::new(post_key, post_templated).with_origin(OutputTemplateTask::ID));
}
