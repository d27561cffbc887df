use parley_core::{
    ConversationMemory, ConversationState, ExtensionDescriptor, LifecycleTask, MemoryError,
    Result,
};

/// Responsible for running the lifecycle tasks of one turn.
///
/// Tasks run sequentially in the order they were added, because later tasks
/// read data written by earlier ones in the same turn.
#[derive(Default)]
pub struct Lifecycle {
    tasks: Vec<Box<dyn LifecycleTask>>,
}

impl Lifecycle {
    /// Creates an empty `Lifecycle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task to the end of the pipeline.
    pub fn add_task(&mut self, task: Box<dyn LifecycleTask>) -> &mut Self {
        self.tasks.push(task);
        self
    }

    /// Builder-style variant of [`Lifecycle::add_task`].
    pub fn with_task(mut self, task: Box<dyn LifecycleTask>) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Metadata of every task, in execution order.
    pub fn descriptors(&self) -> Vec<ExtensionDescriptor> {
        self.tasks.iter().map(|t| t.extension_descriptor()).collect()
    }

    /// Runs every task against `memory`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if all tasks ran, or the conversation has already ended
    /// * `Err(MemoryError::Task)` for the first failing task; later tasks are
    ///   not run and the conversation state is set to `Error`
    pub fn execute(&self, memory: &mut ConversationMemory) -> Result<()> {
        if memory.conversation_state().is_ended() {
            tracing::debug!(
                target: "parley::lifecycle",
                conversation_id = %memory.id(),
                "Conversation has ended, skipping lifecycle"
            );
            return Ok(());
        }

        for task in &self.tasks {
            let span = tracing::info_span!(
                "lifecycle_task",
                task_id = %task.id(),
                task_type = %task.task_type(),
                conversation_id = %memory.id(),
            );
            let result = span.in_scope(|| {
                tracing::debug!(target: "parley::lifecycle", "Executing task");
                task.execute(memory)
            });

            if let Err(e) = result {
                tracing::error!(
                    target: "parley::lifecycle",
                    task_id = %task.id(),
                    "Lifecycle task failed: {}",
                    e
                );
                memory.set_conversation_state(ConversationState::Error);
                return Err(match e {
                    MemoryError::Task { .. } => e,
                    other => MemoryError::task(task.id(), other.to_string()),
                });
            }
        }
        Ok(())
    }
}
