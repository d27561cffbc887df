//! Lifecycle task contract.
//!
//! A lifecycle task is one processing stage of a turn. Tasks are plain values
//! that hold their collaborators; an executor owns an ordered list of them and
//! invokes each once per turn with the live [`ConversationMemory`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::memory::ConversationMemory;

/// Descriptive metadata exposed for external discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionDescriptor {
    pub id: String,
    pub display_name: String,
}

impl ExtensionDescriptor {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// A processing stage invoked once per turn.
///
/// Implementations read freely through [`ConversationMemory::all_steps`] but
/// only write to the current step (`store_data`, output groups). They must not
/// undo, redo or advance the history.
pub trait LifecycleTask: Send + Sync {
    /// Stable identifier of the task.
    fn id(&self) -> &str;

    /// Type tag grouping related tasks, e.g. `"output"`.
    fn task_type(&self) -> &str;

    /// Processes the current turn.
    fn execute(&self, memory: &mut ConversationMemory) -> Result<()>;

    fn extension_descriptor(&self) -> ExtensionDescriptor;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Data;

    struct EchoTask;

    impl LifecycleTask for EchoTask {
        fn id(&self) -> &str {
            "test.echo"
        }

        fn task_type(&self) -> &str {
            "output"
        }

        fn execute(&self, memory: &mut ConversationMemory) -> Result<()> {
            let input = memory
                .all_steps()
                .get_latest_data("input")
                .map(|d| d.result.clone())
                .unwrap_or_default();
            memory
                .current_step_mut()
                .store_data(Data::new("output", input).with_origin(self.id()));
            Ok(())
        }

        fn extension_descriptor(&self) -> ExtensionDescriptor {
            ExtensionDescriptor::new(self.id(), "Echo")
        }
    }

    #[test]
    fn test_task_reads_history_and_writes_current_step() {
        let mut memory = ConversationMemory::with_id("c", "b", 1);
        memory.current_step_mut().store_data(Data::new("input", "hello"));
        memory.start_next_step();

        let task: Box<dyn LifecycleTask> = Box::new(EchoTask);
        task.execute(&mut memory).unwrap();

        let output = memory.current_step().get_data("output").unwrap();
        assert_eq!(output.result, serde_json::json!("hello"));
        assert_eq!(output.origin_task_id.as_deref(), Some("test.echo"));
        assert_eq!(memory.size(), 2);
        assert_eq!(task.extension_descriptor().display_name, "Echo");
    }
}
