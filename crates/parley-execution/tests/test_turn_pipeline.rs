use parley_core::output::QuickReply;
use parley_core::{
    ConversationMemory, ConversationState, Data, ExtensionDescriptor, LifecycleTask, Result,
    TemplatingConfig,
};
use parley_execution::Lifecycle;
use parley_templating::OutputTemplateTask;
use serde_json::json;

/// Stand-in for an output-selection task: answers the latest input with a
/// templated greeting and two quick replies.
struct GreetingOutputTask;

impl LifecycleTask for GreetingOutputTask {
    fn id(&self) -> &str {
        "test.greeting"
    }

    fn task_type(&self) -> &str {
        "output"
    }

    fn execute(&self, memory: &mut ConversationMemory) -> Result<()> {
        let step = memory.current_step_mut();
        step.store_data(Data::new_public(
            "output",
            "You said '{{ memory.current.input }}'",
        ));
        let replies = vec![
            QuickReply::new("Tell me more about {{ memory.current.input }}", "more", false),
            QuickReply::new("{{ no_such_variable }}", "broken", false),
        ];
        step.store_data(Data::from_serializable("quickReplies", &replies)?);
        Ok(())
    }

    fn extension_descriptor(&self) -> ExtensionDescriptor {
        ExtensionDescriptor::new(self.id(), "Greeting")
    }
}

fn lifecycle() -> Lifecycle {
    Lifecycle::new()
        .with_task(Box::new(GreetingOutputTask))
        .with_task(Box::new(OutputTemplateTask::from_config(
            &TemplatingConfig::default(),
        )))
}

fn run_turn(lifecycle: &Lifecycle, memory: &mut ConversationMemory, input: &str) {
    memory.set_conversation_state(ConversationState::InProgress);
    memory.current_step_mut().store_data(Data::new("input", input));
    lifecycle.execute(memory).expect("Turn should succeed");
    memory.set_conversation_state(ConversationState::Ready);
}

#[test]
fn test_turn_produces_templated_output() {
    let lifecycle = lifecycle();
    let mut memory = ConversationMemory::new("bot", 1);

    run_turn(&lifecycle, &mut memory, "weather");

    let output = memory.current_step().conversation_output();
    assert_eq!(output.get("output"), &[json!("You said 'weather'")]);
    let quick_replies = output.get("quickReplies");
    assert_eq!(quick_replies.len(), 2);
    assert_eq!(
        quick_replies[0]["value"],
        json!("Tell me more about weather")
    );
    assert!(quick_replies[1].is_null());
    assert_eq!(memory.conversation_state(), ConversationState::Ready);
}

#[test]
fn test_multi_turn_history_with_undo_and_redo() {
    let lifecycle = lifecycle();
    let mut memory = ConversationMemory::with_id("conv", "bot", 1);

    run_turn(&lifecycle, &mut memory, "first");
    memory.start_next_step();
    run_turn(&lifecycle, &mut memory, "second");

    assert_eq!(memory.size(), 2);
    let all_steps = memory.all_steps();
    let outputs = all_steps.get_all_data("output:postTemplated");
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0][0].result, json!("You said 'second'"));
    assert_eq!(outputs[1][0].result, json!("You said 'first'"));

    memory.undo_last_step().unwrap();
    assert_eq!(
        memory.current_step().get_data("input").unwrap().result,
        json!("first")
    );

    memory.redo_last_step().unwrap();
    assert_eq!(
        memory.current_step().get_data("input").unwrap().result,
        json!("second")
    );
    assert_eq!(
        memory
            .all_steps()
            .get_latest_data("output")
            .unwrap()
            .result,
        json!("You said 'second'")
    );
}

#[test]
fn test_lifecycle_descriptors() {
    let descriptors = lifecycle().descriptors();
    let ids: Vec<&str> = descriptors.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["test.greeting", "parley.templating"]);
}
