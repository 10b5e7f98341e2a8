//! Scripted demo scenarios
//!
//! A timer-free producer that drives a store through a complete canned
//! comparison run: the coordinator delegates to the analyst, both
//! specialists and the super-critic on the fabric side, while a single
//! model answers on the traditional side. Useful for demos and for
//! exercising the full producer contract end to end.
//!
//! All timing here is descriptive data (`processing_time_ms`, message
//! timestamps); the script never sleeps. Real timing-driven behavior
//! belongs to an orchestration backend, not this crate.

use chrono::Utc;

use crate::models::agent::{AgentRecordBuilder, AgentRole, AgentStatus};
use crate::models::message::{AgentMessage, MessageType, Participant};
use crate::store::SessionStore;

/// A built-in demo task
#[derive(Debug, Clone, Copy)]
pub struct ExampleTask {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
}

/// The built-in demo tasks offered by the task picker
pub fn example_tasks() -> &'static [ExampleTask] {
    &[
        ExampleTask {
            id: 1,
            title: "Customer Review Analysis",
            description: "Math + Text hybrid analysis",
            prompt: "Analyze these customer reviews and provide insights:\n\n\
                Reviews:\n\
                1. \"Great product! Very satisfied. Rating: 5/5\"\n\
                2. \"Decent quality but overpriced. Rating: 3/5\"\n\
                3. \"Excellent service and fast delivery! Rating: 5/5\"\n\
                4. \"Not what I expected, disappointed. Rating: 2/5\"\n\
                5. \"Amazing value for money! Rating: 4/5\"\n\n\
                Calculate the average rating and analyze overall sentiment trends.",
        },
        ExampleTask {
            id: 2,
            title: "Complex Reasoning",
            description: "Multi-step logic and calculation",
            prompt: "A company's revenue grew by 15% in Q1, decreased by 8% in Q2, and grew \
                by 22% in Q3. If the starting revenue was $1,000,000, what is the final \
                revenue? Also, summarize the quarterly performance trend.",
        },
        ExampleTask {
            id: 3,
            title: "Quality Validation",
            description: "Shows super-critic's value",
            prompt: "Write a product description for a smart home thermostat that saves \
                energy. The description should be compelling, accurate, and highlight key \
                benefits.",
        },
        ExampleTask {
            id: 4,
            title: "Research & Synthesis",
            description: "Requires decomposition",
            prompt: "Explain the key differences between supervised and unsupervised machine \
                learning. Provide 2 real-world examples for each category.",
        },
    ]
}

/// Session ids produced by a scripted run
#[derive(Debug, Clone)]
pub struct ScriptedRun {
    pub fabric_session_id: String,
    pub traditional_session_id: String,
}

struct Script<'a> {
    store: &'a mut SessionStore,
    session_id: String,
    next_message: u32,
    clock_ms: i64,
}

impl<'a> Script<'a> {
    fn new(store: &'a mut SessionStore, session_id: String) -> Self {
        Self {
            store,
            session_id,
            next_message: 0,
            clock_ms: Utc::now().timestamp_millis(),
        }
    }

    fn send(
        &mut self,
        from: Participant,
        to: Participant,
        message_type: MessageType,
        content: &str,
        parent: Option<&str>,
    ) -> String {
        self.next_message += 1;
        self.clock_ms += 180;
        let id = format!("{}-msg-{}", self.session_id, self.next_message);

        self.store.append_message(
            &self.session_id,
            AgentMessage {
                id: id.clone(),
                from,
                to,
                from_instance_id: None,
                to_instance_id: None,
                content: content.to_string(),
                timestamp: self.clock_ms,
                message_type,
                parent_message_id: parent.map(String::from),
            },
        );
        id
    }

    fn specialist_round(
        &mut self,
        role: AgentRole,
        request: &str,
        response: &str,
        parent: &str,
        prompt_tokens: u64,
        completion_tokens: u64,
        cost: f64,
        processing_time_ms: u64,
    ) {
        let agent = Participant::Agent(role);
        let coordinator = Participant::Agent(AgentRole::Coordinator);

        let request_id = self.send(coordinator, agent, MessageType::Request, request, Some(parent));
        self.send(
            agent,
            coordinator,
            MessageType::Response,
            response,
            Some(&request_id),
        );

        let record = AgentRecordBuilder::new(role)
            .tokens(prompt_tokens, completion_tokens)
            .cost(cost)
            .llm_calls(1)
            .messages_sent(1)
            .processing_time_ms(processing_time_ms)
            .status(AgentStatus::Done)
            .build();
        self.store.upsert_agent_record(&self.session_id, record);
    }
}

/// Drive a store through a full canned comparison run.
///
/// Creates a comparison session for `input`, replays the fabric
/// delegation flow and the traditional baseline, and finalizes both
/// slots; the store's comparison is ready when this returns.
pub fn run_scripted_comparison(store: &mut SessionStore, input: &str) -> ScriptedRun {
    let (fabric_id, traditional_id) = store.create_comparison_session(input);

    run_fabric_script(store, &fabric_id, input);
    run_traditional_script(store, &traditional_id, input);

    ScriptedRun {
        fabric_session_id: fabric_id,
        traditional_session_id: traditional_id,
    }
}

fn run_fabric_script(store: &mut SessionStore, session_id: &str, input: &str) {
    let coordinator = Participant::Agent(AgentRole::Coordinator);
    let mut script = Script::new(store, session_id.to_string());

    let task_id = script.send(Participant::User, coordinator, MessageType::Request, input, None);

    // Coordinator starts thinking before any delegation completes
    script.store.upsert_agent_record(
        session_id,
        AgentRecordBuilder::new(AgentRole::Coordinator)
            .status(AgentStatus::Thinking)
            .build(),
    );

    script.specialist_round(
        AgentRole::Analyst,
        "Break the task into sub-problems and identify what each specialist should handle.",
        "Decomposed into a numeric component and a language component; both specialists needed.",
        &task_id,
        412,
        205,
        0.000193,
        1750,
    );
    script.specialist_round(
        AgentRole::SpecialistMath,
        "Handle the numeric component of the task.",
        "Computed the requested figures with intermediate steps shown.",
        &task_id,
        388,
        164,
        0.000102,
        1430,
    );
    script.specialist_round(
        AgentRole::SpecialistText,
        "Handle the language component of the task.",
        "Drafted the narrative summary covering tone and key findings.",
        &task_id,
        356,
        218,
        0.000126,
        1610,
    );
    script.specialist_round(
        AgentRole::SuperCritic,
        "Validate the combined draft for accuracy and completeness.",
        "Verified the calculations and tightened two imprecise claims; approved.",
        &task_id,
        510,
        142,
        0.000171,
        1890,
    );

    let output = "Combined analysis validated by the super-critic: numeric results and \
        narrative summary merged into a single answer.";
    script.send(
        coordinator,
        Participant::User,
        MessageType::Response,
        output,
        Some(&task_id),
    );

    // Final coordinator record replaces the earlier thinking snapshot
    script.store.upsert_agent_record(
        session_id,
        AgentRecordBuilder::new(AgentRole::Coordinator)
            .tokens(250, 179)
            .cost(0.000152)
            .llm_calls(2)
            .messages_sent(5)
            .processing_time_ms(1200)
            .status(AgentStatus::Done)
            .build(),
    );

    store.finalize(session_id, output);
}

fn run_traditional_script(store: &mut SessionStore, session_id: &str, input: &str) {
    let traditional = Participant::Agent(AgentRole::Traditional);
    let mut script = Script::new(store, session_id.to_string());

    let task_id = script.send(Participant::User, traditional, MessageType::Request, input, None);
    let output = "Single-model answer produced in one pass without delegation or validation.";
    script.send(
        traditional,
        Participant::User,
        MessageType::Response,
        output,
        Some(&task_id),
    );

    script.store.upsert_agent_record(
        session_id,
        AgentRecordBuilder::new(AgentRole::Traditional)
            .tokens(850, 1100)
            .cost(0.00089)
            .llm_calls(1)
            .messages_sent(1)
            .processing_time_ms(9800)
            .status(AgentStatus::Done)
            .build(),
    );

    store.finalize(session_id, output);
}
