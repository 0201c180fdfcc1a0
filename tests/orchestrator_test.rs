mod common;

use std::sync::Arc;

use common::{text_response, tool_use_response, ScriptedProvider};

use courseqa::llm::core::config::GenerationConfig;
use courseqa::llm::core::types::{ContentBlock, MessageRole};
use courseqa::llm::orchestrator::{Orchestrator, Termination, MAX_TOOL_ROUNDS};
use courseqa::llm::tools::ToolRegistry;
use courseqa::search::index::{Course, CourseChunk, CourseIndex, Lesson};
use courseqa::search::tools::{register_search_tools, SourceTracker};

fn course_fixture() -> Arc<CourseIndex> {
    let index = Arc::new(CourseIndex::new(5));
    index.add_course(Course {
        title: "Building RAG Systems".to_string(),
        course_link: Some("https://example.com/rag".to_string()),
        instructor: Some("Dana Wells".to_string()),
        lessons: vec![
            Lesson {
                lesson_number: 1,
                title: "Vector Search".to_string(),
                lesson_link: None,
            },
            Lesson {
                lesson_number: 2,
                title: "Tool Calling".to_string(),
                lesson_link: None,
            },
        ],
    });
    index.add_chunks(vec![
        CourseChunk {
            content: "Vector search retrieves chunks by embedding similarity.".to_string(),
            course_title: "Building RAG Systems".to_string(),
            lesson_number: Some(1),
            chunk_index: 0,
        },
        CourseChunk {
            content: "Tool calling lets the model request searches between rounds.".to_string(),
            course_title: "Building RAG Systems".to_string(),
            lesson_number: Some(2),
            chunk_index: 0,
        },
    ]);
    index
}

fn registry_fixture(index: Arc<CourseIndex>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_search_tools(&mut registry, index, Arc::new(SourceTracker::new()));
    registry
}

#[tokio::test]
async fn natural_completion_makes_one_call_and_no_tool_calls() {
    let provider = ScriptedProvider::new(vec![text_response("Lesson 1 covers X.")]);
    let log = provider.request_log();
    let registry = registry_fixture(course_fixture());

    let orchestrator = Orchestrator::new(
        &provider,
        &registry,
        registry.declarations(),
        None,
        GenerationConfig::default(),
    );
    let outcome = orchestrator.run("What is in lesson 1?").await.unwrap();

    assert_eq!(outcome.answer, "Lesson 1 covers X.");
    assert_eq!(outcome.termination, Termination::NaturalCompletion);
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn one_round_query_makes_two_calls() {
    let provider = ScriptedProvider::new(vec![
        tool_use_response(&[(
            "tu-1",
            "search_course_content",
            serde_json::json!({"query": "vector search embedding"}),
        )]),
        text_response("Vector search uses embeddings."),
    ]);
    let log = provider.request_log();
    let registry = registry_fixture(course_fixture());

    let orchestrator = Orchestrator::new(
        &provider,
        &registry,
        registry.declarations(),
        None,
        GenerationConfig::default(),
    );
    let outcome = orchestrator.run("How does vector search work?").await.unwrap();

    assert_eq!(outcome.answer, "Vector search uses embeddings.");
    assert_eq!(log.lock().unwrap().len(), 2);

    // The tool round really ran: the transcript carries a result message
    // with the chunk content.
    let tool_message = outcome
        .transcript
        .iter()
        .find(|m| m.role == MessageRole::Tool)
        .expect("transcript should contain a tool result message");
    match &tool_message.content[0] {
        ContentBlock::ToolResult { content, is_error, .. } => {
            assert!(!is_error);
            assert!(content.contains("embedding similarity"));
        }
        _ => panic!("Expected tool result"),
    }
}

#[tokio::test]
async fn two_round_query_makes_three_calls_and_never_a_fourth() {
    let provider = ScriptedProvider::new(vec![
        tool_use_response(&[(
            "tu-1",
            "get_course_outline",
            serde_json::json!({"course_name": "RAG"}),
        )]),
        tool_use_response(&[(
            "tu-2",
            "search_course_content",
            serde_json::json!({"query": "tool calling rounds"}),
        )]),
        text_response("Comparison text."),
    ]);
    let log = provider.request_log();
    let registry = registry_fixture(course_fixture());

    let orchestrator = Orchestrator::new(
        &provider,
        &registry,
        registry.declarations(),
        None,
        GenerationConfig::default(),
    );
    let outcome = orchestrator
        .run("Compare lesson topics across rounds")
        .await
        .unwrap();

    assert_eq!(outcome.answer, "Comparison text.");
    assert_eq!(outcome.termination, Termination::RoundsExhausted);
    assert_eq!(outcome.rounds, MAX_TOOL_ROUNDS);

    let requests = log.lock().unwrap();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].tools.is_some());
    assert!(requests[1].tools.is_some());
    // The synthesis call omits the tool catalog
    assert!(requests[2].tools.is_none());
}

#[tokio::test]
async fn round_one_failure_skips_round_two() {
    let provider = ScriptedProvider::new(vec![
        tool_use_response(&[(
            "tu-1",
            "search_course_content",
            serde_json::json!({"query": "anything", "course_name": "Nonexistent Course"}),
        )]),
        text_response("I could not find that course."),
    ]);
    let log = provider.request_log();
    let registry = registry_fixture(course_fixture());

    let orchestrator = Orchestrator::new(
        &provider,
        &registry,
        registry.declarations(),
        None,
        GenerationConfig::default(),
    );
    let outcome = orchestrator
        .run("Search the Nonexistent Course")
        .await
        .unwrap();

    // Exactly one synthesis call follows the failed round.
    assert_eq!(outcome.termination, Termination::ExecutionError);
    let requests = log.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].tools.is_none());

    // The failure message is present in the conversation the synthesis saw.
    let synthesis_messages = &requests[1].messages;
    let failure_visible = synthesis_messages.iter().any(|m| {
        m.content.iter().any(|block| match block {
            ContentBlock::ToolResult { content, is_error, .. } => {
                *is_error && content.contains("No course found matching")
            }
            _ => false,
        })
    });
    assert!(failure_visible);
    assert_eq!(outcome.answer, "I could not find that course.");
}

#[tokio::test]
async fn unknown_tool_name_is_a_failure_not_a_crash() {
    let provider = ScriptedProvider::new(vec![
        tool_use_response(&[(
            "tu-1",
            "delete_all_courses",
            serde_json::json!({}),
        )]),
        text_response("I cannot do that."),
    ]);
    let registry = registry_fixture(course_fixture());

    let orchestrator = Orchestrator::new(
        &provider,
        &registry,
        registry.declarations(),
        None,
        GenerationConfig::default(),
    );
    let outcome = orchestrator.run("Try an unknown tool").await.unwrap();

    assert_eq!(outcome.termination, Termination::ExecutionError);
    let tool_message = outcome
        .transcript
        .iter()
        .find(|m| m.role == MessageRole::Tool)
        .unwrap();
    match &tool_message.content[0] {
        ContentBlock::ToolResult { content, is_error, .. } => {
            assert!(*is_error);
            assert!(content.contains("Unknown tool: delete_all_courses"));
        }
        _ => panic!("Expected tool result"),
    }
}

#[tokio::test]
async fn batched_requests_keep_request_order_in_results() {
    let provider = ScriptedProvider::new(vec![
        tool_use_response(&[
            (
                "tu-a",
                "get_course_outline",
                serde_json::json!({"course_name": "RAG"}),
            ),
            (
                "tu-b",
                "search_course_content",
                serde_json::json!({"query": "vector search"}),
            ),
        ]),
        tool_use_response(&[(
            "tu-c",
            "search_course_content",
            serde_json::json!({"query": "tool calling"}),
        )]),
        text_response("Done."),
    ]);
    let registry = registry_fixture(course_fixture());

    let orchestrator = Orchestrator::new(
        &provider,
        &registry,
        registry.declarations(),
        None,
        GenerationConfig::default(),
    );
    let outcome = orchestrator.run("Outline then search").await.unwrap();

    let first_tool_message = outcome
        .transcript
        .iter()
        .find(|m| m.role == MessageRole::Tool)
        .unwrap();
    let ids: Vec<&str> = first_tool_message
        .content
        .iter()
        .map(|block| match block {
            ContentBlock::ToolResult { tool_use_id, .. } => tool_use_id.as_str(),
            _ => panic!("Expected only tool results"),
        })
        .collect();
    assert_eq!(ids, vec!["tu-a", "tu-b"]);
}
