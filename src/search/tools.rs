//! The RAG search tools exposed to the model
//!
//! Two tools over the [`CourseIndex`]: `search_course_content` for content
//! questions and `get_course_outline` for structure questions. Both resolve
//! fuzzy course names first and fail with a plain message when nothing
//! matches; the orchestrator turns that failure into an error tool result.

use std::sync::{Arc, Mutex};

use schemars::JsonSchema;
use serde::Deserialize;

use super::index::CourseIndex;
use crate::llm::tools::{declare_tool, ToolRegistry};

/// Display sources gathered while answering one query
///
/// Each successful search records where its chunks came from; the RAG system
/// drains the list after the answer is produced and returns it to the client.
#[derive(Default)]
pub struct SourceTracker {
    sources: Mutex<Vec<String>>,
}

impl SourceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record sources, skipping ones already present
    pub fn record(&self, new_sources: Vec<String>) {
        let mut sources = self.sources.lock().unwrap();
        for source in new_sources {
            if !sources.contains(&source) {
                sources.push(source);
            }
        }
    }

    /// Take all recorded sources, leaving the tracker empty
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.sources.lock().unwrap())
    }
}

/// Arguments for the content search tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchContentArgs {
    /// What to search for in the course content
    pub query: String,
    /// Course title to restrict the search to (partial names allowed)
    pub course_name: Option<String>,
    /// Lesson number to restrict the search to
    pub lesson_number: Option<u32>,
}

/// Arguments for the course outline tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CourseOutlineArgs {
    /// Course title to look up (partial names allowed)
    pub course_name: String,
}

/// Register both search tools into a registry
pub fn register_search_tools(
    registry: &mut ToolRegistry,
    index: Arc<CourseIndex>,
    sources: Arc<SourceTracker>,
) {
    {
        let index = Arc::clone(&index);
        let sources = Arc::clone(&sources);
        registry.register_sync_text(
            declare_tool::<SearchContentArgs>(
                "search_course_content",
                "Search course materials for specific content or educational details",
            ),
            move |args: SearchContentArgs| search_course_content(&index, &sources, args),
        );
    }

    {
        let sources = Arc::clone(&sources);
        registry.register_sync_text(
            declare_tool::<CourseOutlineArgs>(
                "get_course_outline",
                "Get course structure including title, link, and complete lesson list",
            ),
            move |args: CourseOutlineArgs| get_course_outline(&index, &sources, args),
        );
    }
}

fn search_course_content(
    index: &CourseIndex,
    sources: &SourceTracker,
    args: SearchContentArgs,
) -> Result<String, String> {
    let resolved = match &args.course_name {
        Some(name) => Some(
            index
                .resolve_course_name(name)
                .ok_or_else(|| format!("No course found matching '{}'", name))?,
        ),
        None => None,
    };

    let hits = index.search(&args.query, resolved.as_deref(), args.lesson_number);

    if hits.is_empty() {
        let mut message = String::from("No relevant content found");
        if let Some(title) = &resolved {
            message.push_str(&format!(" in course '{}'", title));
        }
        if let Some(n) = args.lesson_number {
            message.push_str(&format!(" in lesson {}", n));
        }
        message.push('.');
        return Ok(message);
    }

    let mut new_sources = Vec::new();
    let formatted: Vec<String> = hits
        .iter()
        .map(|hit| {
            let header = match hit.chunk.lesson_number {
                Some(n) => format!("[{} - Lesson {}]", hit.chunk.course_title, n),
                None => format!("[{}]", hit.chunk.course_title),
            };
            new_sources.push(match hit.chunk.lesson_number {
                Some(n) => format!("{} - Lesson {}", hit.chunk.course_title, n),
                None => hit.chunk.course_title.clone(),
            });
            format!("{}\n{}", header, hit.chunk.content)
        })
        .collect();

    sources.record(new_sources);
    Ok(formatted.join("\n\n"))
}

fn get_course_outline(
    index: &CourseIndex,
    sources: &SourceTracker,
    args: CourseOutlineArgs,
) -> Result<String, String> {
    let title = index
        .resolve_course_name(&args.course_name)
        .ok_or_else(|| format!("No course found matching '{}'", args.course_name))?;

    // Resolution succeeded, so the course exists
    let course = index
        .outline(&title)
        .ok_or_else(|| format!("No course found matching '{}'", args.course_name))?;

    let mut lines = vec![format!("Course: {}", course.title)];
    if let Some(link) = &course.course_link {
        lines.push(format!("Course Link: {}", link));
    }
    if let Some(instructor) = &course.instructor {
        lines.push(format!("Instructor: {}", instructor));
    }
    lines.push(format!("Lessons ({}):", course.lessons.len()));
    for lesson in &course.lessons {
        lines.push(format!("  {}. {}", lesson.lesson_number, lesson.title));
    }

    sources.record(vec![course.title.clone()]);
    Ok(lines.join("\n"))
}
