//! Course document ingestion
//!
//! Parses course documents in the expected layout: a header of
//! `Course Title:` / `Course Link:` / `Course Instructor:` lines, then
//! `Lesson N: Title` sections, each optionally followed by a `Lesson Link:`
//! line. Lesson text is chunked on sentence boundaries with a character
//! budget and overlap so search hits carry enough surrounding context.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::search::index::{Course, CourseChunk, CourseIndex, Lesson};

/// Errors raised while parsing course documents
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document has no 'Course Title:' header")]
    MissingTitle,
}

/// Chunking parameters
#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Characters of trailing context carried into the next chunk
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 800,
            chunk_overlap: 100,
        }
    }
}

/// Parse one course document into metadata and content chunks
pub fn parse_course_document(
    text: &str,
    chunking: ChunkingConfig,
) -> Result<(Course, Vec<CourseChunk>), IngestError> {
    let mut title: Option<String> = None;
    let mut course_link: Option<String> = None;
    let mut instructor: Option<String> = None;

    let mut lessons: Vec<Lesson> = Vec::new();
    // (lesson_number, accumulated text) per section; None = preamble text
    let mut sections: Vec<(Option<u32>, String)> = Vec::new();
    let mut current: Option<(Option<u32>, String)> = None;

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("Course Title:") {
            title = Some(rest.trim().to_string());
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("Course Link:") {
            course_link = Some(rest.trim().to_string());
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("Course Instructor:") {
            instructor = Some(rest.trim().to_string());
            continue;
        }

        if let Some((number, lesson_title)) = parse_lesson_header(trimmed) {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            lessons.push(Lesson {
                lesson_number: number,
                title: lesson_title,
                lesson_link: None,
            });
            current = Some((Some(number), String::new()));
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("Lesson Link:") {
            if let Some(lesson) = lessons.last_mut() {
                lesson.lesson_link = Some(rest.trim().to_string());
                continue;
            }
        }

        if trimmed.is_empty() {
            continue;
        }

        match &mut current {
            Some((_, body)) => {
                if !body.is_empty() {
                    body.push(' ');
                }
                body.push_str(trimmed);
            }
            None => current = Some((None, trimmed.to_string())),
        }
    }
    if let Some(section) = current.take() {
        sections.push(section);
    }

    let title = title.ok_or(IngestError::MissingTitle)?;

    let mut chunks = Vec::new();
    for (lesson_number, body) in sections {
        for (i, piece) in chunk_text(&body, chunking).into_iter().enumerate() {
            chunks.push(CourseChunk {
                content: piece,
                course_title: title.clone(),
                lesson_number,
                chunk_index: i,
            });
        }
    }

    Ok((
        Course {
            title,
            course_link,
            instructor,
            lessons,
        },
        chunks,
    ))
}

/// Load every `.txt` file in a directory into the index
///
/// A missing directory or an unparsable file is logged and skipped; the
/// server still starts with whatever loaded. Returns the number of courses
/// added.
pub fn load_course_directory(
    path: &Path,
    index: &CourseIndex,
    chunking: ChunkingConfig,
) -> Result<usize, IngestError> {
    if !path.is_dir() {
        warn!(path = %path.display(), "course docs directory not found, starting with an empty index");
        return Ok(0);
    }

    let mut loaded = 0;
    let mut entries: Vec<_> = fs::read_dir(path)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    entries.sort();

    for file in entries {
        let text = match fs::read_to_string(&file) {
            Ok(text) => text,
            Err(e) => {
                warn!(file = %file.display(), error = %e, "skipping unreadable course document");
                continue;
            }
        };
        match parse_course_document(&text, chunking) {
            Ok((course, chunks)) => {
                info!(course = %course.title, chunks = chunks.len(), "loaded course document");
                index.add_course(course);
                index.add_chunks(chunks);
                loaded += 1;
            }
            Err(e) => {
                warn!(file = %file.display(), error = %e, "skipping malformed course document");
            }
        }
    }

    Ok(loaded)
}

fn parse_lesson_header(line: &str) -> Option<(u32, String)> {
    let rest = line.strip_prefix("Lesson ")?;
    let (number, title) = rest.split_once(':')?;
    let number = number.trim().parse::<u32>().ok()?;
    Some((number, title.trim().to_string()))
}

/// Split text into sentence-aligned chunks with overlap
fn chunk_text(text: &str, chunking: ChunkingConfig) -> Vec<String> {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for sentence in &sentences {
        let added = sentence.len() + if current.is_empty() { 0 } else { 1 };
        if current_len + added > chunking.chunk_size && !current.is_empty() {
            chunks.push(current.join(" "));

            // Carry trailing sentences up to the overlap budget
            let mut overlap: Vec<&str> = Vec::new();
            let mut overlap_len = 0;
            for prev in current.iter().rev() {
                if overlap_len + prev.len() > chunking.chunk_overlap {
                    break;
                }
                overlap_len += prev.len() + 1;
                overlap.insert(0, prev);
            }
            current = overlap;
            current_len = current.iter().map(|s| s.len() + 1).sum();
        }
        current_len += sentence.len() + if current.is_empty() { 0 } else { 1 };
        current.push(sentence);
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        let is_terminator = matches!(b, b'.' | b'!' | b'?');
        let at_boundary =
            is_terminator && bytes.get(i + 1).map_or(true, |&next| next == b' ' || next == b'\n');
        if at_boundary {
            let sentence = text[start..=i].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = i + 1;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}
