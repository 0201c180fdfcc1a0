//! In-process course index
//!
//! Stores course metadata and content chunks and answers the two questions
//! the RAG tools ask: "which chunks match this query" and "what does this
//! course look like". Ranking is plain term overlap; the index is shared
//! behind an `Arc` and guarded by an `RwLock` so ingestion and queries can
//! coexist.

use std::collections::HashSet;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// A lesson within a course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub lesson_number: u32,
    pub title: String,
    pub lesson_link: Option<String>,
}

/// Course metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub course_link: Option<String>,
    pub instructor: Option<String>,
    pub lessons: Vec<Lesson>,
}

/// One chunk of course content, attributable to a course and lesson
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseChunk {
    pub content: String,
    pub course_title: String,
    pub lesson_number: Option<u32>,
    pub chunk_index: usize,
}

/// A chunk matched by a search, with its relevance score
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub chunk: CourseChunk,
    pub score: usize,
}

/// Catalog statistics for the analytics endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CourseAnalytics {
    pub total_courses: usize,
    pub course_titles: Vec<String>,
}

#[derive(Default)]
struct IndexData {
    courses: Vec<Course>,
    chunks: Vec<CourseChunk>,
}

/// Searchable store of courses and content chunks
pub struct CourseIndex {
    inner: RwLock<IndexData>,
    max_results: usize,
}

impl CourseIndex {
    /// Create an empty index returning at most `max_results` hits per search
    pub fn new(max_results: usize) -> Self {
        Self {
            inner: RwLock::new(IndexData::default()),
            max_results,
        }
    }

    /// Add course metadata. A course with the same title replaces the old one.
    pub fn add_course(&self, course: Course) {
        let mut data = self.inner.write().unwrap();
        data.courses.retain(|c| c.title != course.title);
        data.courses.push(course);
    }

    /// Add content chunks
    pub fn add_chunks(&self, chunks: Vec<CourseChunk>) {
        self.inner.write().unwrap().chunks.extend(chunks);
    }

    /// Resolve a partial course name to a stored course title.
    ///
    /// Case-insensitive: exact title match wins, otherwise the first course
    /// whose title contains the query (or the other way round).
    pub fn resolve_course_name(&self, name: &str) -> Option<String> {
        let data = self.inner.read().unwrap();
        let needle = name.to_lowercase();

        if let Some(course) = data
            .courses
            .iter()
            .find(|c| c.title.to_lowercase() == needle)
        {
            return Some(course.title.clone());
        }

        data.courses
            .iter()
            .find(|c| {
                let title = c.title.to_lowercase();
                title.contains(&needle) || needle.contains(&title)
            })
            .map(|c| c.title.clone())
    }

    /// Search content chunks by term overlap.
    ///
    /// `course_title` must be an already-resolved exact title. Hits are ranked
    /// by the number of distinct query terms present, ties broken by document
    /// order, capped at `max_results`. Chunks matching no term are dropped.
    pub fn search(
        &self,
        query: &str,
        course_title: Option<&str>,
        lesson_number: Option<u32>,
    ) -> Vec<SearchHit> {
        let terms: HashSet<String> = tokenize(query).into_iter().collect();
        if terms.is_empty() {
            return Vec::new();
        }

        let data = self.inner.read().unwrap();
        let mut hits: Vec<SearchHit> = data
            .chunks
            .iter()
            .filter(|chunk| match course_title {
                Some(title) => chunk.course_title == title,
                None => true,
            })
            .filter(|chunk| match lesson_number {
                Some(n) => chunk.lesson_number == Some(n),
                None => true,
            })
            .filter_map(|chunk| {
                let chunk_terms: HashSet<String> = tokenize(&chunk.content).into_iter().collect();
                let score = terms.intersection(&chunk_terms).count();
                (score > 0).then(|| SearchHit {
                    chunk: chunk.clone(),
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits.truncate(self.max_results);
        hits
    }

    /// Full course metadata for an already-resolved title
    pub fn outline(&self, course_title: &str) -> Option<Course> {
        self.inner
            .read()
            .unwrap()
            .courses
            .iter()
            .find(|c| c.title == course_title)
            .cloned()
    }

    /// Catalog statistics
    pub fn analytics(&self) -> CourseAnalytics {
        let data = self.inner.read().unwrap();
        CourseAnalytics {
            total_courses: data.courses.len(),
            course_titles: data.courses.iter().map(|c| c.title.clone()).collect(),
        }
    }

    /// Number of stored chunks
    pub fn chunk_count(&self) -> usize {
        self.inner.read().unwrap().chunks.len()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}
