//! Course search: the in-process index and the tools exposed to the model

pub mod index;
pub mod tools;

pub use index::{Course, CourseAnalytics, CourseChunk, CourseIndex, Lesson, SearchHit};
pub use tools::{register_search_tools, SourceTracker};
