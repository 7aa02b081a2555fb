//! Trait abstraction for the student directory to enable mocking in tests

use crate::state::{DashboardSummary, NewStudent, Student};
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a student directory
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("Directory unavailable: {0}")]
    Unavailable(String),
    #[error("Student rejected: {0}")]
    Rejected(String),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Source of student records and sink for new registrations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// List all registered students, in registration order
    async fn list_students(&self) -> DirectoryResult<Vec<Student>>;

    /// Register a new student, returning the stored record
    async fn create_student(&self, student: NewStudent) -> DirectoryResult<Student>;

    /// Summary statistics and recent activity for the dashboard
    async fn dashboard(&self) -> DirectoryResult<DashboardSummary>;
}
