//! Student directory: listing data source and registration sink

mod memory;
mod submission;
mod traits;

pub use memory::{InMemoryDirectory, CLASSES_THIS_WEEK, DEFAULT_SUBMIT_DELAY};
pub use submission::{SubmissionOutcome, SubmissionTask};
pub use traits::StudentDirectory;

#[cfg(test)]
pub use memory::mock_students;
#[cfg(test)]
pub use traits::{DirectoryError, MockStudentDirectory};
