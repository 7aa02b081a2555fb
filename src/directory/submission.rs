//! Background student registration
//!
//! A submission runs on its own tokio task so the UI loop keeps drawing
//! while the directory answers. The task is owned by its handle: dropping
//! a `SubmissionTask` aborts the registration if it has not finished.

use super::traits::{DirectoryError, DirectoryResult, StudentDirectory};
use crate::state::{NewStudent, Student};
use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;

pub type SubmissionOutcome = DirectoryResult<Student>;

pub struct SubmissionTask {
    handle: JoinHandle<()>,
    outcome: oneshot::Receiver<SubmissionOutcome>,
}

impl SubmissionTask {
    /// Start registering `student` in the background
    pub fn spawn(directory: Arc<dyn StudentDirectory>, student: NewStudent) -> Self {
        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let outcome = directory.create_student(student).await;
            if tx.send(outcome).is_err() {
                tracing::debug!("Submission finished after its flow was closed");
            }
        });
        Self {
            handle,
            outcome: rx,
        }
    }

    /// Non-blocking check for the result; `None` while still running
    pub fn try_outcome(&mut self) -> Option<SubmissionOutcome> {
        match self.outcome.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(lost_task())),
        }
    }

    /// Wait for the result
    #[cfg(test)]
    pub async fn outcome(&mut self) -> SubmissionOutcome {
        (&mut self.outcome).await.unwrap_or_else(|_| Err(lost_task()))
    }

    /// Abort the registration. Equivalent to dropping the task.
    pub fn cancel(self) {
        tracing::info!("Cancelling pending submission");
    }
}

impl Drop for SubmissionTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn lost_task() -> DirectoryError {
    DirectoryError::Unavailable("registration ended without a result".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{InMemoryDirectory, MockStudentDirectory};
    use crate::state::StudentStatus;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn new_student() -> NewStudent {
        NewStudent {
            name: "Jo".to_string(),
            phone: "(11) 99999-8888".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2006, 1, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_outcome_delivers_created_student() {
        let directory = Arc::new(InMemoryDirectory::seeded(Duration::ZERO));
        let mut task = SubmissionTask::spawn(directory.clone(), new_student());
        let created = task.outcome().await.unwrap();
        assert_eq!(created.name, "Jo");
        assert_eq!(created.status, StudentStatus::Active);
        assert_eq!(directory.list_students().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_try_outcome_is_none_while_pending() {
        let directory = Arc::new(InMemoryDirectory::seeded(Duration::from_secs(60)));
        let mut task = SubmissionTask::spawn(directory, new_student());
        assert!(task.try_outcome().is_none());
    }

    #[tokio::test]
    async fn test_try_outcome_after_completion() {
        let directory = Arc::new(InMemoryDirectory::seeded(Duration::ZERO));
        let mut task = SubmissionTask::spawn(directory, new_student());
        let mut outcome = None;
        for _ in 0..100 {
            outcome = task.try_outcome();
            if outcome.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(matches!(outcome, Some(Ok(_))));
    }

    #[tokio::test]
    async fn test_dropping_task_aborts_registration() {
        let directory = Arc::new(InMemoryDirectory::seeded(Duration::from_millis(50)));
        let task = SubmissionTask::spawn(directory.clone(), new_student());
        task.cancel();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(directory.list_students().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_directory_failure_is_reported() {
        let mut mock = MockStudentDirectory::new();
        mock.expect_create_student()
            .times(1)
            .returning(|_| Err(DirectoryError::Unavailable("offline".to_string())));
        let mut task = SubmissionTask::spawn(Arc::new(mock), new_student());
        assert_eq!(
            task.outcome().await,
            Err(DirectoryError::Unavailable("offline".to_string()))
        );
    }
}
