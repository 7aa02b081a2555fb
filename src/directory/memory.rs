//! In-memory student directory seeded with the demo roster
//!
//! There is no backend yet: registrations are kept for the lifetime of the
//! process and every write waits for a simulated round trip.

use super::traits::{DirectoryError, DirectoryResult, StudentDirectory};
use crate::state::{
    Activity, ActivityKind, DashboardStat, DashboardSummary, NewStudent, StatAccent, Student,
    StudentStatus,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;
use tokio::sync::RwLock;

/// Default simulated latency of a registration
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1500);

/// Classes scheduled this week, shown on the students page
pub const CLASSES_THIS_WEEK: u32 = 23;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn student(
    id: u32,
    name: &str,
    phone: &str,
    birth_date: NaiveDate,
    status: StudentStatus,
) -> Student {
    Student {
        id,
        name: name.to_string(),
        phone: phone.to_string(),
        birth_date,
        status,
    }
}

/// Demo roster
pub fn mock_students() -> Vec<Student> {
    use StudentStatus::{Active, Inactive};
    vec![
        student(1, "Maria Silva Santos", "(11) 99999-8888", date(1995, 3, 15), Active),
        student(2, "João Pedro Oliveira", "(11) 88888-7777", date(1990, 7, 22), Active),
        student(3, "Ana Costa Ferreira", "(11) 77777-6666", date(1998, 11, 8), Active),
        student(4, "Pedro Lima da Silva", "(11) 66666-5555", date(1992, 1, 30), Inactive),
        student(5, "Carla Mendes Souza", "(11) 55555-4444", date(1997, 5, 12), Active),
    ]
}

/// Demo dashboard figures
pub fn mock_dashboard() -> DashboardSummary {
    let stat = |title: &str, value: &str, description: &str, accent| DashboardStat {
        title: title.to_string(),
        value: value.to_string(),
        description: description.to_string(),
        accent,
    };
    let activity = |student: &str, action: &str, time: &str, kind| Activity {
        student: student.to_string(),
        action: action.to_string(),
        time: time.to_string(),
        kind,
    };

    DashboardSummary {
        stats: vec![
            stat("Registered Students", "147", "+12% from last month", StatAccent::Blue),
            stat("Classes This Week", "23", "6 classes today", StatAccent::Green),
            stat("Active Subscriptions", "89", "+5 new subscriptions", StatAccent::Orange),
        ],
        activities: vec![
            activity("Maria Silva", "New enrollment", "2h ago", ActivityKind::Success),
            activity("João Santos", "Class cancelled", "4h ago", ActivityKind::Warning),
            activity("Ana Costa", "Payment received", "6h ago", ActivityKind::Success),
            activity("Pedro Lima", "Class rescheduled", "1d ago", ActivityKind::Info),
        ],
    }
}

/// Student directory backed by process memory
pub struct InMemoryDirectory {
    students: RwLock<Vec<Student>>,
    dashboard: DashboardSummary,
    submit_delay: Duration,
}

impl InMemoryDirectory {
    pub fn new(
        students: Vec<Student>,
        dashboard: DashboardSummary,
        submit_delay: Duration,
    ) -> Self {
        Self {
            students: RwLock::new(students),
            dashboard,
            submit_delay,
        }
    }

    /// Directory holding the demo roster and dashboard
    pub fn seeded(submit_delay: Duration) -> Self {
        Self::new(mock_students(), mock_dashboard(), submit_delay)
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::seeded(DEFAULT_SUBMIT_DELAY)
    }
}

#[async_trait]
impl StudentDirectory for InMemoryDirectory {
    async fn list_students(&self) -> DirectoryResult<Vec<Student>> {
        Ok(self.students.read().await.clone())
    }

    async fn create_student(&self, new: NewStudent) -> DirectoryResult<Student> {
        tokio::time::sleep(self.submit_delay).await;

        let mut students = self.students.write().await;
        if students
            .iter()
            .any(|s| s.phone == new.phone && s.name.eq_ignore_ascii_case(&new.name))
        {
            return Err(DirectoryError::Rejected(format!(
                "{} is already registered",
                new.name
            )));
        }

        let id = students.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let created = Student {
            id,
            name: new.name,
            phone: new.phone,
            birth_date: new.birth_date,
            status: StudentStatus::Active,
        };
        students.push(created.clone());
        tracing::info!(id, "Registered student");
        Ok(created)
    }

    async fn dashboard(&self) -> DirectoryResult<DashboardSummary> {
        Ok(self.dashboard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Instant;

    fn new_student(name: &str) -> NewStudent {
        NewStudent {
            name: name.to_string(),
            phone: "(21) 3333-4444".to_string(),
            birth_date: date(2010, 2, 1),
        }
    }

    #[test]
    fn test_mock_roster() {
        let students = mock_students();
        assert_eq!(students.len(), 5);
        assert_eq!(students[0].name, "Maria Silva Santos");
        assert_eq!(students[3].status, StudentStatus::Inactive);
        let ids: Vec<u32> = students.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_mock_dashboard_has_three_stats() {
        let summary = mock_dashboard();
        assert_eq!(summary.stats.len(), 3);
        assert_eq!(summary.stats[0].value, "147");
        assert_eq!(summary.activities.len(), 4);
    }

    #[test]
    fn test_list_students_blocking() {
        let directory = InMemoryDirectory::seeded(Duration::ZERO);
        let students = tokio_test::block_on(directory.list_students()).unwrap();
        assert_eq!(students, mock_students());
    }

    #[tokio::test]
    async fn test_create_student_assigns_next_id_and_appends() {
        let directory = InMemoryDirectory::seeded(Duration::ZERO);
        let created = directory
            .create_student(new_student("Lucas Rocha"))
            .await
            .unwrap();
        assert_eq!(created.id, 6);
        assert_eq!(created.status, StudentStatus::Active);

        let students = directory.list_students().await.unwrap();
        assert_eq!(students.len(), 6);
        assert_eq!(students.last(), Some(&created));
    }

    #[tokio::test]
    async fn test_create_student_in_empty_directory_starts_at_one() {
        let directory =
            InMemoryDirectory::new(Vec::new(), DashboardSummary::default(), Duration::ZERO);
        let created = directory
            .create_student(new_student("Lucas"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_rejected() {
        let directory = InMemoryDirectory::seeded(Duration::ZERO);
        directory
            .create_student(new_student("Lucas Rocha"))
            .await
            .unwrap();
        let err = directory
            .create_student(new_student("lucas rocha"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DirectoryError::Rejected("lucas rocha is already registered".to_string())
        );
        assert_eq!(directory.list_students().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_create_student_waits_for_submit_delay() {
        let delay = Duration::from_millis(30);
        let directory = InMemoryDirectory::seeded(delay);
        let started = Instant::now();
        directory
            .create_student(new_student("Lucas"))
            .await
            .unwrap();
        assert!(started.elapsed() >= delay);
    }

    #[tokio::test]
    async fn test_dashboard_returns_summary() {
        let directory = InMemoryDirectory::default();
        assert_eq!(directory.dashboard().await.unwrap(), mock_dashboard());
    }
}
