//! Repository for the `lesson_plan_events` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::lesson_plan::{CreateLessonPlanEvent, LessonPlanEvent};

/// Column list for lesson_plan_events queries.
const COLUMNS: &str = "id, course_id, title, description, location, event_type, \
    start_at, end_at, created_at, updated_at";

/// Provides CRUD operations for lesson plan events.
pub struct LessonPlanEventRepo;

impl LessonPlanEventRepo {
    /// Insert a new lesson plan event, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateLessonPlanEvent,
    ) -> Result<LessonPlanEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO lesson_plan_events (course_id, title, description, location, event_type, start_at, end_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LessonPlanEvent>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(&input.event_type)
            .bind(input.start_at)
            .bind(input.end_at)
            .fetch_one(executor)
            .await
    }

    /// Find a lesson plan event by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<LessonPlanEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lesson_plan_events WHERE id = $1");
        sqlx::query_as::<_, LessonPlanEvent>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn count_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM lesson_plan_events WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }
}
