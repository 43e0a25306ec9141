//! Repository for the `lesson_plan_milestones` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::lesson_plan::{CreateLessonPlanMilestone, LessonPlanMilestone};

/// Column list for lesson_plan_milestones queries.
const COLUMNS: &str = "id, course_id, title, description, start_at, created_at, \
    updated_at";

/// Provides CRUD operations for lesson plan milestones.
pub struct LessonPlanMilestoneRepo;

impl LessonPlanMilestoneRepo {
    /// Insert a new lesson plan milestone, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateLessonPlanMilestone,
    ) -> Result<LessonPlanMilestone, sqlx::Error> {
        let query = format!(
            "INSERT INTO lesson_plan_milestones (course_id, title, description, start_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LessonPlanMilestone>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_at)
            .fetch_one(executor)
            .await
    }

    /// Find a lesson plan milestone by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<LessonPlanMilestone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lesson_plan_milestones WHERE id = $1");
        sqlx::query_as::<_, LessonPlanMilestone>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Count the course's lesson plan milestones.
    pub async fn count_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM lesson_plan_milestones WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }
}
