use anyhow::{anyhow, Context};
use courseware_core::settings::LeaderboardComponent;
use courseware_db::repositories::CourseRepo;
use courseware_db::store::PgCourseStore;
use courseware_db::DbPool;
use courseware_duplication::{DuplicationContext, ObjectDuplicationService};
use serde_json::Value;

use crate::cli::{DuplicateArgs, LeaderboardArgs};
use crate::request::DuplicationRequest;

/// Run a duplication request file and print the duplicates as JSON.
pub async fn duplicate(pool: &DbPool, args: DuplicateArgs) -> anyhow::Result<()> {
    let json = tokio::fs::read_to_string(&args.request)
        .await
        .with_context(|| format!("Failed to read {}", args.request.display()))?;
    let request = DuplicationRequest::from_json(&json)?;

    let source_course = CourseRepo::find_by_id(pool, request.source_course_id)
        .await?
        .ok_or_else(|| anyhow!("Source course #{} not found", request.source_course_id))?;
    let target_course = CourseRepo::find_by_id(pool, request.target_course_id)
        .await?
        .ok_or_else(|| anyhow!("Target course #{} not found", request.target_course_id))?;
    let selection = request.load_objects(pool).await?;
    tracing::info!(
        source_course_id = source_course.id,
        target_course_id = target_course.id,
        objects = selection.len(),
        "Loaded duplication request"
    );

    let context = DuplicationContext::new(source_course, target_course);
    let service = ObjectDuplicationService::new(PgCourseStore::new(pool.clone()));
    let duplicates = service.duplicate_objects(&selection, &context).await?;

    println!("{}", serde_json::to_string_pretty(&duplicates)?);
    Ok(())
}

/// Apply any leaderboard setters, then print the effective settings.
pub async fn leaderboard(pool: &DbPool, args: LeaderboardArgs) -> anyhow::Result<()> {
    let course = CourseRepo::find_by_id(pool, args.course_id)
        .await?
        .ok_or_else(|| anyhow!("Course #{} not found", args.course_id))?;

    let mut settings = course.settings_document();
    let mut component = LeaderboardComponent::new(&mut settings);
    if let Some(title) = args.title.clone() {
        component.set_title(Some(title));
    }
    if let Some(count) = args.display_user_count {
        component.set_display_user_count(count);
    }
    if let Some(enabled) = args.group_enabled.clone() {
        component.set_enable_group_leaderboard(&Value::String(enabled));
    }
    if let Some(title) = args.group_title.clone() {
        component.set_group_leaderboard_title(Some(title));
    }
    let effective = component.validate()?;

    if args.has_changes() {
        CourseRepo::update_settings(pool, course.id, settings.as_value())
            .await?
            .ok_or_else(|| anyhow!("Course #{} disappeared while saving", course.id))?;
        tracing::info!(course_id = course.id, "Leaderboard settings saved");
    }

    println!("{}", serde_json::to_string_pretty(&effective)?);
    Ok(())
}
