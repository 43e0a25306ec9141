//! End-to-end duplication against PostgreSQL.
//!
//! Each test gets a fresh database from `DATABASE_URL`.

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use courseware_core::duplication::{ObjectKind, Selection};
use courseware_core::types::DbId;
use courseware_db::models::assessment::{
    Assessment, AssessmentCategory, AssessmentTab, CreateAssessment, CreateAssessmentCategory,
    CreateAssessmentTab, CreateQuestion, Question,
};
use courseware_db::models::course::{Course, CreateCourse};
use courseware_db::models::course_object::CourseObject;
use courseware_db::models::lesson_plan::CreateLessonPlanMilestone;
use courseware_db::models::material::{CreateMaterial, CreateMaterialFolder, MaterialFolder};
use courseware_db::models::skill::CreateSkill;
use courseware_db::repositories::{
    AssessmentCategoryRepo, AssessmentRepo, AssessmentTabRepo, CourseRepo,
    LessonPlanMilestoneRepo, MaterialFolderRepo, MaterialRepo, QuestionRepo, SkillRepo,
};
use courseware_db::store::PgCourseStore;
use courseware_duplication::{DuplicationContext, DuplicationError, ObjectDuplicationService};
use sqlx::PgPool;

async fn new_course(pool: &PgPool, title: &str, month: u32) -> Course {
    CourseRepo::create(
        pool,
        &CreateCourse {
            title: title.to_string(),
            start_at: Utc.with_ymd_and_hms(2025, month, 1, 9, 0, 0).unwrap(),
        },
    )
    .await
    .unwrap()
}

/// Source and target courses with their default containers.
async fn courses(pool: &PgPool) -> (Course, Course) {
    let source = new_course(pool, "Databases Spring", 1).await;
    let target = new_course(pool, "Databases Fall", 8).await;
    (source, target)
}

fn service(pool: &PgPool) -> ObjectDuplicationService<PgCourseStore> {
    ObjectDuplicationService::new(PgCourseStore::new(pool.clone()))
}

/// A folder under `parent_id`, or under the course root when `None`.
async fn folder(
    pool: &PgPool,
    course: &Course,
    parent_id: Option<DbId>,
    name: &str,
) -> MaterialFolder {
    let parent_id = match parent_id {
        Some(id) => id,
        None => {
            MaterialFolderRepo::find_root(pool, course.id)
                .await
                .unwrap()
                .unwrap()
                .id
        }
    };
    MaterialFolderRepo::create(
        pool,
        &CreateMaterialFolder {
            course_id: course.id,
            parent_id: Some(parent_id),
            name: name.to_string(),
            description: None,
            start_at: None,
        },
    )
    .await
    .unwrap()
}

async fn material(pool: &PgPool, folder_id: DbId, name: &str) {
    MaterialRepo::create(
        pool,
        &CreateMaterial {
            folder_id,
            name: name.to_string(),
            description: None,
            file_name: Some(format!("{name}.pdf")),
        },
    )
    .await
    .unwrap();
}

/// Source objects for a category > tab > assessment chain.
struct Chain {
    category: AssessmentCategory,
    tab: AssessmentTab,
    assessment: Assessment,
    question: Question,
}

async fn seed_chain(pool: &PgPool, course: &Course) -> Chain {
    let category_folder = folder(pool, course, None, "Labs").await;
    let category = AssessmentCategoryRepo::create(
        pool,
        &CreateAssessmentCategory {
            course_id: course.id,
            folder_id: category_folder.id,
            title: "Labs".to_string(),
            weight: 1,
            is_default: false,
        },
    )
    .await
    .unwrap();
    let tab = AssessmentTabRepo::create(
        pool,
        &CreateAssessmentTab {
            course_id: course.id,
            category_id: category.id,
            title: "SQL".to_string(),
            weight: 1,
            is_default: false,
        },
    )
    .await
    .unwrap();
    let lab_folder = folder(pool, course, Some(category_folder.id), "Lab 1").await;
    let assessment = AssessmentRepo::create(
        pool,
        &CreateAssessment {
            course_id: course.id,
            tab_id: tab.id,
            folder_id: lab_folder.id,
            title: "Lab 1".to_string(),
            description: None,
            base_exp: 50,
            start_at: None,
            end_at: None,
            published: true,
        },
    )
    .await
    .unwrap();
    let question = QuestionRepo::create(
        pool,
        &CreateQuestion {
            assessment_id: assessment.id,
            title: "Write a join".to_string(),
            description: None,
            maximum_grade: 5.0,
            weight: 1,
        },
    )
    .await
    .unwrap();
    Chain {
        category,
        tab,
        assessment,
        question,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_and_assessment_round_trip(pool: PgPool) {
    let (source, target) = courses(&pool).await;
    let chain = seed_chain(&pool, &source).await;

    let context = DuplicationContext::new(source, target.clone());
    let dup = service(&pool)
        .duplicate_objects(
            &Selection::many([
                CourseObject::from(chain.category),
                CourseObject::from(chain.assessment),
            ]),
            &context,
        )
        .await
        .unwrap()
        .into_flat()
        .unwrap();

    let copy = dup[1].as_assessment().unwrap();
    let default_category = AssessmentCategoryRepo::find_default(&pool, target.id)
        .await
        .unwrap()
        .unwrap();
    let default_tab = AssessmentTabRepo::find_default(&pool, default_category.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(copy.tab_id, default_tab.id);
    assert_eq!(
        AssessmentCategoryRepo::count_by_course(&pool, target.id)
            .await
            .unwrap(),
        2
    );
    assert_eq!(
        QuestionRepo::list_by_assessment(&pool, copy.id)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assessment_chain_is_order_independent(pool: PgPool) {
    let orders = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    for order in orders {
        // Fresh courses for every ordering.
        let (source, target) = courses(&pool).await;
        let chain = seed_chain(&pool, &source).await;
        let objects = [
            CourseObject::from(chain.assessment.clone()),
            CourseObject::from(chain.tab.clone()),
            CourseObject::from(chain.category.clone()),
        ];
        let selection = Selection::many(order.iter().map(|&i| objects[i].clone()));

        let context = DuplicationContext::new(source, target.clone());
        let dup = service(&pool)
            .duplicate_objects(&selection, &context)
            .await
            .unwrap()
            .into_flat()
            .unwrap();

        let find = |kind: ObjectKind| dup.iter().find(|d| d.kind() == kind).unwrap();
        let assessment = find(ObjectKind::Assessment).as_assessment().unwrap();
        let tab = find(ObjectKind::AssessmentTab).as_tab().unwrap();
        let category = find(ObjectKind::AssessmentCategory).as_category().unwrap();

        assert_eq!(assessment.tab_id, tab.id, "order {order:?}");
        assert_eq!(tab.category_id, category.id, "order {order:?}");

        let assessment_folder = MaterialFolderRepo::find_by_id(&pool, assessment.folder_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            assessment_folder.parent_id,
            Some(category.folder_id),
            "order {order:?}"
        );
        assert_eq!(
            QuestionRepo::list_by_assessment(&pool, assessment.id)
                .await
                .unwrap()
                .len(),
            1,
            "order {order:?}"
        );
        // Target defaults plus one copy of each.
        assert_eq!(
            AssessmentCategoryRepo::count_by_course(&pool, target.id)
                .await
                .unwrap(),
            2
        );
        assert_eq!(
            AssessmentTabRepo::count_by_course(&pool, target.id)
                .await
                .unwrap(),
            2
        );
        assert_eq!(
            AssessmentRepo::count_by_course(&pool, target.id)
                .await
                .unwrap(),
            1
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_question_skill_links_are_rebuilt_in_either_order(pool: PgPool) {
    for skill_first in [true, false] {
        let (source, target) = courses(&pool).await;
        let chain = seed_chain(&pool, &source).await;
        let skill = SkillRepo::create(
            &pool,
            &CreateSkill {
                course_id: source.id,
                skill_branch_id: None,
                title: "Joins".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
        QuestionRepo::add_skill(&pool, chain.question.id, skill.id)
            .await
            .unwrap();

        let mut objects = vec![
            CourseObject::from(skill),
            CourseObject::from(chain.assessment),
        ];
        if !skill_first {
            objects.reverse();
        }

        let context = DuplicationContext::new(source, target);
        let dup = service(&pool)
            .duplicate_objects(&Selection::many(objects), &context)
            .await
            .unwrap()
            .into_flat()
            .unwrap();

        let skill = dup.iter().find_map(CourseObject::as_skill).unwrap();
        let assessment = dup.iter().find_map(CourseObject::as_assessment).unwrap();
        let questions = QuestionRepo::list_by_assessment(&pool, assessment.id)
            .await
            .unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(
            QuestionRepo::list_skill_ids(&pool, questions[0].id)
                .await
                .unwrap(),
            vec![skill.id],
            "skill_first = {skill_first}"
        );
        // The source link is left alone.
        assert_eq!(
            QuestionRepo::list_skill_ids(&pool, chain.question.id)
                .await
                .unwrap()
                .len(),
            1
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_folder_copies_its_materials_but_not_subfolders(pool: PgPool) {
    let (source, target) = courses(&pool).await;
    let week = folder(&pool, &source, None, "Week 1").await;
    material(&pool, week.id, "slides").await;
    material(&pool, week.id, "notes").await;
    let extras = folder(&pool, &source, Some(week.id), "Extras").await;
    material(&pool, extras.id, "bonus").await;
    let folders_before = MaterialFolderRepo::count_by_course(&pool, target.id)
        .await
        .unwrap();

    let context = DuplicationContext::new(source, target.clone());
    let dup = service(&pool)
        .duplicate_object(&week.into(), &context)
        .await
        .unwrap();

    let copy = dup.as_folder().unwrap();
    let target_root = MaterialFolderRepo::find_root(&pool, target.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(copy.name, "Week 1");
    assert_eq!(copy.parent_id, Some(target_root.id));
    assert_eq!(
        MaterialFolderRepo::count_by_course(&pool, target.id)
            .await
            .unwrap(),
        folders_before + 1
    );

    let mut names: Vec<_> = MaterialRepo::list_by_folder(&pool, copy.id)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    names.sort();
    assert_eq!(names, ["notes", "slides"]);
    assert!(MaterialFolderRepo::list_children(&pool, copy.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_batch_leaves_target_untouched(pool: PgPool) {
    let (source, target) = courses(&pool).await;

    let milestone = LessonPlanMilestoneRepo::create(
        &pool,
        &CreateLessonPlanMilestone {
            course_id: source.id,
            title: "Kick-off".to_string(),
            description: None,
            start_at: source.start_at,
        },
    )
    .await
    .unwrap();
    let skill = SkillRepo::create(
        &pool,
        &CreateSkill {
            course_id: source.id,
            skill_branch_id: None,
            title: "Normalisation".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();

    // Blank titles are rejected before they reach the database.
    let mut invalid = skill.clone();
    invalid.title = " ".to_string();

    let context = DuplicationContext::new(source, target.clone());
    let result = service(&pool)
        .duplicate_objects(
            &Selection::many([CourseObject::from(milestone), CourseObject::from(invalid)]),
            &context,
        )
        .await;

    assert_matches!(result, Err(DuplicationError::Validation { .. }));
    assert_eq!(
        LessonPlanMilestoneRepo::count_by_course(&pool, target.id)
            .await
            .unwrap(),
        0
    );
    assert_eq!(SkillRepo::count_by_course(&pool, target.id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_material_from_another_course_is_rejected(pool: PgPool) {
    let (source, target) = courses(&pool).await;
    let stray_folder = folder(&pool, &target, None, "Stray").await;
    material(&pool, stray_folder.id, "notes").await;
    let stray = MaterialRepo::list_by_folder(&pool, stray_folder.id)
        .await
        .unwrap()
        .remove(0);

    let context = DuplicationContext::new(source, target);
    let result = service(&pool)
        .duplicate_object(&stray.clone().into(), &context)
        .await;

    assert_matches!(
        result,
        Err(DuplicationError::Validation { kind: ObjectKind::Material, source_id, .. })
            if source_id == stray.id
    );
    assert_eq!(
        MaterialRepo::list_by_folder(&pool, stray_folder.id)
            .await
            .unwrap()
            .len(),
        1
    );
}
