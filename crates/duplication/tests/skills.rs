//! Skill branches, skills and their links to questions.

mod common;

use common::Fixture;
use courseware_core::duplication::{ObjectKind, Selection};
use courseware_db::models::course_object::CourseObject;

#[tokio::test]
async fn test_branch_alone_duplicates_without_skills() {
    let f = Fixture::new();
    let branch = f.skill_branch("Graphs").await;
    f.skill(Some(&branch), "BFS").await;
    f.skill(Some(&branch), "Dijkstra").await;

    let dup = f
        .service()
        .duplicate_object(&branch.into(), &f.context())
        .await
        .unwrap();

    let copy = dup.as_skill_branch().unwrap();
    assert_eq!(copy.title, "Graphs");
    assert_eq!(f.target_count(ObjectKind::SkillBranch), 1);
    assert_eq!(f.target_count(ObjectKind::Skill), 0);
    assert!(f.state().skills_of(copy.id).is_empty());
}

#[tokio::test]
async fn test_skill_follows_its_branch_in_either_order() {
    for branch_first in [true, false] {
        let f = Fixture::new();
        let branch = f.skill_branch("Graphs").await;
        let skill = f.skill(Some(&branch), "BFS").await;

        let mut objects = vec![CourseObject::from(branch), CourseObject::from(skill)];
        if !branch_first {
            objects.reverse();
        }

        let dup = f
            .service()
            .duplicate_objects(&Selection::many(objects), &f.context())
            .await
            .unwrap()
            .into_flat()
            .unwrap();

        let branch = dup.iter().find_map(CourseObject::as_skill_branch).unwrap();
        let skill = dup.iter().find_map(CourseObject::as_skill).unwrap();
        assert_eq!(skill.skill_branch_id, Some(branch.id));
        assert_eq!(f.target_count(ObjectKind::SkillBranch), 1);
        assert_eq!(f.target_count(ObjectKind::Skill), 1);
    }
}

#[tokio::test]
async fn test_skill_without_its_branch_has_no_branch() {
    let f = Fixture::new();
    let branch = f.skill_branch("Graphs").await;
    let skill = f.skill(Some(&branch), "BFS").await;

    let dup = f
        .service()
        .duplicate_object(&skill.into(), &f.context())
        .await
        .unwrap();

    assert_eq!(dup.as_skill().unwrap().skill_branch_id, None);
    assert_eq!(f.target_count(ObjectKind::SkillBranch), 0);
}

#[tokio::test]
async fn test_question_skill_links_are_rebuilt_in_either_order() {
    for skill_first in [true, false] {
        let f = Fixture::new();
        let category = f.category("Quizzes").await;
        let tab = f.tab(&category, "Weekly").await;
        let assessment = f.assessment(&tab, "Quiz 1").await;
        let question = f.question(&assessment, "Shortest path").await;
        let skill = f.skill(None, "Dijkstra").await;
        f.link(&question, &skill).await;

        let mut objects = vec![CourseObject::from(skill), CourseObject::from(assessment)];
        if !skill_first {
            objects.reverse();
        }

        let dup = f
            .service()
            .duplicate_objects(&Selection::many(objects), &f.context())
            .await
            .unwrap()
            .into_flat()
            .unwrap();

        let skill = dup.iter().find_map(CourseObject::as_skill).unwrap();
        let assessment = dup.iter().find_map(CourseObject::as_assessment).unwrap();
        let state = f.state();
        let questions = state.questions_of(assessment.id);
        assert_eq!(questions.len(), 1);
        assert_eq!(
            state.skill_ids_of_question(questions[0].id),
            vec![skill.id],
            "skill_first = {skill_first}"
        );
        // The source link is left alone.
        assert_eq!(state.skill_ids_of_question(question.id).len(), 1);
    }
}

#[tokio::test]
async fn test_links_to_unselected_skills_are_dropped() {
    let f = Fixture::new();
    let category = f.category("Quizzes").await;
    let tab = f.tab(&category, "Weekly").await;
    let assessment = f.assessment(&tab, "Quiz 1").await;
    let question = f.question(&assessment, "Shortest path").await;
    let skill = f.skill(None, "Dijkstra").await;
    f.link(&question, &skill).await;

    let dup = f
        .service()
        .duplicate_object(&assessment.into(), &f.context())
        .await
        .unwrap();

    let state = f.state();
    let copy = state.questions_of(dup.id())[0];
    assert!(state.skill_ids_of_question(copy.id).is_empty());
    assert_eq!(f.target_count(ObjectKind::Skill), 0);
}
