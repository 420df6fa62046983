// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use compass_core::{
    Course, CourseId, EntityStore, Error, FakeClock, NewCourse, NewUser, ReviewDraft,
    SequentialIdGen, ServiceConfig, User, UserId,
};
use compass_store::MemoryStore;

use crate::Service;

type TestService = Service<MemoryStore, FakeClock, SequentialIdGen>;

fn setup() -> (TestService, MemoryStore) {
    let store = MemoryStore::new();
    let service = Service::with_parts(
        store.clone(),
        &ServiceConfig::default(),
        FakeClock::new(),
        SequentialIdGen::new("rev"),
    );
    (service, store)
}

async fn seed_user(store: &MemoryStore, id: &str) -> UserId {
    let mut user = User::new(
        UserId::from(id),
        NewUser {
            name: id.to_string(),
            email: format!("{id}@smail.iitm.ac.in"),
            department: "CSE".to_string(),
            year_of_study: 2,
        },
    );
    user.is_verified = true;
    store.insert_user(user).await.unwrap();
    UserId::from(id)
}

async fn seed_course(store: &MemoryStore) -> CourseId {
    let course = Course::new(
        CourseId::from("c-1"),
        NewCourse {
            code: "CS2600".to_string(),
            name: "Computer Organization".to_string(),
            department: "CSE".to_string(),
            credits: 10,
            semester: "Semester 4".to_string(),
            description: "Pipelines and caches".to_string(),
            tags: Vec::new(),
        },
    );
    store.insert_course(course).await.unwrap();
    CourseId::from("c-1")
}

fn draft(rating: u8) -> ReviewDraft {
    ReviewDraft {
        rating,
        comment: "Dense lectures, generous grading".to_string(),
        difficulty: Some(3),
        workload: Some(3),
        semester: "Semester 4".to_string(),
        year: 2025,
        professor: None,
        is_anonymous: false,
        tags: Vec::new(),
    }
}

#[tokio::test]
async fn recompute_rounds_the_mean_to_one_decimal() {
    let (service, store) = setup();
    let course = seed_course(&store).await;
    for (n, rating) in [4, 5, 3].into_iter().enumerate() {
        let author = seed_user(&store, &format!("u-{n}")).await;
        service.create_review(&author, &course, draft(rating)).await.unwrap();
    }

    let aggregates = service.recompute_course(&course).await.unwrap();
    assert_eq!(aggregates.rating, 4.0);
    assert_eq!(aggregates.total_reviews, 3);
}

#[tokio::test]
async fn removing_a_review_shifts_the_mean() {
    let (service, store) = setup();
    let course = seed_course(&store).await;
    let mut reviews = Vec::new();
    for (n, rating) in [4, 5, 3].into_iter().enumerate() {
        let author = seed_user(&store, &format!("u-{n}")).await;
        reviews.push(service.create_review(&author, &course, draft(rating)).await.unwrap());
    }

    // Drop the 3: [4, 5] -> 4.5 across 2.
    service
        .delete_review(&reviews[2].id, &reviews[2].user)
        .await
        .unwrap();
    let aggregates = service.recompute_course(&course).await.unwrap();
    assert_eq!(aggregates.rating, 4.5);
    assert_eq!(aggregates.total_reviews, 2);
}

#[tokio::test]
async fn recompute_converges_a_drifted_cache() {
    let (service, store) = setup();
    let course_id = seed_course(&store).await;
    let author = seed_user(&store, "u-1").await;
    service.create_review(&author, &course_id, draft(5)).await.unwrap();

    // Corrupt the cache the way a failed refresh would leave it.
    store
        .update_course(
            &course_id,
            Box::new(|c| {
                c.rating = 1.0;
                c.total_reviews = 7;
                c.total_helpful_votes = 99;
                Ok(())
            }),
        )
        .await
        .unwrap();

    let aggregates = service.recompute_course(&course_id).await.unwrap();
    assert_eq!(aggregates.rating, 5.0);
    assert_eq!(aggregates.total_reviews, 1);
    assert_eq!(aggregates.total_helpful_votes, 0);

    let course = store.course(&course_id).await.unwrap().unwrap();
    assert_eq!(course.rating, 5.0);
    assert_eq!(course.total_reviews, 1);
}

#[tokio::test]
async fn recompute_on_an_unknown_course_fails() {
    let (service, _store) = setup();
    let err = service
        .recompute_course(&CourseId::from("ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::CourseNotFound(_)));
}

#[tokio::test]
async fn empty_review_set_resets_to_zero() {
    let (service, store) = setup();
    let course_id = seed_course(&store).await;
    let author = seed_user(&store, "u-1").await;
    let review = service.create_review(&author, &course_id, draft(3)).await.unwrap();

    service.delete_review(&review.id, &author).await.unwrap();
    let aggregates = service.recompute_course(&course_id).await.unwrap();
    assert_eq!(aggregates.rating, 0.0);
    assert_eq!(aggregates.total_reviews, 0);
}
