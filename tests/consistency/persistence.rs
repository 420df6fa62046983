// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The same scenarios hold against the file-backed store, and state
//! survives a reopen

use compass_core::ReviewUpdate;
use compass_store::JsonStore;
use tempfile::tempdir;

use crate::prelude::*;

fn json_service(store: JsonStore) -> TestService<JsonStore> {
    Service::with_parts(
        store,
        &ServiceConfig::default(),
        FakeClock::new(),
        SequentialIdGen::new("id"),
    )
}

#[tokio::test]
async fn lifecycle_state_survives_a_reopen() {
    let dir = tempdir().unwrap();
    let store = JsonStore::open(dir.path()).unwrap();
    let service = json_service(store.clone());

    let course = seed_course(&store, "c-1", "CS2600").await;
    let author = seed_verified_user(&store, "author").await;
    let voter = seed_verified_user(&store, "voter").await;

    let review = service.create_review(&author, &course, draft(4)).await.unwrap();
    service.cast_vote(&review.id, &voter, VoteKind::Helpful).await.unwrap();
    let updates = ReviewUpdate {
        rating: Some(5),
        ..Default::default()
    };
    service.edit_review(&review.id, &author, updates).await.unwrap();

    drop(service);
    drop(store);

    let reopened = JsonStore::open(dir.path()).unwrap();
    let stored = reopened.review(&review.id).await.unwrap().unwrap();
    assert_eq!(stored.rating, 5);
    assert_eq!(stored.helpful_votes, 1);
    assert!(stored.is_edited);
    assert_eq!(stored.edit_history.len(), 1);

    let course = reopened.course(&course).await.unwrap().unwrap();
    assert_eq!(course.rating, 5.0);
    assert_eq!(course.total_reviews, 1);
    assert_eq!(course.total_helpful_votes, 1);

    let author = reopened.user(&author).await.unwrap().unwrap();
    assert_eq!(author.review_count, 1);
    assert_eq!(author.helpful_votes, 1);
}

#[tokio::test]
async fn cascade_delete_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let store = JsonStore::open(dir.path()).unwrap();
    let service = json_service(store.clone());

    let admin = seed_admin(&store, "admin").await;
    let author = seed_verified_user(&store, "author").await;
    let first = seed_course(&store, "c-1", "CS2600").await;
    let second = seed_course(&store, "c-2", "PH1010").await;
    service.create_review(&author, &first, draft(3)).await.unwrap();
    service.create_review(&author, &second, draft(5)).await.unwrap();

    let purge = service.delete_user(&admin, &author).await.unwrap();
    assert_eq!(purge.reviews_deleted, 2);

    let reopened = JsonStore::open(dir.path()).unwrap();
    assert!(reopened.user(&author).await.unwrap().is_none());
    assert!(reopened.user_reviews(&author).await.unwrap().is_empty());
    for course_id in [&first, &second] {
        let course = reopened.course(course_id).await.unwrap().unwrap();
        assert_eq!(course.total_reviews, 0);
        assert_eq!(course.rating, 0.0);
    }
}
