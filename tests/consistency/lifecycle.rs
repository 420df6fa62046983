// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Review lifecycle scenarios: creation, edits, deletion, and the derived
//! state they leave behind

use compass_core::{Error, ReviewQuery, ReviewUpdate};

use crate::prelude::*;

#[tokio::test]
async fn aggregates_track_a_full_lifecycle() {
    let (service, store) = memory_service();
    let course = seed_course(&store, "c-1", "CS2600").await;
    let asha = seed_verified_user(&store, "asha").await;
    let ravi = seed_verified_user(&store, "ravi").await;

    // Two reviews: [4, 5] -> 4.5 across 2.
    service.create_review(&asha, &course, draft(4)).await.unwrap();
    let ravis = service.create_review(&ravi, &course, draft(5)).await.unwrap();

    let snapshot = store.course(&course).await.unwrap().unwrap();
    assert_eq!(snapshot.rating, 4.5);
    assert_eq!(snapshot.total_reviews, 2);

    // Ravi drops their rating to 3: [4, 3] -> 3.5.
    let updates = ReviewUpdate {
        rating: Some(3),
        ..Default::default()
    };
    service.edit_review(&ravis.id, &ravi, updates).await.unwrap();
    let snapshot = store.course(&course).await.unwrap().unwrap();
    assert_eq!(snapshot.rating, 3.5);

    // Ravi deletes: [4] -> 4.0 across 1, and their counter drops.
    service.delete_review(&ravis.id, &ravi).await.unwrap();
    let snapshot = store.course(&course).await.unwrap().unwrap();
    assert_eq!(snapshot.rating, 4.0);
    assert_eq!(snapshot.total_reviews, 1);

    let ravi = store.user(&ravi).await.unwrap().unwrap();
    assert_eq!(ravi.review_count, 0);
}

#[tokio::test]
async fn one_review_per_user_and_course_holds_across_delete() {
    let (service, store) = memory_service();
    let course = seed_course(&store, "c-1", "CS2600").await;
    let asha = seed_verified_user(&store, "asha").await;

    let first = service.create_review(&asha, &course, draft(2)).await.unwrap();
    let err = service.create_review(&asha, &course, draft(4)).await.unwrap_err();
    assert!(matches!(err, Error::DuplicateReview { .. }));

    // Deleting frees the slot for a fresh review.
    service.delete_review(&first.id, &asha).await.unwrap();
    let second = service.create_review(&asha, &course, draft(4)).await.unwrap();
    assert_ne!(first.id, second.id);

    let snapshot = store.course(&course).await.unwrap().unwrap();
    assert_eq!(snapshot.rating, 4.0);
    assert_eq!(snapshot.total_reviews, 1);
}

#[tokio::test]
async fn listings_sort_by_helpfulness_and_respect_verified_filter() {
    let (service, store) = memory_service();
    let course = seed_course(&store, "c-1", "CS2600").await;
    let asha = seed_verified_user(&store, "asha").await;
    let ravi = seed_verified_user(&store, "ravi").await;
    let meera = seed_verified_user(&store, "meera").await;

    let ashas = service.create_review(&asha, &course, draft(4)).await.unwrap();
    let ravis = service.create_review(&ravi, &course, draft(2)).await.unwrap();

    // Ravi's review collects the helpful votes.
    service.cast_vote(&ravis.id, &asha, VoteKind::Helpful).await.unwrap();
    service.cast_vote(&ravis.id, &meera, VoteKind::Helpful).await.unwrap();

    let listed = service
        .reviews_for_course(&course, ReviewQuery::default())
        .await
        .unwrap();
    assert_eq!(listed[0].id, ravis.id);
    assert_eq!(listed[1].id, ashas.id);

    // Retroactively unverify Asha; the filter drops her review.
    store
        .update_review(
            &ashas.id,
            Box::new(|r| {
                r.is_verified = false;
                Ok(())
            }),
        )
        .await
        .unwrap();
    let verified_only = service
        .reviews_for_course(
            &course,
            ReviewQuery {
                verified_only: true,
                limit: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(verified_only.len(), 1);
    assert_eq!(verified_only[0].id, ravis.id);
}

#[tokio::test]
async fn quota_blocks_review_creation_at_the_limit() {
    let (service, store) = memory_service();
    let asha = seed_verified_user(&store, "asha").await;
    store
        .update_user(
            &asha,
            Box::new(|u| {
                u.review_count = 50;
                Ok(())
            }),
        )
        .await
        .unwrap();
    let course = seed_course(&store, "c-1", "CS2600").await;

    let err = service.create_review(&asha, &course, draft(4)).await.unwrap_err();
    assert!(matches!(err, Error::QuotaExceeded { .. }));
}
