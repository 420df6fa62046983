// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Moderation scenarios: the report threshold and its downstream effects

use compass_core::{Error, ReportOutcome, ReviewQuery};

use crate::prelude::*;

#[tokio::test]
async fn hiding_a_review_removes_it_everywhere() {
    let (service, store) = memory_service();
    let course = seed_course(&store, "c-1", "CS2600").await;
    let author = seed_verified_user(&store, "author").await;
    let other = seed_verified_user(&store, "other").await;

    let target = service.create_review(&author, &course, draft(1)).await.unwrap();
    service.create_review(&other, &course, draft(5)).await.unwrap();

    let snapshot = store.course(&course).await.unwrap().unwrap();
    assert_eq!(snapshot.rating, 3.0);
    assert_eq!(snapshot.total_reviews, 2);

    for n in 0..5 {
        let reporter = seed_verified_user(&store, &format!("r-{n}")).await;
        service
            .report_review(&target.id, &reporter, ReportReason::Fake, None)
            .await
            .unwrap();
    }

    let stored = store.review(&target.id).await.unwrap().unwrap();
    assert!(stored.is_hidden);
    assert_eq!(stored.report_count, 5);

    // Aggregates and listings both exclude the hidden review.
    let snapshot = store.course(&course).await.unwrap().unwrap();
    assert_eq!(snapshot.rating, 5.0);
    assert_eq!(snapshot.total_reviews, 1);

    let listed = service
        .reviews_for_course(&course, ReviewQuery::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_ne!(listed[0].id, target.id);

    let by_author = service.reviews_by_user(&author, None).await.unwrap();
    assert!(by_author.is_empty());
}

#[tokio::test]
async fn duplicate_reports_never_reach_the_threshold() {
    let (service, store) = memory_service();
    let course = seed_course(&store, "c-1", "CS2600").await;
    let author = seed_verified_user(&store, "author").await;
    let reporter = seed_verified_user(&store, "reporter").await;
    let review = service.create_review(&author, &course, draft(2)).await.unwrap();

    service
        .report_review(&review.id, &reporter, ReportReason::Spam, None)
        .await
        .unwrap();
    for _ in 0..10 {
        let outcome = service
            .report_review(&review.id, &reporter, ReportReason::Spam, None)
            .await
            .unwrap();
        assert_eq!(outcome, ReportOutcome::Duplicate);
    }

    let stored = store.review(&review.id).await.unwrap().unwrap();
    assert_eq!(stored.report_count, 1);
    assert!(!stored.is_hidden);
}

#[tokio::test]
async fn hidden_review_still_allows_retraction_but_nothing_else() {
    let (service, store) = memory_service();
    let course = seed_course(&store, "c-1", "CS2600").await;
    let author = seed_verified_user(&store, "author").await;
    let voter = seed_verified_user(&store, "voter").await;
    let review = service.create_review(&author, &course, draft(2)).await.unwrap();

    service.cast_vote(&review.id, &voter, VoteKind::Helpful).await.unwrap();
    for n in 0..5 {
        let reporter = seed_verified_user(&store, &format!("r-{n}")).await;
        service
            .report_review(&review.id, &reporter, ReportReason::Inappropriate, None)
            .await
            .unwrap();
    }

    let err = service
        .cast_vote(&review.id, &voter, VoteKind::NotHelpful)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ReviewHidden(_)));

    // A voter is never stuck with a vote on a hidden review.
    let tally = service.retract_vote(&review.id, &voter).await.unwrap();
    assert_eq!(tally.helpful_votes, 0);

    let author = store.user(&author).await.unwrap().unwrap();
    assert_eq!(author.helpful_votes, 0);
}
