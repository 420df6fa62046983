// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vote ledger invariants across mixed vote traffic

use crate::prelude::*;

#[tokio::test]
async fn counters_survive_an_arbitrary_vote_session() {
    let (service, store) = memory_service();
    let course = seed_course(&store, "c-1", "CS2600").await;
    let author = seed_verified_user(&store, "author").await;
    let review = service.create_review(&author, &course, draft(4)).await.unwrap();

    let voters: Vec<UserId> = {
        let mut ids = Vec::new();
        for n in 0..5 {
            ids.push(seed_verified_user(&store, &format!("v-{n}")).await);
        }
        ids
    };

    // Everyone votes helpful, two flip, one repeats, one retracts.
    for voter in &voters {
        service.cast_vote(&review.id, voter, VoteKind::Helpful).await.unwrap();
    }
    service.cast_vote(&review.id, &voters[0], VoteKind::NotHelpful).await.unwrap();
    service.cast_vote(&review.id, &voters[1], VoteKind::NotHelpful).await.unwrap();
    service.cast_vote(&review.id, &voters[2], VoteKind::Helpful).await.unwrap();
    let tally = service.retract_vote(&review.id, &voters[3]).await.unwrap();

    // Ledger: v-0 and v-1 not-helpful, v-2 and v-4 helpful, v-3 gone.
    assert_eq!(tally.helpful_votes, 2);
    assert_eq!(tally.not_helpful_votes, 2);
    assert_eq!(tally.helpful_score, 50.0);

    let stored = store.review(&review.id).await.unwrap().unwrap();
    assert_eq!(
        stored.voted_by.len() as u32,
        stored.helpful_votes + stored.not_helpful_votes
    );

    // Author counter and course cache mirror the helpful total.
    let author = store.user(&author).await.unwrap().unwrap();
    assert_eq!(author.helpful_votes, 2);
    let course = store.course(&course).await.unwrap().unwrap();
    assert_eq!(course.total_helpful_votes, 2);
}

#[tokio::test]
async fn concurrent_voters_each_land_exactly_once() {
    let (service, store) = memory_service();
    let course = seed_course(&store, "c-1", "CS2600").await;
    let author = seed_verified_user(&store, "author").await;
    let review = service.create_review(&author, &course, draft(4)).await.unwrap();

    let mut voters = Vec::new();
    for n in 0..10 {
        voters.push(seed_verified_user(&store, &format!("v-{n}")).await);
    }

    let mut handles = Vec::new();
    for voter in voters {
        let service = service.clone();
        let review_id = review.id.clone();
        handles.push(tokio::spawn(async move {
            service.cast_vote(&review_id, &voter, VoteKind::Helpful).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = store.review(&review.id).await.unwrap().unwrap();
    assert_eq!(stored.helpful_votes, 10);
    assert_eq!(stored.voted_by.len(), 10);

    let author = store.user(&author).await.unwrap().unwrap();
    assert_eq!(author.helpful_votes, 10);
}
