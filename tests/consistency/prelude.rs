// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness for the consistency scenarios

pub use compass_core::{
    Course, CourseId, EntityStore, FakeClock, NewCourse, NewUser, ReportReason, ReviewDraft,
    SequentialIdGen, ServiceConfig, User, UserId, VoteKind,
};
pub use compass_service::Service;
pub use compass_store::MemoryStore;

pub type TestService<S> = Service<S, FakeClock, SequentialIdGen>;

pub fn memory_service() -> (TestService<MemoryStore>, MemoryStore) {
    let store = MemoryStore::new();
    let service = Service::with_parts(
        store.clone(),
        &ServiceConfig::default(),
        FakeClock::new(),
        SequentialIdGen::new("id"),
    );
    (service, store)
}

pub async fn seed_verified_user<S: EntityStore>(store: &S, id: &str) -> UserId {
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

pub async fn seed_admin<S: EntityStore>(store: &S, id: &str) -> UserId {
    let admin_id = seed_verified_user(store, id).await;
    store
        .update_user(
            &admin_id,
            Box::new(|u| {
                u.is_admin = true;
                Ok(())
            }),
        )
        .await
        .unwrap();
    admin_id
}

pub async fn seed_course<S: EntityStore>(store: &S, id: &str, code: &str) -> CourseId {
    let course = Course::new(
        CourseId::from(id),
        NewCourse {
            code: code.to_string(),
            name: "Computer Organization".to_string(),
            department: "CSE".to_string(),
            credits: 10,
            semester: "Semester 4".to_string(),
            description: "Pipelines and caches".to_string(),
            tags: Vec::new(),
        },
    );
    store.insert_course(course).await.unwrap();
    CourseId::from(id)
}

pub fn draft(rating: u8) -> ReviewDraft {
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
