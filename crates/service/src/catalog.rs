// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Course catalog administration and search

use compass_core::{Clock, Course, CourseId, EntityStore, Error, IdGen, NewCourse, UserId};

use crate::Service;

impl<S: EntityStore, C: Clock, G: IdGen> Service<S, C, G> {
    /// Add a course to the catalog. Admin only; the code must be unique.
    pub async fn create_course(
        &self,
        requester: &UserId,
        new_course: NewCourse,
    ) -> Result<Course, Error> {
        self.limiter.check(requester)?;
        self.require_admin(requester).await?;
        self.policy.validate_course(&new_course)?;

        let course = Course::new(CourseId::new(self.ids.next()), new_course);
        self.store.insert_course(course.clone()).await?;
        tracing::debug!(course = %course.id, code = %course.code, "course created");
        Ok(course)
    }

    /// Soft-delete a course. Its reviews stay in place but the course stops
    /// appearing in search and rejects new reviews.
    pub async fn deactivate_course(
        &self,
        requester: &UserId,
        course_id: &CourseId,
    ) -> Result<Course, Error> {
        self.limiter.check(requester)?;
        self.require_admin(requester).await?;

        let course = self
            .store
            .update_course(
                course_id,
                Box::new(|course| {
                    course.is_active = false;
                    Ok(())
                }),
            )
            .await?;
        tracing::debug!(course = %course_id, "course deactivated");
        Ok(course)
    }

    /// An active course by id.
    pub async fn course(&self, course_id: &CourseId) -> Result<Course, Error> {
        self.load_active_course(course_id).await
    }

    /// Active courses matching a substring, best rated first.
    pub async fn search_courses(&self, text: &str) -> Result<Vec<Course>, Error> {
        Ok(self.store.search_courses(text).await?)
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
