//! Port for allocating candidate course identifiers.
//!
//! Generators only propose candidates; the service checks them against the
//! repository and asks again on collision.

use std::sync::Mutex;

use rand::Rng;

use crate::domain::CourseId;

/// Lowest identifier handed out by [`RandomCourseIdGenerator`].
const RANDOM_ID_MIN: u32 = 10_000;
/// Highest identifier handed out by [`RandomCourseIdGenerator`].
const RANDOM_ID_MAX: u32 = 99_999;

/// Source of candidate course identifiers.
#[cfg_attr(test, mockall::automock)]
pub trait CourseIdGenerator: Send + Sync {
    /// Propose an identifier. It may already be in use.
    fn next_id(&self) -> CourseId;
}

/// Draws identifiers uniformly from `10000..=99999`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCourseIdGenerator;

impl CourseIdGenerator for RandomCourseIdGenerator {
    fn next_id(&self) -> CourseId {
        let value = rand::thread_rng().gen_range(RANDOM_ID_MIN..=RANDOM_ID_MAX);
        CourseId::from_low_digits(value)
    }
}

/// Hands out `00001`, `00002`, ... and wraps after `99999`.
///
/// Deterministic; intended for fixtures and scripted environments.
#[derive(Debug, Default)]
pub struct SequentialCourseIdGenerator {
    last: Mutex<u32>,
}

impl SequentialCourseIdGenerator {
    /// Start counting after `last`.
    pub fn starting_after(last: u32) -> Self {
        Self {
            last: Mutex::new(last % (RANDOM_ID_MAX + 1)),
        }
    }
}

impl CourseIdGenerator for SequentialCourseIdGenerator {
    fn next_id(&self) -> CourseId {
        let mut last = self
            .last
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *last = (*last % RANDOM_ID_MAX) + 1;
        CourseId::from_low_digits(*last)
    }
}
