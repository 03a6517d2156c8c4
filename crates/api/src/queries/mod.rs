// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries and their handlers.

mod hour;
mod training;

pub use hour::{AvailableHours, AvailableHoursHandler, HourAvailability, HourAvailabilityHandler};
pub use training::{
    AllTrainings, AllTrainingsHandler, TRAINING_LOOKBACK_HOURS, TrainingView, TrainingsForUser,
    TrainingsForUserHandler,
};

use crate::error::ApiError;

/// A request to read state.
pub trait Query: std::fmt::Debug + Send + Sync {
    /// Name used in logs and metric keys.
    const NAME: &'static str;
}

/// Answers one kind of query.
pub trait QueryHandler<Q: Query, T>: Send + Sync {
    /// Runs `query`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the query is invalid or storage fails.
    fn handle(&self, query: &Q) -> Result<T, ApiError>;
}
