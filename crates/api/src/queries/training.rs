// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use gymslot_domain::{Training, User, UserType};
use gymslot_persistence::TrainingRepository;
use serde::Serialize;

use super::{Query, QueryHandler};
use crate::error::ApiError;

/// How far back the training lists reach.
pub const TRAINING_LOOKBACK_HOURS: i64 = 24;

/// Read model of one training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingView {
    pub uuid: String,
    pub user_uuid: String,
    pub user_name: String,
    pub time: DateTime<Utc>,
    pub notes: String,
    pub proposed_time: Option<DateTime<Utc>>,
    pub move_proposed_by: Option<UserType>,
    pub can_be_canceled: bool,
}

impl From<&Training> for TrainingView {
    fn from(training: &Training) -> Self {
        Self {
            uuid: training.uuid().to_string(),
            user_uuid: training.user_uuid().to_string(),
            user_name: training.user_name().to_string(),
            time: training.time(),
            notes: training.notes().to_string(),
            proposed_time: training.proposed_new_time(),
            move_proposed_by: training.move_proposed_by(),
            can_be_canceled: training.can_be_canceled_for_free(),
        }
    }
}

fn lookback_start() -> DateTime<Utc> {
    Utc::now() - Duration::hours(TRAINING_LOOKBACK_HOURS)
}

fn to_views(trainings: &[Training]) -> Vec<TrainingView> {
    trainings.iter().map(TrainingView::from).collect()
}

/// Every active training of the last day and the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllTrainings;

impl Query for AllTrainings {
    const NAME: &'static str = "all_trainings";
}

/// The active trainings of one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingsForUser {
    pub user: User,
}

impl Query for TrainingsForUser {
    const NAME: &'static str = "trainings_for_user";
}

/// Handles [`AllTrainings`].
pub struct AllTrainingsHandler<R: TrainingRepository> {
    trainings: Arc<R>,
}

impl<R: TrainingRepository> AllTrainingsHandler<R> {
    #[must_use]
    pub const fn new(trainings: Arc<R>) -> Self {
        Self { trainings }
    }
}

impl<R: TrainingRepository> QueryHandler<AllTrainings, Vec<TrainingView>> for AllTrainingsHandler<R> {
    fn handle(&self, _query: &AllTrainings) -> Result<Vec<TrainingView>, ApiError> {
        let trainings: Vec<Training> = self.trainings.all_trainings(lookback_start())?;
        Ok(to_views(&trainings))
    }
}

/// Handles [`TrainingsForUser`].
pub struct TrainingsForUserHandler<R: TrainingRepository> {
    trainings: Arc<R>,
}

impl<R: TrainingRepository> TrainingsForUserHandler<R> {
    #[must_use]
    pub const fn new(trainings: Arc<R>) -> Self {
        Self { trainings }
    }
}

impl<R: TrainingRepository> QueryHandler<TrainingsForUser, Vec<TrainingView>>
    for TrainingsForUserHandler<R>
{
    fn handle(&self, query: &TrainingsForUser) -> Result<Vec<TrainingView>, ApiError> {
        let trainings: Vec<Training> = self
            .trainings
            .trainings_for_user(query.user.uuid(), lookback_start())?;
        Ok(to_views(&trainings))
    }
}
