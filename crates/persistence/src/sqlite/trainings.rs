// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use gymslot_domain::{Training, User, can_user_see_training};
use tracing::debug;

use super::{TxError, run_attempt};
use crate::atomic::retry_on_conflict;
use crate::backend::sqlite::SqlitePool;
use crate::data_models::TrainingRow;
use crate::diesel_schema::trainings;
use crate::error::PersistenceError;
use crate::repository::{TrainingRepository, authorize_and_apply, blocks_time};
use crate::time_codec::to_nanos;

/// Trainings stored in the `trainings` table.
#[derive(Clone)]
pub struct SqliteTrainingRepository {
    pool: SqlitePool,
}

impl SqliteTrainingRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn find_training(conn: &mut SqliteConnection, training_uuid: &str) -> QueryResult<Option<TrainingRow>> {
    trainings::table
        .find(training_uuid)
        .select(TrainingRow::as_select())
        .first(conn)
        .optional()
}

/// Returns the UUID of the active training stored at `training_time`.
fn occupant_at(conn: &mut SqliteConnection, training_time: i64) -> QueryResult<Option<String>> {
    trainings::table
        .filter(trainings::training_time.eq(training_time))
        .filter(trainings::canceled.eq(false))
        .select(trainings::training_uuid)
        .first(conn)
        .optional()
}

fn load_trainings(rows: Vec<TrainingRow>) -> Result<Vec<Training>, PersistenceError> {
    rows.into_iter().map(TrainingRow::into_training).collect()
}

impl TrainingRepository for SqliteTrainingRepository {
    fn add_training<E, F>(&self, training: Training, mut create_fn: F) -> Result<(), E>
    where
        E: From<PersistenceError>,
        F: FnMut(&Training) -> Result<(), E>,
    {
        let row: TrainingRow = TrainingRow::from_training(&training)?;

        retry_on_conflict("add_training", || {
            run_attempt(&self.pool, |conn| {
                if find_training(conn, &row.training_uuid)?.is_some() {
                    return Err(TxError::rejected(PersistenceError::DuplicateTraining(
                        row.training_uuid.clone(),
                    )));
                }
                if !row.canceled
                    && blocks_time(
                        occupant_at(conn, row.training_time)?.as_deref(),
                        &row.training_uuid,
                    )
                {
                    return Err(TxError::rejected(PersistenceError::TrainingTimeTaken(
                        training.time(),
                    )));
                }

                create_fn(&training).map_err(TxError::Rejected)?;

                diesel::insert_into(trainings::table)
                    .values(&row)
                    .execute(conn)?;

                debug!(training_uuid = %row.training_uuid, "Training added");
                Ok(())
            })
        })
    }

    fn get_training(&self, training_uuid: &str, user: &User) -> Result<Training, PersistenceError> {
        let mut conn = self.pool.get()?;

        let training: Training = find_training(&mut conn, training_uuid)?
            .ok_or_else(|| PersistenceError::TrainingNotFound(training_uuid.to_string()))?
            .into_training()?;
        can_user_see_training(user, &training)?;
        Ok(training)
    }

    fn update_training<E, F>(&self, training_uuid: &str, user: &User, mut update_fn: F) -> Result<(), E>
    where
        E: From<PersistenceError>,
        F: FnMut(Training) -> Result<Training, E>,
    {
        retry_on_conflict("update_training", || {
            run_attempt(&self.pool, |conn| {
                let current: Training = find_training(conn, training_uuid)?
                    .ok_or_else(|| {
                        TxError::rejected(PersistenceError::TrainingNotFound(
                            training_uuid.to_string(),
                        ))
                    })?
                    .into_training()
                    .map_err(TxError::rejected)?;

                let updated: Training =
                    authorize_and_apply(current, user, &mut update_fn).map_err(TxError::Rejected)?;
                let row: TrainingRow =
                    TrainingRow::from_training(&updated).map_err(TxError::rejected)?;

                if !row.canceled
                    && blocks_time(occupant_at(conn, row.training_time)?.as_deref(), training_uuid)
                {
                    return Err(TxError::rejected(PersistenceError::TrainingTimeTaken(
                        updated.time(),
                    )));
                }

                diesel::update(trainings::table.find(training_uuid))
                    .set(&row)
                    .execute(conn)?;

                debug!(training_uuid, "Training updated");
                Ok(())
            })
        })
    }

    fn all_trainings(&self, since: DateTime<Utc>) -> Result<Vec<Training>, PersistenceError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<TrainingRow> = trainings::table
            .filter(trainings::canceled.eq(false))
            .filter(trainings::training_time.ge(to_nanos(since)?))
            .order(trainings::training_time.asc())
            .select(TrainingRow::as_select())
            .load(&mut conn)?;

        load_trainings(rows)
    }

    fn trainings_for_user(
        &self,
        user_uuid: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Training>, PersistenceError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<TrainingRow> = trainings::table
            .filter(trainings::user_uuid.eq(user_uuid))
            .filter(trainings::canceled.eq(false))
            .filter(trainings::training_time.ge(to_nanos(since)?))
            .order(trainings::training_time.asc())
            .select(TrainingRow::as_select())
            .load(&mut conn)?;

        load_trainings(rows)
    }
}
