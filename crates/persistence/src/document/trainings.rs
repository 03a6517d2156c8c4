// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use gymslot_domain::{Training, User, can_user_see_training};
use sled::transaction::{ConflictableTransactionError, TransactionalTree};
use sled::{Db, Transactional, Tree};
use tracing::debug;

use super::{abort, decode_uuid, finish};
use crate::backend::document::{TRAINING_TIMES_TREE, TRAININGS_TREE, open_tree};
use crate::data_models::TrainingDocument;
use crate::error::PersistenceError;
use crate::repository::{TrainingRepository, active_since, authorize_and_apply, blocks_time};
use crate::time_codec::to_key;

fn decode_training(raw: &[u8]) -> Result<Training, PersistenceError> {
    TrainingDocument::decode(raw)?.into_training()
}

fn encode_training(training: &Training) -> Result<Vec<u8>, PersistenceError> {
    TrainingDocument::from_training(training)?.encode()
}

/// Returns the time index key of `training`, or `None` once it is canceled.
fn time_key(training: &Training) -> Result<Option<[u8; 8]>, PersistenceError> {
    if training.is_canceled() {
        return Ok(None);
    }
    to_key(training.time()).map(Some)
}

/// Fails when another active training holds the time slot at `key`.
fn check_time_free<E: From<PersistenceError>>(
    times: &TransactionalTree,
    key: [u8; 8],
    training: &Training,
) -> Result<(), ConflictableTransactionError<E>> {
    let occupant = times.get(key)?;
    let occupant: Option<&str> = occupant.as_deref().map(decode_uuid).transpose().map_err(abort)?;

    if blocks_time(occupant, training.uuid()) {
        return Err(abort(PersistenceError::TrainingTimeTaken(training.time())));
    }
    Ok(())
}

/// Trainings stored as JSON documents, with an index of occupied times.
#[derive(Debug, Clone)]
pub struct DocumentTrainingRepository {
    trainings: Tree,
    training_times: Tree,
}

impl DocumentTrainingRepository {
    /// Opens the training trees of `db`.
    ///
    /// # Errors
    ///
    /// Returns an error if a tree cannot be opened.
    pub fn new(db: &Db) -> Result<Self, PersistenceError> {
        Ok(Self {
            trainings: open_tree(db, TRAININGS_TREE)?,
            training_times: open_tree(db, TRAINING_TIMES_TREE)?,
        })
    }

    fn load_all(&self) -> Result<Vec<Training>, PersistenceError> {
        self.trainings
            .iter()
            .map(|entry| {
                let (_, value) = entry?;
                decode_training(&value)
            })
            .collect()
    }
}

impl TrainingRepository for DocumentTrainingRepository {
    fn add_training<E, F>(&self, training: Training, create_fn: F) -> Result<(), E>
    where
        E: From<PersistenceError>,
        F: FnMut(&Training) -> Result<(), E>,
    {
        let encoded: Vec<u8> = encode_training(&training)?;
        let key: Option<[u8; 8]> = time_key(&training)?;
        let create_fn: RefCell<F> = RefCell::new(create_fn);

        let result = (&self.trainings, &self.training_times).transaction(|(trainings, times)| {
            if trainings.get(training.uuid())?.is_some() {
                return Err(abort(PersistenceError::DuplicateTraining(
                    training.uuid().to_string(),
                )));
            }
            if let Some(key) = key {
                check_time_free(times, key, &training)?;
            }

            let mut create = create_fn.borrow_mut();
            (*create)(&training).map_err(ConflictableTransactionError::Abort)?;

            trainings.insert(training.uuid(), encoded.as_slice())?;
            if let Some(key) = key {
                times.insert(&key[..], training.uuid())?;
            }
            Ok(())
        });

        finish(result)?;
        debug!(training_uuid = training.uuid(), "Training added");
        Ok(())
    }

    fn get_training(&self, training_uuid: &str, user: &User) -> Result<Training, PersistenceError> {
        let raw = self
            .trainings
            .get(training_uuid)?
            .ok_or_else(|| PersistenceError::TrainingNotFound(training_uuid.to_string()))?;

        let training: Training = decode_training(&raw)?;
        can_user_see_training(user, &training)?;
        Ok(training)
    }

    fn update_training<E, F>(&self, training_uuid: &str, user: &User, update_fn: F) -> Result<(), E>
    where
        E: From<PersistenceError>,
        F: FnMut(Training) -> Result<Training, E>,
    {
        let update_fn: RefCell<F> = RefCell::new(update_fn);

        let result = (&self.trainings, &self.training_times).transaction(|(trainings, times)| {
            let raw = trainings.get(training_uuid)?.ok_or_else(|| {
                abort(PersistenceError::TrainingNotFound(training_uuid.to_string()))
            })?;
            let current: Training = decode_training(&raw).map_err(abort)?;
            let previous_key: Option<[u8; 8]> = time_key(&current).map_err(abort)?;

            let updated: Training = authorize_and_apply(current, user, &mut *update_fn.borrow_mut())
                .map_err(ConflictableTransactionError::Abort)?;
            let next_key: Option<[u8; 8]> = time_key(&updated).map_err(abort)?;

            if previous_key != next_key {
                if let Some(key) = next_key {
                    check_time_free(times, key, &updated)?;
                }
                if let Some(key) = previous_key {
                    times.remove(&key[..])?;
                }
                if let Some(key) = next_key {
                    times.insert(&key[..], training_uuid)?;
                }
            }

            let encoded: Vec<u8> = encode_training(&updated).map_err(abort)?;
            trainings.insert(training_uuid, encoded)?;
            Ok(())
        });

        finish(result)?;
        debug!(training_uuid, "Training updated");
        Ok(())
    }

    fn all_trainings(&self, since: DateTime<Utc>) -> Result<Vec<Training>, PersistenceError> {
        Ok(active_since(self.load_all()?, since))
    }

    fn trainings_for_user(
        &self,
        user_uuid: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Training>, PersistenceError> {
        let owned = self
            .load_all()?
            .into_iter()
            .filter(|training| training.user_uuid() == user_uuid);
        Ok(active_since(owned, since))
    }
}
