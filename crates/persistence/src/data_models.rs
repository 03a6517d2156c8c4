// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage representations of the aggregates.

use std::str::FromStr;

use diesel::prelude::*;
use gymslot_domain::{Availability, RescheduleProposal, Training, UserType};
use serde::{Deserialize, Serialize};

use crate::diesel_schema::{hours, trainings};
use crate::error::PersistenceError;
use crate::time_codec::to_nanos;

/// Row of the `hours` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = hours)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HourRow {
    pub hour_time: i64,
    pub availability: String,
}

impl HourRow {
    pub fn availability(&self) -> Result<Availability, PersistenceError> {
        Availability::from_str(&self.availability).map_err(PersistenceError::from)
    }
}

/// Row of the `trainings` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = trainings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TrainingRow {
    pub training_uuid: String,
    pub user_uuid: String,
    pub user_name: String,
    pub training_time: i64,
    pub notes: String,
    pub canceled: bool,
    pub proposed_time: Option<i64>,
    pub move_proposed_by: Option<String>,
}

impl TrainingRow {
    pub fn from_training(training: &Training) -> Result<Self, PersistenceError> {
        let proposal: Option<RescheduleProposal> = training.reschedule_proposal();

        Ok(Self {
            training_uuid: training.uuid().to_string(),
            user_uuid: training.user_uuid().to_string(),
            user_name: training.user_name().to_string(),
            training_time: to_nanos(training.time())?,
            notes: training.notes().to_string(),
            canceled: training.is_canceled(),
            proposed_time: proposal
                .map(|proposal| to_nanos(proposal.new_time))
                .transpose()?,
            move_proposed_by: proposal.map(|proposal| proposal.proposed_by.as_str().to_string()),
        })
    }

    pub fn into_training(self) -> Result<Training, PersistenceError> {
        let proposal: Option<RescheduleProposal> = match (self.proposed_time, self.move_proposed_by) {
            (Some(new_time), Some(proposed_by)) => Some(RescheduleProposal {
                new_time: chrono::DateTime::from_timestamp_nanos(new_time),
                proposed_by: UserType::from_str(&proposed_by)
                    .map_err(|err| PersistenceError::CorruptRecord(err.to_string()))?,
            }),
            (None, None) => None,
            _ => {
                return Err(PersistenceError::CorruptRecord(format!(
                    "training '{}' has a partial reschedule proposal",
                    self.training_uuid
                )));
            }
        };

        Ok(Training::unmarshal_from_storage(
            self.training_uuid,
            self.user_uuid,
            self.user_name,
            chrono::DateTime::from_timestamp_nanos(self.training_time),
            self.notes,
            self.canceled,
            proposal,
        )?)
    }
}

/// Serializable representation of a training in the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingDocument {
    pub uuid: String,
    pub user_uuid: String,
    pub user: String,
    pub time_nanos: i64,
    pub notes: String,
    pub canceled: bool,
    pub proposed_time_nanos: Option<i64>,
    pub move_proposed_by: Option<UserType>,
}

impl TrainingDocument {
    pub fn from_training(training: &Training) -> Result<Self, PersistenceError> {
        let proposal: Option<RescheduleProposal> = training.reschedule_proposal();

        Ok(Self {
            uuid: training.uuid().to_string(),
            user_uuid: training.user_uuid().to_string(),
            user: training.user_name().to_string(),
            time_nanos: to_nanos(training.time())?,
            notes: training.notes().to_string(),
            canceled: training.is_canceled(),
            proposed_time_nanos: proposal
                .map(|proposal| to_nanos(proposal.new_time))
                .transpose()?,
            move_proposed_by: proposal.map(|proposal| proposal.proposed_by),
        })
    }

    pub fn into_training(self) -> Result<Training, PersistenceError> {
        let proposal: Option<RescheduleProposal> =
            match (self.proposed_time_nanos, self.move_proposed_by) {
                (Some(new_time), Some(proposed_by)) => Some(RescheduleProposal {
                    new_time: chrono::DateTime::from_timestamp_nanos(new_time),
                    proposed_by,
                }),
                (None, None) => None,
                _ => {
                    return Err(PersistenceError::CorruptRecord(format!(
                        "training '{}' has a partial reschedule proposal",
                        self.uuid
                    )));
                }
            };

        Ok(Training::unmarshal_from_storage(
            self.uuid,
            self.user_uuid,
            self.user,
            chrono::DateTime::from_timestamp_nanos(self.time_nanos),
            self.notes,
            self.canceled,
            proposal,
        )?)
    }

    pub fn encode(&self) -> Result<Vec<u8>, PersistenceError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
