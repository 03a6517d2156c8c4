// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lifecycle of one attendee booking.
//!
//! ## Invariants
//!
//! - Identity and owner fields are non-empty and never change
//! - `canceled` is terminal; cancelling twice is an error
//! - A reschedule proposal always carries both the new time and the proposer
//! - Notes never exceed [`MAX_NOTES_LENGTH`] bytes
//!
//! ## Free-cancel window
//!
//! A training at least [`FREE_CANCEL_NOTICE_HOURS`] hours away may be
//! cancelled without penalty and moved directly. Closer than that, moving
//! it requires a proposal approved by the other party.

use chrono::{DateTime, Duration, Utc};

use crate::error::TrainingError;
use crate::user::UserType;

/// Maximum length of training notes, in bytes.
pub const MAX_NOTES_LENGTH: usize = 1000;

/// Notice period that keeps a training inside the free-cancel window.
pub const FREE_CANCEL_NOTICE_HOURS: i64 = 24;

/// A pending request to move a training.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RescheduleProposal {
    pub new_time: DateTime<Utc>,
    pub proposed_by: UserType,
}

/// A booking of one attendee at one hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Training {
    uuid: String,
    user_uuid: String,
    user_name: String,
    time: DateTime<Utc>,
    notes: String,
    canceled: bool,
    reschedule_proposal: Option<RescheduleProposal>,
}

impl Training {
    /// Creates a new, not canceled training without notes.
    ///
    /// # Errors
    ///
    /// Returns a `TrainingError` if an identity field is empty or the time
    /// is the Unix epoch.
    pub fn new(
        uuid: impl Into<String>,
        user_uuid: impl Into<String>,
        user_name: impl Into<String>,
        time: DateTime<Utc>,
    ) -> Result<Self, TrainingError> {
        let uuid: String = uuid.into();
        let user_uuid: String = user_uuid.into();
        let user_name: String = user_name.into();

        if uuid.is_empty() {
            return Err(TrainingError::EmptyTrainingUuid);
        }
        if user_uuid.is_empty() {
            return Err(TrainingError::EmptyUserUuid);
        }
        if user_name.is_empty() {
            return Err(TrainingError::EmptyUserName);
        }
        if time == DateTime::UNIX_EPOCH {
            return Err(TrainingError::ZeroTrainingTime);
        }

        Ok(Self {
            uuid,
            user_uuid,
            user_name,
            time,
            notes: String::new(),
            canceled: false,
            reschedule_proposal: None,
        })
    }

    /// Rebuilds a stored training.
    ///
    /// # Errors
    ///
    /// Returns a `TrainingError` if the stored values break any invariant
    /// enforced by [`Training::new`] or [`Training::update_notes`].
    pub fn unmarshal_from_storage(
        uuid: impl Into<String>,
        user_uuid: impl Into<String>,
        user_name: impl Into<String>,
        time: DateTime<Utc>,
        notes: impl Into<String>,
        canceled: bool,
        reschedule_proposal: Option<RescheduleProposal>,
    ) -> Result<Self, TrainingError> {
        let mut training: Self = Self::new(uuid, user_uuid, user_name, time)?;
        training.update_notes(notes)?;
        training.canceled = canceled;
        training.reschedule_proposal = reschedule_proposal;
        Ok(training)
    }

    #[must_use]
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    #[must_use]
    pub fn user_uuid(&self) -> &str {
        &self.user_uuid
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    #[must_use]
    pub const fn time(&self) -> DateTime<Utc> {
        self.time
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub const fn is_canceled(&self) -> bool {
        self.canceled
    }

    #[must_use]
    pub const fn reschedule_proposal(&self) -> Option<RescheduleProposal> {
        self.reschedule_proposal
    }

    #[must_use]
    pub const fn is_reschedule_proposed(&self) -> bool {
        self.reschedule_proposal.is_some()
    }

    #[must_use]
    pub fn proposed_new_time(&self) -> Option<DateTime<Utc>> {
        self.reschedule_proposal.map(|proposal| proposal.new_time)
    }

    #[must_use]
    pub fn move_proposed_by(&self) -> Option<UserType> {
        self.reschedule_proposal.map(|proposal| proposal.proposed_by)
    }

    /// Returns true while the training is at least a day away.
    #[must_use]
    pub fn can_be_canceled_for_free(&self) -> bool {
        self.can_be_canceled_for_free_at(Utc::now())
    }

    /// Returns true when, as seen at `now`, the training is at least a day away.
    #[must_use]
    pub fn can_be_canceled_for_free_at(&self, now: DateTime<Utc>) -> bool {
        self.time - now >= Duration::hours(FREE_CANCEL_NOTICE_HOURS)
    }

    /// Cancels the training.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError::AlreadyCanceled` on a canceled training.
    pub const fn cancel(&mut self) -> Result<(), TrainingError> {
        if self.canceled {
            return Err(TrainingError::AlreadyCanceled);
        }

        self.canceled = true;
        Ok(())
    }

    /// Moves the training directly to `new_time`.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError::CantRescheduleBeforeTime` outside the
    /// free-cancel window; the training is left unchanged.
    pub fn reschedule_training(&mut self, new_time: DateTime<Utc>) -> Result<(), TrainingError> {
        if !self.can_be_canceled_for_free() {
            return Err(TrainingError::CantRescheduleBeforeTime {
                training_time: self.time,
            });
        }

        self.time = new_time;
        Ok(())
    }

    /// Records a proposal to move the training, replacing any earlier one.
    pub const fn propose_reschedule(&mut self, new_time: DateTime<Utc>, proposed_by: UserType) {
        self.reschedule_proposal = Some(RescheduleProposal {
            new_time,
            proposed_by,
        });
    }

    /// Accepts the pending proposal and moves the training.
    ///
    /// # Errors
    ///
    /// - `TrainingError::NoRescheduleRequested` if nothing was proposed
    /// - `TrainingError::ApproveBySameUserType` if `approved_by` proposed it
    pub fn approve_reschedule(&mut self, approved_by: UserType) -> Result<(), TrainingError> {
        let proposal: RescheduleProposal = self
            .reschedule_proposal
            .ok_or(TrainingError::NoRescheduleRequested)?;

        if proposal.proposed_by == approved_by {
            return Err(TrainingError::ApproveBySameUserType {
                user_type: approved_by,
            });
        }

        self.time = proposal.new_time;
        self.reschedule_proposal = None;
        Ok(())
    }

    /// Drops the pending proposal and keeps the current time.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError::NoRescheduleRequested` if nothing was proposed.
    pub fn reject_reschedule(&mut self) -> Result<(), TrainingError> {
        if self.reschedule_proposal.take().is_none() {
            return Err(TrainingError::NoRescheduleRequested);
        }
        Ok(())
    }

    /// Replaces the notes.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError::NoteTooLong` above [`MAX_NOTES_LENGTH`] bytes.
    pub fn update_notes(&mut self, notes: impl Into<String>) -> Result<(), TrainingError> {
        let notes: String = notes.into();
        if notes.len() > MAX_NOTES_LENGTH {
            return Err(TrainingError::NoteTooLong {
                length: notes.len(),
            });
        }

        self.notes = notes;
        Ok(())
    }
}
