// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::cell::RefCell;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use gymslot_domain::{Availability, Factory, Hour};
use sled::transaction::ConflictableTransactionError;
use sled::{Db, Tree};
use tracing::debug;

use super::{abort, finish};
use crate::backend::document::{HOURS_TREE, open_tree};
use crate::error::PersistenceError;
use crate::repository::HourRepository;
use crate::time_codec::{from_key, to_key};

fn decode_availability(raw: &[u8]) -> Result<Availability, PersistenceError> {
    let value: &str =
        std::str::from_utf8(raw).map_err(|err| PersistenceError::CorruptRecord(err.to_string()))?;
    Ok(Availability::from_str(value)?)
}

/// Hours stored in the `hours` tree.
#[derive(Debug, Clone)]
pub struct DocumentHourRepository {
    hours: Tree,
    factory: Factory,
}

impl DocumentHourRepository {
    /// Opens the hour tree of `db`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be opened.
    pub fn new(db: &Db, factory: Factory) -> Result<Self, PersistenceError> {
        Ok(Self {
            hours: open_tree(db, HOURS_TREE)?,
            factory,
        })
    }

    fn hour_from(
        &self,
        stored: Option<&[u8]>,
        hour_time: DateTime<Utc>,
    ) -> Result<Hour, PersistenceError> {
        let hour: Hour = match stored {
            Some(raw) => self
                .factory
                .unmarshal_hour_from_storage(hour_time, decode_availability(raw)?)?,
            None => self.factory.new_not_available_hour(hour_time)?,
        };
        Ok(hour)
    }
}

impl HourRepository for DocumentHourRepository {
    fn factory(&self) -> &Factory {
        &self.factory
    }

    fn get_or_create_hour(&self, hour_time: DateTime<Utc>) -> Result<Hour, PersistenceError> {
        let stored = self.hours.get(to_key(hour_time)?)?;
        self.hour_from(stored.as_deref(), hour_time)
    }

    fn update_hour<E, F>(&self, hour_time: DateTime<Utc>, update_fn: F) -> Result<(), E>
    where
        E: From<PersistenceError>,
        F: FnMut(Hour) -> Result<Hour, E>,
    {
        let key: [u8; 8] = to_key(hour_time)?;
        let update_fn: RefCell<F> = RefCell::new(update_fn);

        let result = self.hours.transaction(|hours| {
            let stored = hours.get(key)?;
            let current: Hour = self.hour_from(stored.as_deref(), hour_time).map_err(abort)?;

            let mut apply = update_fn.borrow_mut();
            let updated: Hour = (*apply)(current).map_err(ConflictableTransactionError::Abort)?;

            hours.insert(&key[..], updated.availability().as_str())?;
            Ok(updated.availability())
        });

        let availability: Availability = finish(result)?;
        debug!(%hour_time, %availability, "Hour updated");
        Ok(())
    }

    fn stored_hours_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<(DateTime<Utc>, Availability)>, PersistenceError> {
        self.hours
            .range(to_key(start)?..=to_key(end)?)
            .map(|entry| {
                let (key, value) = entry?;
                Ok((from_key(&key)?, decode_availability(&value)?))
            })
            .collect()
    }
}
