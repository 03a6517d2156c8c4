// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use gymslot_domain::{Availability, Factory, Hour};
use tracing::debug;

use super::{TxError, run_attempt};
use crate::atomic::retry_on_conflict;
use crate::backend::sqlite::SqlitePool;
use crate::data_models::HourRow;
use crate::diesel_schema::hours;
use crate::error::PersistenceError;
use crate::repository::HourRepository;
use crate::time_codec::to_nanos;

/// Hours stored in the `hours` table.
#[derive(Clone)]
pub struct SqliteHourRepository {
    pool: SqlitePool,
    factory: Factory,
}

impl SqliteHourRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool, factory: Factory) -> Self {
        Self { pool, factory }
    }

    fn hour_from(
        &self,
        row: Option<HourRow>,
        hour_time: DateTime<Utc>,
    ) -> Result<Hour, PersistenceError> {
        let hour: Hour = match row {
            Some(row) => self
                .factory
                .unmarshal_hour_from_storage(hour_time, row.availability()?)?,
            None => self.factory.new_not_available_hour(hour_time)?,
        };
        Ok(hour)
    }
}

fn find_hour(conn: &mut SqliteConnection, key: i64) -> QueryResult<Option<HourRow>> {
    hours::table
        .find(key)
        .select(HourRow::as_select())
        .first(conn)
        .optional()
}

impl HourRepository for SqliteHourRepository {
    fn factory(&self) -> &Factory {
        &self.factory
    }

    fn get_or_create_hour(&self, hour_time: DateTime<Utc>) -> Result<Hour, PersistenceError> {
        let key: i64 = to_nanos(hour_time)?;
        let mut conn = self.pool.get()?;
        let row: Option<HourRow> = find_hour(&mut conn, key)?;
        self.hour_from(row, hour_time)
    }

    fn update_hour<E, F>(&self, hour_time: DateTime<Utc>, mut update_fn: F) -> Result<(), E>
    where
        E: From<PersistenceError>,
        F: FnMut(Hour) -> Result<Hour, E>,
    {
        let key: i64 = to_nanos(hour_time)?;

        retry_on_conflict("update_hour", || {
            run_attempt(&self.pool, |conn| {
                let row: Option<HourRow> = find_hour(conn, key)?;
                let current: Hour = self.hour_from(row, hour_time).map_err(TxError::rejected)?;
                let updated: Hour = update_fn(current).map_err(TxError::Rejected)?;
                let availability: &str = updated.availability().as_str();

                diesel::insert_into(hours::table)
                    .values((hours::hour_time.eq(key), hours::availability.eq(availability)))
                    .on_conflict(hours::hour_time)
                    .do_update()
                    .set(hours::availability.eq(availability))
                    .execute(conn)?;

                debug!(%hour_time, availability, "Hour updated");
                Ok(())
            })
        })
    }

    fn stored_hours_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<(DateTime<Utc>, Availability)>, PersistenceError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<HourRow> = hours::table
            .filter(hours::hour_time.between(to_nanos(start)?, to_nanos(end)?))
            .order(hours::hour_time.asc())
            .select(HourRow::as_select())
            .load(&mut conn)?;

        rows.into_iter()
            .map(|row| {
                Ok((
                    DateTime::from_timestamp_nanos(row.hour_time),
                    row.availability()?,
                ))
            })
            .collect()
    }
}
