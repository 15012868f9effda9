// Trip repository.
// "Current trip" is a cross-row singleton: any write that sets current=true
// first demotes every other trip, inside one transaction, so readers never
// observe zero or two current trips.

use rusqlite::{params, OptionalExtension, Row};

use crate::error::Result;
use crate::model::{NewTrip, Trip, TripPatch};

use super::{now_iso, SqliteStore, TripRepository};

const TRIP_COLUMNS: &str = "id, title, description, startDate, endDate, current, createdAt";

fn trip_from_row(row: &Row) -> rusqlite::Result<Trip> {
    Ok(Trip {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        current: row.get(5)?,
        created_at: row.get(6)?,
    })
}

impl TripRepository for SqliteStore {
    fn list_trips(&self) -> Result<Vec<Trip>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM trips ORDER BY createdAt DESC, id DESC",
            TRIP_COLUMNS
        ))?;
        let trips = stmt
            .query_map([], trip_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(trips)
    }

    fn get_trip(&self, id: i64) -> Result<Option<Trip>> {
        let result = self
            .conn
            .query_row(
                &format!("SELECT {} FROM trips WHERE id = ?1", TRIP_COLUMNS),
                params![id],
                trip_from_row,
            )
            .optional()?;
        Ok(result)
    }

    fn get_current_trip(&self) -> Result<Option<Trip>> {
        let result = self
            .conn
            .query_row(
                &format!("SELECT {} FROM trips WHERE current = 1 LIMIT 1", TRIP_COLUMNS),
                [],
                trip_from_row,
            )
            .optional()?;
        Ok(result)
    }

    fn create_trip(&self, trip: &NewTrip) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        if trip.current {
            tx.execute("UPDATE trips SET current = 0", [])?;
        }
        tx.execute(
            "INSERT INTO trips (title, description, startDate, endDate, current, createdAt)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                trip.title,
                trip.description,
                trip.start_date,
                trip.end_date,
                trip.current,
                now_iso(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    fn update_trip(&self, id: i64, patch: &TripPatch) -> Result<()> {
        let Some(current_row) = self.get_trip(id)? else {
            return Ok(());
        };

        let title = patch.title.clone().unwrap_or(current_row.title);
        let description = patch.description.clone().unwrap_or(current_row.description);
        let start_date = patch.start_date.clone().unwrap_or(current_row.start_date);
        let end_date = patch.end_date.clone().unwrap_or(current_row.end_date);
        let current = patch.current.unwrap_or(current_row.current);

        let tx = self.conn.unchecked_transaction()?;
        if patch.current == Some(true) {
            tx.execute("UPDATE trips SET current = 0", [])?;
        }
        tx.execute(
            "UPDATE trips SET title = ?1, description = ?2, startDate = ?3, endDate = ?4,
                    current = ?5
             WHERE id = ?6",
            params![title, description, start_date, end_date, current, id],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete_trip(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM trips WHERE id = ?1", params![id])?;
        Ok(())
    }
}
