// TripPlace repository — ordered stops within a trip's itinerary.
// Reads LEFT JOIN places so a stop survives its place being deleted; the
// joined place comes back as None in that case.

use rusqlite::{params, OptionalExtension, Row};

use crate::error::Result;
use crate::model::{NewTripPlace, Place, TripPlace, TripPlaceWithPlace};

use super::{now_iso, SqliteStore, TripPlaceRepository};

const JOINED_SELECT: &str = r#"
    SELECT tp.id, tp.tripId, tp.placeId, tp."order", tp.visited, tp.visitDate,
           tp.notes, tp.createdAt,
           p.id, p.name, p.description, p.visitlater, p.liked, p.lat, p.lng,
           p.createdAt
    FROM trip_places tp
    LEFT JOIN places p ON tp.placeId = p.id
"#;

fn trip_place_from_row(row: &Row) -> rusqlite::Result<TripPlace> {
    Ok(TripPlace {
        id: row.get(0)?,
        trip_id: row.get(1)?,
        place_id: row.get(2)?,
        order: row.get(3)?,
        visited: row.get(4)?,
        visit_date: row.get(5)?,
        notes: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn joined_from_row(row: &Row) -> rusqlite::Result<TripPlaceWithPlace> {
    let trip_place = trip_place_from_row(row)?;

    // p.id is NULL when the place no longer exists
    let place = match row.get::<_, Option<i64>>(8)? {
        Some(place_id) => Some(Place {
            id: place_id,
            name: row.get(9)?,
            description: row.get(10)?,
            visitlater: row.get(11)?,
            liked: row.get(12)?,
            lat: row.get(13)?,
            lng: row.get(14)?,
            created_at: row.get(15)?,
        }),
        None => None,
    };

    Ok(TripPlaceWithPlace { trip_place, place })
}

impl TripPlaceRepository for SqliteStore {
    fn list_trip_places(&self, trip_id: i64) -> Result<Vec<TripPlaceWithPlace>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"{} WHERE tp.tripId = ?1 ORDER BY tp."order" ASC, tp.id ASC"#,
            JOINED_SELECT
        ))?;
        let stops = stmt
            .query_map(params![trip_id], joined_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(stops)
    }

    fn next_unvisited(&self, trip_id: i64) -> Result<Option<TripPlaceWithPlace>> {
        let result = self
            .conn
            .query_row(
                &format!(
                    r#"{} WHERE tp.tripId = ?1 AND tp.visited = 0
                       ORDER BY tp."order" ASC, tp.id ASC
                       LIMIT 1"#,
                    JOINED_SELECT
                ),
                params![trip_id],
                joined_from_row,
            )
            .optional()?;
        Ok(result)
    }

    fn get_trip_place(&self, id: i64) -> Result<Option<TripPlace>> {
        let result = self
            .conn
            .query_row(
                r#"SELECT id, tripId, placeId, "order", visited, visitDate, notes, createdAt
                   FROM trip_places WHERE id = ?1"#,
                params![id],
                trip_place_from_row,
            )
            .optional()?;
        Ok(result)
    }

    fn create_trip_place(&self, trip_place: &NewTripPlace) -> Result<i64> {
        // Order assignment and insert are one transaction so two concurrent
        // appends cannot claim the same slot.
        let tx = self.conn.unchecked_transaction()?;

        let order = match trip_place.order {
            Some(order) => order,
            None => {
                let max: Option<i64> = tx.query_row(
                    r#"SELECT MAX("order") FROM trip_places WHERE tripId = ?1"#,
                    params![trip_place.trip_id],
                    |row| row.get(0),
                )?;
                max.unwrap_or(-1) + 1
            }
        };

        tx.execute(
            r#"INSERT INTO trip_places (tripId, placeId, "order", visited, visitDate, notes, createdAt)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"#,
            params![
                trip_place.trip_id,
                trip_place.place_id,
                order,
                trip_place.visited,
                trip_place.visit_date,
                trip_place.notes,
                now_iso(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    fn update_order(&self, id: i64, order: i64) -> Result<()> {
        self.conn.execute(
            r#"UPDATE trip_places SET "order" = ?1 WHERE id = ?2"#,
            params![order, id],
        )?;
        Ok(())
    }

    fn set_visited(&self, id: i64, visited: bool, visit_date: Option<&str>) -> Result<()> {
        // Un-visiting always clears the date; the caller's value only counts
        // on the way in.
        let visit_date = if visited { visit_date } else { None };
        self.conn.execute(
            "UPDATE trip_places SET visited = ?1, visitDate = ?2 WHERE id = ?3",
            params![visited, visit_date, id],
        )?;
        Ok(())
    }

    fn update_notes(&self, id: i64, notes: Option<&str>) -> Result<()> {
        self.conn.execute(
            "UPDATE trip_places SET notes = ?1 WHERE id = ?2",
            params![notes, id],
        )?;
        Ok(())
    }

    fn delete_trip_place(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM trip_places WHERE id = ?1", params![id])?;
        Ok(())
    }
}
