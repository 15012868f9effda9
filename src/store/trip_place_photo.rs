// TripPlacePhoto repository — images attached to an itinerary stop.
// Same shape as `photo`, scoped to tripPlaceId.

use rusqlite::{params, OptionalExtension, Row};

use crate::error::Result;
use crate::model::TripPlacePhoto;

use super::{now_iso, SqliteStore, TripPlacePhotoRepository};

fn trip_place_photo_from_row(row: &Row) -> rusqlite::Result<TripPlacePhoto> {
    Ok(TripPlacePhoto {
        id: row.get(0)?,
        trip_place_id: row.get(1)?,
        file_path: row.get(2)?,
        created_at: row.get(3)?,
    })
}

impl TripPlacePhotoRepository for SqliteStore {
    fn list_trip_place_photos_for(&self, trip_place_id: i64) -> Result<Vec<TripPlacePhoto>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, tripPlaceId, filePath, createdAt FROM trip_place_photos
             WHERE tripPlaceId = ?1
             ORDER BY createdAt ASC, id ASC",
        )?;
        let photos = stmt
            .query_map(params![trip_place_id], trip_place_photo_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(photos)
    }

    fn get_trip_place_photo(&self, id: i64) -> Result<Option<TripPlacePhoto>> {
        let result = self
            .conn
            .query_row(
                "SELECT id, tripPlaceId, filePath, createdAt FROM trip_place_photos WHERE id = ?1",
                params![id],
                trip_place_photo_from_row,
            )
            .optional()?;
        Ok(result)
    }

    fn create_trip_place_photo(&self, trip_place_id: i64, file_path: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO trip_place_photos (tripPlaceId, filePath, createdAt) VALUES (?1, ?2, ?3)",
            params![trip_place_id, file_path, now_iso()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn delete_trip_place_photo(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM trip_place_photos WHERE id = ?1", params![id])?;
        Ok(())
    }
}
