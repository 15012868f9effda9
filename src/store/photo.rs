// Photo repository — images attached to a place.
// Rows carry an opaque file path; the file itself is handled by `photostore`
// and orchestrated in `service`.

use rusqlite::{params, OptionalExtension, Row};

use crate::error::Result;
use crate::model::Photo;

use super::{now_iso, PhotoRepository, SqliteStore};

fn photo_from_row(row: &Row) -> rusqlite::Result<Photo> {
    Ok(Photo {
        id: row.get(0)?,
        place_id: row.get(1)?,
        file_path: row.get(2)?,
        created_at: row.get(3)?,
    })
}

impl PhotoRepository for SqliteStore {
    fn list_photos_for(&self, place_id: i64) -> Result<Vec<Photo>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, placeId, filePath, createdAt FROM photos
             WHERE placeId = ?1
             ORDER BY createdAt ASC, id ASC",
        )?;
        let photos = stmt
            .query_map(params![place_id], photo_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(photos)
    }

    fn get_photo(&self, id: i64) -> Result<Option<Photo>> {
        let result = self
            .conn
            .query_row(
                "SELECT id, placeId, filePath, createdAt FROM photos WHERE id = ?1",
                params![id],
                photo_from_row,
            )
            .optional()?;
        Ok(result)
    }

    fn create_photo(&self, place_id: i64, file_path: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO photos (placeId, filePath, createdAt) VALUES (?1, ?2, ?3)",
            params![place_id, file_path, now_iso()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn delete_photo(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM photos WHERE id = ?1", params![id])?;
        Ok(())
    }
}
