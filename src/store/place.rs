// Place repository

use rusqlite::{params, OptionalExtension, Row};

use crate::error::Result;
use crate::model::{NewPlace, Place, PlacePatch};

use super::{now_iso, PlaceRepository, SqliteStore};

const PLACE_COLUMNS: &str = "id, name, description, visitlater, liked, lat, lng, createdAt";

fn place_from_row(row: &Row) -> rusqlite::Result<Place> {
    Ok(Place {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        visitlater: row.get(3)?,
        liked: row.get(4)?,
        lat: row.get(5)?,
        lng: row.get(6)?,
        created_at: row.get(7)?,
    })
}

impl PlaceRepository for SqliteStore {
    fn list_places(&self) -> Result<Vec<Place>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM places ORDER BY createdAt DESC, id DESC",
            PLACE_COLUMNS
        ))?;
        let places = stmt
            .query_map([], place_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(places)
    }

    fn get_place(&self, id: i64) -> Result<Option<Place>> {
        let result = self
            .conn
            .query_row(
                &format!("SELECT {} FROM places WHERE id = ?1", PLACE_COLUMNS),
                params![id],
                place_from_row,
            )
            .optional()?;
        Ok(result)
    }

    fn create_place(&self, place: &NewPlace) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO places (name, description, visitlater, liked, lat, lng, createdAt)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                place.name,
                place.description,
                place.visitlater,
                place.liked,
                place.lat,
                place.lng,
                now_iso(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_place(&self, id: i64, patch: &PlacePatch) -> Result<()> {
        // Fetch-merge-write: omitted fields keep their stored values.
        // Last-writer-wins for same-id concurrent edits.
        let Some(current) = self.get_place(id)? else {
            return Ok(());
        };

        let name = patch.name.clone().unwrap_or(current.name);
        let description = patch.description.clone().unwrap_or(current.description);
        let visitlater = patch.visitlater.unwrap_or(current.visitlater);
        let liked = patch.liked.unwrap_or(current.liked);
        let lat = patch.lat.unwrap_or(current.lat);
        let lng = patch.lng.unwrap_or(current.lng);

        self.conn.execute(
            "UPDATE places SET name = ?1, description = ?2, visitlater = ?3, liked = ?4,
                    lat = ?5, lng = ?6
             WHERE id = ?7",
            params![name, description, visitlater, liked, lat, lng, id],
        )?;
        Ok(())
    }

    fn delete_place(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM places WHERE id = ?1", params![id])?;
        Ok(())
    }
}
