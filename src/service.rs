// Cross-entity operations: everything that has to touch files and rows
// together, in the interruption-safe order (file first, then row).

use std::path::Path;

use crate::error::Result;
use crate::photostore;
use crate::store::{
    PhotoRepository, PlaceRepository, Store, TripPlacePhotoRepository, TripPlaceRepository,
    TripRepository,
};

/// Import a photo file into the managed folder, then record it against the
/// place. If the row insert fails the imported file is removed again.
pub fn attach_place_photo(
    store: &dyn Store,
    photos_dir: &Path,
    place_id: i64,
    source: &Path,
) -> Result<i64> {
    let stored = photostore::import_photo(source, photos_dir)?;
    let stored = stored.to_string_lossy().into_owned();
    match store.create_photo(place_id, &stored) {
        Ok(id) => Ok(id),
        Err(e) => {
            photostore::delete_photo_file(&stored);
            Err(e)
        }
    }
}

/// Same flow as `attach_place_photo`, scoped to an itinerary stop.
pub fn attach_trip_place_photo(
    store: &dyn Store,
    photos_dir: &Path,
    trip_place_id: i64,
    source: &Path,
) -> Result<i64> {
    let stored = photostore::import_photo(source, photos_dir)?;
    let stored = stored.to_string_lossy().into_owned();
    match store.create_trip_place_photo(trip_place_id, &stored) {
        Ok(id) => Ok(id),
        Err(e) => {
            photostore::delete_photo_file(&stored);
            Err(e)
        }
    }
}

/// Delete a place photo: file first (best-effort), then the row.
/// Missing id is a no-op.
pub fn remove_photo(store: &dyn Store, photo_id: i64) -> Result<()> {
    let Some(photo) = store.get_photo(photo_id)? else {
        return Ok(());
    };
    photostore::delete_photo_file(&photo.file_path);
    store.delete_photo(photo_id)
}

/// Delete a stop photo: file first (best-effort), then the row.
pub fn remove_trip_place_photo(store: &dyn Store, photo_id: i64) -> Result<()> {
    let Some(photo) = store.get_trip_place_photo(photo_id)? else {
        return Ok(());
    };
    photostore::delete_photo_file(&photo.file_path);
    store.delete_trip_place_photo(photo_id)
}

/// Delete a place together with its photo files. Photo rows cascade with the
/// place row; itinerary stops that reference the place stay behind and read
/// back with `place: None`.
pub fn remove_place(store: &dyn Store, place_id: i64) -> Result<()> {
    for photo in store.list_photos_for(place_id)? {
        photostore::delete_photo_file(&photo.file_path);
    }
    store.delete_place(place_id)
}

/// Delete an itinerary stop together with its photo files and rows.
/// The referenced place is untouched.
pub fn remove_trip_place(store: &dyn Store, trip_place_id: i64) -> Result<()> {
    for photo in store.list_trip_place_photos_for(trip_place_id)? {
        photostore::delete_photo_file(&photo.file_path);
        store.delete_trip_place_photo(photo.id)?;
    }
    store.delete_trip_place(trip_place_id)
}

/// Delete a trip: for every stop, remove its photo files and rows, then
/// delete the trip row (the stop rows cascade with it).
pub fn remove_trip(store: &dyn Store, trip_id: i64) -> Result<()> {
    for stop in store.list_trip_places(trip_id)? {
        for photo in store.list_trip_place_photos_for(stop.trip_place.id)? {
            photostore::delete_photo_file(&photo.file_path);
            store.delete_trip_place_photo(photo.id)?;
        }
    }
    store.delete_trip(trip_id)
}

/// Renumber a trip's itinerary to the given id sequence, one `update_order`
/// call per row with its new zero-based position. Ids not in the trip are
/// ignored by the store.
pub fn reorder_trip_places(store: &dyn Store, ids: &[i64]) -> Result<()> {
    for (position, id) in ids.iter().enumerate() {
        store.update_order(*id, position as i64)?;
    }
    Ok(())
}
