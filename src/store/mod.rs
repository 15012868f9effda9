// Repository layer — the sole entry points to persisted state.
// Five resource-scoped traits, implemented twice: `SqliteStore` against the
// embedded database, and `UnsupportedStore` for targets without one.

mod place;
mod photo;
mod trip;
mod trip_place;
mod trip_place_photo;
mod unsupported;

#[cfg(test)]
mod tests;

use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;
use crate::model::{
    NewPlace, NewTrip, NewTripPlace, Photo, Place, PlacePatch, Trip, TripPatch, TripPlace,
    TripPlacePhoto, TripPlaceWithPlace,
};

pub use unsupported::UnsupportedStore;

pub trait PlaceRepository {
    /// All places, newest first.
    fn list_places(&self) -> Result<Vec<Place>>;
    fn get_place(&self, id: i64) -> Result<Option<Place>>;
    fn create_place(&self, place: &NewPlace) -> Result<i64>;
    /// Fetch-merge-write; a missing id is a no-op.
    fn update_place(&self, id: i64, patch: &PlacePatch) -> Result<()>;
    /// Row delete only; dependent photo rows cascade at the storage level.
    /// Backing files are the orchestration layer's responsibility (`service`).
    fn delete_place(&self, id: i64) -> Result<()>;
}

pub trait PhotoRepository {
    /// Photos of a place in chronological attachment order.
    fn list_photos_for(&self, place_id: i64) -> Result<Vec<Photo>>;
    fn get_photo(&self, id: i64) -> Result<Option<Photo>>;
    fn create_photo(&self, place_id: i64, file_path: &str) -> Result<i64>;
    fn delete_photo(&self, id: i64) -> Result<()>;
}

pub trait TripRepository {
    /// All trips, newest first.
    fn list_trips(&self) -> Result<Vec<Trip>>;
    fn get_trip(&self, id: i64) -> Result<Option<Trip>>;
    /// The single trip flagged current, if any.
    fn get_current_trip(&self) -> Result<Option<Trip>>;
    /// Inserting with current=true demotes every other trip in the same
    /// transaction.
    fn create_trip(&self, trip: &NewTrip) -> Result<i64>;
    fn update_trip(&self, id: i64, patch: &TripPatch) -> Result<()>;
    fn delete_trip(&self, id: i64) -> Result<()>;
}

pub trait TripPlaceRepository {
    /// Stops of a trip joined with their places, by (order, id).
    fn list_trip_places(&self, trip_id: i64) -> Result<Vec<TripPlaceWithPlace>>;
    /// The lowest-ordered unvisited stop, if any. Same ordering as
    /// `list_trip_places`.
    fn next_unvisited(&self, trip_id: i64) -> Result<Option<TripPlaceWithPlace>>;
    fn get_trip_place(&self, id: i64) -> Result<Option<TripPlace>>;
    fn create_trip_place(&self, trip_place: &NewTripPlace) -> Result<i64>;
    /// Single-row primitive; bulk reordering is one call per affected row.
    fn update_order(&self, id: i64, order: i64) -> Result<()>;
    /// visited=false forces visitDate to NULL regardless of the argument.
    fn set_visited(&self, id: i64, visited: bool, visit_date: Option<&str>) -> Result<()>;
    fn update_notes(&self, id: i64, notes: Option<&str>) -> Result<()>;
    fn delete_trip_place(&self, id: i64) -> Result<()>;
}

pub trait TripPlacePhotoRepository {
    fn list_trip_place_photos_for(&self, trip_place_id: i64) -> Result<Vec<TripPlacePhoto>>;
    fn get_trip_place_photo(&self, id: i64) -> Result<Option<TripPlacePhoto>>;
    fn create_trip_place_photo(&self, trip_place_id: i64, file_path: &str) -> Result<i64>;
    fn delete_trip_place_photo(&self, id: i64) -> Result<()>;
}

/// The full repository contract consumed by the app shell.
pub trait Store:
    PlaceRepository
    + PhotoRepository
    + TripRepository
    + TripPlaceRepository
    + TripPlacePhotoRepository
{
}

impl<T> Store for T where
    T: PlaceRepository
        + PhotoRepository
        + TripRepository
        + TripPlaceRepository
        + TripPlacePhotoRepository
{
}

/// Functional store over the embedded database.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path` and bring the schema current.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = crate::db::open_db(db_path)?;
        Ok(SqliteStore { conn })
    }

    /// Wrap an already-initialized connection.
    pub fn from_connection(conn: Connection) -> Self {
        SqliteStore { conn }
    }
}

/// Current instant as an RFC 3339 UTC string, the persisted createdAt format.
pub(crate) fn now_iso() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Select the store variant for this platform.
#[cfg(not(target_family = "wasm"))]
pub fn open_store(db_path: &Path) -> Result<Box<dyn Store>> {
    Ok(Box::new(SqliteStore::open(db_path)?))
}

/// Without an embedded database, reads come back empty and writes fail with
/// `Unsupported` instead of crashing.
#[cfg(target_family = "wasm")]
pub fn open_store(_db_path: &Path) -> Result<Box<dyn Store>> {
    Ok(Box::new(UnsupportedStore))
}
