// Stub store for platforms without the embedded database.
// Reads degrade to empty results; writes fail with the operation name.
// Never panics — the fallback is part of the repository contract.

use crate::error::{GoNextError, Result};
use crate::model::{
    NewPlace, NewTrip, NewTripPlace, Photo, Place, PlacePatch, Trip, TripPatch, TripPlace,
    TripPlacePhoto, TripPlaceWithPlace,
};

use super::{
    PhotoRepository, PlaceRepository, TripPlacePhotoRepository, TripPlaceRepository,
    TripRepository,
};

pub struct UnsupportedStore;

fn unsupported<T>(operation: &'static str) -> Result<T> {
    Err(GoNextError::Unsupported(operation))
}

impl PlaceRepository for UnsupportedStore {
    fn list_places(&self) -> Result<Vec<Place>> {
        Ok(Vec::new())
    }

    fn get_place(&self, _id: i64) -> Result<Option<Place>> {
        Ok(None)
    }

    fn create_place(&self, _place: &NewPlace) -> Result<i64> {
        unsupported("places.create")
    }

    fn update_place(&self, _id: i64, _patch: &PlacePatch) -> Result<()> {
        unsupported("places.update")
    }

    fn delete_place(&self, _id: i64) -> Result<()> {
        unsupported("places.delete")
    }
}

impl PhotoRepository for UnsupportedStore {
    fn list_photos_for(&self, _place_id: i64) -> Result<Vec<Photo>> {
        Ok(Vec::new())
    }

    fn get_photo(&self, _id: i64) -> Result<Option<Photo>> {
        Ok(None)
    }

    fn create_photo(&self, _place_id: i64, _file_path: &str) -> Result<i64> {
        unsupported("photos.create")
    }

    fn delete_photo(&self, _id: i64) -> Result<()> {
        unsupported("photos.delete")
    }
}

impl TripRepository for UnsupportedStore {
    fn list_trips(&self) -> Result<Vec<Trip>> {
        Ok(Vec::new())
    }

    fn get_trip(&self, _id: i64) -> Result<Option<Trip>> {
        Ok(None)
    }

    fn get_current_trip(&self) -> Result<Option<Trip>> {
        Ok(None)
    }

    fn create_trip(&self, _trip: &NewTrip) -> Result<i64> {
        unsupported("trips.create")
    }

    fn update_trip(&self, _id: i64, _patch: &TripPatch) -> Result<()> {
        unsupported("trips.update")
    }

    fn delete_trip(&self, _id: i64) -> Result<()> {
        unsupported("trips.delete")
    }
}

impl TripPlaceRepository for UnsupportedStore {
    fn list_trip_places(&self, _trip_id: i64) -> Result<Vec<TripPlaceWithPlace>> {
        Ok(Vec::new())
    }

    fn next_unvisited(&self, _trip_id: i64) -> Result<Option<TripPlaceWithPlace>> {
        Ok(None)
    }

    fn get_trip_place(&self, _id: i64) -> Result<Option<TripPlace>> {
        Ok(None)
    }

    fn create_trip_place(&self, _trip_place: &NewTripPlace) -> Result<i64> {
        unsupported("trip_places.create")
    }

    fn update_order(&self, _id: i64, _order: i64) -> Result<()> {
        unsupported("trip_places.updateOrder")
    }

    fn set_visited(&self, _id: i64, _visited: bool, _visit_date: Option<&str>) -> Result<()> {
        unsupported("trip_places.setVisited")
    }

    fn update_notes(&self, _id: i64, _notes: Option<&str>) -> Result<()> {
        unsupported("trip_places.updateNotes")
    }

    fn delete_trip_place(&self, _id: i64) -> Result<()> {
        unsupported("trip_places.delete")
    }
}

impl TripPlacePhotoRepository for UnsupportedStore {
    fn list_trip_place_photos_for(&self, _trip_place_id: i64) -> Result<Vec<TripPlacePhoto>> {
        Ok(Vec::new())
    }

    fn get_trip_place_photo(&self, _id: i64) -> Result<Option<TripPlacePhoto>> {
        Ok(None)
    }

    fn create_trip_place_photo(&self, _trip_place_id: i64, _file_path: &str) -> Result<i64> {
        unsupported("trip_place_photos.create")
    }

    fn delete_trip_place_photo(&self, _id: i64) -> Result<()> {
        unsupported("trip_place_photos.delete")
    }
}
