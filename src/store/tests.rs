// Repository behavior tests against an in-memory database.

use super::*;
use crate::model::{NewPlace, NewTrip, NewTripPlace, PlacePatch, TripPatch};

fn test_store() -> SqliteStore {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    crate::db::migrations::run_migrations(&conn).unwrap();
    SqliteStore::from_connection(conn)
}

fn count(store: &SqliteStore, sql: &str) -> i64 {
    store.conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

// ---------------------------------------------------------------
// Places
// ---------------------------------------------------------------

#[test]
fn test_place_create_get_roundtrip_with_defaults() {
    let store = test_store();

    let id = store.create_place(&NewPlace::new("Louvre")).unwrap();
    let place = store.get_place(id).unwrap().unwrap();

    assert_eq!(place.id, id);
    assert_eq!(place.name, "Louvre");
    assert_eq!(place.description, None);
    assert!(place.visitlater, "visitlater defaults to true");
    assert!(!place.liked, "liked defaults to false");
    assert_eq!(place.lat, None);
    assert_eq!(place.lng, None);
    assert!(!place.created_at.is_empty());
}

#[test]
fn test_place_create_with_all_fields() {
    let store = test_store();

    let mut new_place = NewPlace::new("Louvre");
    new_place.description = Some("Biggest museum in the world".to_string());
    new_place.visitlater = false;
    new_place.liked = true;
    new_place.lat = Some(48.8606);
    new_place.lng = Some(2.3376);

    let id = store.create_place(&new_place).unwrap();
    let place = store.get_place(id).unwrap().unwrap();

    assert_eq!(place.description.as_deref(), Some("Biggest museum in the world"));
    assert!(!place.visitlater);
    assert!(place.liked);
    assert_eq!(place.lat, Some(48.8606));
    assert_eq!(place.lng, Some(2.3376));
}

#[test]
fn test_place_get_missing_returns_none() {
    let store = test_store();
    assert!(store.get_place(42).unwrap().is_none());
}

#[test]
fn test_place_list_newest_first() {
    let store = test_store();

    let a = store.create_place(&NewPlace::new("First")).unwrap();
    let b = store.create_place(&NewPlace::new("Second")).unwrap();
    let c = store.create_place(&NewPlace::new("Third")).unwrap();

    let ids: Vec<i64> = store.list_places().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![c, b, a]);
}

#[test]
fn test_place_update_merges_partial_fields() {
    let store = test_store();

    let mut new_place = NewPlace::new("Louvre");
    new_place.lat = Some(48.8606);
    new_place.lng = Some(2.3376);
    let id = store.create_place(&new_place).unwrap();

    // Only liked supplied; everything else keeps its stored value
    let patch = PlacePatch {
        liked: Some(true),
        ..Default::default()
    };
    store.update_place(id, &patch).unwrap();

    let place = store.get_place(id).unwrap().unwrap();
    assert_eq!(place.name, "Louvre");
    assert!(place.liked);
    assert!(place.visitlater);
    assert_eq!(place.lat, Some(48.8606));

    // Inner None writes NULL
    let patch = PlacePatch {
        lat: Some(None),
        lng: Some(None),
        ..Default::default()
    };
    store.update_place(id, &patch).unwrap();

    let place = store.get_place(id).unwrap().unwrap();
    assert_eq!(place.lat, None);
    assert_eq!(place.lng, None);
    assert!(place.liked, "untouched field survives a second patch");
}

#[test]
fn test_place_update_missing_id_is_noop() {
    let store = test_store();
    let patch = PlacePatch {
        name: Some("Ghost".to_string()),
        ..Default::default()
    };
    store.update_place(42, &patch).unwrap();
    assert_eq!(count(&store, "SELECT COUNT(*) FROM places"), 0);
}

#[test]
fn test_place_update_preserves_created_at() {
    let store = test_store();
    let id = store.create_place(&NewPlace::new("Louvre")).unwrap();
    let before = store.get_place(id).unwrap().unwrap().created_at;

    let patch = PlacePatch {
        name: Some("Musée du Louvre".to_string()),
        ..Default::default()
    };
    store.update_place(id, &patch).unwrap();

    let after = store.get_place(id).unwrap().unwrap();
    assert_eq!(after.name, "Musée du Louvre");
    assert_eq!(after.created_at, before);
}

#[test]
fn test_place_delete_cascades_photos_not_trip_places() {
    let store = test_store();

    let place_id = store.create_place(&NewPlace::new("Louvre")).unwrap();
    store.create_photo(place_id, "/photos/a.jpg").unwrap();
    store.create_photo(place_id, "/photos/b.jpg").unwrap();

    let trip_id = store.create_trip(&NewTrip::new("Paris")).unwrap();
    store
        .create_trip_place(&NewTripPlace::new(trip_id, place_id))
        .unwrap();

    store.delete_place(place_id).unwrap();

    assert!(store.get_place(place_id).unwrap().is_none());
    assert_eq!(count(&store, "SELECT COUNT(*) FROM photos"), 0);
    // The itinerary row survives with a dangling placeId
    assert_eq!(count(&store, "SELECT COUNT(*) FROM trip_places"), 1);
    let stops = store.list_trip_places(trip_id).unwrap();
    assert_eq!(stops[0].trip_place.place_id, place_id);
    assert!(stops[0].place.is_none(), "joined place degrades to None");
}

// ---------------------------------------------------------------
// Photos
// ---------------------------------------------------------------

#[test]
fn test_photo_requires_existing_place() {
    let store = test_store();
    // Store-enforced constraint is the authority, no pre-validation
    let result = store.create_photo(999, "/photos/x.jpg");
    assert!(matches!(result, Err(crate::error::GoNextError::Database(_))));
}

#[test]
fn test_photos_listed_in_attachment_order() {
    let store = test_store();
    let place_id = store.create_place(&NewPlace::new("Louvre")).unwrap();

    let a = store.create_photo(place_id, "/photos/a.jpg").unwrap();
    let b = store.create_photo(place_id, "/photos/b.jpg").unwrap();
    let c = store.create_photo(place_id, "/photos/c.jpg").unwrap();

    let ids: Vec<i64> = store
        .list_photos_for(place_id)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![a, b, c], "oldest first");

    store.delete_photo(b).unwrap();
    let ids: Vec<i64> = store
        .list_photos_for(place_id)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![a, c]);
}

// ---------------------------------------------------------------
// Trips — current-trip singleton
// ---------------------------------------------------------------

#[test]
fn test_trip_create_get_roundtrip() {
    let store = test_store();

    let mut new_trip = NewTrip::new("Paris");
    new_trip.description = Some("Long weekend".to_string());
    new_trip.start_date = Some("2026-05-01".to_string());

    let id = store.create_trip(&new_trip).unwrap();
    let trip = store.get_trip(id).unwrap().unwrap();

    assert_eq!(trip.title, "Paris");
    assert_eq!(trip.description.as_deref(), Some("Long weekend"));
    assert_eq!(trip.start_date.as_deref(), Some("2026-05-01"));
    assert_eq!(trip.end_date, None);
    assert!(!trip.current, "current defaults to false");
}

#[test]
fn test_no_current_trip_by_default() {
    let store = test_store();
    store.create_trip(&NewTrip::new("Paris")).unwrap();
    assert!(store.get_current_trip().unwrap().is_none());
}

#[test]
fn test_current_trip_singleton_across_creates() {
    let store = test_store();

    let mut trip_a = NewTrip::new("Paris");
    trip_a.current = true;
    let a = store.create_trip(&trip_a).unwrap();

    assert_eq!(store.get_current_trip().unwrap().unwrap().id, a);

    let mut trip_b = NewTrip::new("Rome");
    trip_b.current = true;
    let b = store.create_trip(&trip_b).unwrap();

    // B took over; A was demoted in the same operation
    assert_eq!(store.get_current_trip().unwrap().unwrap().id, b);
    assert!(!store.get_trip(a).unwrap().unwrap().current);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM trips WHERE current = 1"), 1);
}

#[test]
fn test_current_trip_singleton_across_updates() {
    let store = test_store();

    let mut trip_a = NewTrip::new("Paris");
    trip_a.current = true;
    let a = store.create_trip(&trip_a).unwrap();
    let b = store.create_trip(&NewTrip::new("Rome")).unwrap();

    let patch = TripPatch {
        current: Some(true),
        ..Default::default()
    };
    store.update_trip(b, &patch).unwrap();

    assert_eq!(store.get_current_trip().unwrap().unwrap().id, b);
    assert!(!store.get_trip(a).unwrap().unwrap().current);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM trips WHERE current = 1"), 1);

    // Clearing the flag leaves no current trip rather than promoting another
    let patch = TripPatch {
        current: Some(false),
        ..Default::default()
    };
    store.update_trip(b, &patch).unwrap();
    assert!(store.get_current_trip().unwrap().is_none());
}

#[test]
fn test_trip_update_merges_partial_fields() {
    let store = test_store();

    let mut new_trip = NewTrip::new("Paris");
    new_trip.start_date = Some("2026-05-01".to_string());
    let id = store.create_trip(&new_trip).unwrap();

    let patch = TripPatch {
        end_date: Some(Some("2026-05-04".to_string())),
        ..Default::default()
    };
    store.update_trip(id, &patch).unwrap();

    let trip = store.get_trip(id).unwrap().unwrap();
    assert_eq!(trip.title, "Paris");
    assert_eq!(trip.start_date.as_deref(), Some("2026-05-01"));
    assert_eq!(trip.end_date.as_deref(), Some("2026-05-04"));

    // Dates are independently clearable
    let patch = TripPatch {
        start_date: Some(None),
        ..Default::default()
    };
    store.update_trip(id, &patch).unwrap();
    let trip = store.get_trip(id).unwrap().unwrap();
    assert_eq!(trip.start_date, None);
    assert_eq!(trip.end_date.as_deref(), Some("2026-05-04"));
}

#[test]
fn test_trip_delete_cascades_stops() {
    let store = test_store();

    let place_id = store.create_place(&NewPlace::new("Louvre")).unwrap();
    let trip_id = store.create_trip(&NewTrip::new("Paris")).unwrap();
    for _ in 0..3 {
        store
            .create_trip_place(&NewTripPlace::new(trip_id, place_id))
            .unwrap();
    }

    store.delete_trip(trip_id).unwrap();

    assert!(store.get_trip(trip_id).unwrap().is_none());
    assert_eq!(count(&store, "SELECT COUNT(*) FROM trip_places"), 0);
    // The place itself is untouched
    assert!(store.get_place(place_id).unwrap().is_some());
}

// ---------------------------------------------------------------
// TripPlaces — ordering and visited state machine
// ---------------------------------------------------------------

#[test]
fn test_order_assigned_sequentially() {
    let store = test_store();
    let place_id = store.create_place(&NewPlace::new("Louvre")).unwrap();
    let trip_id = store.create_trip(&NewTrip::new("Paris")).unwrap();

    let a = store
        .create_trip_place(&NewTripPlace::new(trip_id, place_id))
        .unwrap();
    let b = store
        .create_trip_place(&NewTripPlace::new(trip_id, place_id))
        .unwrap();

    assert_eq!(store.get_trip_place(a).unwrap().unwrap().order, 0);
    assert_eq!(store.get_trip_place(b).unwrap().unwrap().order, 1);
}

#[test]
fn test_order_scoped_per_trip() {
    let store = test_store();
    let place_id = store.create_place(&NewPlace::new("Louvre")).unwrap();
    let trip_a = store.create_trip(&NewTrip::new("Paris")).unwrap();
    let trip_b = store.create_trip(&NewTrip::new("Rome")).unwrap();

    store
        .create_trip_place(&NewTripPlace::new(trip_a, place_id))
        .unwrap();
    store
        .create_trip_place(&NewTripPlace::new(trip_a, place_id))
        .unwrap();
    let first_in_b = store
        .create_trip_place(&NewTripPlace::new(trip_b, place_id))
        .unwrap();

    assert_eq!(
        store.get_trip_place(first_in_b).unwrap().unwrap().order,
        0,
        "each trip numbers from 0"
    );
}

#[test]
fn test_explicit_order_respected() {
    let store = test_store();
    let place_id = store.create_place(&NewPlace::new("Louvre")).unwrap();
    let trip_id = store.create_trip(&NewTrip::new("Paris")).unwrap();

    let mut stop = NewTripPlace::new(trip_id, place_id);
    stop.order = Some(7);
    let id = store.create_trip_place(&stop).unwrap();
    assert_eq!(store.get_trip_place(id).unwrap().unwrap().order, 7);

    // Next implicit insert continues from the max
    let next = store
        .create_trip_place(&NewTripPlace::new(trip_id, place_id))
        .unwrap();
    assert_eq!(store.get_trip_place(next).unwrap().unwrap().order, 8);
}

#[test]
fn test_trip_place_requires_existing_trip_but_not_place() {
    let store = test_store();
    let place_id = store.create_place(&NewPlace::new("Louvre")).unwrap();

    let result = store.create_trip_place(&NewTripPlace::new(999, place_id));
    assert!(matches!(result, Err(crate::error::GoNextError::Database(_))));

    // placeId is an unenforced reference; dangling values are tolerated
    let trip_id = store.create_trip(&NewTrip::new("Paris")).unwrap();
    let id = store
        .create_trip_place(&NewTripPlace::new(trip_id, 999))
        .unwrap();
    let stops = store.list_trip_places(trip_id).unwrap();
    assert_eq!(stops[0].trip_place.id, id);
    assert!(stops[0].place.is_none());
}

#[test]
fn test_next_unvisited_follows_order_then_id() {
    let store = test_store();
    let place_id = store.create_place(&NewPlace::new("Louvre")).unwrap();
    let trip_id = store.create_trip(&NewTrip::new("Paris")).unwrap();

    let a = store
        .create_trip_place(&NewTripPlace::new(trip_id, place_id))
        .unwrap();
    let b = store
        .create_trip_place(&NewTripPlace::new(trip_id, place_id))
        .unwrap();

    assert_eq!(
        store.next_unvisited(trip_id).unwrap().unwrap().trip_place.id,
        a
    );

    store.set_visited(a, true, Some("2026-05-01")).unwrap();
    assert_eq!(
        store.next_unvisited(trip_id).unwrap().unwrap().trip_place.id,
        b
    );

    // A new stop slotted before everything takes over
    let mut first = NewTripPlace::new(trip_id, place_id);
    first.order = Some(-5);
    let c = store.create_trip_place(&first).unwrap();
    assert_eq!(
        store.next_unvisited(trip_id).unwrap().unwrap().trip_place.id,
        c
    );

    // Ties on order break by id ascending
    store.set_visited(c, true, Some("2026-05-01")).unwrap();
    let mut tied = NewTripPlace::new(trip_id, place_id);
    tied.order = Some(1);
    let d = store.create_trip_place(&tied).unwrap();
    assert!(d > b);
    assert_eq!(
        store.next_unvisited(trip_id).unwrap().unwrap().trip_place.id,
        b,
        "equal order resolves to the lower id"
    );
}

#[test]
fn test_next_unvisited_none_when_all_visited() {
    let store = test_store();
    let place_id = store.create_place(&NewPlace::new("Louvre")).unwrap();
    let trip_id = store.create_trip(&NewTrip::new("Paris")).unwrap();

    assert!(store.next_unvisited(trip_id).unwrap().is_none());

    let id = store
        .create_trip_place(&NewTripPlace::new(trip_id, place_id))
        .unwrap();
    store.set_visited(id, true, Some("2026-05-01")).unwrap();

    assert!(store.next_unvisited(trip_id).unwrap().is_none());
}

#[test]
fn test_visited_state_machine_derives_visit_date() {
    let store = test_store();
    let place_id = store.create_place(&NewPlace::new("Louvre")).unwrap();
    let trip_id = store.create_trip(&NewTrip::new("Paris")).unwrap();
    let id = store
        .create_trip_place(&NewTripPlace::new(trip_id, place_id))
        .unwrap();

    store.set_visited(id, true, Some("2026-05-01")).unwrap();
    let stop = store.get_trip_place(id).unwrap().unwrap();
    assert!(stop.visited);
    assert_eq!(stop.visit_date.as_deref(), Some("2026-05-01"));

    // Un-visiting clears the date even when one is supplied
    store.set_visited(id, false, Some("2026-05-02")).unwrap();
    let stop = store.get_trip_place(id).unwrap().unwrap();
    assert!(!stop.visited);
    assert_eq!(stop.visit_date, None);
}

#[test]
fn test_update_notes_set_and_clear() {
    let store = test_store();
    let place_id = store.create_place(&NewPlace::new("Louvre")).unwrap();
    let trip_id = store.create_trip(&NewTrip::new("Paris")).unwrap();
    let id = store
        .create_trip_place(&NewTripPlace::new(trip_id, place_id))
        .unwrap();

    store
        .update_notes(id, Some("Skip the pyramid queue"))
        .unwrap();
    assert_eq!(
        store.get_trip_place(id).unwrap().unwrap().notes.as_deref(),
        Some("Skip the pyramid queue")
    );

    store.update_notes(id, None).unwrap();
    assert_eq!(store.get_trip_place(id).unwrap().unwrap().notes, None);
}

#[test]
fn test_list_trip_places_joins_place_data() {
    let store = test_store();

    let mut new_place = NewPlace::new("Louvre");
    new_place.lat = Some(48.8606);
    new_place.lng = Some(2.3376);
    let place_id = store.create_place(&new_place).unwrap();
    let trip_id = store.create_trip(&NewTrip::new("Paris")).unwrap();
    store
        .create_trip_place(&NewTripPlace::new(trip_id, place_id))
        .unwrap();

    let stops = store.list_trip_places(trip_id).unwrap();
    assert_eq!(stops.len(), 1);
    let place = stops[0].place.as_ref().unwrap();
    assert_eq!(place.id, place_id);
    assert_eq!(place.name, "Louvre");
    assert_eq!(place.lat, Some(48.8606));
}

// ---------------------------------------------------------------
// TripPlacePhotos
// ---------------------------------------------------------------

#[test]
fn test_trip_place_photo_lifecycle_and_cascade() {
    let store = test_store();
    let place_id = store.create_place(&NewPlace::new("Louvre")).unwrap();
    let trip_id = store.create_trip(&NewTrip::new("Paris")).unwrap();
    let stop_id = store
        .create_trip_place(&NewTripPlace::new(trip_id, place_id))
        .unwrap();

    let a = store
        .create_trip_place_photo(stop_id, "/photos/a.jpg")
        .unwrap();
    let b = store
        .create_trip_place_photo(stop_id, "/photos/b.jpg")
        .unwrap();

    let ids: Vec<i64> = store
        .list_trip_place_photos_for(stop_id)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![a, b]);

    // Deleting the stop cascades to its photos
    store.delete_trip_place(stop_id).unwrap();
    assert_eq!(count(&store, "SELECT COUNT(*) FROM trip_place_photos"), 0);
}

#[test]
fn test_trip_place_photo_requires_existing_stop() {
    let store = test_store();
    let result = store.create_trip_place_photo(999, "/photos/x.jpg");
    assert!(matches!(result, Err(crate::error::GoNextError::Database(_))));
}

// ---------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------

#[test]
fn test_paris_scenario() {
    let store = test_store();

    let mut louvre = NewPlace::new("Louvre");
    louvre.lat = Some(48.8606);
    louvre.lng = Some(2.3376);
    let place_id = store.create_place(&louvre).unwrap();

    let mut paris = NewTrip::new("Paris");
    paris.current = true;
    let trip_id = store.create_trip(&paris).unwrap();

    let mut stop = NewTripPlace::new(trip_id, place_id);
    stop.order = Some(0);
    let stop_id = store.create_trip_place(&stop).unwrap();

    let next = store.next_unvisited(trip_id).unwrap().unwrap();
    assert_eq!(next.trip_place.id, stop_id);
    assert_eq!(next.place.as_ref().unwrap().name, "Louvre");

    store
        .set_visited(stop_id, true, Some("2026-05-01"))
        .unwrap();

    assert!(store.next_unvisited(trip_id).unwrap().is_none());
    assert_eq!(store.get_current_trip().unwrap().unwrap().id, trip_id);
}

// ---------------------------------------------------------------
// Unsupported platform stub
// ---------------------------------------------------------------

#[test]
fn test_unsupported_store_reads_empty_writes_fail() {
    let store = UnsupportedStore;

    assert!(store.list_places().unwrap().is_empty());
    assert!(store.get_place(1).unwrap().is_none());
    assert!(store.list_trips().unwrap().is_empty());
    assert!(store.get_current_trip().unwrap().is_none());
    assert!(store.list_trip_places(1).unwrap().is_empty());
    assert!(store.next_unvisited(1).unwrap().is_none());
    assert!(store.list_photos_for(1).unwrap().is_empty());
    assert!(store.list_trip_place_photos_for(1).unwrap().is_empty());

    let err = store.create_place(&NewPlace::new("Louvre")).unwrap_err();
    assert!(matches!(
        err,
        crate::error::GoNextError::Unsupported("places.create")
    ));

    let err = store.set_visited(1, true, None).unwrap_err();
    assert!(matches!(
        err,
        crate::error::GoNextError::Unsupported("trip_places.setVisited")
    ));
}
