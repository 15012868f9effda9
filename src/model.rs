// Domain entities and write payloads.
// Booleans live as 0/1 integers in storage; everything past the repository
// boundary is typed. Row mapping lives next to the SQL in `store`.

use serde::{Deserialize, Serialize};

// ----- Place -----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub visitlater: bool,
    pub liked: bool,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlace {
    pub name: String,
    pub description: Option<String>,
    pub visitlater: bool,
    pub liked: bool,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl NewPlace {
    pub fn new(name: impl Into<String>) -> Self {
        NewPlace {
            name: name.into(),
            description: None,
            visitlater: true,
            liked: false,
            lat: None,
            lng: None,
        }
    }
}

/// Partial update for a place. Outer `None` leaves the field unchanged;
/// for nullable columns the inner `None` writes NULL.
#[derive(Debug, Clone, Default)]
pub struct PlacePatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub visitlater: Option<bool>,
    pub liked: Option<bool>,
    pub lat: Option<Option<f64>>,
    pub lng: Option<Option<f64>>,
}

// ----- Photo -----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i64,
    pub place_id: i64,
    pub file_path: String,
    pub created_at: String,
}

// ----- Trip -----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: bool,
}

impl NewTrip {
    pub fn new(title: impl Into<String>) -> Self {
        NewTrip {
            title: title.into(),
            description: None,
            start_date: None,
            end_date: None,
            current: false,
        }
    }
}

/// Partial update for a trip. Same convention as `PlacePatch`.
#[derive(Debug, Clone, Default)]
pub struct TripPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub start_date: Option<Option<String>>,
    pub end_date: Option<Option<String>>,
    pub current: Option<bool>,
}

// ----- TripPlace -----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlace {
    pub id: i64,
    pub trip_id: i64,
    pub place_id: i64,
    pub order: i64,
    pub visited: bool,
    pub visit_date: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTripPlace {
    pub trip_id: i64,
    pub place_id: i64,
    /// Position within the trip; assigned max+1 when omitted.
    pub order: Option<i64>,
    pub visited: bool,
    pub visit_date: Option<String>,
    pub notes: Option<String>,
}

impl NewTripPlace {
    pub fn new(trip_id: i64, place_id: i64) -> Self {
        NewTripPlace {
            trip_id,
            place_id,
            order: None,
            visited: false,
            visit_date: None,
            notes: None,
        }
    }
}

/// A stop joined with its place. `place` is None when the place was deleted
/// after being added to the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlaceWithPlace {
    #[serde(flatten)]
    pub trip_place: TripPlace,
    pub place: Option<Place>,
}

// ----- TripPlacePhoto -----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlacePhoto {
    pub id: i64,
    pub trip_place_id: i64,
    pub file_path: String,
    pub created_at: String,
}
