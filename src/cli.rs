// GoNext CLI binary
// Development/administration harness over the repository layer; the mobile
// shell talks to the same traits.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use gonext::constants::VISIT_DATE_FORMAT;
use gonext::db::{default_data_dir, get_db_path, get_photos_dir, init_data_folders};
use gonext::model::{NewPlace, NewTrip, NewTripPlace, TripPlaceWithPlace};
use gonext::service;
use gonext::store::{
    self, PhotoRepository, PlaceRepository, Store, TripPlaceRepository, TripRepository,
};

#[derive(Parser)]
#[command(name = "gonext")]
#[command(about = "GoNext - a personal travel diary", long_about = None)]
#[command(version)]
struct Cli {
    /// Data directory (defaults to ~/.gonext)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the diary database and photo storage
    Init,

    /// Manage places
    Place {
        #[command(subcommand)]
        command: PlaceCommands,
    },

    /// Manage place photos
    Photo {
        #[command(subcommand)]
        command: PhotoCommands,
    },

    /// Manage trips and itineraries
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
}

#[derive(Subcommand)]
enum PlaceCommands {
    /// Add a place
    Add {
        /// Place name
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long, requires = "lng")]
        lat: Option<f64>,
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
        /// Mark as liked
        #[arg(long)]
        liked: bool,
        /// Do not flag for visiting later
        #[arg(long)]
        no_visit_later: bool,
    },

    /// List all places, newest first
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show place details
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
    },

    /// Delete a place and its photos
    Rm { id: i64 },
}

#[derive(Subcommand)]
enum PhotoCommands {
    /// Attach an image file to a place
    Add {
        place_id: i64,
        /// Source image file
        file: PathBuf,
    },

    /// List photos of a place
    List {
        place_id: i64,
        #[arg(long)]
        json: bool,
    },

    /// Delete a photo (file and row)
    Rm { id: i64 },
}

#[derive(Subcommand)]
enum TripCommands {
    /// Add a trip
    Add {
        /// Trip title
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Make this the current trip
        #[arg(long)]
        current: bool,
    },

    /// List all trips, newest first
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show a trip with its itinerary
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
    },

    /// Show the current trip
    Current {
        #[arg(long)]
        json: bool,
    },

    /// Delete a trip, its itinerary, and stop photos
    Rm { id: i64 },

    /// Append a place to a trip's itinerary
    AddPlace {
        trip_id: i64,
        place_id: i64,
        /// Explicit position (defaults to the end)
        #[arg(long)]
        order: Option<i64>,
    },

    /// Remove a stop from an itinerary (keeps the place)
    RmStop { trip_place_id: i64 },

    /// Show the next unvisited stop of a trip
    Next {
        trip_id: i64,
        #[arg(long)]
        json: bool,
    },

    /// Mark a stop visited
    Visit {
        trip_place_id: i64,
        /// Visit date (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Mark a stop unvisited (clears the visit date)
    Unvisit { trip_place_id: i64 },

    /// Set or clear a stop's notes
    Notes {
        trip_place_id: i64,
        /// New notes; omit to clear
        text: Option<String>,
    },

    /// Renumber an itinerary to the given stop-id sequence
    Reorder {
        /// Stop ids in their new order
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Attach an image file to a stop
    PhotoAdd {
        trip_place_id: i64,
        /// Source image file
        file: PathBuf,
    },

    /// Delete a stop photo (file and row)
    PhotoRm { id: i64 },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&data_dir),
        Commands::Place { command } => cmd_place(&data_dir, command),
        Commands::Photo { command } => cmd_photo(&data_dir, command),
        Commands::Trip { command } => cmd_trip(&data_dir, command),
    }
}

/// Open the store for an already-initialized data directory.
fn open_store_at(data_dir: &Path) -> Result<Box<dyn Store>> {
    let db_path = get_db_path(data_dir);
    if !db_path.exists() {
        anyhow::bail!(
            "No diary found at {}. Run 'gonext init' first.",
            data_dir.display()
        );
    }
    Ok(store::open_store(&db_path)?)
}

fn cmd_init(data_dir: &Path) -> Result<()> {
    init_data_folders(data_dir)?;

    // Opening runs migrations and creates the database
    let _store = store::open_store(&get_db_path(data_dir))?;

    println!("Initialized diary at {}", data_dir.display());
    println!("  gonext.db   - Database");
    println!("  photos/     - Attached photos");
    Ok(())
}

fn cmd_place(data_dir: &Path, command: PlaceCommands) -> Result<()> {
    let store = open_store_at(data_dir)?;

    match command {
        PlaceCommands::Add {
            name,
            description,
            lat,
            lng,
            liked,
            no_visit_later,
        } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                anyhow::bail!("Place name must not be empty");
            }
            let place = NewPlace {
                name,
                description,
                visitlater: !no_visit_later,
                liked,
                lat,
                lng,
            };
            let id = store.create_place(&place)?;
            println!("Created place {} '{}'", id, place.name);
        }

        PlaceCommands::List { json } => {
            let places = store.list_places()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&places)?);
                return Ok(());
            }
            if places.is_empty() {
                println!("No places yet. Use 'gonext place add <name>'.");
                return Ok(());
            }
            println!("{:>5}  {:^5}  {:^5}  {}", "ID", "Later", "Liked", "Name");
            for place in places {
                println!(
                    "{:>5}  {:^5}  {:^5}  {}",
                    place.id,
                    if place.visitlater { "yes" } else { "" },
                    if place.liked { "yes" } else { "" },
                    place.name
                );
            }
        }

        PlaceCommands::Show { id, json } => {
            let Some(place) = store.get_place(id)? else {
                anyhow::bail!("Place {} not found", id);
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&place)?);
                return Ok(());
            }
            println!("Place {}: {}", place.id, place.name);
            if let Some(description) = &place.description {
                println!("  {}", description);
            }
            if let (Some(lat), Some(lng)) = (place.lat, place.lng) {
                println!("  Location: {}, {}", lat, lng);
            }
            println!("  Visit later: {}", place.visitlater);
            println!("  Liked:       {}", place.liked);
            println!("  Added:       {}", place.created_at);
            for photo in store.list_photos_for(id)? {
                println!("  Photo {}: {}", photo.id, photo.file_path);
            }
        }

        PlaceCommands::Rm { id } => {
            service::remove_place(store.as_ref(), id)?;
            println!("Deleted place {}", id);
        }
    }
    Ok(())
}

fn cmd_photo(data_dir: &Path, command: PhotoCommands) -> Result<()> {
    let store = open_store_at(data_dir)?;

    match command {
        PhotoCommands::Add { place_id, file } => {
            let id = service::attach_place_photo(
                store.as_ref(),
                &get_photos_dir(data_dir),
                place_id,
                &file,
            )?;
            println!("Attached photo {} to place {}", id, place_id);
        }

        PhotoCommands::List { place_id, json } => {
            let photos = store.list_photos_for(place_id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&photos)?);
                return Ok(());
            }
            for photo in photos {
                println!("{:>5}  {}  {}", photo.id, photo.created_at, photo.file_path);
            }
        }

        PhotoCommands::Rm { id } => {
            service::remove_photo(store.as_ref(), id)?;
            println!("Deleted photo {}", id);
        }
    }
    Ok(())
}

fn cmd_trip(data_dir: &Path, command: TripCommands) -> Result<()> {
    let store = open_store_at(data_dir)?;

    match command {
        TripCommands::Add {
            title,
            description,
            start,
            end,
            current,
        } => {
            let title = title.trim().to_string();
            if title.is_empty() {
                anyhow::bail!("Trip title must not be empty");
            }
            let trip = NewTrip {
                title,
                description,
                start_date: start,
                end_date: end,
                current,
            };
            let id = store.create_trip(&trip)?;
            println!("Created trip {} '{}'", id, trip.title);
        }

        TripCommands::List { json } => {
            let trips = store.list_trips()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&trips)?);
                return Ok(());
            }
            if trips.is_empty() {
                println!("No trips yet. Use 'gonext trip add <title>'.");
                return Ok(());
            }
            println!("{:>5}  {:^7}  {:<12}  {}", "ID", "Current", "Start", "Title");
            for trip in trips {
                println!(
                    "{:>5}  {:^7}  {:<12}  {}",
                    trip.id,
                    if trip.current { "*" } else { "" },
                    trip.start_date.as_deref().unwrap_or("-"),
                    trip.title
                );
            }
        }

        TripCommands::Show { id, json } => {
            let Some(trip) = store.get_trip(id)? else {
                anyhow::bail!("Trip {} not found", id);
            };
            let stops = store.list_trip_places(id)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "trip": trip,
                        "places": stops,
                    }))?
                );
                return Ok(());
            }
            println!(
                "Trip {}: {}{}",
                trip.id,
                trip.title,
                if trip.current { " (current)" } else { "" }
            );
            if let Some(description) = &trip.description {
                println!("  {}", description);
            }
            if trip.start_date.is_some() || trip.end_date.is_some() {
                println!(
                    "  {} - {}",
                    trip.start_date.as_deref().unwrap_or("?"),
                    trip.end_date.as_deref().unwrap_or("?")
                );
            }
            print_itinerary(&stops);
        }

        TripCommands::Current { json } => {
            let Some(trip) = store.get_current_trip()? else {
                println!("No current trip.");
                return Ok(());
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&trip)?);
                return Ok(());
            }
            println!("Current trip {}: {}", trip.id, trip.title);
        }

        TripCommands::Rm { id } => {
            service::remove_trip(store.as_ref(), id)?;
            println!("Deleted trip {}", id);
        }

        TripCommands::AddPlace {
            trip_id,
            place_id,
            order,
        } => {
            let mut stop = NewTripPlace::new(trip_id, place_id);
            stop.order = order;
            let id = store.create_trip_place(&stop)?;
            println!("Added stop {} to trip {}", id, trip_id);
        }

        TripCommands::RmStop { trip_place_id } => {
            service::remove_trip_place(store.as_ref(), trip_place_id)?;
            println!("Removed stop {}", trip_place_id);
        }

        TripCommands::Next { trip_id, json } => {
            let Some(next) = store.next_unvisited(trip_id)? else {
                println!("Nothing left to visit on trip {}.", trip_id);
                return Ok(());
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&next)?);
                return Ok(());
            }
            match &next.place {
                Some(place) => {
                    println!("Next up: {} (stop {})", place.name, next.trip_place.id);
                    if let (Some(lat), Some(lng)) = (place.lat, place.lng) {
                        println!("  Location: {}, {}", lat, lng);
                    }
                }
                None => println!(
                    "Next up: (place removed) (stop {})",
                    next.trip_place.id
                ),
            }
        }

        TripCommands::Visit {
            trip_place_id,
            date,
        } => {
            let date = date
                .unwrap_or_else(|| chrono::Local::now().format(VISIT_DATE_FORMAT).to_string());
            store.set_visited(trip_place_id, true, Some(&date))?;
            println!("Marked stop {} visited on {}", trip_place_id, date);
        }

        TripCommands::Unvisit { trip_place_id } => {
            store.set_visited(trip_place_id, false, None)?;
            println!("Marked stop {} unvisited", trip_place_id);
        }

        TripCommands::Notes {
            trip_place_id,
            text,
        } => {
            store.update_notes(trip_place_id, text.as_deref())?;
            match text {
                Some(_) => println!("Updated notes for stop {}", trip_place_id),
                None => println!("Cleared notes for stop {}", trip_place_id),
            }
        }

        TripCommands::Reorder { ids } => {
            service::reorder_trip_places(store.as_ref(), &ids)?;
            println!("Reordered {} stops", ids.len());
        }

        TripCommands::PhotoAdd {
            trip_place_id,
            file,
        } => {
            let id = service::attach_trip_place_photo(
                store.as_ref(),
                &get_photos_dir(data_dir),
                trip_place_id,
                &file,
            )?;
            println!("Attached photo {} to stop {}", id, trip_place_id);
        }

        TripCommands::PhotoRm { id } => {
            service::remove_trip_place_photo(store.as_ref(), id)?;
            println!("Deleted stop photo {}", id);
        }
    }
    Ok(())
}

fn print_itinerary(stops: &[TripPlaceWithPlace]) {
    if stops.is_empty() {
        println!("  (empty itinerary)");
        return;
    }
    for stop in stops {
        let marker = if stop.trip_place.visited { "x" } else { " " };
        let name = stop
            .place
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("(place removed)");
        print!(
            "  [{}] #{:<3} {:<30} (stop {})",
            marker, stop.trip_place.order, name, stop.trip_place.id
        );
        if let Some(date) = &stop.trip_place.visit_date {
            print!("  visited {}", date);
        }
        println!();
        if let Some(notes) = &stop.trip_place.notes {
            println!("        {}", notes);
        }
    }
}
