// GoNext Constants

// Paths
pub const GONEXT_FOLDER: &str = ".gonext";
pub const DB_FILENAME: &str = "gonext.db";
pub const PHOTOS_FOLDER: &str = "photos";

// Storage semantics
pub const CREATED_AT_STORAGE: &str = "rfc3339-utc";
pub const VISIT_DATE_FORMAT: &str = "%Y-%m-%d";
