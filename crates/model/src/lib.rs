pub mod line;
pub mod stop;
pub mod vehicle;

/// WGS84 latitude in decimal degrees. The value must be greater than or
/// equal to -90.0 and less than or equal to 90.0.
pub type Latitude = f64;

/// WGS84 longitude in decimal degrees. The value must be greater than or
/// equal to -180.0 and less than or equal to 180.0.
pub type Longitude = f64;

/// One vertex of a route polyline, as `(latitude, longitude)`.
pub type PathPoint = (Latitude, Longitude);
