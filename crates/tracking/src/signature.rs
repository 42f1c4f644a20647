use std::fmt;

use model::{stop::Stop, vehicle::VehicleUpdate, Latitude, Longitude};
use serde::{Deserialize, Serialize};
use utility::id::Id;

/// Compact summary of a vehicle's reported position, used for change
/// detection. Two updates describe the same position exactly when their
/// signatures are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature(String);

impl Signature {
    /// Computes the signature of an update, from its own fields alone.
    ///
    /// GPS coordinates are rounded to five decimal places (about a meter),
    /// so jitter below that does not count as movement. A stop based update
    /// is summarized by its next stop. An update with an empty stop list
    /// reports no position and therefore has no signature.
    pub fn of(update: &VehicleUpdate) -> Option<Self> {
        match update {
            VehicleUpdate::Position(position) => {
                Some(Self::gps(position.latitude, position.longitude))
            }
            VehicleUpdate::NextStops(next) => {
                next.stops.first().map(|stop| Self::stop(&stop.stop_id))
            }
        }
    }

    pub fn gps(latitude: Latitude, longitude: Longitude) -> Self {
        Self(format!("GPS:{:.5},{:.5}", latitude, longitude))
    }

    pub fn stop(stop_id: &Id<Stop>) -> Self {
        Self(format!("STOP:{}", stop_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use model::vehicle::{NextStopUpdate, PositionUpdate, StopTimeEstimate};

    use super::*;

    fn position(latitude: f64, longitude: f64) -> VehicleUpdate {
        VehicleUpdate::Position(PositionUpdate {
            vehicle_id: "bus1".to_owned(),
            line_id: None,
            trip_id: None,
            latitude,
            longitude,
            timestamp: None,
        })
    }

    fn next_stops(stops: Vec<StopTimeEstimate>) -> VehicleUpdate {
        VehicleUpdate::NextStops(NextStopUpdate {
            vehicle_id: "bus2".to_owned(),
            line_id: None,
            trip_id: None,
            stops,
            timestamp: None,
        })
    }

    #[test]
    fn gps_signature_has_five_decimals() {
        let signature = Signature::of(&position(46.58, 0.33)).unwrap();
        assert_eq!(signature.as_str(), "GPS:46.58000,0.33000");
    }

    #[test]
    fn positions_rounding_alike_share_a_signature() {
        let a = Signature::of(&position(46.58, 0.33)).unwrap();
        let b = Signature::of(&position(46.580004, 0.329996)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn stop_signature_names_the_next_stop() {
        let update = next_stops(vec![
            StopTimeEstimate {
                stop_id: Id::new("POI014".to_owned()),
                arrival_delay: Some(120),
            },
            StopTimeEstimate {
                stop_id: Id::new("POI027".to_owned()),
                arrival_delay: None,
            },
        ]);
        let signature = Signature::of(&update).unwrap();
        assert_eq!(signature.as_str(), "STOP:POI014");
    }

    #[test]
    fn empty_stop_list_has_no_signature() {
        assert_eq!(Signature::of(&next_stops(vec![])), None);
    }

    #[test]
    fn signature_is_deterministic() {
        let update = position(46.59, 0.33);
        assert_eq!(Signature::of(&update), Signature::of(&update));
    }
}
