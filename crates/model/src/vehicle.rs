use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use utility::id::Id;

use crate::{line::Line, stop::Stop, Latitude, Longitude};

/// One update record from the realtime feed, tagged at the decode boundary:
/// either an exact GPS fix, or the estimated progress of a trip given as
/// its upcoming stops. Records matching neither shape are rejected by the
/// decoder and never reach this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VehicleUpdate {
    Position(PositionUpdate),
    NextStops(NextStopUpdate),
}

impl VehicleUpdate {
    pub fn vehicle_id(&self) -> &str {
        match self {
            VehicleUpdate::Position(update) => &update.vehicle_id,
            VehicleUpdate::NextStops(update) => &update.vehicle_id,
        }
    }

    pub fn line_id(&self) -> Option<&Id<Line>> {
        match self {
            VehicleUpdate::Position(update) => update.line_id.as_ref(),
            VehicleUpdate::NextStops(update) => update.line_id.as_ref(),
        }
    }

    pub fn trip_id(&self) -> Option<&str> {
        match self {
            VehicleUpdate::Position(update) => update.trip_id.as_deref(),
            VehicleUpdate::NextStops(update) => update.trip_id.as_deref(),
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdate {
    pub vehicle_id: String,
    pub line_id: Option<Id<Line>>,
    pub trip_id: Option<String>,
    pub latitude: Latitude,
    pub longitude: Longitude,
    pub timestamp: Option<DateTime<Local>>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStopUpdate {
    pub vehicle_id: String,
    pub line_id: Option<Id<Line>>,
    pub trip_id: Option<String>,
    /// Upcoming stops in order; may be empty.
    pub stops: Vec<StopTimeEstimate>,
    pub timestamp: Option<DateTime<Local>>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTimeEstimate {
    pub stop_id: Id<Stop>,
    /// Expected arrival delay at this stop in seconds; positive is late.
    pub arrival_delay: Option<i32>,
}
