use std::fmt;

use model::{vehicle::VehicleUpdate, Latitude, Longitude};

use crate::registry::{LineRegistry, StopRegistry};

const DELAY_THRESHOLD_SECS: i32 = 60;
const SEVERE_DELAY_THRESHOLD_SECS: i32 = 300;

/// How late a vehicle is running at its next stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuality {
    OnTime,
    Delayed { minutes: i32 },
    SeverelyDelayed { minutes: i32 },
}

impl Punctuality {
    /// Classifies an arrival delay in seconds. Up to a minute counts as on
    /// time; more than five minutes is severe.
    pub fn from_delay(seconds: i32) -> Self {
        if seconds > SEVERE_DELAY_THRESHOLD_SECS {
            Self::SeverelyDelayed {
                minutes: seconds / 60,
            }
        } else if seconds > DELAY_THRESHOLD_SECS {
            Self::Delayed {
                minutes: seconds / 60,
            }
        } else {
            Self::OnTime
        }
    }
}

impl fmt::Display for Punctuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Punctuality::OnTime => write!(f, "on time"),
            Punctuality::Delayed { minutes }
            | Punctuality::SeverelyDelayed { minutes } => {
                write!(f, "+{} min", minutes)
            }
        }
    }
}

/// What a marker stands on: an exact GPS fix, or the stop the vehicle is
/// currently heading to.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerKind {
    Gps,
    ApproachingStop {
        stop_name: String,
        punctuality: Punctuality,
    },
}

/// One drawable vehicle marker; everything the renderer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleMarker {
    pub vehicle_id: String,
    pub line_name: String,
    pub latitude: Latitude,
    pub longitude: Longitude,
    pub kind: MarkerKind,
}

/// The rendering side of the map. Implementations clear their previous
/// markers and draw the given set; they are handed the full set on every
/// redraw.
pub trait MapView {
    fn redraw(&mut self, markers: &[VehicleMarker]);
}

/// Builds the drawable marker set from the latest batch.
///
/// GPS updates are placed at their reported coordinates, stop based updates
/// at the registry position of their next stop. Updates without a line id,
/// or whose stop is not in the registry, are not drawn.
pub fn build_markers(
    updates: &[VehicleUpdate],
    stops: &StopRegistry,
    lines: &LineRegistry,
) -> Vec<VehicleMarker> {
    let mut markers = vec![];
    for update in updates {
        let Some(line_id) = update.line_id() else {
            continue;
        };
        let line_name = lines
            .display_name(line_id)
            .unwrap_or(line_id.raw_ref())
            .to_owned();
        match update {
            VehicleUpdate::Position(position) => markers.push(VehicleMarker {
                vehicle_id: position.vehicle_id.clone(),
                line_name,
                latitude: position.latitude,
                longitude: position.longitude,
                kind: MarkerKind::Gps,
            }),
            VehicleUpdate::NextStops(next) => {
                let Some(estimate) = next.stops.first() else {
                    continue;
                };
                let Some(stop) = stops.get(&estimate.stop_id) else {
                    continue;
                };
                markers.push(VehicleMarker {
                    vehicle_id: next.vehicle_id.clone(),
                    line_name,
                    latitude: stop.latitude(),
                    longitude: stop.longitude(),
                    kind: MarkerKind::ApproachingStop {
                        stop_name: stop.name.clone(),
                        punctuality: Punctuality::from_delay(
                            estimate.arrival_delay.unwrap_or(0),
                        ),
                    },
                });
            }
        }
    }
    markers
}

/// A view that draws to the log instead of a map, for headless runs.
#[derive(Debug, Default)]
pub struct LogView;

impl MapView for LogView {
    fn redraw(&mut self, markers: &[VehicleMarker]) {
        for marker in markers {
            match &marker.kind {
                MarkerKind::Gps => log::debug!(
                    "line {} vehicle {} at ({:.5}, {:.5})",
                    marker.line_name,
                    marker.vehicle_id,
                    marker.latitude,
                    marker.longitude
                ),
                MarkerKind::ApproachingStop {
                    stop_name,
                    punctuality,
                } => log::debug!(
                    "line {} vehicle {} heading to {} ({})",
                    marker.line_name,
                    marker.vehicle_id,
                    stop_name,
                    punctuality
                ),
            }
        }
        log::info!("{} vehicles on the map", markers.len());
    }
}

#[cfg(test)]
mod tests {
    use model::vehicle::{NextStopUpdate, PositionUpdate, StopTimeEstimate};
    use utility::id::Id;

    use super::*;

    const STOPS: &str = r#"{
        "POI014": { "name": "Hôtel de Ville", "latitude": 46.58083, "longitude": 0.34034 }
    }"#;

    const LINES: &str = r#"{
        "201": { "name": "1", "color": "E30613", "points": [] }
    }"#;

    fn registries() -> (StopRegistry, LineRegistry) {
        (
            StopRegistry::from_reader(STOPS.as_bytes()).unwrap(),
            LineRegistry::from_reader(LINES.as_bytes()).unwrap(),
        )
    }

    fn gps(vehicle_id: &str, line_id: Option<&str>) -> VehicleUpdate {
        VehicleUpdate::Position(PositionUpdate {
            vehicle_id: vehicle_id.to_owned(),
            line_id: line_id.map(|id| Id::new(id.to_owned())),
            trip_id: None,
            latitude: 46.59,
            longitude: 0.33,
            timestamp: None,
        })
    }

    fn approaching(vehicle_id: &str, line_id: &str, stop_id: &str, delay: Option<i32>) -> VehicleUpdate {
        VehicleUpdate::NextStops(NextStopUpdate {
            vehicle_id: vehicle_id.to_owned(),
            line_id: Some(Id::new(line_id.to_owned())),
            trip_id: None,
            stops: vec![StopTimeEstimate {
                stop_id: Id::new(stop_id.to_owned()),
                arrival_delay: delay,
            }],
            timestamp: None,
        })
    }

    #[test]
    fn classifies_delays() {
        assert_eq!(Punctuality::from_delay(0), Punctuality::OnTime);
        assert_eq!(Punctuality::from_delay(60), Punctuality::OnTime);
        assert_eq!(
            Punctuality::from_delay(61),
            Punctuality::Delayed { minutes: 1 }
        );
        assert_eq!(
            Punctuality::from_delay(300),
            Punctuality::Delayed { minutes: 5 }
        );
        assert_eq!(
            Punctuality::from_delay(301),
            Punctuality::SeverelyDelayed { minutes: 5 }
        );
    }

    #[test]
    fn gps_updates_become_gps_markers() {
        let (stops, lines) = registries();
        let markers = build_markers(&[gps("bus1", Some("201"))], &stops, &lines);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].line_name, "1");
        assert_eq!(markers[0].kind, MarkerKind::Gps);
        assert_eq!(markers[0].latitude, 46.59);
    }

    #[test]
    fn stop_updates_resolve_through_the_registry() {
        let (stops, lines) = registries();
        let update = approaching("bus2", "201", "POI014", Some(120));
        let markers = build_markers(&[update], &stops, &lines);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].latitude, 46.58083);
        assert_eq!(
            markers[0].kind,
            MarkerKind::ApproachingStop {
                stop_name: "Hôtel de Ville".to_owned(),
                punctuality: Punctuality::Delayed { minutes: 2 },
            }
        );
    }

    #[test]
    fn updates_without_a_line_are_not_drawn() {
        let (stops, lines) = registries();
        assert!(build_markers(&[gps("bus1", None)], &stops, &lines).is_empty());
    }

    #[test]
    fn unknown_stops_are_not_drawn() {
        let (stops, lines) = registries();
        let update = approaching("bus2", "201", "UNKNOWN", None);
        assert!(build_markers(&[update], &stops, &lines).is_empty());
    }

    #[test]
    fn unknown_lines_fall_back_to_the_raw_id() {
        let (stops, lines) = registries();
        let markers = build_markers(&[gps("bus1", Some("999"))], &stops, &lines);
        assert_eq!(markers[0].line_name, "999");
    }
}
