use chrono::{DateTime, Local, TimeZone};
use gtfs_realtime::{FeedEntity, FeedMessage};
use model::vehicle::{
    NextStopUpdate, PositionUpdate, StopTimeEstimate, VehicleUpdate,
};
use prost::Message;
use utility::id::Id;

use crate::FeedError;

/// Downloads and decodes the feed, returning one typed update per usable
/// entity.
pub async fn fetch_updates(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<VehicleUpdate>, FeedError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(FeedError::Status(response.status().as_u16()));
    }
    let bytes = response.bytes().await?;
    decode_updates(&bytes)
}

pub fn decode_updates(bytes: &[u8]) -> Result<Vec<VehicleUpdate>, FeedError> {
    let message = FeedMessage::decode(bytes)?;
    Ok(updates_from_feed(message))
}

/// Converts the decoded feed into typed updates. Entities carrying neither
/// a GPS position nor a trip update are dropped here, at the boundary.
pub fn updates_from_feed(message: FeedMessage) -> Vec<VehicleUpdate> {
    let mut updates = vec![];
    for entity in message.entity {
        if let Some(update) = update_from_entity(entity) {
            updates.push(update);
        }
    }
    updates
}

/// A GPS fix takes precedence over a stop estimate when an entity carries
/// both, matching what the change detection keys on.
fn update_from_entity(entity: FeedEntity) -> Option<VehicleUpdate> {
    if let Some(vehicle) = &entity.vehicle {
        if let Some(position) = &vehicle.position {
            return Some(VehicleUpdate::Position(PositionUpdate {
                line_id: vehicle
                    .trip
                    .as_ref()
                    .and_then(|trip| trip.route_id.clone())
                    .map(Id::new),
                trip_id: vehicle.trip.as_ref().and_then(|trip| trip.trip_id.clone()),
                latitude: position.latitude as f64,
                longitude: position.longitude as f64,
                timestamp: timestamp_local(vehicle.timestamp),
                vehicle_id: entity.id,
            }));
        }
    }
    if let Some(trip_update) = entity.trip_update {
        let stops = trip_update
            .stop_time_update
            .iter()
            .filter_map(|stop| {
                // stop time entries without a stop id carry no usable
                // position and are dropped
                Some(StopTimeEstimate {
                    stop_id: Id::new(stop.stop_id.clone()?),
                    arrival_delay: stop.arrival.as_ref().and_then(|arrival| arrival.delay),
                })
            })
            .collect();
        return Some(VehicleUpdate::NextStops(NextStopUpdate {
            vehicle_id: entity.id,
            line_id: trip_update.trip.route_id.clone().map(Id::new),
            trip_id: trip_update.trip.trip_id.clone(),
            stops,
            timestamp: timestamp_local(trip_update.timestamp),
        }));
    }
    None
}

fn timestamp_local(timestamp: Option<u64>) -> Option<DateTime<Local>> {
    timestamp.and_then(|ts| Local.timestamp_opt(ts as i64, 0).earliest())
}
