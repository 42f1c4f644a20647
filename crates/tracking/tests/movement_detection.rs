use model::vehicle::{NextStopUpdate, PositionUpdate, StopTimeEstimate, VehicleUpdate};
use tracking::{reconcile, Signature, Snapshot};
use utility::id::Id;

fn gps(vehicle_id: &str, latitude: f64, longitude: f64) -> VehicleUpdate {
    VehicleUpdate::Position(PositionUpdate {
        vehicle_id: vehicle_id.to_owned(),
        line_id: Some(Id::new("201".to_owned())),
        trip_id: Some(format!("trip-{}", vehicle_id)),
        latitude,
        longitude,
        timestamp: None,
    })
}

fn next_stop(vehicle_id: &str, stop_id: &str, arrival_delay: Option<i32>) -> VehicleUpdate {
    VehicleUpdate::NextStops(NextStopUpdate {
        vehicle_id: vehicle_id.to_owned(),
        line_id: Some(Id::new("201".to_owned())),
        trip_id: Some(format!("trip-{}", vehicle_id)),
        stops: vec![StopTimeEstimate {
            stop_id: Id::new(stop_id.to_owned()),
            arrival_delay,
        }],
        timestamp: None,
    })
}

fn snapshot_with(vehicle_id: &str, signature: Signature) -> Snapshot {
    let mut snapshot = Snapshot::new();
    snapshot.insert(vehicle_id.to_owned(), signature);
    snapshot
}

#[test]
fn an_empty_batch_clears_the_snapshot_without_a_change() {
    let previous = snapshot_with("bus1", Signature::gps(46.58, 0.33));
    let outcome = reconcile(&[], &previous);
    assert!(!outcome.changed);
    assert!(outcome.next.is_empty());
}

#[test]
fn gps_jitter_below_the_rounding_is_not_movement() {
    let previous = snapshot_with("bus1", Signature::gps(46.58, 0.33));
    let outcome = reconcile(&[gps("bus1", 46.580004, 0.33)], &previous);
    assert!(!outcome.changed);
    assert_eq!(
        outcome.next.get("bus1").map(Signature::as_str),
        Some("GPS:46.58000,0.33000")
    );
}

#[test]
fn real_movement_is_reported() {
    let previous = snapshot_with("bus1", Signature::gps(46.58, 0.33));
    let outcome = reconcile(&[gps("bus1", 46.59, 0.33)], &previous);
    assert!(outcome.changed);
    assert_eq!(
        outcome.next.get("bus1").map(Signature::as_str),
        Some("GPS:46.59000,0.33000")
    );
}

#[test]
fn a_stable_feed_settles_after_one_cycle() {
    let updates = vec![
        gps("bus1", 46.59, 0.33),
        next_stop("bus2", "POI014", Some(90)),
    ];

    let first = reconcile(&updates, &Snapshot::new());
    assert!(first.changed);
    assert_eq!(first.next.len(), 2);

    let second = reconcile(&updates, &first.next);
    assert!(!second.changed);
    assert_eq!(second.next, first.next);
}

#[test]
fn advancing_to_the_next_stop_is_movement() {
    let first = reconcile(&[next_stop("bus2", "POI014", None)], &Snapshot::new());
    assert!(first.changed);

    let second = reconcile(&[next_stop("bus2", "POI027", None)], &first.next);
    assert!(second.changed);
    assert_eq!(
        second.next.get("bus2").map(Signature::as_str),
        Some("STOP:POI027")
    );
}

#[test]
fn a_trip_update_without_stops_stays_invisible() {
    let update = VehicleUpdate::NextStops(NextStopUpdate {
        vehicle_id: "bus3".to_owned(),
        line_id: None,
        trip_id: None,
        stops: vec![],
        timestamp: None,
    });

    let previous = snapshot_with("bus1", Signature::gps(46.58, 0.33));
    let outcome = reconcile(&[update], &previous);
    assert!(!outcome.changed);
    assert!(outcome.next.is_empty());
}
