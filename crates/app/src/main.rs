use gtfs::collector::VehicleCollector;
use tracking::{
    collector,
    registry::{LineRegistry, StopRegistry},
    view::LogView,
};

use crate::config::Config;

mod config;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = Config::from_env().expect("expected a valid environment configuration.");

    // static lookup tables
    let stops = StopRegistry::from_path(&config.stops_file)
        .expect("could not load the stop table.");
    let lines = LineRegistry::from_path(&config.lines_file)
        .expect("could not load the line table.");
    log::info!("{} stops and {} lines loaded", stops.len(), lines.len());

    // poll loop
    let collector = collector::run(move || {
        VehicleCollector::new(
            config.feed_url.clone(),
            config.poll_interval,
            config.request_timeout,
            stops.clone(),
            lines.clone(),
            LogView,
        )
        .expect("could not build the feed client.")
    });

    collector.wait().await;
}
