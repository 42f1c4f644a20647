use std::time::Duration;

use async_trait::async_trait;
use tracking::{
    collector::{Collector, Continuation},
    reconcile::{reconcile, Snapshot},
    registry::{LineRegistry, StopRegistry},
    view::{build_markers, MapView},
};

use crate::{realtime, FeedError};

/// Polls the realtime feed and redraws the map when a vehicle moved.
///
/// The snapshot is replaced on every cycle, moved or not, so vehicles that
/// left the feed do not linger in it. A failed cycle leaves the snapshot
/// untouched; the supervisor logs the error and the next tick tries again.
pub struct VehicleCollector<V> {
    url: String,
    update: Duration,
    client: reqwest::Client,
    stops: StopRegistry,
    lines: LineRegistry,
    view: V,
    snapshot: Snapshot,
}

impl<V: MapView> VehicleCollector<V> {
    pub fn new<S: Into<String>>(
        url: S,
        update: Duration,
        timeout: Duration,
        stops: StopRegistry,
        lines: LineRegistry,
        view: V,
    ) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            update,
            client,
            stops,
            lines,
            view,
            snapshot: Snapshot::new(),
        })
    }
}

#[async_trait]
impl<V> Collector for VehicleCollector<V>
where
    V: MapView + Send,
{
    type Error = FeedError;

    fn name(&self) -> &'static str {
        "realtime vehicles"
    }

    async fn run(&mut self) -> Result<Continuation, FeedError> {
        let updates = realtime::fetch_updates(&self.client, &self.url).await?;
        let outcome = reconcile(&updates, &self.snapshot);
        if outcome.changed {
            let markers = build_markers(&updates, &self.stops, &self.lines);
            log::info!("{} of {} vehicles drawn", markers.len(), updates.len());
            self.view.redraw(&markers);
        } else {
            log::debug!("no vehicle moved");
        }
        self.snapshot = outcome.next;
        Ok(Continuation::Continue)
    }

    fn tick(&self) -> Option<Duration> {
        Some(self.update)
    }
}
