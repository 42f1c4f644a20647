use std::{any::Any, fmt::Debug, panic::AssertUnwindSafe, time::Duration};

use async_trait::async_trait;
use futures::FutureExt;
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

const DEFAULT_TICK: Duration = Duration::from_secs(10);

/// What the loop should do after a successful cycle.
#[derive(Debug, Clone)]
pub enum Continuation {
    Continue,
    ContinueAfter(Duration),
    Exit,
}

/// What the loop should do after a failed cycle.
#[derive(Debug, Clone)]
pub enum SupervisionStrategy {
    Restart,
    Resume,
    Stop,
}

/// A periodically running data gathering task.
#[async_trait]
pub trait Collector {
    type Error: Debug;

    /// Human readable name, used in log output.
    fn name(&self) -> &'static str;

    /// Runs one cycle. Called again once `tick` has elapsed; cycles are
    /// never run concurrently.
    async fn run(&mut self) -> Result<Continuation, Self::Error>;

    /// Specifies how long to wait between calls to the `run` method.
    fn tick(&self) -> Option<Duration> {
        Some(DEFAULT_TICK)
    }

    /// Defines a backoff function, used to progressively increase the
    /// waiting time when consecutive failures happen.
    fn backoff(&self, last_backoff: Duration) -> Duration {
        last_backoff + self.tick().unwrap_or(DEFAULT_TICK)
    }

    /// Specifies the behavior if the collector returns an error.
    fn on_error(&self, _error: Self::Error) -> SupervisionStrategy {
        SupervisionStrategy::Resume
    }

    /// Specifies the behavior if the collector panics.
    fn on_panic(&self, _error: Box<dyn Any + Send>) -> SupervisionStrategy {
        SupervisionStrategy::Restart
    }
}

/// Handle to a running collector task.
pub struct CollectorRef {
    handle: JoinHandle<()>,
}

impl CollectorRef {
    /// Waits until the collector exits. Most collectors never do.
    pub async fn wait(self) {
        let _ = self.handle.await;
    }

    pub fn abort(&self) {
        self.handle.abort();
    }
}

/// Spawns the supervised loop for a collector. The factory is kept around
/// to rebuild the collector whenever the restart strategy asks for it.
///
/// The loop runs one cycle, then waits for the next tick, so cycles are
/// strictly serialized: a cycle that outlasts the interval delays the next
/// one instead of overlapping it.
pub fn run<C, F>(factory: F) -> CollectorRef
where
    C: Collector + Send + 'static,
    C::Error: Send,
    F: Fn() -> C + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let mut collector = factory();
        let mut interval = collector.tick().map(|tick| {
            let mut interval = time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        // the first tick of a tokio interval completes immediately
        if let Some(tick) = &mut interval {
            tick.tick().await;
        }
        let mut backoff = collector.tick().unwrap_or(DEFAULT_TICK);

        loop {
            let result = AssertUnwindSafe(collector.run()).catch_unwind().await;
            let outcome = match result {
                Ok(Ok(continuation)) => Ok(continuation),
                Ok(Err(why)) => {
                    log::error!("collector {} failed: {:?}", collector.name(), why);
                    Err(collector.on_error(why))
                }
                Err(why) => {
                    log::error!("collector {} panicked", collector.name());
                    Err(collector.on_panic(why))
                }
            };

            match outcome {
                Ok(Continuation::Continue) => {
                    if let Some(tick) = &mut interval {
                        tick.tick().await;
                    }
                    backoff = collector.tick().unwrap_or(DEFAULT_TICK);
                }
                Ok(Continuation::ContinueAfter(delay)) => {
                    time::sleep(delay).await;
                    backoff = collector.tick().unwrap_or(DEFAULT_TICK);
                }
                Ok(Continuation::Exit) => break,
                Err(strategy) => {
                    match strategy {
                        SupervisionStrategy::Resume => {}
                        SupervisionStrategy::Restart => collector = factory(),
                        SupervisionStrategy::Stop => break,
                    }
                    backoff = collector.backoff(backoff);
                    time::sleep(backoff).await;
                }
            }
        }
    });

    CollectorRef { handle }
}
