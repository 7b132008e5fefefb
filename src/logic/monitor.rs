use crate::datasources::SensorSource;
use crate::models::{MonitoringSnapshot, SensorReading};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum MonitorUpdate {
    Sensors(SensorReading),
    Monitoring(MonitoringSnapshot),
}

/// Polls a `SensorSource` on a fixed interval from a background task and
/// hands the readings to the UI loop through a channel.
pub struct MonitorService {
    source_name: &'static str,
    rx: mpsc::Receiver<MonitorUpdate>,
    handle: JoinHandle<()>,
}

impl MonitorService {
    /// Must be called from within a tokio runtime. The first poll happens
    /// immediately.
    pub fn spawn(mut source: Box<dyn SensorSource>, interval: Duration) -> Self {
        let source_name = source.name();
        let (tx, rx) = mpsc::channel(16);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                let sensors = MonitorUpdate::Sensors(source.sensor_reading());
                let monitoring = MonitorUpdate::Monitoring(source.monitoring_snapshot());

                if tx.send(sensors).await.is_err() || tx.send(monitoring).await.is_err() {
                    tracing::debug!("Monitor channel closed, stopping");
                    break;
                }
                tracing::trace!("Sensor readings published");
            }
        });

        tracing::info!(source = source_name, ?interval, "Monitor started");
        Self {
            source_name,
            rx,
            handle,
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.source_name
    }

    /// Next pending update without waiting.
    pub fn try_next(&mut self) -> Option<MonitorUpdate> {
        self.rx.try_recv().ok()
    }

    /// Waits for the next update. `None` once the task has stopped.
    pub async fn next(&mut self) -> Option<MonitorUpdate> {
        self.rx.recv().await
    }
}

impl Drop for MonitorService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
