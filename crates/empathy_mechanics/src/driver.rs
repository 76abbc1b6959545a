//! Async heartbeat driver.
//!
//! Owns a [`GameSession`] on a background task: ticks it on a fixed
//! interval with measured `dt`, applies [`Action`]s received over a channel
//! and publishes every snapshot on a `watch` channel. The session itself
//! stays synchronous; this is only one possible external driver.

use crate::heartbeat::HeartbeatConfig;
use crate::mechanic::Action;
use crate::session::GameSession;
use crate::snapshot::GameplayParameterSnapshot;
use empathy_core::EngineConfig;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

pub struct SessionDriver {
    id: Uuid,
    action_tx: mpsc::Sender<Action>,
    snapshot_rx: watch::Receiver<GameplayParameterSnapshot>,
    task: JoinHandle<GameSession>,
}

impl SessionDriver {
    /// Move `session` onto a background task. Must be called inside a tokio
    /// runtime.
    pub fn spawn(session: GameSession, heartbeat: HeartbeatConfig) -> Self {
        let id = session.id();
        let (action_tx, action_rx) = mpsc::channel(64);
        let (snapshot_tx, snapshot_rx) = watch::channel(session.current_snapshot());
        let task = tokio::spawn(run(session, heartbeat, action_rx, snapshot_tx));

        Self {
            id,
            action_tx,
            snapshot_rx,
            task,
        }
    }

    /// Heartbeat taken from `[session] tick_interval_ms`.
    pub fn spawn_with_config(session: GameSession, config: &EngineConfig) -> Self {
        Self::spawn(session, HeartbeatConfig::from_session(&config.session))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Queue an action for the next loop iteration.
    pub async fn send(&self, action: Action) -> anyhow::Result<()> {
        self.action_tx
            .send(action)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send action: {}", e))
    }

    /// Most recently published snapshot.
    pub fn snapshot(&self) -> GameplayParameterSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GameplayParameterSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Stop ticking and hand the session back.
    pub async fn stop(self) -> anyhow::Result<GameSession> {
        drop(self.action_tx);
        self.task
            .await
            .map_err(|e| anyhow::anyhow!("Session task failed: {}", e))
    }
}

async fn run(
    mut session: GameSession,
    heartbeat: HeartbeatConfig,
    mut action_rx: mpsc::Receiver<Action>,
    snapshot_tx: watch::Sender<GameplayParameterSnapshot>,
) -> GameSession {
    let mut interval = tokio::time::interval(heartbeat.interval);
    let mut last_tick = Instant::now();

    tracing::info!(session = %session.id(), interval = ?heartbeat.interval, "Session driver started");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = Instant::now();
                let dt = now.duration_since(last_tick).as_secs_f64();
                last_tick = now;

                let snapshot = session.tick(dt);
                let _ = snapshot_tx.send(snapshot);
            }

            action = action_rx.recv() => {
                match action {
                    Some(action) => {
                        session.dispatch(action);
                        let _ = snapshot_tx.send(session.current_snapshot());
                    }
                    None => break,
                }
            }
        }
    }

    tracing::info!(
        session = %session.id(),
        ticks = session.ticks(),
        elapsed = session.elapsed(),
        "Session driver stopped"
    );
    session
}
