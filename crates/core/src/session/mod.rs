//! Live capture sessions: one background task per session feeding the analysis pipeline.

use crate::config::{ConfigError, SessionConfig};
use crate::feedback::{live_feedback, LiveFeedback};
use crate::pipeline::{FrameAnalysisPipeline, FrameAnalysisResult, PipelineBuilder};
use crate::summary::{SessionSummarizer, SessionSummary};
use crate::trend::TrendReport;
use crate::util::backoff::Backoff;
use crate::util::BackoffConfig;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub mod source;
pub use source::{CameraDevice, DirectoryCamera, FrameSource, SourceError};

const LOG_TARGET: &str = "session";

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    DeviceUnavailable(#[from] SourceError),
    #[error("invalid session config: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyActive,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StopOutcome {
    Stopped(SessionSummary),
    AlreadyInactive,
}

/// What the live view shows after each analyzed frame.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LiveSnapshot {
    /// Sequence number of the analyzed frame as reported by the source.
    pub sequence: u64,
    pub result: FrameAnalysisResult,
    pub trends: TrendReport,
    pub feedback: LiveFeedback,
}

struct ActiveSession {
    cancel: CancellationToken,
    handle: JoinHandle<FrameAnalysisPipeline>,
    started_at: Instant,
}

/// Owns at most one running capture session.
///
/// Every `start` builds a fresh pipeline, so histories and counters never leak between
/// sessions. `start` and `stop` are idempotent.
pub struct SessionController {
    camera: Box<dyn CameraDevice>,
    pipeline: PipelineBuilder,
    capture_interval: Duration,
    backoff: BackoffConfig,
    active: Option<ActiveSession>,
    snapshots: Option<watch::Receiver<Option<LiveSnapshot>>>,
    last_summary: Option<SessionSummary>,
}

impl SessionController {
    pub fn new(camera: Box<dyn CameraDevice>, config: SessionConfig) -> Self {
        Self {
            camera,
            pipeline: PipelineBuilder::new(config.analyzer),
            capture_interval: config.capture_interval,
            backoff: config.backoff,
            active: None,
            snapshots: None,
            last_summary: None,
        }
    }

    /// Replaces the pipeline recipe, e.g. to inject a face detector or emotion backend.
    /// Takes effect on the next `start`.
    pub fn with_pipeline(mut self, pipeline: PipelineBuilder) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            analyzer: self.pipeline.config().clone(),
            capture_interval: self.capture_interval,
            backoff: self.backoff,
        }
    }

    /// Opens the camera and spawns the capture task.
    ///
    /// Async so the capture task is always spawned from within the runtime that drives the
    /// controller; nothing is awaited yet. The config is checked here, after any
    /// `with_pipeline` replacement, and a rejected config leaves the controller inactive.
    pub async fn start(&mut self) -> Result<StartOutcome, SessionError> {
        if self.active.is_some() {
            tracing::debug!(target: LOG_TARGET, "start requested while already active");
            return Ok(StartOutcome::AlreadyActive);
        }

        self.session_config().validate().map_err(|e| {
            tracing::error!(target: LOG_TARGET, error = %e, "refusing to start session");
            e
        })?;

        let source = self.camera.open().map_err(|e| {
            tracing::error!(target: LOG_TARGET, error = %e, "failed to open camera");
            e
        })?;

        let pipeline = self.pipeline.build();
        let cancel = CancellationToken::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(None);

        let handle = tokio::spawn(capture_loop(
            source,
            pipeline,
            self.capture_interval,
            self.backoff,
            cancel.clone(),
            snapshot_tx,
        ));

        tracing::info!(
            target: LOG_TARGET,
            capture_interval_ms = self.capture_interval.as_millis() as u64,
            "session started"
        );
        self.snapshots = Some(snapshot_rx);
        self.active = Some(ActiveSession {
            cancel,
            handle,
            started_at: Instant::now(),
        });
        Ok(StartOutcome::Started)
    }

    pub async fn stop(&mut self) -> StopOutcome {
        let Some(active) = self.active.take() else {
            tracing::debug!(target: LOG_TARGET, "stop requested while inactive");
            return StopOutcome::AlreadyInactive;
        };

        active.cancel.cancel();
        let duration = active.started_at.elapsed();

        let summary = match active.handle.await {
            Ok(pipeline) => SessionSummarizer.summarize(
                pipeline.history(),
                &pipeline.stats(),
                pipeline.frames_processed(),
                duration,
            ),
            Err(e) => {
                tracing::error!(target: LOG_TARGET, error = %e, "capture task failed, reporting empty session");
                SessionSummarizer.empty(duration)
            }
        };

        tracing::info!(
            target: LOG_TARGET,
            frames = summary.total_frames_analyzed,
            overall_score = summary.overall_score,
            "session stopped"
        );
        self.last_summary = Some(summary.clone());
        StopOutcome::Stopped(summary)
    }

    /// Latest snapshot of the current or most recent session.
    pub fn latest(&self) -> Option<LiveSnapshot> {
        self.snapshots.as_ref().and_then(|rx| rx.borrow().clone())
    }

    /// Receiver that is notified after every analyzed frame of the current session.
    pub fn subscribe(&self) -> Option<watch::Receiver<Option<LiveSnapshot>>> {
        self.snapshots.clone()
    }

    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(active) = &self.active {
            active.cancel.cancel();
        }
    }
}

/// Single writer of the session's histories. The frame source lives and dies in here.
async fn capture_loop(
    mut source: Box<dyn FrameSource>,
    mut pipeline: FrameAnalysisPipeline,
    capture_interval: Duration,
    backoff: BackoffConfig,
    cancel: CancellationToken,
    snapshots: watch::Sender<Option<LiveSnapshot>>,
) -> FrameAnalysisPipeline {
    let mut ticker = tokio::time::interval(capture_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut backoff = Backoff::new(backoff);

    'capture: loop {
        tokio::select! {
            _ = cancel.cancelled() => break 'capture,
            _ = ticker.tick() => {}
        }

        let Some(frame) = source.next_frame() else {
            let delay = backoff.next_delay();
            tracing::debug!(
                target: LOG_TARGET,
                attempt = backoff.attempts(),
                delay_ms = delay.as_millis() as u64,
                "no frame available, backing off"
            );
            tokio::select! {
                _ = cancel.cancelled() => break 'capture,
                _ = tokio::time::sleep(delay) => {}
            }
            continue 'capture;
        };
        backoff.reset();

        let result = pipeline.analyze(&frame).await;
        let trends = pipeline.trends();
        let feedback = live_feedback(&result, &trends);
        snapshots.send_replace(Some(LiveSnapshot {
            sequence: frame.sequence,
            result,
            trends,
            feedback,
        }));
    }

    drop(source);
    tracing::debug!(target: LOG_TARGET, frames = pipeline.frames_processed(), "capture loop exited, camera released");
    pipeline
}
