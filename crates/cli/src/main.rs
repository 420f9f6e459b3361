#![deny(warnings)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use presentation_coach_core::config::{
    SessionConfig, SessionOverrides, StdEnv, ENV_CAPTURE_INTERVAL_MS, ENV_CLASSIFY_DEADLINE_MS,
    ENV_FRAME_SKIP, ENV_HISTORY_CAPACITY,
};
use presentation_coach_core::session::{
    DirectoryCamera, SessionController, StartOutcome, StopOutcome,
};
use presentation_coach_core::text::{speaking_rate, TextQualityScorer};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Parser, Debug)]
#[command(name = "presentation-coach")]
#[command(about = "Real-time presentation coaching: frame analysis and transcript scoring")]
struct Args {
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a transcript read from a file or stdin.
    Score {
        /// Transcript file; stdin when omitted.
        #[arg(long)]
        file: Option<PathBuf>,

        /// How long the transcript took to speak, for the speaking-rate estimate.
        #[arg(long)]
        duration_secs: Option<f64>,
    },
    /// Run a live session over a directory of frames standing in for a camera.
    Live {
        #[arg(long)]
        frames_dir: PathBuf,

        /// Replay the directory from the start once it runs out.
        #[arg(long)]
        loop_frames: bool,

        /// Stop after this many seconds; runs until Ctrl-C otherwise.
        #[arg(long)]
        duration_secs: Option<u64>,

        #[arg(long, env = ENV_CAPTURE_INTERVAL_MS)]
        capture_interval_ms: Option<u64>,

        #[arg(long, env = ENV_HISTORY_CAPACITY)]
        history_capacity: Option<usize>,

        #[arg(long, env = ENV_FRAME_SKIP)]
        frame_skip: Option<u32>,

        #[arg(long, env = ENV_CLASSIFY_DEADLINE_MS)]
        classify_deadline_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    match args.command {
        Command::Score {
            file,
            duration_secs,
        } => run_score(file, duration_secs),
        Command::Live {
            frames_dir,
            loop_frames,
            duration_secs,
            capture_interval_ms,
            history_capacity,
            frame_skip,
            classify_deadline_ms,
        } => {
            let overrides = SessionOverrides {
                history_capacity,
                frame_skip_interval: frame_skip,
                classify_deadline_ms,
                capture_interval_ms,
            };
            let config = SessionConfig::resolve(overrides, &StdEnv)
                .context("invalid session configuration")?;
            let camera = DirectoryCamera::new(frames_dir).looping(loop_frames);
            run_live(camera, config, duration_secs.map(Duration::from_secs)).await
        }
    }
}

fn run_score(file: Option<PathBuf>, duration_secs: Option<f64>) -> anyhow::Result<()> {
    let transcript = match &file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read transcript {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read transcript from stdin")?;
            buf
        }
    };

    let duration = match duration_secs {
        Some(secs) => Some(
            Duration::try_from_secs_f64(secs)
                .with_context(|| format!("invalid --duration-secs: {secs}"))?,
        ),
        None => None,
    };

    let scores = TextQualityScorer::new().score(&transcript);
    let rate = duration.and_then(|d| speaking_rate(&transcript, d));
    tracing::info!(
        words = scores.word_count,
        degraded = scores.degraded,
        "transcript scored"
    );

    let output = serde_json::json!({
        "scores": scores,
        "speaking_rate": rate.map(|r| serde_json::json!({
            "words_per_minute": r.words_per_minute,
            "category": r.category,
            "message": r.category.message(),
        })),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_live(
    camera: DirectoryCamera,
    config: SessionConfig,
    duration: Option<Duration>,
) -> anyhow::Result<()> {
    tracing::info!(
        frames_dir = %camera.dir().display(),
        capture_interval_ms = config.capture_interval.as_millis() as u64,
        history_capacity = config.analyzer.history_capacity,
        frame_skip = config.analyzer.frame_skip_interval,
        "config loaded"
    );

    let mut controller = SessionController::new(Box::new(camera), config);
    match controller.start().await.context("failed to start session")? {
        StartOutcome::Started => {}
        StartOutcome::AlreadyActive => anyhow::bail!("session already active"),
    }

    let deadline = async {
        match duration {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);

    let mut progress = tokio::time::interval(PROGRESS_INTERVAL);
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            res = tokio::signal::ctrl_c() => {
                res.context("failed to listen for ctrl-c")?;
                tracing::info!("interrupted, stopping session");
                break;
            }
            _ = progress.tick() => {
                if let Some(snapshot) = controller.latest() {
                    tracing::info!(
                        sequence = snapshot.sequence,
                        emotion = %snapshot.result.emotion,
                        movement = snapshot.result.movement_level,
                        engagement = snapshot.result.engagement_score,
                        trend = ?snapshot.trends.emotion_trend,
                        "live"
                    );
                }
            }
        }
    }

    match controller.stop().await {
        StopOutcome::Stopped(summary) => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        StopOutcome::AlreadyInactive => anyhow::bail!("session was not running"),
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
