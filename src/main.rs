use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info, Level};
use tracing_subscriber::EnvFilter;

use vision_pipeline::{
    capture::{self, CaptureOption, Source},
    config::Config,
    pipeline::{registered_processors, Pipeline},
};

#[derive(Parser)]
#[command(
    name = "vision-cli",
    version,
    about = "Run frames from a capture source through a processing pipeline",
    long_about = "Opens a capture source (a registered scheme such as rtsp://, or the built-in synthetic pattern when empty), runs every frame through the configured processors and reports throughput."
)]
struct Cli {
    /// Source URI or camera id (empty = synthetic)
    #[arg(short, long)]
    src: Option<String>,

    /// Frame width
    #[arg(long)]
    width: Option<u32>,

    /// Frame height
    #[arg(long)]
    height: Option<u32>,

    /// Frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Stop after this many frames (synthetic source)
    #[arg(long)]
    max_frames: Option<u32>,

    /// Processor to append, in order (repeatable; default: fps, edge)
    #[arg(short, long = "processor")]
    processors: Vec<String>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List registered sources and processors, then exit
    #[arg(long)]
    list: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.list {
        println!("sources: synthetic (default) {}", capture::registered_schemes().join(" "));
        println!("processors: {}", registered_processors().join(" "));
        return Ok(());
    }

    debug!("vision-cli v{}", vision_pipeline::VERSION);

    let (source, pipeline) = prepare(cli)?;
    execute(source, pipeline)?;
    Ok(())
}

/// Merge the config file and the command line into an opened source and
/// a processor chain
fn prepare(cli: Cli) -> Result<(Box<dyn Source>, Pipeline)> {
    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            let config = Config::from_file(path)?;
            config.validate()?;
            config
        }
        None => Config::default(),
    };

    // Command-line values are applied after the file's, so they win.
    let mut options = config.capture_options();
    options.extend(cli.width.map(CaptureOption::Width));
    options.extend(cli.height.map(CaptureOption::Height));
    options.extend(cli.fps.map(CaptureOption::Fps));
    options.extend(cli.max_frames.map(CaptureOption::MaxFrames));

    let src = cli.src.unwrap_or(config.source);
    let processors = if cli.processors.is_empty() {
        config.pipeline.processors
    } else {
        cli.processors
    };

    let source = capture::open(&src, &options)?;

    let pipeline = processors
        .iter()
        .fold(Pipeline::new(), |pipeline, name| pipeline.with_named(name));
    if pipeline.len() < processors.len() {
        info!(
            "Some processors are not registered; running with {:?}",
            pipeline.processor_names()
        );
    }

    Ok((source, pipeline))
}

/// Run the pipeline and report throughput, or the partial count on failure
fn execute(source: Box<dyn Source>, pipeline: Pipeline) -> Result<usize> {
    let start = Instant::now();
    let result = pipeline.run(source);
    let elapsed = start.elapsed().as_secs_f64().max(f64::EPSILON);

    match result {
        Ok(frames) => {
            println!(
                "processed {} frames in {:.2}s ({:.1} fps)",
                frames,
                elapsed,
                frames as f64 / elapsed
            );
            Ok(frames)
        }
        Err(e) => {
            println!("processed {} frames before failure", e.frames);
            Err(anyhow::anyhow!(e.error.user_message())
                .context(format!("pipeline stopped after {} frames", e.frames)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vision_pipeline::{
        capture::{CaptureConfig, SyntheticSource},
        error::CaptureError,
        video::types::Frame,
    };

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("vision-cli").chain(args.iter().copied())).unwrap()
    }

    fn run_with(args: &[&str]) -> Result<usize> {
        let (source, pipeline) = prepare(parse(args))?;
        execute(source, pipeline)
    }

    #[test]
    fn test_synthetic_run_defaults_to_five_seconds() {
        let args = ["--width", "64", "--height", "64", "--fps", "5"];
        let (source, pipeline) = prepare(parse(&args)).unwrap();
        assert_eq!(pipeline.processor_names(), vec!["fps", "edge"]);
        assert_eq!(execute(source, pipeline).unwrap(), 25);
    }

    #[test]
    fn test_command_line_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vision.toml");
        let toml = r#"
[capture]
width = 32
height = 32
max_frames = 4

[pipeline]
processors = ["edge"]
"#;
        std::fs::write(&path, toml).unwrap();
        let path = path.to_str().unwrap();

        assert_eq!(run_with(&["--config", path]).unwrap(), 4);

        let (source, pipeline) = prepare(parse(&["--config", path, "--max-frames", "9"])).unwrap();
        assert_eq!(pipeline.processor_names(), vec!["edge"]);
        assert_eq!(execute(source, pipeline).unwrap(), 9);
    }

    #[test]
    fn test_unknown_processors_are_skipped() {
        let args = [
            "--width", "16", "--height", "16", "--max-frames", "3", "-p", "nope", "-p", "fps",
        ];
        let (source, pipeline) = prepare(parse(&args)).unwrap();
        assert_eq!(pipeline.processor_names(), vec!["fps"]);
        assert_eq!(execute(source, pipeline).unwrap(), 3);
    }

    #[test]
    fn test_missing_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(run_with(&["--config", path.to_str().unwrap()]).is_err());
    }

    /// Yields `left` synthetic frames, then a backend failure
    struct DroppingSource {
        inner: SyntheticSource,
        left: usize,
    }

    impl Source for DroppingSource {
        fn next_frame(&mut self) -> vision_pipeline::Result<Option<Frame>> {
            if self.left == 0 {
                return Err(CaptureError::Backend {
                    scheme: "cli-dropping".to_string(),
                    reason: "link down".to_string(),
                }
                .into());
            }
            self.left -= 1;
            self.inner.next_frame()
        }

        fn close(&mut self) -> vision_pipeline::Result<()> {
            self.inner.close()
        }
    }

    #[test]
    fn test_failure_reports_partial_count() {
        capture::register(
            "cli-dropping",
            |_uri: &str, config: CaptureConfig| -> vision_pipeline::Result<Box<dyn Source>> {
                Ok(Box::new(DroppingSource { inner: SyntheticSource::new(config), left: 3 }))
            },
        );

        let err = run_with(&["--src", "cli-dropping://cam", "--width", "16", "--height", "16"])
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("pipeline stopped after 3 frames"), "{}", message);
        assert!(message.contains("link down"), "{}", message);

        capture::unregister("cli-dropping");
    }
}
