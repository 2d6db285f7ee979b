// Grab a single frame from a source and save it as a JPEG thumbnail

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;

use vision_pipeline::capture::{self, CaptureOption};

#[derive(Parser)]
#[command(name = "thumbnailer", version, about = "Write the first frame of a source as a JPEG")]
struct Cli {
    /// Input URI or camera id (empty = synthetic)
    #[arg(short, long, default_value = "")]
    src: String,

    /// Output JPEG path
    #[arg(short, long, default_value = "thumb.jpg")]
    out: PathBuf,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = 80)]
    quality: u8,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let mut source = capture::open(
        &cli.src,
        &[CaptureOption::Width(320), CaptureOption::Height(180), CaptureOption::Fps(1)],
    )?;

    let frame = source.next_frame();
    source.close()?;

    let Some(frame) = frame? else {
        bail!("source ended before producing a frame");
    };

    frame.save_jpeg(&cli.out, cli.quality)?;
    info!("wrote {}", cli.out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;
    use vision_pipeline::{capture::{CaptureConfig, Source}, video::types::Frame};

    fn cli(src: &str, out: PathBuf) -> Cli {
        Cli { src: src.to_string(), out, quality: 80 }
    }

    #[test]
    fn test_writes_decodable_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("thumb.jpg");

        run(cli("", out.clone())).unwrap();

        let image = image::open(&out).unwrap();
        assert_eq!(image.dimensions(), (320, 180));
    }

    #[test]
    fn test_default_arguments() {
        let cli = Cli::try_parse_from(["thumbnailer"]).unwrap();
        assert_eq!(cli.src, "");
        assert_eq!(cli.out, PathBuf::from("thumb.jpg"));
        assert_eq!(cli.quality, 80);
    }

    struct EmptySource;

    impl Source for EmptySource {
        fn next_frame(&mut self) -> vision_pipeline::Result<Option<Frame>> {
            Ok(None)
        }

        fn close(&mut self) -> vision_pipeline::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_empty_source_is_an_error() {
        capture::register(
            "thumb-empty",
            |_uri: &str, _config: CaptureConfig| -> vision_pipeline::Result<Box<dyn Source>> {
                Ok(Box::new(EmptySource))
            },
        );

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("thumb.jpg");
        let err = run(cli("thumb-empty://cam", out.clone())).unwrap_err();

        assert!(err.to_string().contains("ended before producing a frame"), "{}", err);
        assert!(!out.exists());

        capture::unregister("thumb-empty");
    }
}
