//! png2jpg CLI - convert one PNG file to a baseline JPEG.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use png2jpg_core::{convert, ConversionReport, ConvertError, ConvertOptions, JPEG_QUALITY};

/// Convert a PNG image of any color type and bit depth to a baseline JPEG.
///
/// Transparency is discarded, not blended.
#[derive(Parser, Debug)]
#[command(name = "png2jpg")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    png2jpg photo.png                  Write photo.jpg next to the input
    png2jpg photo.png out.jpg -q 90    Higher quality, explicit output
    RUST_LOG=debug png2jpg photo.png   Log every stage")]
struct Cli {
    /// Input PNG file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output JPEG file (defaults to INPUT with a .jpg extension)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// JPEG quality (1-100, higher = better quality)
    #[arg(short, long, default_value_t = JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output(&self.input))
    }

    fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    fn options(&self) -> ConvertOptions {
        ConvertOptions::new().with_quality(self.quality)
    }
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("jpg")
}

fn run(cli: &Cli) -> Result<ConversionReport, ConvertError> {
    let output = cli.output_path();
    let report = convert(&cli.input, &output, &cli.options())?;
    log::info!(
        "wrote {} ({}x{}, {} bytes)",
        output.display(),
        report.width,
        report.height,
        report.bytes_written
    );
    Ok(report)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    match run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use png2jpg_core::Stage;

    fn write_png(path: &Path) {
        let file = std::fs::File::create(path).unwrap();
        let mut encoder = png::Encoder::new(file, 3, 2);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[200u8, 100, 50, 255].repeat(6)).unwrap();
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("png2jpg").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["photo.png"]);
        assert_eq!(cli.input, PathBuf::from("photo.png"));
        assert_eq!(cli.output, None);
        assert_eq!(cli.quality, 75);
        assert_eq!(cli.output_path(), PathBuf::from("photo.jpg"));
        assert_eq!(cli.log_filter(), "warn");
        assert_eq!(cli.options(), ConvertOptions::default());
    }

    #[test]
    fn test_explicit_output_and_quality() {
        let cli = parse(&["a.png", "b/c.jpeg", "-q", "90"]);
        assert_eq!(cli.output_path(), PathBuf::from("b/c.jpeg"));
        assert_eq!(cli.options().quality(), 90);

        let cli = parse(&["--quality", "1", "a.png"]);
        assert_eq!(cli.quality, 1);
    }

    #[test]
    fn test_quality_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["png2jpg", "a.png", "-q", "0"]).is_err());
        assert!(Cli::try_parse_from(["png2jpg", "a.png", "--quality", "101"]).is_err());
        assert!(Cli::try_parse_from(["png2jpg", "a.png", "-q", "high"]).is_err());
    }

    #[test]
    fn test_input_required() {
        assert!(Cli::try_parse_from(["png2jpg"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(parse(&["a.png", "-v"]).log_filter(), "info");
        assert_eq!(parse(&["a.png", "-vvv"]).log_filter(), "debug");
    }

    #[test]
    fn test_default_output_replaces_extension() {
        assert_eq!(default_output(Path::new("dir/img.png")), PathBuf::from("dir/img.jpg"));
        assert_eq!(default_output(Path::new("img")), PathBuf::from("img.jpg"));
        assert_eq!(default_output(Path::new("a.b.PNG")), PathBuf::from("a.b.jpg"));
    }

    #[test]
    fn test_run_converts_to_default_output() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("photo.png");
        write_png(&src);

        let cli = parse(&[src.to_str().unwrap(), "-q", "60"]);
        let report = run(&cli).unwrap();

        assert_eq!((report.width, report.height), (3, 2));
        let jpeg = std::fs::read(dir.path().join("photo.jpg")).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(jpeg.len() as u64, report.bytes_written);
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("missing.png");

        let cli = parse(&[src.to_str().unwrap()]);
        let err = run(&cli).unwrap_err();
        assert_eq!(err.stage(), Stage::Read);
        assert!(err.to_string().contains("missing.png"));
        assert!(!dir.path().join("missing.jpg").exists());
    }
}
