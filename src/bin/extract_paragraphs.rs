//! Reconstruct paragraphs from a JSON dump of positioned text
//!
//! Reads a JSON array of pages (blocks → lines → spans with bboxes) and
//! writes the paragraphs of every page plus the style dictionary as JSON.
//!
//! Usage:
//!   extract_paragraphs pages.json
//!   extract_paragraphs pages.json --header-y1 40 --footer-y0 780 --output paragraphs.json
//!   cat pages.json | extract_paragraphs -

use paraflow::config::ExtractionConfig;
use paraflow::error::{Error, Result};
use paraflow::layout::text_block::Page;
use paraflow::pipeline::ParagraphExtractor;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

struct CliConfig {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    extraction: ExtractionConfig,
}

impl CliConfig {
    fn from_args() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut output = None;
        let mut extraction = ExtractionConfig::new();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--header-y1" => {
                    i += 1;
                    extraction = extraction.with_header_y1(parse_coordinate(&args, i)?);
                },
                "--footer-y0" => {
                    i += 1;
                    extraction = extraction.with_footer_y0(parse_coordinate(&args, i)?);
                },
                "--output" | "-o" => {
                    i += 1;
                    let path = args.get(i).ok_or_else(|| {
                        Error::InvalidArgument("--output requires a path".to_string())
                    })?;
                    output = Some(PathBuf::from(path));
                },
                "-" => input = None,
                other if other.starts_with("--") => {
                    return Err(Error::InvalidArgument(format!("unknown option {}", other)));
                },
                path => input = Some(PathBuf::from(path)),
            }
            i += 1;
        }

        Ok(Self {
            input,
            output,
            extraction,
        })
    }
}

fn parse_coordinate(args: &[String], i: usize) -> Result<f32> {
    let flag = &args[i - 1];
    let raw = args
        .get(i)
        .ok_or_else(|| Error::InvalidArgument(format!("{} requires a value", flag)))?;
    let value: f32 = raw
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{} expects a number, got {}", flag, raw)))?;
    if !value.is_finite() {
        return Err(Error::InvalidArgument(format!("{} must be finite", flag)));
    }
    Ok(value)
}

fn read_pages(input: Option<&PathBuf>) -> Result<Vec<Page>> {
    let mut pages: Vec<Page> = match input {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw)?;
            serde_json::from_str(&raw)?
        },
    };
    for page in &mut pages {
        page.number_lines();
    }
    Ok(pages)
}

fn run(config: &CliConfig) -> Result<()> {
    let start_time = Instant::now();

    let pages = read_pages(config.input.as_ref())?;
    log::info!("Loaded {} pages", pages.len());

    let extractor = ParagraphExtractor::new(config.extraction.clone());
    let document = extractor.process_document(&pages)?;

    match &config.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, &document)?;
            writer.flush()?;
        },
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            serde_json::to_writer_pretty(&mut writer, &document)?;
            writeln!(writer)?;
            writer.flush()?;
        },
    }

    log::info!(
        "Wrote {} paragraphs and {} styles in {:.2}s",
        document.paragraph_count(),
        document.styles.len(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let config = match CliConfig::from_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!(
                "Usage: extract_paragraphs [PAGES.json | -] [--header-y1 Y] [--footer-y0 Y] [--output PATH]"
            );
            std::process::exit(2);
        },
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
