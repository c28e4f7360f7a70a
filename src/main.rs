//! ktxkit CLI - Command-line tool for inspecting KTX textures.
//!
//! This is the main entry point for the ktxkit command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use ktxkit_texture::{KtxFile, KtxHeader, TextureKind};

/// ktxkit - KTX texture inspection and mip level extraction tool
#[derive(Parser)]
#[command(name = "ktxkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show header fields, metadata and mip levels of a KTX file
    Info {
        /// Path to the KTX file
        #[arg(short, long, env = "INPUT_KTX")]
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the payload of each mip level to its own file
    Extract {
        /// Path to the KTX file
        #[arg(short, long, env = "INPUT_KTX")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, env = "OUTPUT_FOLDER")]
        output: PathBuf,

        /// Only extract this mip level
        #[arg(short, long)]
        level: Option<usize>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input, json } => {
            cmd_info(&input, json)?;
        }
        Commands::Extract {
            input,
            output,
            level,
        } => {
            cmd_extract(&input, &output, level)?;
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct InfoReport<'a> {
    header: &'a KtxHeader,
    kind: TextureKind,
    metadata: Vec<MetadataEntry<'a>>,
    levels: Vec<LevelReport>,
    total_byte_length: u64,
    payload_byte_length: u64,
}

#[derive(Serialize)]
struct MetadataEntry<'a> {
    key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    size: usize,
}

#[derive(Serialize)]
struct LevelReport {
    level: usize,
    size: usize,
    width: u32,
    height: u32,
    depth: u32,
}

fn build_report(file: &KtxFile) -> InfoReport<'_> {
    let header = file.header();
    let texture = file.texture();

    let metadata = file
        .metadata()
        .iter()
        .map(|kv| MetadataEntry {
            key: &kv.key,
            text: file.metadata().get_str(&kv.key),
            size: kv.value.len(),
        })
        .collect();

    let levels = texture
        .levels()
        .iter()
        .enumerate()
        .map(|(level, data)| {
            let (width, height, depth) = header.level_extent(level as u32);
            LevelReport {
                level,
                size: data.len(),
                width,
                height,
                depth,
            }
        })
        .collect();

    InfoReport {
        header,
        kind: texture.kind(),
        metadata,
        levels,
        total_byte_length: texture.total_byte_length(),
        payload_byte_length: texture.payload_byte_length(),
    }
}

fn cmd_info(input: &Path, json: bool) -> Result<()> {
    let start = Instant::now();
    let file = KtxFile::open(input).context("Failed to read KTX file")?;
    log::info!("Loaded {} in {:?}", input.display(), start.elapsed());

    let report = build_report(&file);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let header = report.header;
    println!("File:        {}", input.display());
    println!("Kind:        {}", report.kind);
    println!("Byte order:  {}", header.endianness);
    println!(
        "Size:        {}x{}x{}",
        header.pixel_width, header.pixel_height, header.pixel_depth
    );
    println!(
        "GL:          type {:#06X} (size {}), format {:#06X}, internal {:#06X}, base {:#06X}",
        header.gl_type,
        header.gl_type_size,
        header.gl_format,
        header.gl_internal_format,
        header.gl_base_internal_format
    );
    println!(
        "Layers:      {} array element(s), {} face(s)",
        header.array_element_count, header.face_count
    );
    println!(
        "Mip levels:  {} declared, {} stored",
        header.mipmap_level_count,
        report.levels.len()
    );

    if !report.metadata.is_empty() {
        println!("Metadata:");
        for entry in &report.metadata {
            match entry.text {
                Some(text) => println!("  {} = {:?}", entry.key, text),
                None => println!("  {} ({} bytes)", entry.key, entry.size),
            }
        }
    }

    println!("Levels:");
    for level in &report.levels {
        println!(
            "  {:>3} {:>12} bytes  {}x{}x{}",
            level.level, level.size, level.width, level.height, level.depth
        );
    }
    println!(
        "Payload: {} bytes of {} bytes of level data",
        report.payload_byte_length, report.total_byte_length
    );

    Ok(())
}

fn cmd_extract(input: &Path, output: &Path, only_level: Option<usize>) -> Result<()> {
    println!("Reading KTX file: {}", input.display());

    let file = KtxFile::open(input).context("Failed to read KTX file")?;
    let texture = file.texture();

    let selected: Vec<usize> = match only_level {
        Some(level) if level >= texture.level_count() => {
            bail!(
                "level {} out of range, file has {} level(s)",
                level,
                texture.level_count()
            );
        }
        Some(level) => vec![level],
        None => (0..texture.level_count()).collect(),
    };

    println!(
        "Extracting {} level(s) of a {} texture...",
        selected.len(),
        texture.kind()
    );

    let pb = ProgressBar::new(selected.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    fs::create_dir_all(output).context("Failed to create output directory")?;

    let start = Instant::now();
    for &index in &selected {
        if let Some(data) = texture.level(index) {
            let output_path = output.join(format!("level_{}.bin", index));
            fs::write(&output_path, data)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            log::debug!("wrote {} bytes to {}", data.len(), output_path.display());
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!("Extraction completed in {:?}", start.elapsed());

    Ok(())
}
