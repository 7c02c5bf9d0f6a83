use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use catalog::listing::links_text;
use catalog::{CompactDate, MANIFEST_FILE_NAME};
use clap::{Parser, Subcommand};
use foundation::{BucketCoord, tile_index};
use layers::{AMERICAS_GRID, CoveragePolicy, OverlayConfig, build_link_list};
use tools::airports::filter_airports;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Publishing tools for the scenery download map")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert between bucket names and coordinates
    Bucket {
        #[command(subcommand)]
        command: BucketCommand,
    },

    /// Print the FlightGear tile index for a position
    TileIndex {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },

    /// Build the download manifest from a directory of scenery archives
    Manifest {
        /// Directory holding fgfs-americas-scenery-<bucket>-<YYYYMMDD>.tar files
        dir: PathBuf,

        /// URL the directory is published under
        #[arg(long)]
        base_url: String,

        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Also write the download URLs, one per line
        #[arg(long)]
        links_out: Option<PathBuf>,
    },

    /// Print one line per tile with its size, date and status
    Summary {
        #[arg(default_value = MANIFEST_FILE_NAME)]
        manifest: PathBuf,

        /// Staleness cutoff as YYYYMMDD
        #[arg(long)]
        cutoff: Option<String>,

        /// Include grid tiles that are not published yet
        #[arg(long)]
        grid: bool,
    },

    /// Print the direct-download list as static HTML
    Links {
        #[arg(default_value = MANIFEST_FILE_NAME)]
        manifest: PathBuf,
    },

    /// List the DEM files (one-degree .tif/.hgt cells) needed to build a bucket
    DemFiles {
        /// Directory searched recursively
        dir: PathBuf,
        bucket: String,
    },

    /// Write an apt.dat holding only the airports inside a bucket
    Airports {
        bucket: String,

        /// apt.dat inputs (default: stdin)
        files: Vec<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum BucketCommand {
    /// Name of the bucket whose lower-left corner is LAT,LON
    Encode {
        #[arg(long, allow_negative_numbers = true)]
        lat: i32,
        #[arg(long, allow_negative_numbers = true)]
        lon: i32,
    },

    /// Lower-left corner of a bucket, as "lat lon"
    Decode { name: String },

    /// Bucket containing a position
    Containing {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },

    /// Bounds as min_lon,min_lat,max_lon,max_lat
    Bounds {
        name: String,

        /// Extra degrees on each side
        #[arg(long, default_value_t = 0.0)]
        margin: f64,
    },

    /// One-degree DEM cells covering a bucket
    DemCells { name: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Bucket { command } => bucket(command)?,
        Command::TileIndex { lat, lon } => println!("{}", tile_index(lat, lon)?),
        Command::Manifest {
            dir,
            base_url,
            out,
            links_out,
        } => {
            let manifest = tools::build_manifest(&dir, &base_url)?;
            info!("{} buckets in {}", manifest.len(), dir.display());
            let json = manifest.to_json_string_pretty()?;
            match out {
                Some(path) => {
                    fs::write(&path, json + "\n")?;
                    info!("wrote {}", path.display());
                }
                None => println!("{json}"),
            }
            if let Some(path) = links_out {
                fs::write(&path, links_text(&manifest))?;
                info!("wrote {}", path.display());
            }
        }
        Command::Summary {
            manifest,
            cutoff,
            grid,
        } => {
            let manifest = tools::read_manifest(&manifest)?;
            let mut config = OverlayConfig::default();
            if let Some(raw) = cutoff {
                config.staleness_cutoff = raw.parse::<CompactDate>()?;
            }
            config.coverage = if grid {
                CoveragePolicy::WithGrid(&AMERICAS_GRID)
            } else {
                CoveragePolicy::ManifestOnly
            };
            for line in tools::summary_lines(&manifest, &config) {
                println!("{line}");
            }
        }
        Command::Links { manifest } => {
            let manifest = tools::read_manifest(&manifest)?;
            print!("{}", build_link_list(&manifest).to_html());
        }
        Command::DemFiles { dir, bucket } => {
            let bucket = bucket.parse::<BucketCoord>()?;
            for path in tools::find_dem_files(&dir, bucket)? {
                println!("{}", path.display());
            }
        }
        Command::Airports { bucket, files } => {
            let bucket = bucket.parse::<BucketCoord>()?;
            let mut out = BufWriter::new(io::stdout().lock());
            let count = if files.is_empty() {
                filter_airports(bucket, [io::stdin().lock()], &mut out)?
            } else {
                let mut inputs = Vec::with_capacity(files.len());
                for path in &files {
                    inputs.push(BufReader::new(File::open(path)?));
                }
                filter_airports(bucket, inputs, &mut out)?
            };
            out.flush()?;
            info!("{count} airports in {bucket}");
        }
    }

    Ok(())
}

fn bucket(command: BucketCommand) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        BucketCommand::Encode { lat, lon } => println!("{}", foundation::encode(lat, lon)),
        BucketCommand::Decode { name } => {
            let (lat, lon) = foundation::decode(&name)?;
            println!("{lat} {lon}");
        }
        BucketCommand::Containing { lat, lon } => {
            println!("{}", BucketCoord::containing(lat, lon));
        }
        BucketCommand::Bounds { name, margin } => {
            let b = name.parse::<BucketCoord>()?.bounds_with_margin(margin);
            println!("{},{},{},{}", b.west(), b.south(), b.east(), b.north());
        }
        BucketCommand::DemCells { name } => {
            for cell in name.parse::<BucketCoord>()?.dem_cells() {
                println!("{cell}");
            }
        }
    }
    Ok(())
}
