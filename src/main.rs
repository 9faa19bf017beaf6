use clap::{Parser, Subcommand};
use image_variants::config;
use image_variants::imaging::RustBackend;
use image_variants::output;
use image_variants::resolve::Resolver;
use image_variants::scan::{self, FsLister};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "image-variants")]
#[command(about = "Resolve responsive and hidpi background image variants")]
#[command(long_about = "\
Resolve responsive and hidpi background image variants

Variants of a base image live next to it and carry dot-separated tags
between the stem and the extension:

  images/
  ├── hero.jpg                 # Base image, always served
  ├── hero.2x.jpg              # Hidpi variant
  ├── hero.medium.jpg          # Breakpoint variant (needs a 'medium' breakpoint)
  ├── hero.medium.2x.jpg       # Breakpoint + hidpi
  └── hero.dark.jpg            # Class variant (needs a registered 'dark' variant)

Files with tags that match nothing are skipped and reported.

Run 'image-variants gen-config' to generate a documented config file.")]
#[command(version)]
struct Cli {
    /// Image directory
    #[arg(long, default_value = "images", global = true)]
    images: PathBuf,

    /// Config file (defaults apply when it does not exist)
    #[arg(long, default_value = "image-variants.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the ordered variant rules of one base image
    Resolve {
        /// Base image filename, relative to the image directory
        image: String,
        /// Read image heights for every rule
        #[arg(long)]
        heights: bool,
        /// Print the rules as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve every base image in the directory and report problems
    Check {
        /// Also read image heights, catching unreadable files
        #[arg(long)]
        heights: bool,
    },
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Resolve {
            image,
            heights,
            json,
        } => {
            let variant_config = config::load_config(&cli.config)?;
            let backend = RustBackend::new();
            let resolver = Resolver::new(&variant_config, &FsLister, &backend);
            let resolution = resolver.resolve(&cli.images, &image, heights)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&resolution.rules)?);
            } else {
                output::print_resolution(&resolution);
            }
        }
        Command::Check { heights } => {
            let variant_config = config::load_config(&cli.config)?;
            let backend = RustBackend::new();
            let resolver = Resolver::new(&variant_config, &FsLister, &backend);
            let bases = scan::find_base_images(&FsLister, &cli.images)?;
            let results: Vec<_> = bases
                .into_par_iter()
                .map(|base| {
                    let result = resolver.resolve(&cli.images, &base, heights);
                    (base, result)
                })
                .collect();
            output::print_check_report(&results);
            if results.iter().any(|(_, r)| r.is_err()) {
                return Err("some images failed to resolve".into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
