use clap::{Parser, Subcommand};
use readme_banner::{assemble, config, output, plan, slice};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "readme-banner")]
#[command(about = "Build-time generator for interactive README banner images")]
#[command(long_about = "\
Build-time generator for interactive README banner images

One source image plus a declarative layout produce a directory of image
slices and a README where parts of the banner are clickable. Each row of
the image is cut into link and filler crops that tile the full width, so
the reassembled fragments render as a single seamless picture.

Project layout:

  repo/
  ├── banner.toml                  # Layout: rows, link spans, paths
  ├── banner.png                   # Source image to slice
  ├── generated/                   # Crop output (owned by the generator)
  │   ├── 3a7bd3e2360a...png       # Content-addressed slices
  │   └── 9f86d081884c...png
  └── README.md                    # Assembled document (overwritten)

Relative paths in banner.toml resolve against the config file's directory,
so the tool can run from anywhere (e.g. CI).

Run 'readme-banner gen-config' to generate a documented banner.toml.")]
#[command(version)]
struct Cli {
    /// Layout config file
    #[arg(long, default_value = "banner.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: plan → slice → assemble
    Build,
    /// Print the crop plan without writing anything
    Plan {
        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate config and image without writing anything
    Check,
    /// Print a stock banner.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let (config, root) = config::load_layout(&cli.config)?;
            let image_path = root.join(&config.image);

            println!("==> Stage 1: Planning crops for {}", image_path.display());
            let image = slice::load_image(&image_path)?;
            let regions = plan::plan_crops(image.width(), &config);
            output::print_plan_output(&regions);

            let output_dir = root.join(&config.output_dir);
            println!("==> Stage 2: Slicing into {}", output_dir.display());
            init_thread_pool(&config.processing);
            slice::prepare_output_dir(&output_dir)?;
            let crops = slice::slice_crops(&image, &regions, &output_dir)?;

            let readme_path = root.join(&config.readme);
            println!("==> Stage 3: Assembling {}", readme_path.display());
            let document = assemble::assemble_document(&crops, image.width(), &config.base_url);
            std::fs::write(&readme_path, &document)?;
            output::print_build_output(&crops, &config.output_dir, &config.readme);

            println!("==> Build complete: {}", readme_path.display());
        }
        Command::Plan { json } => {
            let (config, root) = config::load_layout(&cli.config)?;
            let (width, _) = slice::probe_dimensions(&root.join(&config.image))?;
            let regions = plan::plan_crops(width, &config);
            if json {
                println!("{}", serde_json::to_string_pretty(&regions)?);
            } else {
                output::print_plan_output(&regions);
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let (config, root) = config::load_layout(&cli.config)?;
            let dimensions = slice::probe_dimensions(&root.join(&config.image))?;
            let regions = plan::plan_crops(dimensions.0, &config);
            slice::check_bounds(&regions, dimensions)?;
            output::print_check_output(&config, dimensions, &regions);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
