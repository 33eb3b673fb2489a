use clap::{Parser, Subcommand};
use simple_bio::{config, generate, output, query, render};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "simple-bio")]
#[command(about = "Renders the author bio block for a static blog")]
#[command(long_about = "\
Renders the author bio block for a static blog

The bio shows a circular avatar, a short text with your name, and links to
your LinkedIn, XING, Twitter, GitHub and DEV profiles.

Content structure:

  content/
  ├── config.toml          # [author] name, [social] handles, [avatar], [theme], [colors]
  └── profile-pic.jpg      # Avatar (found anywhere under content/)

Output:

  dist/
  ├── bio.html             # The bio block, to include in your templates
  ├── index.html           # Standalone preview with CSS
  └── static/              # Avatar at 1x, 1.5x and 2x (JPEG/PNG + WebP)

Run 'simple-bio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (bio.json, processed avatar)
    #[arg(long, default_value = ".simple-bio-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve author data and avatar into bio.json
    Query,
    /// Produce the HTML output from bio.json
    Generate,
    /// Run the full pipeline: query → generate
    Build,
    /// Print the bio HTML fragment from bio.json to stdout
    Render,
    /// Validate the content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let manifest_path = cli.temp_dir.join(query::MANIFEST_FILENAME);

    match cli.command {
        Command::Query => {
            run_query(&cli.source, &cli.temp_dir, &manifest_path)?;
        }
        Command::Generate => {
            let report = generate::generate(&manifest_path, &cli.temp_dir, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Querying {}", cli.source.display());
            run_query(&cli.source, &cli.temp_dir, &manifest_path)?;

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&manifest_path, &cli.temp_dir, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Render => {
            let content = std::fs::read_to_string(&manifest_path)?;
            let manifest: query::QueryManifest = serde_json::from_str(&content)?;
            println!("{}", render::render(&manifest.bio).into_string());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let report = query::check(&cli.source)?;
            output::print_check_output(&report);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Run stage 1 and write the manifest.
fn run_query(
    source: &Path,
    temp_dir: &Path,
    manifest_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest = query::run(source, temp_dir)?;
    let json = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(manifest_path, json)?;
    output::print_query_output(&manifest);
    Ok(())
}
