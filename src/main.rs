use cachebust::{config, output, pipeline, rewrite, scan, stamp};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "cachebust")]
#[command(about = "Post-build asset fingerprinting for static sites")]
#[command(long_about = "\
Post-build asset fingerprinting for static sites

Run it against your build output after the site generator finishes. Eligible
assets get their content hash spliced into their filename, referencing files
are rewritten to match, and a manifest records every rename:

  dist/
  ├── index.html                   # <script src=\"/js/app.1a2b3c4d.js\">
  ├── asset-manifest.json          # { \"js/app.js\": \"js/app.1a2b3c4d.js\" }
  ├── .htaccess                    # generated cache lifetimes (optional)
  └── js/
      └── app.1a2b3c4d.js          # was app.js; original name is gone

Fingerprinted files never change content under the same name, so they can be
served with a year-long immutable cache lifetime. Re-runs are idempotent:
already-stamped files are detected by the <hash8> pattern and skipped.

Configuration is read from cachebust.toml (run 'cachebust gen-config' for a
documented stock file); --output and --production override it per invocation.")]
#[command(version = version_string())]
struct Cli {
    /// Build output directory (overrides output_dir from the config file)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Configuration file
    #[arg(long, default_value = "cachebust.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List eligible assets without touching anything
    Scan,
    /// Fingerprint and rename assets, writing the manifest
    Stamp,
    /// Rewrite references using an existing manifest
    Rewrite,
    /// Run the full pipeline: stamp → rewrite → persist → cache-control
    Run {
        /// Enable production mode for this invocation
        #[arg(long)]
        production: bool,
    },
    /// Print a stock cachebust.toml with all options documented
    GenConfig,
}

fn main() {
    let cli = Cli::parse();

    // Single top-level error boundary: a fingerprinting failure is logged
    // and reported through the exit status, never a panic. The calling
    // build tool decides whether that sinks the overall build.
    if let Err(err) = run_command(cli) {
        eprintln!("cachebust: {err}");
        std::process::exit(1);
    }
}

fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config::load_config(&cli.config)?;
    if let Some(output_dir) = &cli.output {
        config.output_dir = output_dir.to_string_lossy().to_string();
    }

    match cli.command {
        Command::Scan => {
            config.validate()?;
            let assets = scan::scan(
                std::path::Path::new(&config.output_dir),
                &config.extensions,
                &pipeline::effective_excluded(&config),
            )?;
            output::print_scan_output(&assets);
        }
        Command::Stamp => {
            config.validate()?;
            let output_dir = std::path::Path::new(&config.output_dir);
            let manifest = stamp::stamp_assets(
                output_dir,
                &config.extensions,
                &pipeline::effective_excluded(&config),
            )?;
            if !manifest.is_empty() {
                manifest.save(
                    &output_dir.join(pipeline::MANIFEST_FILENAME),
                    config.manifest.pretty,
                )?;
            }
            output::print_stamp_output(&manifest);
        }
        Command::Rewrite => {
            config.validate()?;
            let output_dir = std::path::Path::new(&config.output_dir);
            let manifest = stamp::Manifest::load(&output_dir.join(pipeline::MANIFEST_FILENAME))?;
            let report = rewrite::update_references(
                &manifest,
                output_dir,
                &config.rewrite.extensions,
                &config.rewrite.extra_files,
            )?;
            output::print_rewrite_output(&report);
        }
        Command::Run { production } => {
            if production {
                config.production = true;
            }
            config.validate()?;
            let report = pipeline::run(&config)?;
            output::print_pipeline_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
