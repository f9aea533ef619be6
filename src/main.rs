use casebook::catalog::Catalog;
use casebook::config::{self, SiteConfig};
use casebook::{generate, output};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("GIT_HASH") {
        "" => "dev@unknown",
        // Built once per process
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "casebook")]
#[command(about = "Static site generator for engineering project portfolios")]
#[command(long_about = "\
Static site generator for engineering project portfolios

One TOML catalog describes every project. Each project becomes a case study
page built from typed sections; the index lists them as cards.

Content structure:

  content/
  ├── config.toml          # Site config (optional)
  ├── catalog.toml         # Projects and downloads
  └── assets/              # Images, PDFs, CAD files → copied to output/assets/

Section types:
  overview, technical, results   Markdown prose in `content`
  gallery                        `images = [{ src, alt }]`, opens a lightbox
  video                          `video_url` of an embeddable player

Run 'casebook gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the full site into the output directory
    Build,
    /// Validate config and catalog without writing anything
    Check {
        /// Print the parsed catalog as JSON instead of the inventory
        #[arg(long)]
        json: bool,
    },
    /// Print the rendered detail page for one project id
    Show {
        /// Project id
        id: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

/// `RUST_LOG` when set, otherwise warnings and errors only.
fn log_filter() -> EnvFilter {
    log_filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

fn log_filter_from(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives.unwrap_or_default())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let (config, catalog) = load_site(&cli.source)?;
            println!(
                "==> Building {} → {}",
                cli.source.display(),
                cli.output.display()
            );
            let report = generate::generate(&catalog, &config, &cli.source, &cli.output)?;
            output::print_generate_output(&catalog, &config, &report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check { json } => {
            let (config, catalog) = load_site(&cli.source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                println!("==> Checking {}", cli.source.display());
                output::print_check_output(&catalog, &config, &cli.source);
                println!("==> Content is valid");
            }
        }
        Command::Show { id } => {
            let (config, catalog) = load_site(&cli.source)?;
            let page = generate::render_detail_page(&catalog, &id, &config);
            println!("{}", page.into_string());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config and the catalog it names from the content directory.
fn load_site(source: &Path) -> Result<(SiteConfig, Catalog), Box<dyn std::error::Error>> {
    let config = config::load_config(source)
        .map_err(|e| format!("{}: {e}", source.join("config.toml").display()))?;
    let catalog_path = source.join(&config.catalog);
    let catalog =
        Catalog::load(&catalog_path).map_err(|e| format!("{}: {e}", catalog_path.display()))?;
    Ok((config, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_defaults_to_warn() {
        assert_eq!(log_filter_from(None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter_from(Some("")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn log_filter_honors_global_level() {
        assert_eq!(
            log_filter_from(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn log_filter_honors_target_level() {
        let filter = log_filter_from(Some("casebook=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }
}
