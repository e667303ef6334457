use clap::{Parser, Subcommand};
use pipesite::icons::layout::Layout;
use pipesite::{config, icons, output, pages, serve};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let hash = env!("GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup, called exactly once
        Box::leak(format!("{}+{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "pipesite")]
#[command(about = "Build tooling for the PipeScore web app")]
#[command(long_about = "\
Build tooling for the PipeScore web app

Generates the editor's SVG icon set, builds the static pages from their
sources, and serves the result locally with the hosting provider's
routing rules.

Project layout:

  src/static/
  ├── template.html            # Shared template ($title$, $body$ tokens)
  ├── index.html               # Page source ({title} [body] $css$ %js%)
  ├── login.html
  ├── scores.html
  ├── 404.html
  ├── docs.md                  # Markdown page, same template
  └── pipescore.html           # Compiled editor shell, copied verbatim
  public/                      # Build output, served by `pipesite serve`
  └── images/icons/            # Generated icon set

An optional pipesite.toml in the project root overrides the page list
and the dev server settings.")]
#[command(version = version_string())]
struct Cli {
    /// Static page sources directory
    #[arg(long, default_value = "src/static", global = true)]
    source: PathBuf,

    /// Public output directory
    #[arg(long, default_value = "public", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the SVG icon set
    Icons,
    /// Build the static pages from their sources
    Pages,
    /// Run the full build: icons + pages
    Build,
    /// Validate page sources without writing output
    Check,
    /// Serve the output directory with the production routing rules
    Serve {
        /// Port to listen on (default from config, stock 5000)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let site = config::SiteConfig::load(Path::new("."))?;

    match cli.command {
        Command::Icons => {
            let written = icons::generate(&Layout::default(), &cli.output)?;
            output::print_artifacts("Icons", &written);
        }
        Command::Pages => {
            let builder = pages::Builder::new(&cli.source, &cli.output)?;
            let written = builder.build_all(&site.pages)?;
            output::print_artifacts("Pages", &written);
        }
        Command::Build => {
            std::fs::create_dir_all(&cli.output)?;

            println!("==> Stage 1: Icons → {}", cli.output.display());
            let written = icons::generate(&Layout::default(), &cli.output)?;
            output::print_artifacts("Icons", &written);

            println!("==> Stage 2: Pages → {}", cli.output.display());
            let builder = pages::Builder::new(&cli.source, &cli.output)?;
            let written = builder.build_all(&site.pages)?;
            output::print_artifacts("Pages", &written);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let report = pages::check(&cli.source, &site.pages)?;
            output::print_check(&report);
            println!("==> Sources are valid");
        }
        Command::Serve { port } => {
            serve::serve(
                cli.output.clone(),
                &site.serve,
                port.unwrap_or(site.serve.port),
            )?;
        }
    }

    Ok(())
}
