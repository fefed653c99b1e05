use clap::{Parser, Subcommand};
use portfolio_gal::catalog::Catalog;
use portfolio_gal::config::{self, SourceKind};
use portfolio_gal::discovery::{self, ImageSource};
use portfolio_gal::viewer::GalleryViewer;
use portfolio_gal::{logging, output, replay};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let release = env!("PORTFOLIO_GAL_RELEASE");
    if release == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("PORTFOLIO_GAL_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "portfolio-gal")]
#[command(about = "Project image discovery and gallery viewer for a makeup portfolio")]
#[command(long_about = "\
Project image discovery and gallery viewer for a makeup portfolio

Each project is a folder of images. The image whose name contains \"hero\"
leads the gallery, the rest follow by filename. Alt text and captions are
generated from filename keywords (hero, detail, before, after, process).

Content structure:

  content/
  ├── config.toml                  # Optional, overrides stock defaults
  ├── projects.toml                # Project catalog (titles, categories)
  └── images/projects/
      ├── ethereal-beauty/
      │   ├── hero.jpg             # Shown first, hero size hint
      │   ├── detail-1.jpg
      │   └── before.jpg
      └── surrealism/
          └── IMG_7115.JPG

Viewer scripts (view --script):
  next, prev        navigate
  scroll:<delta>    wheel input, negative scrolls back
  key:<name>        Escape, ArrowLeft, ArrowRight
  wait:<ms>         let time pass, firing due timers
  close             close the viewer

Run 'portfolio-gal gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content root (holds config.toml and projects.toml)
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Print JSON instead of the text listing
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one project's images in display order
    Scan {
        /// Project id (folder name)
        project: String,
    },
    /// List every project with its image count
    Projects,
    /// Show the project catalog with images filled in
    Catalog,
    /// Open the viewer on a project and replay an event script
    View {
        /// Project id (folder name)
        project: String,
        /// Image to open on, clamped to the last image
        #[arg(long, default_value_t = 0)]
        start: usize,
        /// Events, e.g. "scroll:1250 wait:500 next wait:600"
        #[arg(long, default_value = "")]
        script: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(logging::level_from_verbosity(cli.verbose));

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let site_config = config::load_config(&cli.source)?;
    init_thread_pool(&site_config.processing);
    let catalog = Catalog::load(&site_config.discovery.catalog_path(&cli.source))?;
    let source = catalog.image_source(&site_config, &cli.source);

    match cli.command {
        Command::Scan { project } => {
            let gallery = source.gallery(&project);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&gallery)?);
            } else {
                output::print_gallery(&gallery);
            }
        }
        Command::Projects => {
            let ids = match site_config.discovery.source {
                SourceKind::Scan => {
                    discovery::scan_all_projects(&site_config.discovery.images_path(&cli.source))
                }
                SourceKind::Declarative => catalog.ids(),
            };
            tracing::info!(count = ids.len(), "discovering projects");
            let galleries = discovery::discover_all(source.as_ref(), &ids);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&galleries)?);
            } else {
                output::print_project_list(&galleries);
            }
        }
        Command::Catalog => {
            let projects = catalog.projects(source.as_ref());
            let categories = catalog.categories();
            if cli.json {
                let value = serde_json::json!({
                    "categories": categories,
                    "projects": projects,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                output::print_catalog(&projects, &categories);
            }
        }
        Command::View {
            project,
            start,
            script,
        } => {
            let events = replay::parse_script(&script)?;
            let mut viewer = GalleryViewer::new(site_config.viewer.clone());
            let images = source.project_images(&project);
            if !viewer.open(images, start).is_applied() {
                return Err(format!("project '{project}' has no images to view").into());
            }
            let opened = viewer.snapshot();
            let steps = replay::replay(&mut viewer, &events);
            if cli.json {
                let value = serde_json::json!({
                    "opened": opened,
                    "steps": steps,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                if let Some(s) = &opened {
                    println!(
                        "==> Viewing {} at {}/{}: {}",
                        project,
                        s.current_index + 1,
                        s.image_count,
                        s.current_image.filename()
                    );
                }
                output::print_replay(&steps);
            }
        }
        Command::GenConfig => unreachable!("handled before config loading"),
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
