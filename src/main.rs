use clap::{Parser, Subcommand};
use guidepress::{audit, config, generate, output, render, scan};
use std::path::PathBuf;

/// Shared flags for commands that render markdown.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the render cache — force re-rendering of all pages
    #[arg(long)]
    no_cache: bool,
}

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
#[command(name = "guidepress")]
#[command(about = "Static site generator for marketing and comparison content sites")]
#[command(long_about = "\
Static site generator for marketing and comparison content sites

Your filesystem is the data source. Markdown files become pages, directories
become sections, and the numeric prefix controls navigation order.

Content structure:

  content/
  ├── config.toml                  # Site config: origin, redirects, sitemap
  ├── assets/                      # Static assets (favicon, images) → output root
  ├── index.md                     # Home page (/)
  ├── 040-About.md                 # Page (numbered = shown in nav)
  ├── 010-Compare/                 # Section (numbered = shown in nav)
  │   ├── index.md                 # Section landing page (/compare/)
  │   ├── 010-Instantly-vs-Apollo.md   # → /compare/instantly-vs-apollo/
  │   └── 020-Smartlead-vs-Lemlist.md
  └── drafts/                      # No number prefix = hidden from nav

Every page gets a canonical URL, a meta description from its first
paragraph, and a JSON-LD BreadcrumbList block. The build also emits
sitemap.xml and one redirect page per [redirects] entry.

Run 'guidepress gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifests, rendered fragments)
    #[arg(long, default_value = ".guidepress-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory into a manifest
    Scan,
    /// Render markdown bodies to HTML fragments
    Render(CacheArgs),
    /// Produce the final site from rendered fragments
    Generate,
    /// Run the full pipeline: scan → render → generate
    Build(CacheArgs),
    /// Validate content and config without building (SEO lint, link check)
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest);
        }
        Command::Render(cache_args) => {
            let scan_manifest_path = cli.temp_dir.join("manifest.json");
            init_thread_pool_from_manifest(&scan_manifest_path)?;
            let rendered_dir = cli.temp_dir.join("rendered");
            let result = run_render(&scan_manifest_path, &rendered_dir, !cache_args.no_cache)?;
            println!("Cache: {}", result.cache_stats);
        }
        Command::Generate => {
            let rendered_dir = cli.temp_dir.join("rendered");
            let render_manifest_path = rendered_dir.join("manifest.json");
            let summary = generate::generate(
                &render_manifest_path,
                &rendered_dir,
                &cli.output,
                &cli.source,
            )?;
            output::print_generate_output(&summary);
        }
        Command::Build(cache_args) => {
            std::fs::create_dir_all(&cli.temp_dir)?;

            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let scan_manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&scan_manifest_path, json)?;
            output::print_scan_output(&manifest);

            println!("==> Stage 2: Rendering markdown");
            init_thread_pool(&manifest.config.processing);
            let rendered_dir = cli.temp_dir.join("rendered");
            let result = run_render(&scan_manifest_path, &rendered_dir, !cache_args.no_cache)?;
            println!("Cache: {}", result.cache_stats);

            println!("==> Stage 3: Generating HTML → {}", cli.output.display());
            let render_manifest_path = rendered_dir.join("manifest.json");
            let summary = generate::generate(
                &render_manifest_path,
                &rendered_dir,
                &cli.output,
                &cli.source,
            )?;
            output::print_generate_output(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let findings = audit::audit(&manifest);
            output::print_check_output(&findings);
            if audit::has_errors(&findings) {
                return Err("check failed".into());
            }
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Run the render stage with a printer thread draining progress events.
fn run_render(
    scan_manifest_path: &std::path::Path,
    rendered_dir: &std::path::Path,
    use_cache: bool,
) -> Result<render::RenderResult, Box<dyn std::error::Error>> {
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            println!("{}", output::format_render_event(&event));
        }
    });
    let result = render::render(scan_manifest_path, rendered_dir, use_cache, Some(tx))?;
    printer.join().expect("printer thread panicked");

    let render_manifest_path = rendered_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(&result.manifest)?;
    std::fs::write(&render_manifest_path, json)?;
    Ok(result)
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

/// Read just the processing section out of a stored scan manifest.
fn init_thread_pool_from_manifest(
    manifest_path: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(manifest_path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    let processing: config::ProcessingConfig = serde_json::from_value(
        value
            .get("config")
            .and_then(|c| c.get("processing"))
            .cloned()
            .unwrap_or_default(),
    )?;
    init_thread_pool(&processing);
    Ok(())
}
