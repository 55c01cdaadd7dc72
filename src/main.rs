use anyhow::Result;
use clap::Parser;
use std::path::Path;

use release_docs::client::BitbucketClient;
use release_docs::config::{self, Credentials};
use release_docs::extractor::ReleaseFactsExtractor;
use release_docs::render::DocumentRenderer;
use release_docs::ui;

#[derive(clap::Parser)]
#[command(
    name = "release-docs",
    about = "Generate release documentation from Bitbucket commits and tags"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Override the boundary tag name")]
    tag: Option<String>,

    #[arg(short, long, help = "Override the branch to inspect")]
    branch: Option<String>,

    #[arg(short, long, help = "Override the output directory")]
    output_dir: Option<String>,

    #[arg(long, help = "Extract and summarize facts without writing documents")]
    dry_run: bool,

    #[arg(short = 'V', long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("release-docs {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration and apply CLI overrides
    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    if let Some(tag) = args.tag {
        config.release.boundary_tag = tag;
    }
    if let Some(branch) = args.branch {
        config.repository.branch = branch;
    }
    if let Some(output_dir) = args.output_dir {
        config.output.directory = output_dir;
    }

    if let Err(e) = config.validate() {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let client = match BitbucketClient::new(
        &config.server.url,
        &credentials.username,
        &credentials.password,
    ) {
        Ok(client) => client,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let extractor = ReleaseFactsExtractor::new(
        client,
        &config.repository.project_key,
        &config.repository.repo_slug,
    );

    ui::display_status(&format!(
        "Extracting release facts for {}/{} (branch '{}', since tag '{}')",
        config.repository.project_key,
        config.repository.repo_slug,
        config.repository.branch,
        config.release.boundary_tag
    ));

    let facts = match extractor.extract(
        &config.release.boundary_tag,
        &config.repository.branch,
        &config.release.deployment_prefix,
    ) {
        Ok(facts) => facts,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    ui::display_release_summary(&facts);

    if args.dry_run {
        ui::display_status("Dry run: no documents written");
        return Ok(());
    }

    let renderer = DocumentRenderer::new(
        &config.server.url,
        &config.repository.project_key,
        &config.repository.repo_slug,
    )
    .with_implementation_notes(&config.narratives.implementation)
    .with_rollback_notes(&config.narratives.rollback);

    ui::display_status(&format!(
        "Writing documents to {}",
        config.output.directory
    ));
    let written = match renderer.save_all(&facts, Path::new(&config.output.directory)) {
        Ok(paths) => paths,
        Err(e) => {
            ui::display_error(&format!("Failed to write documents: {}", e));
            std::process::exit(1);
        }
    };

    ui::display_written_documents(&written);
    ui::display_success(&format!(
        "Generated {} documents for {}/{}",
        written.len(),
        config.repository.project_key,
        config.repository.repo_slug
    ));

    Ok(())
}
