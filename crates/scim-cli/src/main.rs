use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use scim_config::ScimConfig;
use scim_lang::{PathSegment, PathSegments};
use scim_resource::{InMemorySchemaRepository, Resource};
use scim_service::ScimEngine;
use scim_service::tracing_init::init_tracing;

#[derive(Parser)]
#[command(name = "scimctl", about = "Inspect SCIM paths and filters, check resource mutability")]
struct Cli {
    /// Path to scim.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split an attribute path into its segments
    Path {
        /// e.g. emails[type eq "work"].value
        path: String,
    },
    /// Parse a filter expression and print it back
    Filter {
        filter: String,
        /// Print the full expression tree
        #[arg(long)]
        tree: bool,
    },
    /// Check a candidate resource against a stored one
    Validate {
        /// Schema JSON document
        #[arg(long)]
        schema: PathBuf,
        /// Stored resource JSON
        #[arg(long)]
        reference: PathBuf,
        /// Submitted resource JSON
        #[arg(long)]
        candidate: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (config, base_dir) = match &cli.config {
        Some(path) => {
            let path = path
                .canonicalize()
                .map_err(|e| anyhow::anyhow!("config path '{}': {e}", path.display()))?;
            let config = ScimConfig::load(&path)?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| anyhow::anyhow!("config path has no parent directory"))?;
            (config, base_dir)
        }
        None => (ScimConfig::default(), std::env::current_dir()?),
    };
    let _guard = init_tracing(&config.logging, &base_dir)?;

    match cli.command {
        Commands::Path { path } => {
            let engine = ScimEngine::new(&config, Arc::new(InMemorySchemaRepository::new()));
            let segments = engine.tokenize_path(&path).map_err(|e| anyhow::anyhow!("{e}"))?;
            print!("{}", render_segments(&segments));
        }
        Commands::Filter { filter, tree } => {
            let engine = ScimEngine::new(&config, Arc::new(InMemorySchemaRepository::new()));
            let expr = engine.compile_filter(&filter).map_err(|e| anyhow::anyhow!("{e}"))?;
            if tree {
                println!("{expr:#?}");
            } else {
                println!("{expr}");
            }
        }
        Commands::Validate {
            schema,
            reference,
            candidate,
        } => {
            let mut repo = InMemorySchemaRepository::new();
            let schema = repo.load_file(&schema)?;
            let engine = ScimEngine::new(&config, Arc::new(repo));
            let reference = load_resource(&reference)?;
            let candidate = load_resource(&candidate)?;

            if let Err(e) =
                engine.validate_mutability(&candidate, &reference, &schema, engine.options())
            {
                eprintln!("{e}");
                return Ok(ExitCode::FAILURE);
            }
            tracing::info!(domain = "val", schema = %schema.id, "candidate accepted");
            println!("ok");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_resource(path: &Path) -> Result<Resource> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
    Resource::from_json(json).map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))
}

/// One line per segment: `attr <name>` or `filter <expr>`.
fn render_segments(segments: &PathSegments) -> String {
    let mut out = String::new();
    for segment in segments.iter() {
        match segment {
            PathSegment::Attribute(name) => out.push_str(&format!("attr   {name}\n")),
            PathSegment::Filter(expr) => out.push_str(&format!("filter {expr}\n")),
        }
    }
    out
}
