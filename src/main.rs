//! pathway-viewer CLI entry point.
//!
//! Renders a local pathway graph to a standalone HTML page. Diagnostics are
//! logged to stderr; set `RUST_LOG` to change the level (default `warn`).

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pathway_viewer::{ViewerOptions, render_pathway_html};

/// Render a credential pathway graph to HTML.
#[derive(Parser, Debug)]
#[command(
    name = "pathway-viewer",
    version = env!("PATHWAY_VIEWER_VERSION"),
    about = "Render a JSON-LD credential pathway graph to a standalone HTML page"
)]
struct Cli {
    /// Pathway graph file, JSON-LD with an @graph array (reads from stdin if not provided)
    input: Option<String>,

    /// Progression model graph file
    #[arg(short = 'm', long = "model")]
    model: Option<String>,

    /// Component @id to highlight before drawing connectors
    #[arg(long = "highlight")]
    highlight: Option<String>,

    /// Viewer options as a JSON object
    #[arg(long = "options")]
    options: Option<String>,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<String>,
}

fn read_file(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", path, e);
            process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let pathway = match cli.input.as_deref() {
        Some(path) => read_file(path),
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("error: cannot read stdin: {}", e);
                process::exit(1);
            }
            buf
        }
    };
    let model = cli.model.as_deref().map(read_file);

    let options = match cli.options.as_deref() {
        None => ViewerOptions::default(),
        Some(raw) => match serde_json::from_str(raw).map(ViewerOptions::from_json) {
            Ok(Ok(options)) => options,
            Ok(Err(e)) | Err(e) => {
                eprintln!("error: invalid --options: {}", e);
                process::exit(2);
            }
        },
    };

    let page = match render_pathway_html(&pathway, model.as_deref(), options, cli.highlight.as_deref())
    {
        Ok(page) => page,
        Err(err) => {
            for message in err.messages() {
                eprintln!("error: {}", message);
            }
            process::exit(1);
        }
    };

    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, page) {
            eprintln!("error: cannot write '{}': {}", path, e);
            process::exit(1);
        }
    } else {
        print!("{}", page);
        if let Err(e) = io::stdout().flush() {
            eprintln!("error: cannot flush stdout: {}", e);
            process::exit(1);
        }
    }
}
