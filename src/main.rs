mod app;
mod model;
mod util;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph payload JSON file ({"nodes": [...], "edges": [...]}).
    #[arg(long)]
    graph_path: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "lexgraph",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::LexGraphApp::new(cc, args.graph_path.clone())))
        }),
    )
}
