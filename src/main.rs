use clap::Parser;
use staticpages::http::{app, AppState};
use staticpages::memory::MemorySite;
use std::path::PathBuf;
use std::sync::Arc;

/// JSON view of a CMS content tree for a client-side application shell.
#[derive(Parser)]
struct Args {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: String,

    /// Site content definition (JSON) served by the in-memory backend.
    #[arg(long)]
    content: PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let site = MemorySite::load(&args.content)
        .unwrap_or_else(|err| panic!("Failed to load {}: {err}", args.content.display()));

    let state = Arc::new(AppState {
        site: site.into_context(),
    });

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .unwrap_or_else(|err| panic!("Failed to bind to {}: {err}", args.bind));

    tracing::info!("Listening on {}", args.bind);

    axum::serve(listener, app(state))
        .await
        .expect("Server failed");
}
