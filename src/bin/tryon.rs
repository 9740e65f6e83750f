//! CLI for Tryon - run the proxy or try an outfit on from the terminal.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tryon::client::{AppState, HttpTryOnApi, SlotKind, TryOnTool, DEFAULT_ENDPOINT};
use tryon::{DataUri, ImageFile, ServerConfig};

#[derive(Parser)]
#[command(name = "tryon")]
#[command(about = "Virtual try-on through a multimodal AI gateway")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the try-on proxy server
    Serve(ServeArgs),

    /// Send a person photo and a garment image to a running proxy
    Generate(GenerateArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Listen address [env: TRYON_BIND] [default: 0.0.0.0:8787]
    #[arg(long)]
    bind: Option<String>,

    /// Gateway chat-completions URL [env: AI_GATEWAY_URL]
    #[arg(long)]
    gateway_url: Option<String>,

    /// Gateway model [env: AI_GATEWAY_MODEL]
    #[arg(long)]
    model: Option<String>,
}

#[derive(Args)]
struct GenerateArgs {
    /// Photo of the person
    #[arg(short, long)]
    person: PathBuf,

    /// Image of the garment
    #[arg(short, long)]
    clothing: PathBuf,

    /// Where to save the result image
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Proxy endpoint [env: TRYON_ENDPOINT]
    #[arg(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tryon=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            serve(args).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Generate(args) => generate(args, cli.json).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut builder = ServerConfig::builder();
    if let Some(bind) = args.bind {
        builder = builder.bind(bind);
    }
    if let Some(url) = args.gateway_url {
        builder = builder.gateway_url(url);
    }
    if let Some(model) = args.model {
        builder = builder.model(model);
    }
    let config = builder.build()?;

    tracing::info!(
        "Starting tryon proxy v{} (model {}, gateway {})",
        env!("CARGO_PKG_VERSION"),
        config.model,
        config.gateway_url
    );

    let app = tryon::proxy::router(config.proxy_state());
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Runs one try-on. A failure toast maps to exit code 1.
async fn generate(args: GenerateArgs, json_output: bool) -> anyhow::Result<ExitCode> {
    let endpoint = args
        .endpoint
        .or_else(|| std::env::var("TRYON_ENDPOINT").ok())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let api = HttpTryOnApi::new(endpoint);

    let mut app = AppState::new();
    let mut tool = TryOnTool::new();
    tool.select_file(SlotKind::Person, &ImageFile::from_path(&args.person)?);
    tool.select_file(SlotKind::Clothing, &ImageFile::from_path(&args.clothing)?);

    let Some(notification) = tool.generate(&api, &mut app).await else {
        anyhow::bail!("both a person image and a clothing image are required");
    };

    let saved = match (tool.result(), args.output.as_ref()) {
        (Some(result), Some(path)) => Some(save_result(result, path)?),
        _ => None,
    };

    if json_output {
        let result = serde_json::json!({
            "notification": notification,
            "history": app.history().latest(),
            "output": saved.as_ref().map(|p| p.display().to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{notification}");
        if let Some(entry) = app.history().latest() {
            println!("Recorded try-on {} at {}", entry.id, entry.display_time());
            if !DataUri::is_data_uri(&entry.result_image) {
                println!("Result: {}", entry.result_image);
            }
        }
        if let Some(path) = &saved {
            println!("Saved result: {}", path.display());
        }
    }

    if notification.is_failure() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Writes a data-URI result to `path`. When `path` has no extension one is
/// added from the detected image format.
fn save_result(result: &str, path: &Path) -> anyhow::Result<PathBuf> {
    if !DataUri::is_data_uri(result) {
        anyhow::bail!("result is a remote URL, not saving: {result}");
    }
    let uri = DataUri::parse(result)?;

    let mut path = path.to_path_buf();
    if path.extension().is_none() {
        if let Some(format) = uri.image_format() {
            path.set_extension(format.extension());
        }
    }
    std::fs::write(&path, &uri.data)?;
    Ok(path)
}
