#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tabinsight::analysis::analyze_bytes;
use tabinsight::config::{self, TabInsightConfig, load_configuration};
use tabinsight::http::server::run_http_server;
use tabinsight::http::state::HttpServerState;
use tabinsight::importers::get_parser_from_name;
use tracing::Level;
use tracing::event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// The analysis result as JSON
    Json,
    /// A readable report with Markdown emphasis
    Markdown,
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Column roles, chart datasets and insights for tabular data"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a file and print the result on stdout
    Analyze {
        /// Path to the data file
        path: PathBuf,

        /// csv, tsv or ssv, configured default when absent
        #[arg(long)]
        input_format: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,
    },
    /// Serve the analysis HTTP API
    Serve,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    // Logs go to stderr, stdout carries the analysis output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    load_configuration().context("Failed to load configuration")?;
    let config = config::get().context("Failed to get configuration")?;

    // Initialize Sentry if DSN is provided
    let _sentry = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.clone(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    match cli.command {
        Command::Analyze {
            path,
            input_format,
            output,
        } => analyze_file(&config, path, input_format, output).await,
        Command::Serve => serve(&config).await,
    }
}

async fn analyze_file(
    config: &TabInsightConfig,
    path: PathBuf,
    input_format: Option<String>,
    output: OutputFormat,
) -> Result<()> {
    let options = config.analysis_options()?;
    let format = input_format.unwrap_or_else(|| config.default_input_format.clone());
    let parser = get_parser_from_name(&format)?;

    let data = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let result = analyze_bytes(parser.as_ref(), &data, &options)
        .await
        .with_context(|| format!("Failed to analyze {}", path.display()))?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Markdown => print!("{}", result.to_markdown()),
    }
    Ok(())
}

async fn serve(config: &TabInsightConfig) -> Result<()> {
    let options = config.analysis_options()?;
    // Fail at startup rather than on the first request
    get_parser_from_name(&config.default_input_format)?;

    // Exit the program if a panic occurs
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        default_panic(info);
        std::process::exit(1);
    }));

    let address = SocketAddr::from((config.endpoint, config.port));
    event!(Level::INFO, "Starting HTTP server on {}", address);

    match run_http_server(
        HttpServerState {
            name: Arc::new("TabInsight".to_string()),
            options: Arc::new(options),
            default_input_format: Arc::new(config.default_input_format.clone()),
        },
        address,
    )
    .await
    {
        Ok(_) => {
            event!(Level::INFO, "HTTP server stopped gracefully");
            Ok(())
        }
        Err(err) => {
            event!(Level::ERROR, "HTTP server failed to start: {}", err);
            Err(err)
        }
    }
}
