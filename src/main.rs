use anyhow::Result;
use clap::{Parser, Subcommand};
use corehire::cli::{run_analyze, AnalyzeArgs, ExportFormat};
use corehire::{start_web_server, AppConfig};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Parser)]
#[command(name = "corehire", about = "Candidate analysis service and report generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the analysis service
    Serve {
        /// Override the PORT environment variable
        #[arg(long)]
        port: Option<u16>,
    },
    /// Analyze a CV against a job description and export the report
    Analyze {
        /// CV file (.pdf, .doc, .docx, .txt)
        #[arg(long)]
        cv: PathBuf,
        /// Text file holding the job description
        #[arg(long)]
        job: PathBuf,
        /// Base URL of a running analysis service
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
        /// Directory to write the report artifacts into
        #[arg(long, default_value = "output")]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = ExportFormat::Both)]
        format: ExportFormat,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or(EnvFilter::new("corehire=info,rocket::server=off")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port } => {
            let mut config = AppConfig::from_env();
            if let Some(port) = port {
                config.port = port;
            }
            start_web_server(config).await
        }
        Command::Analyze {
            cv,
            job,
            server,
            out,
            format,
        } => {
            run_analyze(AnalyzeArgs {
                cv_path: cv,
                job_path: job,
                server_url: server,
                output_dir: out,
                format,
            })
            .await
        }
    }
}
