// src/cli.rs
//! End-to-end `analyze` command: extract a CV, run it against a live
//! analysis service, and export the filled report.

use crate::analysis::client::AnalysisClient;
use crate::report::export::{export_file_stem, export_pdf, export_word};
use crate::report::render::render;
use crate::session::ProfileSession;
use crate::utils;
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Pdf,
    Word,
    Both,
}

pub struct AnalyzeArgs {
    pub cv_path: PathBuf,
    pub job_path: PathBuf,
    pub server_url: String,
    pub output_dir: PathBuf,
    pub format: ExportFormat,
}

pub async fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let file_name = args
        .cv_path
        .file_name()
        .and_then(|n| n.to_str())
        .context("CV path has no file name")?
        .to_string();

    // Reject unsupported extensions before touching the file.
    crate::extract::DocumentKind::from_file_name(&file_name)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let cv_bytes = utils::read_file_bytes(&args.cv_path).await?;
    let job_description = utils::read_file_content(&args.job_path).await?;

    let mut session = ProfileSession::new();
    let document = session
        .upload_document(&cv_bytes, &file_name)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    info!(
        "Extracted {} characters from {}",
        document.text.len(),
        file_name
    );
    session.set_job_description(job_description);

    let client = AnalysisClient::new(args.server_url.clone())?;
    let status = client
        .status()
        .await
        .with_context(|| format!("Analysis service unreachable at {}", args.server_url))?;
    if !status.api_key_configured {
        anyhow::bail!("The analysis service has no API key configured. Edit its .env file.");
    }
    info!("Service ready, model: {}", status.model);

    let usage = session
        .request_analysis(&client)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    info!(
        "Analysis used {} tokens ({} prompt, {} completion)",
        usage.total_tokens, usage.prompt_tokens, usage.completion_tokens
    );

    let pages = render(session.values(), session.catalog());
    let stem = export_file_stem(session.values());

    if matches!(args.format, ExportFormat::Pdf | ExportFormat::Both) {
        let bytes = export_pdf(&pages)?;
        let path = write_artifact(&args.output_dir, &stem, "pdf", &bytes).await?;
        println!("Wrote {}", path.display());
    }
    if matches!(args.format, ExportFormat::Word | ExportFormat::Both) {
        let bytes = export_word(&pages)?;
        let path = write_artifact(&args.output_dir, &stem, "doc", &bytes).await?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

async fn write_artifact(dir: &Path, stem: &str, ext: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.join(format!("{}.{}", stem, ext));
    utils::write_file_bytes(&path, bytes).await
}
