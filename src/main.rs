use clap::Parser;
use newsvec::{config, embedding, io, logging, pipeline::PipelineService};
use std::path::PathBuf;
use std::process::ExitCode;

/// Normalize news-article JSON and attach embeddings for vector-store ingestion.
#[derive(Parser, Debug)]
#[command(name = "newsvec", version, about)]
struct Cli {
    /// Path to the input JSON file (top-level array of raw documents).
    #[arg(long)]
    input: PathBuf,
    /// Path where accepted, embedded records are written.
    #[arg(long)]
    output: PathBuf,
    /// Transform and report only; skip the embedding call and output file.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Pipeline run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let docs = io::read_documents(&cli.input)?;
    tracing::info!(count = docs.len(), input = %cli.input.display(), "Loaded documents");

    if cli.dry_run {
        let service = PipelineService::new(Box::new(NoopClient), 0);
        let outcomes = service.transform_all(&docs);
        let accepted = outcomes.iter().filter(|(record, _)| record.is_some()).count();
        tracing::info!(
            total = outcomes.len(),
            accepted,
            rejected = outcomes.len() - accepted,
            "Dry run complete"
        );
        return Ok(());
    }

    config::init_config();
    let dimension = config::get_config().embedding_dimension;
    let service = PipelineService::new(embedding::get_embedding_client(), dimension);

    let outcome = service.process_batch(&docs).await?;
    io::write_records(&cli.output, &outcome.records)?;

    let snapshot = service.metrics_snapshot();
    tracing::info!(
        written = outcome.records.len(),
        accepted = snapshot.documents_accepted,
        rejected = snapshot.documents_rejected,
        output = %cli.output.display(),
        "Pipeline run complete"
    );
    Ok(())
}

/// Placeholder client for dry runs; `transform_all` never touches it.
struct NoopClient;

#[async_trait::async_trait]
impl newsvec::embedding::EmbeddingClient for NoopClient {
    async fn generate_embeddings(
        &self,
        _texts: Vec<String>,
    ) -> Result<Vec<Vec<f32>>, newsvec::embedding::EmbeddingClientError> {
        Ok(Vec::new())
    }
}
