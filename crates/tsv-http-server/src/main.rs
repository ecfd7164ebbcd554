use clap::Parser;
use tsv_http_server::{serve, ServerArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = ServerArgs::parse();
    serve(args).await?;
    Ok(())
}
