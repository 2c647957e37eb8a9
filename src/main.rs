use anyhow::Context;
use clap::Parser;
use hovercraft_search::cli::Cli;
use hovercraft_search::{IndexBuilder, QueryRouter, bridge, logging, ports};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init();

    let settings = cli.settings()?;
    tracing::info!("Starting hovercraft search");

    let client = reqwest::Client::new();
    let (ui, core) = ports::channel();

    let (builder, index) = IndexBuilder::new(settings.payload_source()?, settings.index_options());
    let builder = builder.with_client(client.clone()).spawn(core.project_ids);

    let mut router = QueryRouter::new(index).with_fuzzy_order(settings.fuzzy.score_order);
    if let Some(remote) = settings.remote_search_client(&client)? {
        tracing::info!("Delegating exact search to {}", remote.base_url());
        router = router.with_remote(remote);
    }
    let router = tokio::spawn(router.run(core.requests, core.results));

    let bridged = bridge::run_stdio(ui).await;

    builder.abort();
    router.await.context("Query router task failed")?;
    bridged?;

    tracing::info!("Hovercraft search stopped");
    Ok(())
}
