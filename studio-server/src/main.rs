use studio_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load .env before reading any configuration
    dotenv::dotenv().ok();

    // 2. Load configuration and set up logging
    let config = Config::from_env();
    config.ensure_work_dir_structure()?;
    setup_environment(&config)?;

    print_banner();
    tracing::info!("Lumen Studio Server starting...");

    // 3. Initialize server state (database, migrations, services)
    let state = ServerState::initialize(&config).await?;

    // 4. Run the HTTP server until shutdown
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
