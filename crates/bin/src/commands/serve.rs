//! Serve command - runs the Userdesk HTTP server.

use tokio::signal::unix::{SignalKind, signal};
use userdesk::{
    auth::Credentials,
    server::{ApiServer, ServerConfig},
};

use crate::cli::ServeArgs;

impl From<&ServeArgs> for ServerConfig {
    fn from(args: &ServeArgs) -> Self {
        ServerConfig {
            host: args.host.clone(),
            port: args.port,
            credentials: Credentials::new(&args.username, &args.password),
            token: args.token.clone(),
            seed: !args.empty,
        }
    }
}

/// Run the Userdesk server until SIGINT or SIGTERM
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from(args);
    let server = ApiServer::start(&config).await?;
    let users = server.service().store().len().await;

    println!("Userdesk API running on {}", server.url());
    println!();
    println!("Endpoints:");
    println!(
        "  POST   /login        (username: {}, password: ***)",
        server.service().gate().username()
    );
    println!("  GET    /health");
    println!("  GET    /items        (Auth: Bearer <token>)");
    println!("  GET    /items/{{id}}   (Auth: Bearer <token>)");
    println!("  POST   /items        (Auth: Bearer <token>)");
    println!("  PUT    /items/{{id}}   (Auth: Bearer <token>)");
    println!("  DELETE /items/{{id}}   (Auth: Bearer <token>)");
    println!();
    println!("Store holds {users} users");
    println!("Press Ctrl+C to shutdown");

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
        _ = sigint.recv() => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
    }

    server.stop().await?;
    println!("Server shut down");
    Ok(())
}
