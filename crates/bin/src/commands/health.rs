//! Health check command - checks a running Userdesk server.

use std::time::Duration;

use userdesk::client::ApiClient;

use crate::cli::HealthArgs;
use crate::output::OutputFormat;

/// Run the health check command
pub async fn run(args: &HealthArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::with_timeout(&args.url, Duration::from_secs(args.timeout))?;

    match client.health().await {
        Ok(health) if health.status == "healthy" => {
            match format {
                OutputFormat::Human => {
                    println!("healthy: {} users, server time {}", health.users, health.time)
                }
                OutputFormat::Json => println!("{}", serde_json::to_string(&health)?),
            }
            Ok(())
        }
        Ok(health) => {
            eprintln!("unhealthy: server returned status {}", health.status);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("unhealthy: {e}");
            std::process::exit(1);
        }
    }
}
