//! User management commands against a running server.

use std::time::Duration;

use userdesk::{NewUser, UserPatch, client::ApiClient};

use crate::cli::{RemoteArgs, UsersCommand};
use crate::output::{OutputFormat, print_user, print_users};

/// Build a client holding a token, logging in when none was given.
async fn connect(remote: &RemoteArgs) -> Result<ApiClient, Box<dyn std::error::Error>> {
    let client = ApiClient::with_timeout(&remote.url, Duration::from_secs(remote.timeout))?;
    match &remote.token {
        Some(token) => Ok(client.with_token(token.clone())),
        None => {
            let mut client = client;
            client.login(&remote.username, &remote.password).await?;
            tracing::debug!(url = %remote.url, "Logged in");
            Ok(client)
        }
    }
}

/// Run the `login` command
pub async fn login(remote: &RemoteArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let mut client = ApiClient::with_timeout(&remote.url, Duration::from_secs(remote.timeout))?;
    let token = client.login(&remote.username, &remote.password).await?;
    match format {
        OutputFormat::Human => println!("{token}"),
        OutputFormat::Json => println!("{}", serde_json::json!({ "token": token })),
    }
    Ok(())
}

/// Run a `users` subcommand
pub async fn run(command: UsersCommand, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        UsersCommand::List { remote } => {
            let users = connect(&remote).await?.list_users().await?;
            print_users(&users, format)?;
        }
        UsersCommand::Get { id, remote } => {
            let user = connect(&remote).await?.get_user(&id).await?;
            print_user(&user, format)?;
        }
        UsersCommand::Create {
            name,
            email,
            role,
            remote,
        } => {
            let new_user = NewUser {
                name: Some(name),
                email: Some(email),
                role,
            };
            let user = connect(&remote).await?.create_user(&new_user).await?;
            print_user(&user, format)?;
        }
        UsersCommand::Update {
            id,
            name,
            email,
            role,
            remote,
        } => {
            let patch = UserPatch { name, email, role };
            if patch.is_empty() {
                return Err("Nothing to update: pass --name, --email or --role".into());
            }
            let user = connect(&remote).await?.update_user(&id, &patch).await?;
            print_user(&user, format)?;
        }
        UsersCommand::Delete { id, remote } => {
            connect(&remote).await?.delete_user(&id).await?;
            match format {
                OutputFormat::Human => println!("Deleted user {id}"),
                OutputFormat::Json => println!("{}", serde_json::json!({ "deleted": id })),
            }
        }
    }
    Ok(())
}
