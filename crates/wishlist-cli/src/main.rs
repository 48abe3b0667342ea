use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wishlist_client::{build_http_client, Auth0Credentials, Auth0TokenProvider, TokenCachePolicy};
use wishlist_core::TokenProvider;

mod search_cmd;

#[derive(Parser)]
#[command(name = "wishlist", about = "Wishlist CLI - exercise the movie wishlist MCP server")]
struct Cli {
    /// Wishlist MCP server URL
    #[arg(long, env = "WISHLIST_URL", default_value = "http://localhost:8000")]
    server_url: String,

    #[command(subcommand)]
    command: Commands,
}

/// Credentials for the M2M token exchange.
#[derive(Args)]
struct Auth0Args {
    #[arg(long, env = "AUTH0_DOMAIN")]
    auth0_domain: Option<String>,

    #[arg(long, env = "AUTH0_CLIENT_ID")]
    auth0_client_id: Option<String>,

    #[arg(long, env = "AUTH0_CLIENT_SECRET", hide_env_values = true)]
    auth0_client_secret: Option<String>,

    #[arg(long, env = "AUTH0_AUDIENCE")]
    auth0_audience: Option<String>,
}

impl Auth0Args {
    fn provider(&self) -> anyhow::Result<Auth0TokenProvider> {
        let (Some(domain), Some(client_id), Some(client_secret), Some(audience)) = (
            &self.auth0_domain,
            &self.auth0_client_id,
            &self.auth0_client_secret,
            &self.auth0_audience,
        ) else {
            anyhow::bail!(
                "AUTH0_DOMAIN, AUTH0_CLIENT_ID, AUTH0_CLIENT_SECRET and AUTH0_AUDIENCE are required"
            );
        };

        let http = build_http_client(Duration::from_secs(15))?;
        Ok(Auth0TokenProvider::new(
            http,
            Auth0TokenProvider::token_url_for_domain(domain),
            Auth0Credentials {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
                audience: audience.clone(),
            },
            TokenCachePolicy::Disabled,
        ))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Request an M2M access token and print it
    Token {
        #[command(flatten)]
        auth0: Auth0Args,
    },

    /// Call `search_movies` once per title and print each JSON-RPC response
    Search {
        /// Titles to look up
        #[arg(required = true)]
        titles: Vec<String>,

        /// Use this bearer token instead of requesting one from Auth0
        #[arg(long, env = "WISHLIST_TOKEN", hide_env_values = true)]
        token: Option<String>,

        #[command(flatten)]
        auth0: Auth0Args,
    },

    /// List the tools the server exposes
    Tools {
        #[arg(long, env = "WISHLIST_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Token { auth0 } => {
            let token = auth0.provider()?.fetch().await?;
            println!("{}", token.secret());
        }
        Commands::Search {
            titles,
            token,
            auth0,
        } => {
            let token = match token {
                Some(token) => token,
                None => {
                    tracing::info!("Requesting M2M access token from Auth0");
                    auth0.provider()?.fetch().await?.secret().to_string()
                }
            };
            search_cmd::run(&cli.server_url, &token, &titles).await?;
        }
        Commands::Tools { token } => {
            search_cmd::list_tools(&cli.server_url, token.as_deref()).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_accepts_multiple_titles() {
        let cli = Cli::try_parse_from([
            "wishlist",
            "--server-url",
            "http://127.0.0.1:9",
            "search",
            "The Matrix",
            "Inception",
            "--token",
            "t",
        ])
        .unwrap();
        assert_eq!(cli.server_url, "http://127.0.0.1:9");
        let Commands::Search { titles, token, .. } = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(titles, ["The Matrix", "Inception"]);
        assert_eq!(token.as_deref(), Some("t"));
    }

    #[test]
    fn search_requires_a_title() {
        assert!(Cli::try_parse_from(["wishlist", "search"]).is_err());
    }

    #[test]
    fn provider_requires_all_credentials() {
        let args = Auth0Args {
            auth0_domain: Some("tenant.auth0.com".to_string()),
            auth0_client_id: None,
            auth0_client_secret: None,
            auth0_audience: None,
        };
        assert!(args.provider().is_err());
    }
}
