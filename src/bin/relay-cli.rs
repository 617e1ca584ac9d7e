use clap::{Parser, Subcommand};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Command-line client for a running roblox-relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:10000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a username with group membership
    Lookup { username: String },
    /// Resolve a username to its user id only
    UserId { username: String },
    /// Show where the avatar redirect points
    Avatar { user_id: u64 },
    /// Check relay liveness
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()?;

    match cli.command {
        Commands::Lookup { username } => {
            let res = client
                .get(format!("{}/lookup", cli.url))
                .query(&[("username", username)])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::UserId { username } => {
            let res = client
                .get(format!("{}/get_user_id", cli.url))
                .query(&[("username", username)])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Avatar { user_id } => {
            let res = client
                .get(format!("{}/avatar/{}", cli.url, user_id))
                .send()
                .await?;
            match res.headers().get(LOCATION).and_then(|v| v.to_str().ok()) {
                Some(location) => println!("{}", location),
                None => eprintln!("Error: relay returned status {} without a redirect", res.status()),
            }
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
