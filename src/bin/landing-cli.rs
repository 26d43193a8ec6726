use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use vvault_landing::pricing::Billing;

#[derive(Parser)]
#[command(name = "landing-cli")]
#[command(about = "Command-line client for the vvault landing service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register an email on the newsletter
    Subscribe {
        email: String,
    },
    /// Show the waitlist count snapshot
    Count,
    /// Show plan prices and links
    Pricing {
        /// monthly, annual or lifetime
        #[arg(short, long, default_value_t = Billing::Monthly)]
        billing: Billing,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Subscribe { email } => {
            client
                .post(format!("{}/api/newsletter", base))
                .json(&json!({ "email": email }))
                .send()
                .await?
        }
        Commands::Count => {
            client
                .get(format!("{}/api/newsletter/count", base))
                .send()
                .await?
        }
        Commands::Pricing { billing } => {
            client
                .get(format!("{}/api/pricing", base))
                .query(&[("billing", billing.as_str())])
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }

    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
    }
    Ok(())
}
