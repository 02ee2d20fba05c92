use auth::ApiCredentials;
use common::DeltaEnvironment;
use delta_rest::{operations_by_group, DeltaRestClient, DeltaRestError};
use std::process::ExitCode;
use tracing::{info, warn};

/// What the runner should fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Balances,
    Products,
}

impl Command {
    fn parse(arg: Option<&str>) -> Option<Self> {
        match arg.unwrap_or("balances") {
            "balances" | "wallet" => Some(Self::Balances),
            "products" => Some(Self::Products),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    common::init_logging();

    let arg = std::env::args().nth(1);
    let Some(command) = Command::parse(arg.as_deref()) else {
        eprintln!("usage: runner [balances|products]");
        return ExitCode::from(2);
    };

    let credentials = match ApiCredentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!(error = %e, "Unable to load credentials");
            return ExitCode::FAILURE;
        }
    };

    let environment = DeltaEnvironment::from_env();
    let base_url = environment.rest_base_url_from_env();

    info!(
        environment = %environment,
        base_url = %base_url,
        api_key = %credentials.api_key(),
        "Starting Delta client"
    );
    if let Some(warning) = environment_warning(environment) {
        warn!("{warning}");
    }

    let client = match DeltaRestClient::with_base_url(credentials, &base_url) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Unable to connect");
            return ExitCode::FAILURE;
        }
    };

    print_capabilities();

    if let Err(e) = run(&client, command).await {
        tracing::error!(error = %e, retryable = e.is_retryable(), "Request failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Warning to log before talking to an environment that holds real funds.
fn environment_warning(environment: DeltaEnvironment) -> Option<&'static str> {
    environment
        .is_production()
        .then_some("Connected to production, orders use real funds")
}

fn print_capabilities() {
    println!("Inspecting Delta API...");
    for (group, names) in operations_by_group() {
        println!("Available methods for {}: {}", group, names.join(", "));
    }
    println!("------------------------\n");
}

async fn run(client: &DeltaRestClient, command: Command) -> Result<(), DeltaRestError> {
    match command {
        Command::Balances => {
            let balances = client.get_wallet_balances().await?;
            println!("Wallet Balances:");
            for balance in balances {
                println!(
                    "{:>8} | balance: {} | available: {} | order margin: {} | position margin: {}",
                    balance.asset_symbol,
                    balance.balance,
                    balance.available_balance,
                    balance.order_margin,
                    balance.position_margin
                );
            }
        }
        Command::Products => {
            let products = client.get_products().await?;
            println!("Products:");
            for product in products {
                println!(
                    "{:>6} | {:<16} | {:<20} | tick: {} | {}",
                    product.id,
                    product.symbol,
                    product.contract_type,
                    product.tick_size,
                    product.state
                );
            }
        }
    }

    Ok(())
}
