use cashbill::domain::callback::CALLBACK_ACK;
use cashbill::domain::payment::{Money, PaymentCreationRequest};
use cashbill::infrastructure::http::ReqwestTransport;
use cashbill::interfaces::callback_query::parse_callback_query;
use cashbill::{Environment, GatewayClient, GatewayConfig};
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Shop identifier issued by the gateway
    #[arg(long, env = "CASHBILL_SHOP_ID")]
    shop_id: String,

    /// Shop secret used to sign requests
    #[arg(long, env = "CASHBILL_SECRET", hide_env_values = true)]
    secret: String,

    /// Use the sandbox endpoint instead of production
    #[arg(long)]
    sandbox: bool,

    /// Override the gateway base URL
    #[arg(long, env = "CASHBILL_BASE_URL")]
    base_url: Option<String>,

    /// Timeout for each gateway call, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a new payment and print its ID and redirect URL
    Create {
        #[arg(long)]
        title: String,
        /// Decimal amount, e.g. 10.00
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "PLN")]
        currency: String,
        #[arg(long)]
        return_url: String,
        #[arg(long, default_value = "")]
        negative_return_url: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        additional_data: String,
        #[arg(long, default_value = "")]
        payment_channel: String,
        #[arg(long, default_value = "")]
        language: String,
        #[arg(long, default_value = "")]
        referer: String,
    },
    /// Print the current state of a payment
    Get { payment_id: String },
    /// Verify a callback query string and print the payment it refers to
    VerifyCallback {
        query: String,
        /// Print the body to answer the gateway with instead of the payment
        #[arg(long)]
        ack: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let environment = if cli.sandbox {
        Environment::Sandbox
    } else {
        Environment::Production
    };
    let mut config = GatewayConfig::new(environment, cli.shop_id, cli.secret);
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    let transport =
        ReqwestTransport::with_timeout(Duration::from_secs(cli.timeout_secs)).into_diagnostic()?;
    let client = GatewayClient::with_transport(config, transport).into_diagnostic()?;

    let output = match cli.command {
        Command::Create {
            title,
            amount,
            currency,
            return_url,
            negative_return_url,
            description,
            additional_data,
            payment_channel,
            language,
            referer,
        } => {
            let request = PaymentCreationRequest {
                title,
                amount: Money::new(amount, currency),
                description,
                additional_data,
                return_url,
                negative_return_url,
                payment_channel,
                language_code: language,
                referer,
            };
            let created = client.create_payment(&request).await.into_diagnostic()?;
            serde_json::to_string_pretty(&created).into_diagnostic()?
        }
        Command::Get { payment_id } => {
            let payment = client.get_payment(&payment_id).await.into_diagnostic()?;
            serde_json::to_string_pretty(&payment).into_diagnostic()?
        }
        Command::VerifyCallback { query, ack } => {
            let notification = parse_callback_query(&query).into_diagnostic()?;
            let payment = client.verify_callback(&notification).await.into_diagnostic()?;
            if ack {
                CALLBACK_ACK.to_string()
            } else {
                serde_json::to_string_pretty(&payment).into_diagnostic()?
            }
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{output}").into_diagnostic()?;
    Ok(())
}
