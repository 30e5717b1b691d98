//! Finance CLI - Command-line interface for the personal finance assistant
//!
//! Usage:
//!     finance [OPTIONS] <COMMAND>
//!
//! Environment Variables:
//!     FINANCE_ASSISTANT_BASE_URL: Model API base URL (default: https://api.openai.com/v1)
//!     FINANCE_ASSISTANT_MODEL: Model name (default: gpt-3.5-turbo-instruct)
//!     FINANCE_ASSISTANT_API_KEY: API key for model authentication (default: YOUR_API_KEY)
//!     RUST_LOG: Log filter, overrides --verbose/--quiet

use anyhow::Result;
use clap::{Parser, Subcommand};
use finance_assistant::{
    ExpenseQuery, FinanceAssistant, FinanceError, InvestmentQuery, ModelConfig, OpenAIError,
};
use std::io;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Finance Assistant - AI-powered personal finance helper
#[derive(Parser, Debug)]
#[command(name = "finance")]
#[command(about = "Finance Assistant - AI-powered personal finance helper")]
#[command(after_help = r#"Examples:
    # Returns on 10000 over 10 years at 7% a year
    finance invest

    # Custom investment
    finance invest --initial-investment 2500 --years 5.5 --expected-return 4.2

    # Use API key for authentication
    finance --apikey sk-xxxxx invest

    # Categorize an expense
    finance categorize "Grocery shopping at Whole Foods" --amount 75.25 --category Food

    # Check the model endpoint
    finance check
"#)]
struct Cli {
    // Model options
    /// Model API base URL
    #[arg(long, global = true, env = "FINANCE_ASSISTANT_BASE_URL", default_value = "https://api.openai.com/v1")]
    base_url: String,

    /// Model name (must support the completions endpoint)
    #[arg(long, global = true, env = "FINANCE_ASSISTANT_MODEL", default_value = "gpt-3.5-turbo-instruct")]
    model: String,

    /// API key for model authentication
    #[arg(long, global = true, env = "FINANCE_ASSISTANT_API_KEY", default_value = "YOUR_API_KEY", hide_env_values = true)]
    apikey: String,

    // Logging options
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate the potential returns of an investment
    Invest {
        /// Initial amount invested
        #[arg(long, default_value_t = 10000.0, allow_negative_numbers = true)]
        initial_investment: f64,

        /// Investment duration in years
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        years: f64,

        /// Expected annual return, in percent
        #[arg(long, default_value_t = 7.0, allow_negative_numbers = true)]
        expected_return: f64,
    },

    /// Categorize an expense
    Categorize {
        /// What the money was spent on
        description: String,

        /// Amount spent
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,

        /// Your own category guess (kept for reference, not sent to the model)
        #[arg(long, default_value = "")]
        category: String,
    },

    /// Check that the model API is reachable
    Check,
}

impl Cli {
    /// Default log filter derived from -v/-q
    fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    fn model_config(&self) -> ModelConfig {
        ModelConfig::new(&self.base_url, &self.model).with_api_key(&self.apikey)
    }
}

/// Install the stderr log subscriber; RUST_LOG wins over flags
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Why a connectivity check failed
#[derive(Debug, PartialEq)]
enum CheckFailure {
    /// No HTTP exchange took place
    Unreachable,
    /// The endpoint answered with an API error
    Rejected {
        message: String,
        code: Option<String>,
    },
    Other(String),
}

impl CheckFailure {
    fn classify(err: &FinanceError) -> Self {
        match err {
            FinanceError::Api(OpenAIError::Reqwest(_)) => Self::Unreachable,
            FinanceError::Api(OpenAIError::ApiError(api)) => Self::Rejected {
                message: api.message.clone(),
                code: api.code.clone(),
            },
            other => Self::Other(other.to_string()),
        }
    }
}

/// Check if the model API is accessible
async fn check_model_api(assistant: &FinanceAssistant) -> bool {
    let config = assistant.backend().config();
    println!("Checking model API ({})...", config.base_url);

    match assistant.backend().test_connection().await {
        Ok(()) => {
            println!("\u{2705} OK ({})", config.model_name);
            true
        }
        Err(e) => {
            error!("Model API check failed: {}", e);
            println!("\u{274C} FAILED");

            match CheckFailure::classify(&e) {
                CheckFailure::Unreachable => {
                    println!("   Error: Cannot connect to {}", config.base_url);
                    println!("   Solution:");
                    println!("     1. Check if the model server is running");
                    println!("     2. Verify the base URL is correct");
                }
                CheckFailure::Rejected { message, code } => {
                    println!("   Error: {}", message);
                    if code.as_deref() == Some("invalid_api_key") {
                        println!("   Solution: set FINANCE_ASSISTANT_API_KEY or pass --apikey");
                    }
                }
                CheckFailure::Other(message) => {
                    println!("   Error: {}", message);
                }
            }
            false
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_filter());

    let assistant = FinanceAssistant::from_config(args.model_config());
    debug!(
        base_url = %args.base_url,
        model = %args.model,
        "Model client ready"
    );

    match &args.command {
        Command::Invest {
            initial_investment,
            years,
            expected_return,
        } => {
            let query = InvestmentQuery::new(*initial_investment, *years, *expected_return);
            let text = assistant.calculate_investment_returns(&query).await?;
            println!("{}", text);
        }
        Command::Categorize {
            description,
            amount,
            category,
        } => {
            let expense = ExpenseQuery::new(description, *amount, category);
            let categorized = assistant.categorize_expense(&expense).await?;
            println!("{}", expense.summary(&categorized));
        }
        Command::Check => {
            if !check_model_api(&assistant).await {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
