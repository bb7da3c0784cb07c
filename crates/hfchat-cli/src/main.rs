//! hfchat - terminal chat for Hugging Face hosted models
//!
//! Usage:
//!     hfchat [OPTIONS] [MESSAGE]
//!
//! Environment Variables:
//!     HF_API_TOKEN: Hugging Face API token (required)
//!     MODEL_ID: Model identifier (default: mistralai/Mistral-7B-Instruct-v0.2)
//!     HF_BASE_URL: Chat-completion endpoint base URL (default: https://router.huggingface.co/v1)
//!     HF_MAX_TOKENS: Maximum completion length in tokens (default: 300)

use anyhow::Result;
use chat_agent::{ChatClient, ChatSession, ModelConfig};
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

/// hfchat - chat with a hosted model from your terminal
#[derive(Parser, Debug)]
#[command(name = "hfchat")]
#[command(about = "Chat with a Hugging Face hosted model from your terminal")]
#[command(after_help = r#"Examples:
    # Interactive chat with the default model
    hfchat

    # Pick a model
    hfchat --model mistralai/Mistral-7B-Instruct-v0.2

    # Send one message and exit
    hfchat "What is the capital of France?"

    # Probe the endpoint and exit
    hfchat --check

Inside the chat, '/clear' resets the conversation and '/quit' exits.
"#)]
struct Cli {
    /// Hugging Face API token
    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true)]
    token: String,

    /// Model identifier
    #[arg(long, env = "MODEL_ID", default_value = "mistralai/Mistral-7B-Instruct-v0.2")]
    model: String,

    /// Chat-completion endpoint base URL
    #[arg(long, env = "HF_BASE_URL", default_value = "https://router.huggingface.co/v1")]
    base_url: String,

    /// Maximum completion length in tokens
    #[arg(long, env = "HF_MAX_TOKENS", default_value = "300")]
    max_tokens: u32,

    /// Probe the endpoint and exit
    #[arg(long)]
    check: bool,

    /// Suppress the startup banner
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Message to send (interactive mode if not provided)
    message: Option<String>,
}

/// Check that the chat-completion endpoint is reachable
async fn check_endpoint(client: &ChatClient) -> bool {
    let config = client.config();

    println!("\u{1F50D} Checking endpoint...");
    println!("{}", "-".repeat(50));

    print!("1. Checking API connectivity ({})... ", config.base_url);
    io::stdout().flush().ok();

    match client.test_connection().await {
        Ok(_) => {
            println!("\u{2705} OK");
            println!("{}", "-".repeat(50));
            println!("\u{2705} Endpoint check passed!\n");
            true
        }
        Err(e) => {
            println!("\u{274C} FAILED");
            let error_msg = e.to_string();

            if error_msg.contains("Connection refused") || error_msg.contains("Connection error") {
                println!("   Error: Cannot connect to {}", config.base_url);
                println!("   Solution:");
                println!("     1. Check your network connection");
                println!("     2. Verify the base URL is correct");
            } else if error_msg.contains("401") || error_msg.contains("Unauthorized") {
                println!("   Error: Authentication failed");
                println!("   Solution:");
                println!("     1. Verify HF_API_TOKEN is a valid token");
                println!("     2. Check the token has inference access");
            } else {
                println!("   Error: {}", error_msg);
            }

            println!("{}", "-".repeat(50));
            println!("\u{274C} Endpoint check failed. Please fix the issues above.");
            false
        }
    }
}

/// Print application header
fn print_header(config: &ModelConfig) {
    println!("{}", "=".repeat(50));
    println!("hfchat - Hosted Model ChatBot");
    println!("{}", "=".repeat(50));
    println!("Model: {}", config.model_id);
    println!("Base URL: {}", config.base_url);
    println!("Max Tokens: {}", config.max_tokens);
    println!("{}", "=".repeat(50));
}

/// Run interactive mode
async fn run_interactive_mode(session: &mut ChatSession) -> Result<()> {
    println!("\nType a message and press Enter. '/clear' resets, '/quit' exits.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("You: ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(_) => {
                println!("\n\nInterrupted. Goodbye!");
                break;
            }
        }

        let line = input.trim();

        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("/quit")
            || line.eq_ignore_ascii_case("quit")
            || line.eq_ignore_ascii_case("exit")
            || line.eq_ignore_ascii_case("q")
        {
            println!("Goodbye!");
            break;
        }

        if line.eq_ignore_ascii_case("/clear") {
            session.clear();
            println!("Conversation cleared.\n");
            continue;
        }

        let reply = session.respond(line).await;
        println!("\nAssistant: {}\n", reply.content);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();

    let config = ModelConfig::new(&args.base_url, &args.model)
        .with_api_token(&args.token)
        .with_max_tokens(args.max_tokens);

    let client = ChatClient::new(config);

    // Handle --check (probe and exit)
    if args.check {
        if check_endpoint(&client).await {
            return Ok(());
        }
        std::process::exit(1);
    }

    if !args.quiet {
        print_header(client.config());
    }

    let mut session = ChatSession::new(client);

    // Run with provided message or enter interactive mode
    if let Some(message) = &args.message {
        let reply = session.respond(message).await;
        println!("{}", reply.content);
    } else {
        run_interactive_mode(&mut session).await?;
    }

    Ok(())
}
