use std::error::Error;
use std::io::{BufRead, Write};
use std::sync::Arc;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

use llm_service::LlmService;
use query_agent::{Agent, AgentConfig};
use wildlife_store::WildlifeStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Environment may come from a .env file or the process environment.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // All configuration is resolved once, up front. A missing credential or a
    // malformed endpoint stops the process here, before any request is served.
    let svc = Arc::new(LlmService::from_env()?);
    let cfg = AgentConfig::from_env();
    let store = WildlifeStore::new(&cfg.store_config())?;

    if store.is_ready().await {
        println!(
            "{}",
            format!("Vector DB: available (collection '{}')", store.collection()).green()
        );
    } else {
        println!(
            "{}",
            format!(
                "Vector DB: unavailable (collection '{}'); answers will degrade until the corpus is ingested",
                store.collection()
            )
            .yellow()
        );
    }
    println!("Chat model: {}", svc.chat_model());

    let agent = Agent::new(cfg, store, svc);
    tracing::info!("serving loop started");

    println!();
    println!("🦁 Welcome to Maasai Mara Wildlife Chat! Akoth at your service!");
    println!("Type 'history' to see recent questions. Type 'exit' to quit.");
    println!();

    let stdin = std::io::stdin();
    loop {
        print!("🌿 Your Question: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        match input.to_lowercase().as_str() {
            "exit" | "quit" => {
                println!("🦁 Goodbye! Keep exploring the wild!");
                break;
            }
            "history" | "recent" => {
                print_history(&agent);
                continue;
            }
            "" => {
                println!("💭 Please enter a question.\n");
                continue;
            }
            _ => {}
        }

        let response = agent.answer(input).await;
        let rule = "=".repeat(60);
        println!("\n{}", rule.dimmed());
        println!("{response}");
        println!("{}\n", rule.dimmed());
    }

    Ok(())
}

/// Prints the five most recent exchanges; a corrupt log is called out to the
/// operator instead of being shown as empty.
fn print_history(agent: &Agent) {
    match agent.history().load() {
        Ok(entries) if entries.is_empty() => println!("📜 No previous questions yet!\n"),
        Ok(entries) => {
            println!("\n📜 Recent Questions & Answers:");
            let start = entries.len().saturating_sub(5);
            for (i, qa) in entries[start..].iter().enumerate() {
                println!("{}. Q: {}\n   A: {}\n", i + 1, qa.question, qa.answer);
            }
        }
        Err(err) => println!("{}", format!("History log needs attention: {err}").red()),
    }
}
