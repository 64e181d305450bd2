//! Interactive shopping-assistant REPL against a running storefront backend
//!
//! Reads lines from stdin and drives the conversation engine; `/history`,
//! `/reset`, and `/quit` are handled locally.

use std::io::{BufRead, Write};
use std::sync::Arc;
use storefront_core::gateway::{GatewayConfig, HttpGateway};
use storefront_core::ChatEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Connecting to storefront backend");

    let gateway = Arc::new(HttpGateway::new(&config).on_auth_expired(|| {
        tracing::warn!("Session expired, please sign in again");
    }));
    let engine = ChatEngine::with_greeting(gateway);

    engine.open_session().await;
    print_new_messages(&engine, 0);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;

        match line.trim() {
            "/quit" => break,
            "/reset" => {
                engine.reset();
                engine.open_session().await;
                println!("(conversation reset)");
                continue;
            }
            "/history" => {
                engine.load_history().await;
                print_new_messages(&engine, 0);
                continue;
            }
            text => {
                let seen = engine.snapshot().data.messages.len();
                if engine.send(text).await.is_err() {
                    continue;
                }
                print_new_messages(&engine, seen);
            }
        }

        if let Some(error) = engine.snapshot().error {
            eprintln!("(error: {error})");
            engine.clear_error();
        }
    }

    Ok(())
}

fn print_new_messages(engine: &ChatEngine, seen: usize) {
    let snapshot = engine.snapshot();
    for message in &snapshot.data.messages[seen..] {
        match message.origin {
            storefront_core::chat::MessageOrigin::User => println!("you: {}", message.content),
            storefront_core::chat::MessageOrigin::Assistant => {
                println!("bot: {}", message.content);
                if !message.suggestions.is_empty() {
                    println!("     [{}]", message.suggestions.join(" | "));
                }
            }
        }
    }
}
