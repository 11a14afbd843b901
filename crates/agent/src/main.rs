//! Command-line entry point
//!
//! Interactive single-session loop over stdin, useful for exercising the
//! engine without a transport in front of it.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use order_agent_agent::{DialogueEngine, EngineConfig};
use order_agent_catalog::MenuCatalog;
use order_agent_config::{load_settings, Settings};
use order_agent_knowledge::KnowledgeBase;
use order_agent_persistence::{InMemorySessionStore, SessionStore, SqliteOrderStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = std::env::args().nth(1);
    let settings = load_settings(env.as_deref())?;

    init_tracing(&settings);
    tracing::info!("Starting order agent v{}", env!("CARGO_PKG_VERSION"));

    let catalog = MenuCatalog::load(&settings.data.menu_file);
    let knowledge = load_knowledge(&settings.data.knowledge_dir);
    let orders = Arc::new(SqliteOrderStore::open(&settings.data.orders_db)?);

    let engine = DialogueEngine::new(
        EngineConfig::from_settings(&settings.agent),
        catalog,
        knowledge,
        orders,
    );
    let sessions = InMemorySessionStore::new();

    println!("Type a message, or 'exit' to quit.");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        let mut session = sessions.get_or_create("local");
        let reply = engine.handle_turn(&mut session, line);
        if session.dirty {
            sessions.put(session);
        }
        println!("{}", reply.text);
    }

    Ok(())
}

fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("order_agent={}", settings.observability.log_level).into());

    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Register one topic per `<topic>.txt` file in the knowledge directory.
fn load_knowledge(dir: &str) -> KnowledgeBase {
    let mut kb = KnowledgeBase::new();
    let dir = Path::new(dir);

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                path = %dir.display(),
                error = %e,
                "No knowledge directory, continuing without topics"
            );
            return kb;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        if let Some(topic) = path.file_stem().and_then(|s| s.to_str()) {
            kb.insert_topic_from_file(topic, &path);
        }
    }

    kb
}
