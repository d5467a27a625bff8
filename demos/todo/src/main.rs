//! Todo example binary
//!
//! Connects the console view to a store, then either replays a JSON-lines
//! recording (first argument) or runs a short built-in script.
//!
//! Pass `--strict-actions` (or set `TODO_STRICT_ACTIONS=1`) to reject
//! unrecognized actions.

use anyhow::Context;
use clap::Parser;
use redux_lite_runtime::Store;
use std::fs::File;
use std::io::BufReader;
use todo::actions::{set_visibility_filter, toggle_todo, IdAllocator};
use todo::config::Config;
use todo::{replay, todo_app, view, VisibilityFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=info,redux_lite_runtime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::parse();
    tracing::info!(?config, "Starting todo app");

    let store = Store::with_config(todo_app(), config.store_config());
    let _view = view::connect_view(&store, |screen| println!("{screen}\n"));

    if let Some(path) = &config.replay_path {
        let file = File::open(path)
            .with_context(|| format!("failed to open recording {}", path.display()))?;
        replay::replay(&store, BufReader::new(file))?;
        return Ok(());
    }

    let ids = IdAllocator::new();
    let learn = ids.next_id();
    store.dispatch(todo::TodoAction::AddTodo {
        id: learn,
        text: "Learn Redux".to_string(),
    })?;
    store.dispatch(ids.add_todo("Go shopping"))?;
    store.dispatch(toggle_todo(learn))?;
    store.dispatch(set_visibility_filter(VisibilityFilter::ShowActive))?;
    store.dispatch(set_visibility_filter(VisibilityFilter::ShowCompleted))?;
    store.dispatch(set_visibility_filter(VisibilityFilter::ShowAll))?;

    Ok(())
}
