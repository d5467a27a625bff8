//! Counter example binary
//!
//! Subscribes a console renderer and dispatches a short script of actions.

use counter::{render_count, CounterAction, CounterReducer};
use redux_lite_runtime::{Store, StoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counter=info,redux_lite_runtime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let store = Store::with_config(CounterReducer, StoreConfig::new("counter"));

    let render = {
        let store = store.clone();
        move || println!("{}", render_count(*store.get_state()))
    };
    render();
    let _subscription = store.subscribe(render);

    for action in [
        CounterAction::Increment,
        CounterAction::Decrement,
        CounterAction::Increment,
    ] {
        tracing::info!(action = ?action, "Dispatching");
        store.dispatch(action)?;
    }

    Ok(())
}
