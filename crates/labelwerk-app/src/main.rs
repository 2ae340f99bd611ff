// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Labelwerk desktop form.
//
// Entry point. Initialises logging, loads the remembered settings, and
// launches the Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::label::LabelPage;
use state::FormState;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Labelwerk starting");

    dioxus::launch(app);
}

/// Root component.
fn app() -> Element {
    let config = use_hook(services::data_dir::load_config);
    use_context_provider(|| Signal::new(FormState::from_config(&config)));

    rsx! {
        div { class: "app-container",
            style: "min-height: 100vh; padding: 16px; font-family: system-ui, -apple-system, sans-serif;",
            LabelPage {}
        }
    }
}
