// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagemill: merge images or text files into one PDF.
//
// Entry point. Initialises logging, settings, app state, and launches the
// Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::convert::Convert;
use pages::settings::Settings;

use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Pagemill starting");

    dioxus::launch(app);
}

/// Top-level route enum.
#[derive(Debug, Clone, Routable, PartialEq)]
enum Route {
    #[layout(TabLayout)]
    #[route("/")]
    Convert {},
    #[route("/settings")]
    Settings {},
}

/// Root component.
fn app() -> Element {
    let svc = use_hook(AppServices::init);

    // Provide services and state as context for all pages
    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(state::AppState::new(&svc)));

    rsx! {
        Router::<Route> {}
    }
}

/// Persistent top tab layout wrapping all pages.
#[component]
fn TabLayout() -> Element {
    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, sans-serif; background: #f0f0f0;",

            nav { class: "tab-bar",
                style: "display: flex; gap: 16px; padding: 8px 16px; border-bottom: 1px solid #e0e0e0; background: #fafafa;",
                TabButton { to: Route::Convert {}, label: "Convert" }
                TabButton { to: Route::Settings {}, label: "Settings" }
            }

            div { class: "page-content",
                style: "flex: 1; overflow-y: auto; padding: 16px;",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn TabButton(to: Route, label: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "text-decoration: none; color: #333; font-size: 14px;",
            "{label}"
        }
    }
}
