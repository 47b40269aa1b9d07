// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page: persistent app configuration.

use dioxus::prelude::*;

use crate::services::app_services::AppServices;
use crate::state::AppState;

/// Thumbnail bounds accepted by the preview size field.
const PREVIEW_MIN: u32 = 64;
const PREVIEW_MAX: u32 = 512;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[component]
pub fn Settings() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut save_msg = use_signal(|| Option::<String>::None);

    rsx! {
        div {
            h1 { "Settings" }

            section { style: "margin: 16px 0;",
                h3 { "Output" }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Default PDF name" }
                    input {
                        r#type: "text",
                        style: "width: 200px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: "{state.read().config.default_output_name}",
                        oninput: move |evt| {
                            state.write().config.default_output_name = evt.value();
                        },
                    }
                }
                SettingRow {
                    label: "Remember the last output folder",
                    checked: state.read().config.remember_output_dir,
                    on_toggle: move |v: bool| { state.write().config.remember_output_dir = v; },
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Preview" }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Thumbnail size (px)" }
                    input {
                        r#type: "number",
                        min: "{PREVIEW_MIN}",
                        max: "{PREVIEW_MAX}",
                        style: "width: 80px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; text-align: right;",
                        value: "{state.read().config.preview_size}",
                        onchange: move |evt| {
                            if let Ok(size) = evt.value().parse::<u32>() {
                                state.write().config.preview_size =
                                    size.clamp(PREVIEW_MIN, PREVIEW_MAX);
                            }
                        },
                    }
                }
            }

            // Save button
            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px; margin-top: 8px;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let config = state.read().config.clone();
                        match svc.save_config(&config) {
                            Ok(()) => {
                                tracing::info!("settings saved");
                                save_msg.set(Some("Settings saved.".into()));
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "failed to save settings");
                                save_msg.set(Some(format!("Save failed: {e}")));
                            }
                        }
                    }
                },
                "Save Settings"
            }
            if let Some(ref msg) = *save_msg.read() {
                p { style: "color: #34c759; font-size: 14px; text-align: center; margin-top: 8px;",
                    "{msg}"
                }
            }

            section { style: "margin: 24px 0;",
                h3 { "About" }
                p { style: "color: #666; font-size: 14px;",
                    "Pagemill v{VERSION}"
                    br {}
                    "Images or text files to PDF, one file per page"
                    br {}
                    "PMPL-1.0-or-later"
                }
            }
        }
    }
}

#[component]
fn SettingRow(label: &'static str, checked: bool, on_toggle: EventHandler<bool>) -> Element {
    rsx! {
        div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
            span { "{label}" }
            input {
                r#type: "checkbox",
                checked: checked,
                onchange: move |evt| {
                    on_toggle.call(evt.checked());
                },
            }
        }
    }
}
