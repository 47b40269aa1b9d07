// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Convert page: pick files, preview the first one, choose where the PDF goes,
// convert. Every outcome ends in one blocking message box.

use dioxus::prelude::*;
use rfd::{MessageButtons, MessageDialog, MessageLevel};

use pagemill_core::notice::{Notice, Severity, notice_for_error, notice_for_report};
use pagemill_core::types::selection_summary;

use crate::services::app_services::{AppServices, Preview};
use crate::state::AppState;

#[component]
pub fn Convert() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let summary = selection_summary(&state.read().selected);
    let output_dir_label = state
        .read()
        .output_dir
        .as_ref()
        .map(|d| d.display().to_string())
        .unwrap_or_default();

    rsx! {
        div {
            h1 { "Files to PDF" }

            // File selection
            section { style: "margin: 16px 0;",
                h3 { "1. Select Files" }
                div { style: "display: flex; gap: 8px; align-items: center;",
                    input {
                        r#type: "text",
                        readonly: true,
                        value: "{summary}",
                        placeholder: "No files selected",
                        style: "flex: 1; padding: 6px; border: 1px solid #ccc; border-radius: 4px;",
                    }
                    button {
                        style: "padding: 6px 16px; border-radius: 4px; border: 1px solid #007aff; color: #007aff; background: white;",
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                let Some(files) = rfd::FileDialog::new()
                                    .set_title("Select files")
                                    .add_filter("Images and text", &["jpg", "jpeg", "png", "txt"])
                                    .add_filter("All files", &["*"])
                                    .pick_files()
                                else {
                                    return;
                                };
                                tracing::info!(count = files.len(), "files selected");
                                let size = state.read().config.preview_size;
                                let preview = svc.preview(&files, size);
                                let mut s = state.write();
                                s.selected = files;
                                s.preview = preview;
                            }
                        },
                        "Select Files"
                    }
                }
            }

            // Output
            section { style: "margin: 16px 0;",
                h3 { "2. Output" }
                div { style: "display: grid; grid-template-columns: auto 1fr auto; gap: 8px; align-items: center;",
                    label { "Output folder:" }
                    input {
                        r#type: "text",
                        readonly: true,
                        value: "{output_dir_label}",
                        style: "padding: 6px; border: 1px solid #ccc; border-radius: 4px;",
                    }
                    button {
                        style: "padding: 6px 16px; border-radius: 4px; border: 1px solid #007aff; color: #007aff; background: white;",
                        onclick: move |_| {
                            let mut dialog = rfd::FileDialog::new()
                                .set_title("Select the folder to save the PDF");
                            if let Some(ref dir) = state.read().output_dir {
                                dialog = dialog.set_directory(dir);
                            }
                            if let Some(dir) = dialog.pick_folder() {
                                tracing::info!(path = %dir.display(), "output folder selected");
                                state.write().output_dir = Some(dir);
                            }
                        },
                        "Select Folder"
                    }

                    label { "PDF name:" }
                    input {
                        r#type: "text",
                        value: "{state.read().output_name}",
                        style: "padding: 6px; border: 1px solid #ccc; border-radius: 4px;",
                        oninput: move |evt| {
                            state.write().output_name = evt.value();
                        },
                    }
                    span {}
                }
            }

            // Preview
            section { style: "margin: 16px 0;",
                h3 { "File preview" }
                PreviewPane {
                    preview: state.read().preview.clone(),
                    size: state.read().config.preview_size,
                }
            }

            // Convert button
            button {
                style: "width: 100%; padding: 14px; border-radius: 8px; border: none; background: #4CAF50; color: white; font-size: 16px; font-weight: bold;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let (selection, output_dir, output_name) = {
                            let s = state.read();
                            (s.selected.clone(), s.output_dir.clone(), s.output_name.clone())
                        };

                        let notice = match svc.convert(&selection, output_dir.as_deref(), &output_name) {
                            Ok(report) => {
                                tracing::info!(output = %report.output.display(), pages = report.page_count, "PDF written");
                                state.write().sync_output_dir(&svc.config());
                                notice_for_report(&report)
                            }
                            Err(e) if e.is_validation() => {
                                tracing::warn!(error = %e, "conversion refused");
                                notice_for_error(&e)
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "conversion failed");
                                notice_for_error(&e)
                            }
                        };

                        state.write().last_notice = Some(notice.clone());
                        show_notice(&notice);
                    }
                },
                "Convert to PDF"
            }

            // Last outcome
            if let Some(ref notice) = state.read().last_notice {
                {
                    let (fg, bg) = notice_colors(notice.severity);
                    rsx! {
                        div {
                            style: "margin-top: 16px; padding: 12px; border-radius: 8px; background: {bg}; color: {fg}; white-space: pre-line;",
                            strong { "{notice.title}" }
                            p { style: "margin: 4px 0 0 0;", "{notice.message}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PreviewPane(preview: Preview, size: u32) -> Element {
    let frame = format!(
        "width: {size}px; height: {size}px; border: 2px ridge #ccc; background: white; display: flex; align-items: center; justify-content: center;"
    );
    match preview {
        Preview::Image(uri) => rsx! {
            div { style: "{frame}",
                img { src: "{uri}", style: "max-width: 100%; max-height: 100%;" }
            }
        },
        Preview::Unavailable => rsx! {
            div { style: "{frame}",
                span { style: "color: gray;", "(Preview not available)" }
            }
        },
        Preview::Empty => rsx! {
            div { style: "{frame}" }
        },
    }
}

/// Show `notice` in a native modal dialog and wait for the user to close it.
fn show_notice(notice: &Notice) {
    let level = match notice.severity {
        Severity::Info => MessageLevel::Info,
        Severity::Warning => MessageLevel::Warning,
        Severity::Error => MessageLevel::Error,
    };
    MessageDialog::new()
        .set_level(level)
        .set_title(notice.title.as_str())
        .set_description(notice.message.as_str())
        .set_buttons(MessageButtons::Ok)
        .show();
}

fn notice_colors(severity: Severity) -> (&'static str, &'static str) {
    match severity {
        Severity::Info => ("#155724", "#d4edda"),
        Severity::Warning => ("#856404", "#fff3cd"),
        Severity::Error => ("#721c24", "#f8d7da"),
    }
}
