// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label page: one form, one Generate button, then a save dialog.

use std::time::Duration;

use dioxus::prelude::*;

use labelwerk_core::LabelwerkError;
use labelwerk_core::human_errors::{HumanError, Severity, humanize_error};
use labelwerk_core::types::LabelSize;

use crate::services::data_dir;
use crate::services::label_service::{DraftLabel, choose_destination};
use crate::state::{FormState, InputMode, Status};

#[component]
pub fn LabelPage() -> Element {
    let mut form = use_context::<Signal<FormState>>();
    let mut error = use_signal(|| Option::<HumanError>::None);
    let mut notice = use_signal(|| Option::<HumanError>::None);

    let (w_min, w_max) = LabelSize::FORM_WIDTH_RANGE;
    let (h_min, h_max) = LabelSize::FORM_HEIGHT_RANGE;
    let step = LabelSize::FORM_STEP_IN;
    let mode = form.read().mode;
    let generating = form.read().status == Status::Generating;
    let (input_label, placeholder) = match mode {
        InputMode::DeviceAddress => ("Device IP address", "192.168.1.100"),
        InputMode::RegistrationCode => ("Registration code", "R57NX98AAFC62AF2A"),
    };
    let saved_message = match &form.read().status {
        Status::Saved(path) => Some(format!("Label saved to {}", path.display())),
        Status::Cancelled => Some("Save cancelled.".to_owned()),
        _ => None,
    };

    rsx! {
        div { style: "max-width: 480px; margin: 0 auto;",
            h1 { style: "font-size: 24px;", "Registration Label" }

            // Mode
            section { style: "margin: 16px 0;",
                label { style: "margin-right: 16px;",
                    input {
                        r#type: "radio",
                        name: "mode",
                        checked: mode == InputMode::DeviceAddress,
                        onchange: move |_| form.write().mode = InputMode::DeviceAddress,
                    }
                    " Device address"
                }
                label {
                    input {
                        r#type: "radio",
                        name: "mode",
                        checked: mode == InputMode::RegistrationCode,
                        onchange: move |_| form.write().mode = InputMode::RegistrationCode,
                    }
                    " Registration code"
                }
            }

            FieldRow { label: input_label,
                input {
                    style: "{FIELD_STYLE}",
                    placeholder: placeholder,
                    value: "{form.read().input}",
                    oninput: move |evt| form.write().input = evt.value(),
                }
            }

            if mode == InputMode::DeviceAddress {
                FieldRow { label: "Username",
                    input {
                        style: "{FIELD_STYLE}",
                        value: "{form.read().username}",
                        oninput: move |evt| form.write().username = evt.value(),
                    }
                }
                FieldRow { label: "Password",
                    input {
                        r#type: "password",
                        style: "{FIELD_STYLE}",
                        value: "{form.read().password}",
                        oninput: move |evt| form.write().password = evt.value(),
                    }
                }
            }

            FieldRow { label: "Width (inches)",
                input {
                    r#type: "number",
                    style: "{FIELD_STYLE}",
                    min: "{w_min}",
                    max: "{w_max}",
                    step: "{step}",
                    value: "{form.read().width_in}",
                    onchange: move |evt| form.write().set_width(&evt.value()),
                }
            }
            FieldRow { label: "Height (inches)",
                input {
                    r#type: "number",
                    style: "{FIELD_STYLE}",
                    min: "{h_min}",
                    max: "{h_max}",
                    step: "{step}",
                    value: "{form.read().height_in}",
                    onchange: move |evt| form.write().set_height(&evt.value()),
                }
            }
            FieldRow { label: "File name (.pdf is added)",
                input {
                    style: "{FIELD_STYLE}",
                    value: "{form.read().filename}",
                    oninput: move |evt| form.write().filename = evt.value(),
                }
            }

            button {
                style: "width: 100%; padding: 14px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 18px; font-weight: bold; margin-top: 16px;",
                disabled: generating,
                onclick: move |_| {
                    error.set(None);
                    notice.set(None);

                    let snapshot = form.read().clone();
                    let request = match snapshot.to_request() {
                        Ok(r) => r,
                        Err(e) => {
                            error.set(Some(humanize_error(&e)));
                            return;
                        }
                    };
                    let filename = snapshot.output_filename();
                    let timeout = Duration::from_secs(snapshot.fetch_timeout_secs);
                    form.write().status = Status::Generating;

                    spawn(async move {
                        let draft = match DraftLabel::render(&request, &filename, timeout).await {
                            Ok(d) => d,
                            Err(e) => {
                                tracing::error!(error = %e, "label generation failed");
                                error.set(Some(humanize_error(&e)));
                                form.write().status = Status::Idle;
                                return;
                            }
                        };

                        if !draft.outcome.logo_drawn {
                            let missing = LabelwerkError::AssetMissing(snapshot.logo_path.display().to_string());
                            notice.set(Some(humanize_error(&missing)));
                        }

                        let status = match choose_destination(&filename) {
                            Some(dest) => match draft.save_to(&dest) {
                                Ok(path) => Status::Saved(path),
                                Err(e) => {
                                    error.set(Some(humanize_error(&e)));
                                    Status::Idle
                                }
                            },
                            None => Status::Cancelled,
                        };
                        form.write().status = status;

                        if let Err(e) = data_dir::save_config(&snapshot.to_config()) {
                            tracing::warn!(error = %e, "could not remember settings");
                        }
                    });
                },
                if generating { "Generating..." } else { "Generate Label" }
            }

            if let Some(msg) = saved_message {
                p { style: "color: #155724; margin-top: 12px;", "{msg}" }
            }

            if let Some(human) = error.read().as_ref() {
                ErrorBox { human: human.clone() }
            }
            if let Some(human) = notice.read().as_ref() {
                ErrorBox { human: human.clone() }
            }
        }
    }
}

const FIELD_STYLE: &str =
    "width: 100%; padding: 8px; border: 1px solid #ccc; border-radius: 4px; font-size: 16px;";

#[component]
fn FieldRow(label: &'static str, children: Element) -> Element {
    rsx! {
        div { style: "margin: 12px 0;",
            p { style: "margin: 0 0 4px 0; font-size: 14px; color: #555;", "{label}" }
            {children}
        }
    }
}

#[component]
fn ErrorBox(human: HumanError) -> Element {
    let (fg, bg) = match human.severity {
        Severity::Warning => ("#856404", "#fff3cd"),
        Severity::Transient => ("#0c5460", "#d1ecf1"),
        Severity::ActionRequired | Severity::Permanent => ("#721c24", "#f8d7da"),
    };
    rsx! {
        div { style: "margin-top: 12px; padding: 12px; border-radius: 8px; color: {fg}; background: {bg};",
            p { style: "margin: 0; font-weight: bold;", "{human.message}" }
            if !human.suggestion.is_empty() {
                p { style: "margin: 4px 0 0 0; font-size: 14px;", "{human.suggestion}" }
            }
        }
    }
}
