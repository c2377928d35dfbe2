//! Status message shown below the booking form

use leptos::prelude::*;

use crate::core::booking::{MESSAGE_EXIT_STYLE, MessageKind};

fn exit_style(base: &str) -> String {
    MESSAGE_EXIT_STYLE
        .iter()
        .fold(base.to_string(), |style, (property, value)| {
            format!("{} {}: {};", style, property, value)
        })
}

/// Success or error banner. Flipping `exiting` starts the exit transition;
/// the owner unmounts the view once it has played.
#[component]
pub fn FormMessage(kind: MessageKind, text: String, exiting: ArcRwSignal<bool>) -> impl IntoView {
    let base = kind.style();

    view! {
        <div
            class=kind.class_name()
            style=move || if exiting.get() { exit_style(base) } else { base.to_string() }
        >
            {text}
        </div>
    }
}
