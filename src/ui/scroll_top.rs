//! Floating scroll-to-top button

use leptos::prelude::*;

use super::dom::smooth_scroll_to;
use crate::core::scroll_effects::ScrollTopButton;

/// Round button fixed to the bottom-right corner.
/// Visibility and hover state both live in `state`.
#[component]
pub fn ScrollToTopButton(state: ArcRwSignal<ScrollTopButton>) -> impl IntoView {
    let style = state.clone();
    let enter = state.clone();
    let leave = state;

    view! {
        <button
            class="scroll-to-top"
            style=move || style.get().style()
            on:click=move |_| {
                if let Err(err) = smooth_scroll_to(0.0) {
                    tracing::warn!("Scroll to top failed: {}", err);
                }
            }
            on:mouseenter=move |_| enter.update(|button| button.hovered = true)
            on:mouseleave=move |_| leave.update(|button| button.hovered = false)
        >
            <svg width="24" height="24" viewBox="0 0 24 24" fill="none">
                <path
                    d="M12 19V5M12 5L5 12M12 5L19 12"
                    stroke="currentColor"
                    stroke-width="2"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                />
            </svg>
        </button>
    }
}
