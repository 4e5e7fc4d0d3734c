use leptos::prelude::*;

const MARK_PATH: &str = "M20 0 V80 C 20 95, 35 100, 50 100 H 70 C 90 100, 100 85, 100 65 V 50 \
     C 100 30, 85 20, 70 20 H 45 V 45 H 70 C 75 45, 78 48, 78 55 C 78 62, 75 65, 70 65 H 55 \
     C 50 65, 45 60, 45 55 V 0 Z";

/// Brand mark and wordmark. Inherits its color from the surrounding text.
#[component]
pub fn Logo(#[prop(default = 40)] height: u32) -> impl IntoView {
    view! {
        <svg
            viewBox="0 0 300 100"
            fill="none"
            style=format!("height: {height}px; width: auto; display: block;")
            aria-label="Business Nesta"
        >
            <g transform="translate(10, 10) scale(0.8)">
                <path d=MARK_PATH fill="currentColor" />
            </g>
            <text
                x="110"
                y="75"
                font-size="55"
                font-weight="600"
                font-family="sans-serif"
                letter-spacing="4"
                fill="currentColor"
            >
                "B NESTA"
            </text>
        </svg>
    }
}
