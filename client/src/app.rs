use chrono::Datelike;
use leptos::prelude::*;

use crate::logo::Logo;
use crate::sections::{About, Hero, PresenceSection, Services};

/// Header anchors: (label, section id).
const NAV_LINKS: &[(&str, &str)] = &[
    ("Home", "home"),
    ("About Us", "about"),
    ("Services", "services"),
    ("Our Presence", "presence"),
    ("Contact", "contact"),
];

const CONTACT_PHONES: &[&str] = &["+91-9660030903", "+91-9660020702"];
const CONTACT_EMAIL: &str = "info@businessnesta.com";
const QUICK_LINKS: &[&str] = &["Privacy Policy", "Terms of Service", "Careers"];

pub fn copyright_line(year: i32) -> String {
    format!("© {year} Business Nesta LLP. All rights reserved.")
}

fn remove_loading_shell() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    if let Some(shell) = document.get_element_by_id("app-loading-shell") {
        shell.remove();
    }
}

fn scroll_to_section(id: &str) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    if let Some(section) = document.get_element_by_id(id) {
        section.scroll_into_view();
    }
}

#[component]
pub fn App() -> impl IntoView {
    Effect::new(remove_loading_shell);

    view! {
        <div style="min-height: 100vh; background: #fff; color: #0f172a;">
            <Header />
            <main>
                <Hero />
                <About />
                <Services />
                <PresenceSection />
            </main>
            <Footer />
        </div>
    }
}

#[component]
fn Header() -> impl IntoView {
    view! {
        <header class="site-header">
            <div class="container" style="display: flex; justify-content: space-between; align-items: center; padding-top: 16px; padding-bottom: 16px;">
                <a href="#home" style="color: #0f172a;">
                    <Logo height=40 />
                </a>
                <nav class="site-nav">
                    {NAV_LINKS
                        .iter()
                        .map(|(label, id)| view! { <a href=format!("#{id}")>{*label}</a> })
                        .collect_view()}
                </nav>
                <button class="button dark" on:click=move |_| scroll_to_section("contact")>
                    "Get Started"
                </button>
            </div>
        </header>
    }
}

#[component]
fn Footer() -> impl IntoView {
    let year = chrono::Utc::now().year();

    view! {
        <footer id="contact" style="background: #0f172a; color: #fff; border-top: 1px solid #1e293b;">
            <div class="container" style="padding-top: 64px; padding-bottom: 64px;">
                <div class="footer-grid">
                    <div>
                        <div style="color: #fff; margin-bottom: 24px;">
                            <Logo height=32 />
                        </div>
                        <p style="color: #94a3b8; font-size: 14px; line-height: 1.7;">
                            "To empower startups and businesses with the right guidance, resources, and strategies."
                        </p>
                    </div>
                    <div>
                        <h4 class="footer-heading">"Contact Us"</h4>
                        <ul class="footer-list">
                            {CONTACT_PHONES
                                .iter()
                                .map(|phone| {
                                    view! {
                                        <li>
                                            <span style="color: #3b82f6;">"📞"</span>
                                            " "
                                            {*phone}
                                        </li>
                                    }
                                })
                                .collect_view()}
                            <li>
                                <span style="color: #3b82f6;">"✉️"</span>
                                " "
                                <a href=format!("mailto:{CONTACT_EMAIL}")>{CONTACT_EMAIL}</a>
                            </li>
                        </ul>
                    </div>
                    <div>
                        <h4 class="footer-heading">"Quick Links"</h4>
                        <ul class="footer-list">
                            {QUICK_LINKS
                                .iter()
                                .map(|label| view! { <li><a href="#">{*label}</a></li> })
                                .collect_view()}
                        </ul>
                    </div>
                    <div>
                        <h4 class="footer-heading">"Newsletter"</h4>
                        <form style="display: flex;" on:submit=move |ev| ev.prevent_default()>
                            <input
                                type="email"
                                placeholder="Your email"
                                style="flex: 1; background: #1e293b; border: none; border-radius: 6px 0 0 6px; padding: 8px 16px; font-size: 14px; color: #fff;"
                            />
                            <button
                                type="submit"
                                style="background: #2563eb; color: #fff; border: none; padding: 8px 16px; border-radius: 0 6px 6px 0; font-size: 14px; font-weight: 700; cursor: pointer;"
                            >
                                "Go"
                            </button>
                        </form>
                    </div>
                </div>
                <div style="border-top: 1px solid #1e293b; margin-top: 48px; padding-top: 32px; text-align: center; color: #64748b; font-size: 14px;">
                    {copyright_line(year)}
                </div>
            </div>
        </footer>
    }
}
