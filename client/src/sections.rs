use leptos::prelude::*;

use crate::map::RegionMap;

/// Company values shown in the About section: (title, blurb).
const VALUES: &[(&str, &str)] = &[
    (
        "Trust & Integrity",
        "Building long-term relationships through transparency.",
    ),
    (
        "Client Success First",
        "Your growth is our priority. Aligning services to your goals.",
    ),
    (
        "Innovation",
        "Embracing new ideas and technology to keep you ahead.",
    ),
    (
        "Collaboration",
        "Working hand-in-hand as trusted partners.",
    ),
];

const SERVICES: &[&str] = &[
    "Company Registration",
    "LLP Registration",
    "GST Registration & Filing",
    "Income Tax Filing",
    "Trademark Registration",
    "MSME / Udyam Registration",
    "Startup India Registration",
    "Import Export Code",
    "FSSAI License",
    "Accounting & Bookkeeping",
    "Payroll & Compliance",
    "ROC Annual Filing",
    "Business Plan & Pitch Deck",
    "Funding Assistance",
    "Legal Drafting",
    "Website & Digital Presence",
];

/// Headline figures next to the map: (value, label, accent).
const PRESENCE_STATS: &[(&str, &str, &str)] = &[
    ("5000+", "Happy Clients", "#60a5fa"),
    ("20+", "Services Offered", "#22d3ee"),
];

/// Two-digit ordinal used on service tiles.
pub fn service_ordinal(index: usize) -> String {
    format!("{:02}", index + 1)
}

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <section id="home" class="hero">
            <div class="hero-backdrop"></div>
            <div class="container split">
                <div class="hero-copy">
                    <span class="rise" style="display: inline-block; padding: 4px 12px; background: #dbeafe; color: #1e40af; font-size: 12px; font-weight: 700; letter-spacing: 0.08em; text-transform: uppercase; border-radius: 999px;">
                        "Business Consultancy 2025"
                    </span>
                    <h1 class="rise" style="font-size: clamp(44px, 6vw, 72px); line-height: 1.1; font-weight: 700; margin: 24px 0; animation-delay: 0.1s;">
                        "From Startup"
                        <br />
                        <span style="color: #1d4ed8; font-family: Georgia, serif; font-style: italic;">
                            "to Scale up..."
                        </span>
                    </h1>
                    <p class="rise" style="font-size: 18px; color: #475569; max-width: 32rem; line-height: 1.7; animation-delay: 0.2s;">
                        "We act as your reliable partner, offering professional guidance, seamless processes, and innovative solutions tailored to your needs."
                    </p>
                    <div class="rise" style="display: flex; gap: 16px; padding-top: 16px; animation-delay: 0.3s;">
                        <a href="#contact" class="button primary">"Book Consultation"</a>
                        <a href="#services" class="button secondary">"View Services"</a>
                    </div>
                </div>
                <div class="hero-visual">
                    <img
                        src="https://images.unsplash.com/photo-1556761175-5973dc0f32e7?ixlib=rb-4.0.3&auto=format&fit=crop&w=1600&q=80"
                        alt="Business Meeting"
                        style="width: 100%; height: 500px; object-fit: cover; border-radius: 16px; box-shadow: 0 25px 50px rgba(15,23,42,0.25);"
                    />
                    <div class="mission-card">
                        <p style="color: #64748b; font-size: 14px; margin: 0 0 8px;">"Our Mission"</p>
                        <p style="font-weight: 600; color: #1e293b; margin: 0;">
                            "To make business success easier, faster, and sustainable."
                        </p>
                    </div>
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn About() -> impl IntoView {
    view! {
        <section id="about" style="padding: 80px 0; background: #0f172a; color: #fff;">
            <div class="container split">
                <div>
                    <h2 style="font-size: 36px; font-weight: 700; margin: 0 0 24px;">"About Us."</h2>
                    <div style="width: 80px; height: 4px; background: #3b82f6; margin-bottom: 32px;"></div>
                    <p style="color: #cbd5e1; line-height: 1.7; font-size: 18px; margin-bottom: 24px;">
                        "At Business Nesta, we believe that every business deserves the right guidance and resources to grow with confidence. We are a trusted business consultancy dedicated to supporting both newly registered startups and established businesses in achieving their goals."
                    </p>
                    <p style="color: #94a3b8; line-height: 1.7;">
                        "What sets us apart is our end-to-end approach. Whether you are just starting out or looking to expand, we act as your reliable partner."
                    </p>
                </div>
                <div class="value-grid">
                    {VALUES
                        .iter()
                        .map(|(title, text)| {
                            view! {
                                <div class="value-card">
                                    <h3 style="font-size: 20px; font-weight: 700; color: #60a5fa; margin: 0 0 8px;">
                                        {*title}
                                    </h3>
                                    <p style="color: #94a3b8; font-size: 14px; margin: 0;">{*text}</p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn Services() -> impl IntoView {
    view! {
        <section id="services" style="padding: 80px 0; background: #f8fafc;">
            <div class="container">
                <div style="text-align: center; margin-bottom: 64px;">
                    <h2 style="font-size: 36px; font-weight: 700; color: #0f172a; margin: 0;">"Our Services"</h2>
                    <p style="color: #64748b; margin: 16px auto 0; max-width: 42rem;">
                        "Our wide range of services is designed to cover every essential step in a business journey."
                    </p>
                </div>
                <div class="service-grid">
                    {SERVICES
                        .iter()
                        .enumerate()
                        .map(|(index, service)| {
                            view! {
                                <div class="service-tile">
                                    <div class="service-ordinal">{service_ordinal(index)}</div>
                                    <span style="font-weight: 500; color: #334155;">{*service}</span>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn PresenceSection() -> impl IntoView {
    view! {
        <section id="presence" style="position: relative; padding: 80px 0; background: #0b1121; overflow: hidden;">
            <div style="position: absolute; top: 0; width: 100%; height: 96px; background: linear-gradient(to bottom, #f8fafc, transparent); opacity: 0.1;"></div>
            <div class="container presence-split">
                <div style="color: #fff;">
                    <h2 style="font-size: 36px; font-weight: 700; margin: 0 0 24px;">"Pan-India Presence"</h2>
                    <p style="color: #94a3b8; font-size: 18px; line-height: 1.7;">
                        "We serve clients across the nation. Our digital-first approach ensures that geography is never a barrier to your business success."
                    </p>
                    <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 32px; padding-top: 32px; margin-top: 32px; border-top: 1px solid #1e293b;">
                        {PRESENCE_STATS
                            .iter()
                            .map(|(value, label, accent)| {
                                view! {
                                    <div>
                                        <div style=format!("font-size: 36px; font-weight: 700; color: {accent};")>
                                            {*value}
                                        </div>
                                        <div style="color: #64748b; font-size: 14px;">{*label}</div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
                <div style="display: flex; justify-content: center; width: 100%;">
                    <RegionMap />
                </div>
            </div>
        </section>
    }
}
