//! Home Page

use leptos::prelude::*;
use saarthi_core::PublicInfo;

use crate::components::StatusLine;

#[component]
pub fn HomePage(info: RwSignal<PublicInfo>) -> impl IntoView {
    view! {
        <p class="kicker">"Public Platform"</p>
        <h1>{move || info.with(|i| i.name().to_string())}</h1>
        <p class="tagline">{move || info.with(|i| i.tagline().to_string())}</p>
        <p class="description">{move || info.with(|i| i.description().to_string())}</p>

        <section class="section">
            <h2>"Why GramSaarthi"</h2>
            <p>
                "GramSaarthi brings governance communication, service visibility, and \
                 village-level program awareness onto one public digital interface. \
                 It is designed for citizens, volunteers, and administrators to quickly \
                 understand priorities and service direction."
            </p>
        </section>

        <section class="section">
            <h2>"Core Capabilities"</h2>
            <div class="grid">
                <article class="tile">
                    <h3>"Service Clarity"</h3>
                    <p>"Present schemes, initiatives, and announcements in clear, structured language for faster community adoption."</p>
                </article>
                <article class="tile">
                    <h3>"Data-Backed Planning"</h3>
                    <p>"Build a foundation for tracking coverage, local priorities, and measurable outcomes across villages."</p>
                </article>
                <article class="tile">
                    <h3>"Public Trust Interface"</h3>
                    <p>"Improve transparency with a modern, always-available public portal that communicates with consistency."</p>
                </article>
            </div>
        </section>

        <section class="section">
            <h2>"Expected Impact"</h2>
            <div class="metric-row">
                <div class="metric"><strong>"24x7"</strong><span>"Public availability"</span></div>
                <div class="metric"><strong>"Single"</strong><span>"Source of communication"</span></div>
                <div class="metric"><strong>"Faster"</strong><span>"Citizen information access"</span></div>
            </div>
        </section>

        <div class="status-box">
            <span>"Backend Status"</span>
            <strong>{move || info.with(|i| i.status().to_string())}</strong>
        </div>

        <p class="footnote">"Built in Rust with Leptos and served as a WebAssembly bundle."</p>

        <StatusLine class="error" message=Signal::derive(move || info.with(|i| i.error.clone())) />
    }
}
