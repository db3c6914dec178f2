//! Landing page component
//!
//! The Runakuna marketing page:
//! - SEO meta tags and JSON-LD structured data
//! - Animated gradient backdrop and glass navbar
//! - Hero card with entrance sequence, hover motion and parallax
//! - Feature cards revealed on scroll
//!
//! Motion is driven by [`MotionHandle`]; the markup only carries node refs
//! and pointer handlers.

use leptos::html::Div;
use leptos::prelude::*;
use leptos_meta::{Meta, Title};

use crate::core::choreography::HoverTarget;
use crate::core::features::{self, FEATURES, Feature};
use crate::ui::motion_driver::{LandingNodes, MotionHandle};

/// Landing page with entrance, loop, scroll and hover animations
#[component]
pub fn LandingPage() -> impl IntoView {
    let nodes = LandingNodes::new();
    let motion = MotionHandle::new();
    let (motion_ready, set_motion_ready) = signal(false);
    let pending = move || !motion_ready.get();

    // Effects only run in the browser, after the node refs are mounted
    Effect::new(move |_| {
        motion.mount(nodes, move || set_motion_ready.set(true));
    });
    on_cleanup(move || motion.dispose());

    view! {
        <SeoMeta />
        <LandingStyles />

        <div class="min-h-screen relative overflow-hidden" style="scroll-behavior: auto">
            // Animated gradient backdrop
            <div
                node_ref=nodes.backdrop
                class="fixed inset-0 animated-bg bg-gradient-to-br from-slate-900 via-blue-900 to-indigo-900"
                style="background-size: 300% 300%; background-image: linear-gradient(-45deg, #0f172a, #1e3a8a, #1e40af, #7c3aed, #0ea5e9)"
            >
                <div class="absolute inset-0 bg-gradient-to-r from-blue-500/10 via-purple-500/10 to-teal-500/10" />
                <div class="absolute inset-0 bg-[radial-gradient(ellipse_at_center,_var(--tw-gradient-stops))] from-blue-900/20 via-purple-900/40 to-indigo-900/60" />
            </div>

            <Navbar nodes=nodes motion=motion pending=Signal::derive(pending) />

            // Hero
            <section
                node_ref=nodes.hero
                class="relative flex flex-col justify-center items-center text-center h-screen px-6 pt-80"
            >
                <div
                    node_ref=nodes.circles[0]
                    class="absolute top-32 left-20 w-32 h-32 bg-gradient-to-r from-cyan-400/20 to-blue-400/20 rounded-full blur-xl"
                />
                <div
                    node_ref=nodes.circles[1]
                    class="absolute bottom-32 right-20 w-24 h-24 bg-gradient-to-r from-purple-400/20 to-blue-500/20 rounded-full blur-xl"
                />
                <div
                    node_ref=nodes.circles[2]
                    class="absolute top-1/2 left-10 w-16 h-16 bg-gradient-to-r from-teal-400/20 to-emerald-400/20 rounded-full blur-xl"
                />

                <HeroCard nodes=nodes motion=motion pending=Signal::derive(pending) />

                <ScrollIndicator />
            </section>

            // Features
            <section class="relative py-20 backdrop-blur-sm bg-black/20">
                <div class="container mx-auto px-6">
                    <div class="text-center mb-16">
                        <h2 class="text-3xl md:text-4xl font-bold text-white mb-4">
                            <span class="bg-gradient-to-r from-cyan-400 to-blue-400 bg-clip-text text-transparent">
                                "Potencia tu Consultora"
                            </span>
                        </h2>
                        <p class="text-xl text-gray-300 max-w-2xl mx-auto">
                            "Herramientas profesionales diseñadas para el éxito empresarial"
                        </p>
                    </div>
                    <div class="grid md:grid-cols-3 gap-8">
                        {FEATURES
                            .into_iter()
                            .zip(nodes.features)
                            .map(|(feature, card_ref)| view! { <FeatureCard feature=feature card_ref=card_ref /> })
                            .collect_view()}
                    </div>
                </div>
            </section>
        </div>
    }
}

#[component]
fn Navbar(nodes: LandingNodes, motion: MotionHandle, pending: Signal<bool>) -> impl IntoView {
    view! {
        <nav
            node_ref=nodes.navbar
            class="flex justify-between items-center px-6 py-4 fixed w-full z-50 backdrop-blur-lg bg-white/10 border-b border-white/20"
            class=("motion-pending", move || pending.get())
        >
            <div class="text-2xl font-bold text-white">
                <span class="bg-gradient-to-r from-cyan-400 to-blue-400 bg-clip-text text-transparent">
                    "Runakuna"
                </span>
            </div>
            <button
                node_ref=nodes.login
                class="group relative px-6 py-2 bg-gradient-to-r from-blue-600 to-teal-600 text-white rounded-full overflow-hidden transition-all duration-300"
                on:mouseenter=move |_| motion.hover(HoverTarget::Login, true)
                on:mouseleave=move |_| motion.hover(HoverTarget::Login, false)
            >
                <span class="relative z-10">"Iniciar sesión"</span>
                <div class="absolute inset-0 bg-gradient-to-r from-teal-600 to-blue-700 opacity-0 group-hover:opacity-100 transition-opacity duration-300" />
            </button>
        </nav>
    }
}

/// Central glass card with the headline and call to action
#[component]
fn HeroCard(nodes: LandingNodes, motion: MotionHandle, pending: Signal<bool>) -> impl IntoView {
    view! {
        <div
            node_ref=nodes.card
            class="relative backdrop-blur-xl bg-white/10 p-8 md:p-12 rounded-3xl shadow-2xl max-w-4xl border border-white/20 cursor-pointer group"
            class=("motion-pending", move || pending.get())
            on:mouseenter=move |_| motion.hover(HoverTarget::Card, true)
            on:mouseleave=move |_| motion.hover(HoverTarget::Card, false)
        >
            // Glowing border
            <div class="absolute inset-0 rounded-3xl bg-gradient-to-r from-cyan-500/20 via-blue-500/20 to-teal-500/20 opacity-0 group-hover:opacity-100 transition-opacity duration-500 blur-sm" />

            <div class="relative z-10">
                <h1 node_ref=nodes.title class="text-4xl md:text-6xl font-bold mb-6 leading-tight">
                    <span class="bg-gradient-to-r from-cyan-400 via-blue-400 to-teal-400 bg-clip-text text-transparent">
                        "Gestión de Reclutamiento"
                    </span>
                    <br />
                    <span class="text-white">"Personalizable"</span>
                </h1>

                <p node_ref=nodes.subtitle class="text-lg md:text-xl mb-8 text-gray-200 leading-relaxed max-w-3xl">
                    "Optimiza tu proceso de reclutamiento con una plataforma empresarial. \
                     Gestiona candidatos, automatiza flujos y obtén insights de alto valor para tu consultora."
                </p>

                <button
                    node_ref=nodes.button
                    class="group relative px-8 py-3 bg-gradient-to-r from-cyan-500 to-blue-600 text-white text-lg font-semibold rounded-full overflow-hidden transition-all duration-300"
                    on:mouseenter=move |_| motion.hover(HoverTarget::Button, true)
                    on:mouseleave=move |_| motion.hover(HoverTarget::Button, false)
                >
                    <span class="relative z-10 flex items-center gap-2">
                        "Comenzar ahora"
                        <ArrowIcon />
                    </span>
                    <div class="absolute inset-0 bg-gradient-to-r from-blue-600 to-teal-600 opacity-0 group-hover:opacity-100 transition-opacity duration-300" />
                </button>
            </div>

            // Decorative dots
            <div class="absolute top-4 right-4 w-8 h-8 bg-gradient-to-r from-cyan-400 to-blue-400 rounded-full opacity-60 animate-pulse" />
            <div class="absolute bottom-4 left-4 w-6 h-6 bg-gradient-to-r from-teal-400 to-blue-400 rounded-full opacity-40 animate-pulse" />
        </div>
    }
}

#[component]
fn ArrowIcon() -> impl IntoView {
    view! {
        <svg
            class="w-5 h-5 transition-transform group-hover:translate-x-1"
            fill="none"
            stroke="currentColor"
            viewBox="0 0 24 24"
            aria-hidden="true"
        >
            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M13 7l5 5m0 0l-5 5m5-5H6" />
        </svg>
    }
}

#[component]
fn ScrollIndicator() -> impl IntoView {
    view! {
        <div class="absolute bottom-12 left-1/2 transform -translate-x-1/2 animate-bounce">
            <div class="w-6 h-10 border-2 border-white/50 rounded-full flex justify-center">
                <div class="w-1 h-3 bg-white/70 rounded-full mt-2 animate-pulse" />
            </div>
        </div>
    }
}

/// Feature card component
#[component]
fn FeatureCard(feature: Feature, card_ref: NodeRef<Div>) -> impl IntoView {
    view! {
        <div
            node_ref=card_ref
            class="backdrop-blur-lg bg-white/10 p-8 rounded-2xl border border-white/20 hover:shadow-lg hover:shadow-blue-500/25 cursor-pointer transition-all duration-300 hover:border-cyan-400/30 hover:scale-105"
        >
            <div class="text-4xl mb-4">{feature.icon}</div>
            <h3 class="text-2xl font-bold text-white mb-4">{feature.title}</h3>
            <p class="text-gray-300 text-lg">{feature.description}</p>
        </div>
    }
}

/// SEO Meta tags component using leptos_meta
#[component]
fn SeoMeta() -> impl IntoView {
    const TITLE: &str = "Runakuna - Gestión de Reclutamiento Personalizable";
    const DESCRIPTION: &str = "Optimiza tu proceso de reclutamiento con una plataforma empresarial. \
        Gestiona candidatos, automatiza flujos y obtén insights de alto valor para tu consultora.";

    view! {
        <Title text=TITLE />
        <Meta name="description" content=DESCRIPTION />
        <Meta name="keywords" content="reclutamiento, candidatos, consultora, analytics, automatización, ATS" />

        // Open Graph
        <Meta property="og:type" content="website" />
        <Meta property="og:title" content=TITLE />
        <Meta property="og:description" content=DESCRIPTION />

        // Twitter
        <Meta name="twitter:card" content="summary" />
        <Meta name="twitter:title" content=TITLE />
        <Meta name="twitter:description" content=DESCRIPTION />

        <script type="application/ld+json" inner_html=features::structured_data().to_string()></script>
    }
}

/// Page-local styles: pre-mount hiding of animated elements
#[component]
fn LandingStyles() -> impl IntoView {
    view! {
        <style>
            r#"
            .motion-pending {
                opacity: 0;
            }
            .animated-bg {
                background-position: 0% center;
                will-change: background-position;
            }
            "#
        </style>
        // Without scripts nothing would ever reveal them
        <noscript>
            <style>".motion-pending { opacity: 1 !important; }"</style>
        </noscript>
    }
}
