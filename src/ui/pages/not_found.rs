//! Not found page component
//!
//! Shown for any path other than the landing page.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <Title text="Página no encontrada - Runakuna" />

        <div class="min-h-screen bg-gradient-to-br from-slate-900 via-blue-900 to-indigo-900 flex flex-col items-center justify-center p-4">
            <div class="text-center backdrop-blur-xl bg-white/10 p-12 rounded-3xl border border-white/20">
                <h1 class="text-6xl font-bold mb-4">
                    <span class="bg-gradient-to-r from-cyan-400 to-blue-400 bg-clip-text text-transparent">"404"</span>
                </h1>

                <h2 class="text-2xl font-semibold text-white mb-2">
                    "Página no encontrada"
                </h2>

                <p class="text-gray-300 mb-8 max-w-md mx-auto">
                    "La página que buscas no existe o fue movida."
                </p>

                <A
                    href="/"
                    attr:class="px-6 py-3 bg-gradient-to-r from-cyan-500 to-blue-600 text-white font-medium rounded-full transition-opacity hover:opacity-90"
                >
                    "Volver al inicio"
                </A>
            </div>

            <div class="absolute bottom-8 text-center">
                <p class="text-sm text-gray-400">"© 2025 Runakuna"</p>
            </div>
        </div>
    }
}
