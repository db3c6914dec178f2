//! Feature highlights shown on the landing page.

use serde::Serialize;

/// A product feature card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub title: &'static str,
    #[serde(rename = "desc")]
    pub description: &'static str,
    pub icon: &'static str,
}

/// The three features, in display order.
pub const FEATURES: [Feature; 3] = [
    Feature {
        title: "Analytics Avanzados",
        description: "Dashboards intuitivos con métricas clave para optimizar procesos",
        icon: "📊",
    },
    Feature {
        title: "Automatización IA",
        description: "Flujos inteligentes que ahorran tiempo y mejoran la eficiencia",
        icon: "⚡",
    },
    Feature {
        title: "Gestión Centralizada",
        description: "Panel unificado para candidatos, clientes y proyectos completos",
        icon: "🎯",
    },
];

/// JSON-LD `SoftwareApplication` record for search engines.
pub fn structured_data() -> serde_json::Value {
    serde_json::json!({
        "@context": "https://schema.org",
        "@type": "SoftwareApplication",
        "name": "Runakuna",
        "applicationCategory": "BusinessApplication",
        "operatingSystem": "Web",
        "description": "Plataforma de gestión de reclutamiento personalizable para consultoras",
        "featureList": FEATURES.iter().map(|f| f.title).collect::<Vec<_>>(),
    })
}
