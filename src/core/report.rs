use crate::domain::model::{SwotAnalysisResult, SwotFactor};
use std::fmt::Write;

/// Markdown rendering of an analysis, in display order.
pub fn render_report(result: &SwotAnalysisResult) -> String {
    let mut out = String::new();
    let swot = &result.swot_matrix;
    let tows = &result.tows_matrix;

    out.push_str("# Matriz SWOT\n");
    quadrant(&mut out, "💪 Forças", &swot.strengths);
    quadrant(&mut out, "⚠️ Fraquezas", &swot.weaknesses);
    quadrant(&mut out, "🚀 Oportunidades", &swot.opportunities);
    quadrant(&mut out, "🛡️ Ameaças", &swot.threats);

    out.push_str("\n# Estratégias Acionáveis (Matriz TOWS)\n");
    strategies(
        &mut out,
        "📈 Estratégias SO",
        "Alavancar Forças para Capitalizar Oportunidades",
        &tows.so_strategies,
    );
    strategies(
        &mut out,
        "🌱 Estratégias WO",
        "Superar Fraquezas Explorando Oportunidades",
        &tows.wo_strategies,
    );
    strategies(
        &mut out,
        "🛡️ Estratégias ST",
        "Usar Forças para Mitigar Ameaças",
        &tows.st_strategies,
    );
    strategies(
        &mut out,
        "🚧 Estratégias WT",
        "Minimizar Fraquezas e Evitar Ameaças",
        &tows.wt_strategies,
    );

    section(&mut out, "Observações e Alertas Estratégicos", "💡", &result.strategic_alerts);
    section(&mut out, "CNAEs Sugeridos", "📋", &result.suggested_cnaes);
    section(&mut out, "Impostos Aplicáveis", "💰", &result.applicable_taxes);
    let _ = writeln!(
        out,
        "\n**📊 Estimativa de Carga Tributária Total:** {}",
        result.estimated_tax_percentage
    );

    let _ = writeln!(out, "\n# Síntese Final\n\n🏆 {}", result.final_synthesis);
    out
}

fn quadrant(out: &mut String, title: &str, items: &[SwotFactor]) {
    let _ = writeln!(out, "\n## {}\n", title);
    if items.is_empty() {
        out.push_str("_Nenhum fator identificado._\n");
    }
    for item in items {
        let _ = writeln!(out, "- **{}**: {}", item.factor, item.justification);
    }
}

fn strategies(out: &mut String, title: &str, subtitle: &str, items: &[String]) {
    let _ = writeln!(out, "\n## {}\n\n_{}_\n", title, subtitle);
    bullets(out, items);
}

fn section(out: &mut String, title: &str, icon: &str, items: &[String]) {
    let _ = writeln!(out, "\n# {}\n", title);
    for item in items {
        let _ = writeln!(out, "- {} {}", icon, item);
    }
}

fn bullets(out: &mut String, items: &[String]) {
    if items.is_empty() {
        out.push_str("_Nenhuma estratégia sugerida._\n");
    }
    for item in items {
        let _ = writeln!(out, "- {}", item);
    }
}
