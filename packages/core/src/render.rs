//! Human-readable text rendering of [`Nanopub`]s.
//!
//! The output follows the display projection: abbreviated terms, `sub:`
//! subjects first, priority predicates first. It is stable plain text for
//! terminals and logs, not an RDF serialization.

use crate::display::{DisplayValue, TermKind};
use crate::nanopub::Nanopub;
use crate::trusty::short_code;

/// Render a nanopub as indented plain text.
///
/// ```text
/// Nanopub RAnv0ogXZ5  https://w3id.org/np/RAnv0ogXZ5NPTxHsJsOAlyELbKnhm5wuCtO-0Z13Vx7kk
/// created: 2024-01-01T00:00:00Z  author: https://orcid.org/0000-0000-0000-0000  signed
/// ──────────────────────────────────────────────
///
/// ASSERTION
///   ex:mosquito
///     a  ex:Insect
///     ex:transmits  ex:malaria
///
/// PROVENANCE
///   sub:assertion
///     prov:wasDerivedFrom  <https://doi.org/10.1000/182>
/// ```
pub fn render_nanopub(np: &Nanopub) -> String {
    let mut out = String::new();

    // header
    let header = match np.uri() {
        Some(uri) => match short_code(uri) {
            Some(code) => format!("Nanopub {}  {}", code, uri),
            None => format!("Nanopub  {}", uri),
        },
        None => "Nanopub  (structure unknown)".to_string(),
    };
    out.push_str(&header);
    out.push('\n');

    let mut meta = Vec::new();
    if let Some(created) = np.date_created() {
        meta.push(format!("created: {}", created));
    }
    if let Some(author) = np.author() {
        meta.push(format!("author: {}", author));
    }
    meta.push(if np.is_signed() { "signed" } else { "unsigned" }.to_string());
    out.push_str(&meta.join("  "));
    out.push('\n');
    out.push_str(&"─".repeat(header.chars().count().min(80)));
    out.push('\n');

    if let Some(issue) = np.issue() {
        out.push('\n');
        out.push_str(&format!("Issue: {}\n", issue));
        return out;
    }

    for (role, graph) in np.display().iter() {
        out.push('\n');
        out.push_str(&role.to_string().to_uppercase());
        out.push('\n');
        for (subject, predicates) in graph {
            out.push_str(&format!("  {}\n", subject));
            for (predicate, values) in predicates {
                let rendered: Vec<String> = values.iter().map(render_value).collect();
                out.push_str(&format!("    {}  {}\n", predicate, rendered.join(", ")));
            }
        }
    }

    out
}

// --- helpers -----------------------------------------------------------------

fn render_value(value: &DisplayValue) -> String {
    match value.kind {
        TermKind::Literal => format!("\"{}\"", value.value),
        // an unabbreviated IRI
        TermKind::NamedNode if value.value.contains("://") => format!("<{}>", value.value),
        _ => value.value.clone(),
    }
}

// --- tests -------------------------------------------------------------------
