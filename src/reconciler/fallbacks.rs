//! Hand-authored fallback content keyed by slug.
//!
//! Scraping is best-effort; when a page yields no usable description the
//! catalog still needs one. The curated texts below were written by hand for
//! the slugs we ingest regularly; anything else gets the generic templated
//! sentence. This knowingly overwrites real-but-short scrapes with
//! boilerplate; that tradeoff is accepted.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::utils::constants::MIN_DESCRIPTION_CHARS;

lazy_static! {
    /// Curated descriptions for well-known slugs.
    static ref CURATED_DESCRIPTIONS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert(
            "greek-islands",
            "Scattered across the Aegean and Ionian seas, the Greek islands pair \
             short line-of-sight passages with whitewashed harbor villages, \
             protected anchorages, and reliable summer winds. The Cyclades suit \
             crews who enjoy livelier sailing; the Ionian rewards a gentler pace.",
        );
        m.insert(
            "croatia",
            "Croatia's Dalmatian coast strings more than a thousand islands along \
             sheltered channels, with medieval walled towns, pine-fringed coves, \
             and marinas rarely more than two hours apart. Peak season brings \
             settled weather and warm, clear water.",
        );
        m.insert(
            "turkish-coast",
            "The Turquoise Coast between Bodrum and Antalya mixes pine-backed \
             bays, ruins reachable only by water, and a long gulet tradition. \
             Afternoon thermals give dependable sailing, and quiet anchorages \
             remain easy to find outside the main harbors.",
        );
        m.insert(
            "amalfi-coast",
            "From Capri to the cliff villages of Positano and Amalfi, this short \
             stretch of Tyrrhenian coastline concentrates dramatic scenery, \
             celebrated restaurants, and classic Mediterranean harbor life. \
             Distances are small, so itineraries stay unhurried.",
        );
        m.insert(
            "french-riviera",
            "The Riviera between Saint-Tropez and Monaco remains the \
             Mediterranean's classic cruising ground: glamorous ports, the \
             Lerins islands' quiet anchorages, and easy day hops with full \
             marina services throughout.",
        );
        m
    };

    /// Curated best-season strings for destination slugs.
    static ref BEST_SEASONS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("greek-islands", "May to early October");
        m.insert("croatia", "June to September");
        m.insert("turkish-coast", "May to October");
        m.insert("amalfi-coast", "May to September");
        m.insert("french-riviera", "June to September");
        m
    };

    /// Curated highlight lists for destination slugs.
    static ref HIGHLIGHTS: HashMap<&'static str, &'static [&'static str]> = {
        let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        m.insert(
            "greek-islands",
            &["Santorini caldera", "Mykonos old port", "Ionian anchorages"],
        );
        m.insert(
            "croatia",
            &["Hvar town", "Kornati archipelago", "Dubrovnik walls"],
        );
        m.insert(
            "turkish-coast",
            &["Gocek bays", "Kekova sunken city", "Bodrum castle"],
        );
        m.insert(
            "amalfi-coast",
            &["Capri grottoes", "Positano", "Li Galli islets"],
        );
        m.insert(
            "french-riviera",
            &["Saint-Tropez", "Lerins islands", "Monaco harbor"],
        );
        m
    };
}

/// Curated description for a slug, if one was authored.
#[must_use]
pub fn curated_description(slug: &str) -> Option<&'static str> {
    CURATED_DESCRIPTIONS.get(slug).copied()
}

/// Curated best-season string for a slug.
#[must_use]
pub fn curated_best_season(slug: &str) -> Option<String> {
    BEST_SEASONS.get(slug).map(|s| (*s).to_string())
}

/// Curated highlights for a slug; empty when none were authored.
#[must_use]
pub fn curated_highlights(slug: &str) -> Vec<String> {
    HIGHLIGHTS
        .get(slug)
        .map(|items| items.iter().map(|s| (*s).to_string()).collect())
        .unwrap_or_default()
}

/// Generic templated sentence naming the entity.
#[must_use]
pub fn generic_description(name: &str) -> String {
    format!(
        "{name} is part of our charter catalog; detailed information is being \
         prepared and will be published shortly."
    )
}

/// Resolve the description stored for an entity.
///
/// Scraped text long enough to be useful wins; otherwise the curated text for
/// the slug; otherwise the generic sentence. The result is never empty.
#[must_use]
pub fn resolve_description(slug: &str, name: &str, scraped: &str) -> String {
    let scraped = scraped.trim();
    if scraped.len() >= MIN_DESCRIPTION_CHARS {
        return scraped.to_string();
    }
    match curated_description(slug) {
        Some(curated) => curated.to_string(),
        None => generic_description(name),
    }
}
