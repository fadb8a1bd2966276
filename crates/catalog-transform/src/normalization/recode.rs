//! Dictionary recoding of the coded catalog columns.
//!
//! Both recoders share one miss policy: a code with no dictionary entry
//! becomes [`Coded::Unmapped`] carrying the raw value. Nothing is raised at
//! lookup time; the validator reports every miss once all stages have run.

use tracing::debug;

use catalog_model::{BookTable, Coded, language_for_code, subarea_for_code};

/// Hit/miss counts for one recoding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecodeStats {
    pub mapped: usize,
    pub unmapped: usize,
}

/// Recode a raw language code.
///
/// Values that were already recoded are returned unchanged.
pub fn recode_language(value: &Coded) -> Coded {
    match value {
        Coded::Code(raw) => match language_for_code(raw) {
            Some(language) => Coded::Label(language.label()),
            None => Coded::Unmapped(raw.clone()),
        },
        other => other.clone(),
    }
}

/// Recode a raw subarea code within the book's area.
///
/// Misses at either level (unknown area, unknown code in a known area) are
/// indistinguishable in the result; the validator reports the area alongside.
pub fn recode_subarea(area: &str, value: &Coded) -> Coded {
    match value {
        Coded::Code(raw) => match subarea_for_code(area, raw) {
            Some(name) => Coded::Label(name),
            None => Coded::Unmapped(raw.clone()),
        },
        other => other.clone(),
    }
}

fn tally(stats: &mut RecodeStats, value: &Coded) {
    if value.is_unmapped() {
        stats.unmapped += 1;
    } else {
        stats.mapped += 1;
    }
}

/// Recode `language` on every book in place.
pub fn recode_languages(table: &mut BookTable) -> RecodeStats {
    let mut stats = RecodeStats::default();
    for book in &mut table.books {
        book.language = recode_language(&book.language);
        tally(&mut stats, &book.language);
    }
    debug!(
        mapped = stats.mapped,
        unmapped = stats.unmapped,
        "recoded language"
    );
    stats
}

/// Recode `subarea` on every book in place, scoped by each book's `area`.
pub fn recode_subareas(table: &mut BookTable) -> RecodeStats {
    let mut stats = RecodeStats::default();
    for book in &mut table.books {
        book.subarea = recode_subarea(&book.area, &book.subarea);
        tally(&mut stats, &book.subarea);
    }
    debug!(
        mapped = stats.mapped,
        unmapped = stats.unmapped,
        "recoded subarea"
    );
    stats
}
