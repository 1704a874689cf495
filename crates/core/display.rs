use bml::{Availability, BookRecord};

use colored::{ColoredString, Colorize};

/// Titles longer than this are cut in progress lines.
const TITLE_WIDTH: usize = 128;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Severity {
    Available,
    Pending,
    Unavailable,
}

const BRANCH_STATUSES: &[(&str, Severity)] = &[
    ("En rayon", Severity::Available),
    ("Réservé", Severity::Unavailable),
    ("En prêt", Severity::Pending),
    ("En commande", Severity::Pending),
    ("En traitement", Severity::Pending),
    ("En transit", Severity::Pending),
    ("A l'équipement", Severity::Pending),
];

fn severity(availability: &Availability) -> Option<Severity> {
    match availability {
        Availability::Branch(status) => BRANCH_STATUSES
            .iter()
            .find_map(|&(s, severity)| (s == status.as_str()).then_some(severity)),
        Availability::NotFoundAtBranch | Availability::NotInCatalog | Availability::Error => {
            Some(Severity::Unavailable)
        }
    }
}

fn paint(availability: &Availability) -> ColoredString {
    let text = availability.as_str();
    match severity(availability) {
        Some(Severity::Available) => text.green(),
        Some(Severity::Pending) => text.yellow(),
        Some(Severity::Unavailable) => text.red(),
        None => text.normal(),
    }
}

fn truncate(s: &str, width: usize) -> &str {
    s.char_indices().nth(width).map_or(s, |(i, _)| &s[..i])
}

pub fn progress_line(record: &BookRecord) -> String {
    format!(
        "{} \t{}",
        paint(&record.availability),
        truncate(&record.title, TITLE_WIDTH)
    )
}
