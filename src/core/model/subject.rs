//! Catalog subject identifiers are underscore separated, lower-case tokens
//! such as `computer_software_development`. These turn them into labels.

const SEPARATOR: char = '_';

fn spaced(id: &str) -> String {
    id.replace(SEPARATOR, " ")
}

/// `computer_software_development` becomes `Computer Software Development`.
///
/// Every run of letters starts upper-case and continues lower-case, so any
/// non-letter (space, digit, apostrophe) begins a new word.
pub fn subject_id_to_label(id: &str) -> String {
    let mut previous_is_letter = false;
    spaced(id)
        .chars()
        .flat_map(|c| {
            let cased: Vec<char> = if !c.is_alphabetic() {
                vec![c]
            } else if previous_is_letter {
                c.to_lowercase().collect()
            } else {
                c.to_uppercase().collect()
            };
            previous_is_letter = c.is_alphabetic();
            cased
        })
        .collect()
}

/// `extreme_programming` becomes `Extreme programming`.
pub fn subject_id_to_capitalized_label(id: &str) -> String {
    let spaced = spaced(id);
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
