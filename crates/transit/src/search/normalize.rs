//! Text normalization for stop-name matching.
//!
//! Queries and candidate names run through the same pipeline: lowercase,
//! expand abbreviation aliases, fold Polish diacritics, then strip
//! everything that is not ASCII alphanumeric. The folding table is
//! explicit on purpose; locale-dependent Unicode normalization would make
//! the mapping environment-sensitive.

/// Abbreviation stems and their expansions. A stem matches a whole word,
/// with or without its trailing period ("ul." and "ul" both expand).
const ALIASES: [(&str, &str); 10] = [
    ("św", "świętego"),
    ("sw", "świętego"),
    ("os", "osiedle"),
    ("ul", "ulica"),
    ("al", "aleja"),
    ("pl", "plac"),
    ("gen", "generała"),
    ("dr", "doktora"),
    ("prof", "profesora"),
    ("ks", "księdza"),
];

/// Full pipeline. The output contains only `[a-z0-9]`.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let expanded = expand_aliases(&lowered);
    fold_diacritics(&expanded)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Replace abbreviation words with their expansions. Operates on
/// lowercased text; separators pass through untouched (the final
/// normalization pass strips them anyway).
fn expand_aliases(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            word.push(ch);
        } else {
            flush_word(&mut out, &mut word);
            out.push(ch);
        }
    }
    flush_word(&mut out, &mut word);

    out
}

fn flush_word(out: &mut String, word: &mut String) {
    if word.is_empty() {
        return;
    }
    let expansion = ALIASES
        .iter()
        .find(|(stem, _)| *stem == word.as_str())
        .map(|(_, expansion)| *expansion);
    out.push_str(expansion.unwrap_or(word));
    word.clear();
}

/// Fold the Polish alphabet extensions onto ASCII.
pub fn fold_diacritics(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            'ą' => 'a',
            'ć' => 'c',
            'ę' => 'e',
            'ł' => 'l',
            'ń' => 'n',
            'ó' => 'o',
            'ś' => 's',
            'ź' | 'ż' => 'z',
            'Ą' => 'A',
            'Ć' => 'C',
            'Ę' => 'E',
            'Ł' => 'L',
            'Ń' => 'N',
            'Ó' => 'O',
            'Ś' => 'S',
            'Ź' | 'Ż' => 'Z',
            other => other,
        })
        .collect()
}

/// The words of a raw name, split the way the scorer inspects them: on
/// whitespace, hyphens and periods.
pub fn words(name: &str) -> impl Iterator<Item = &str> {
    name.split(|ch: char| ch.is_whitespace() || ch == '-' || ch == '.')
        .filter(|word| !word.is_empty())
}
