//! Small text helpers shared by the content sources.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

pub const DEFAULT_TITLES: &[&str] = &[
    "The Unexpected Truth About {}",
    "Why {} Matter More Than You Think",
    "{}: A Personal Journey",
    "Everything I Know About {}",
    "How {} Changed My Life",
    "Rethinking {}",
];

pub const DEFAULT_BOLD_STATEMENTS: &[&str] = &[
    "If you want to {action_infinitive}, first {step}",
    "{action} is the secret to {topic}",
    "Nobody tells you how to {action_infinitive} in {location}",
    "Stop worrying about {topic}. Just {action_infinitive}",
    "The best place to {action_infinitive} is {location}",
];

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

const UNCOUNTABLE: &[&str] = &["sheep", "fish", "deer", "series", "species", "news", "information"];

/// English plural of the last word of `phrase`.
pub fn pluralize(phrase: &str) -> String {
    let phrase = phrase.trim();
    let (head, last) = match phrase.rfind(' ') {
        Some(split) => phrase.split_at(split + 1),
        None => ("", phrase),
    };
    if last.is_empty() {
        return phrase.to_string();
    }

    let lower = last.to_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) {
        return phrase.to_string();
    }
    if let Some((_, plural)) = IRREGULAR_PLURALS.iter().find(|(single, _)| *single == lower) {
        return format!("{}{}", head, plural);
    }

    let plural = if ["s", "x", "z", "ch", "sh"].iter().any(|end| lower.ends_with(end)) {
        format!("{}es", last)
    } else if lower.ends_with('y') && !ends_with_vowel_before(&lower, 1) {
        format!("{}ies", &last[..last.len() - 1])
    } else if lower.ends_with("fe") {
        format!("{}ves", &last[..last.len() - 2])
    } else if lower.ends_with('f') && !lower.ends_with("ff") {
        format!("{}ves", &last[..last.len() - 1])
    } else {
        format!("{}s", last)
    };

    format!("{}{}", head, plural)
}

fn ends_with_vowel_before(word: &str, suffix_len: usize) -> bool {
    word.chars()
        .rev()
        .nth(suffix_len)
        .map(|c| "aeiou".contains(c))
        .unwrap_or(false)
}

/// Upper-cases the first letter of every whitespace-separated word.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replaces `{name}` placeholders; unknown names are left untouched.
pub fn fill_template(template: &str, values: &HashMap<&str, String>) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").unwrap());

    re.replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
        Some(value) => value.clone(),
        None => caps[0].to_string(),
    })
    .into_owned()
}

/// Seed turned into a single relative path component, never empty.
pub fn path_safe(seed: &str) -> String {
    let safe: String = seed
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();

    match safe.trim_start_matches('.') {
        "" => "_".to_string(),
        rest => rest.to_string(),
    }
}

/// Non-empty, trimmed lines of a template file.
pub fn template_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
