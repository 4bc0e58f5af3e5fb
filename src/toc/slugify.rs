use serde::{Deserialize, Serialize};

/// How a slug is shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugOptions {
    /// Lower-case the result
    #[serde(default = "default_true")]
    pub lower: bool,
    /// Restrict to ASCII letters, digits and `-`
    #[serde(default = "default_true")]
    pub strict: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            lower: true,
            strict: true,
        }
    }
}

/// Turns heading text into a fragment identifier
pub trait Slugifier {
    fn slugify(&self, text: &str, options: SlugOptions) -> String;
}

impl<F> Slugifier for F
where
    F: Fn(&str, SlugOptions) -> String,
{
    fn slugify(&self, text: &str, options: SlugOptions) -> String {
        self(text, options)
    }
}

/// Slugifier backed by the `slug` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSlugifier;

impl Slugifier for DefaultSlugifier {
    fn slugify(&self, text: &str, options: SlugOptions) -> String {
        match (options.strict, options.lower) {
            (true, true) => slug::slugify(text),
            (true, false) => strict_preserving_case(text),
            (false, lower) => {
                let loose = loose_slug(text);
                if lower {
                    loose.to_lowercase()
                } else {
                    loose
                }
            }
        }
    }
}

/// ASCII slug that keeps the original case of ASCII letters
fn strict_preserving_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            // Transliterates non-ASCII letters, anything else becomes a separator
            let transliterated = slug::slugify(c.to_string());
            if transliterated.is_empty() {
                out.push('-');
            } else {
                out.push_str(&transliterated);
            }
        }
    }
    collapse_dashes(&out)
}

/// Unicode-preserving slug: letters, digits, `-` and `_` survive
fn loose_slug(text: &str) -> String {
    let mapped: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    collapse_dashes(&mapped)
}

fn collapse_dashes(text: &str) -> String {
    text.split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
