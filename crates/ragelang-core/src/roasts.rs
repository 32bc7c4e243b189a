//! Roast text: the static fallback list, the random picker, prompt building for remote
//! generators, and normalization of generated text.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use unicode_width::UnicodeWidthChar;

/// Every roast starts with this marker.
pub const ROAST_MARKER: &str = "🔥";

/// Display-width budget for a roast shown inline.
pub const MAX_ROAST_WIDTH: usize = 120;

/// Local roasts used when no remote generator is available or it fails.
pub const FALLBACK_ROASTS: &[&str] = &[
    "🔥 Oh wow, another syntax error. Maybe coding isn't for you?",
    "🔥 Did you learn programming from a cereal box?",
    "🔥 Your code is like my ex - full of issues and impossible to fix.",
    "🔥 Wow, you're really pushing the boundaries of how many errors one person can make.",
    "🔥 Have you considered a career in literally anything other than programming?",
    "🔥 Your code is so bad, even the compiler is crying.",
    "🔥 I've seen better code written by a cat walking on a keyboard.",
    "🔥 Another error? I'm shocked. SHOCKED! Well, not that shocked.",
    "🔥 Error-free code was never an option for you, was it?",
    "🔥 Your coding style is... unique. And by unique, I mean terrible.",
];

const ERROR_FLAVORS: &[&str] = &[
    "syntax",
    "logic",
    "runtime",
    "semantic",
    "compiler",
    "typing",
    "reference",
    "naming",
    "design",
    "algorithm",
];

/// Random choices for roasts and prompts.
///
/// Seedable so tests can assert on exact picks.
#[derive(Debug, Clone)]
pub struct RoastPicker {
    rng: StdRng,
}

impl RoastPicker {
    /// A picker seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A deterministic picker.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick a fallback roast. Never empty.
    pub fn fallback_roast(&mut self) -> &'static str {
        FALLBACK_ROASTS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(FALLBACK_ROASTS[0])
    }

    /// Pick an index in `0..len` (`len` must be non-zero).
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }

    fn flavor(&mut self) -> &'static str {
        ERROR_FLAVORS.choose(&mut self.rng).copied().unwrap_or("syntax")
    }
}

impl Default for RoastPicker {
    fn default() -> Self {
        Self::new()
    }
}

/// What a remote generator gets to know about the error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoastContext {
    /// Editor language id of the document.
    pub language_id: String,
    /// Text of the errored line (without terminator).
    pub errored_line_text: String,
    /// Error messages pending on the line.
    pub error_messages: Vec<String>,
}

impl RoastContext {
    /// Build the generation prompt.
    ///
    /// Without error messages (manual roasts on clean lines) the prompt names a random error
    /// flavor instead.
    pub fn prompt(&self, picker: &mut RoastPicker) -> String {
        let language = if self.language_id.is_empty() {
            "some programming language"
        } else {
            self.language_id.as_str()
        };

        let mut prompt = String::from(
            "Generate a short, brutal, and sarcastic roast (under 100 characters) for a developer ",
        );
        if self.error_messages.is_empty() {
            prompt.push_str(&format!(
                "who just made a {} error in their {} code.",
                picker.flavor(),
                language
            ));
        } else {
            prompt.push_str(&format!(
                "whose {} code fails with: {}.",
                language,
                self.error_messages.join("; ")
            ));
            let line = self.errored_line_text.trim();
            if !line.is_empty() {
                prompt.push_str(&format!(" The offending line is: `{line}`."));
            }
        }
        prompt.push_str(&format!(
            " Make it funny but not offensive. Start with {ROAST_MARKER}."
        ));
        prompt
    }
}

/// Clean up generated text: trim, keep the first non-empty line, make sure it starts with the
/// roast marker, and cut it to `max_width` display columns.
///
/// Returns `None` when nothing usable is left.
pub fn normalize_roast(text: &str, max_width: usize) -> Option<String> {
    let line = text
        .lines()
        .map(|l| l.trim().trim_matches('"').trim())
        .find(|l| !l.is_empty())?;

    let marked = if line.starts_with(ROAST_MARKER) {
        line.to_string()
    } else {
        format!("{ROAST_MARKER} {line}")
    };

    Some(truncate_to_width(&marked, max_width))
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }
    // Leave one column for the ellipsis.
    let budget = max_width.saturating_sub(1);
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.truncate(out.trim_end().len());
    out.push('…');
    out
}
