//! ASCII art faces for the output pane.
//!
//! Each face belongs to an [`ArtCategory`]. The category is derived from the error messages of a
//! roast request with a small regex table; a message set identical to the previous roast gets the
//! [`ArtCategory::Repeat`] face. Requests without errors get a random face.

use crate::roasts::RoastPicker;
use regex::Regex;
use std::sync::LazyLock;

/// Kinds of error the compiler face reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtCategory {
    /// Missing or stray semicolon.
    Semicolon,
    /// Unbalanced brackets, braces, parentheses or delimiters.
    Bracket,
    /// Undefined / unresolved names.
    Undefined,
    /// Indentation problems.
    Indent,
    /// Unexpected tokens.
    Unexpected,
    /// Generic parse failure.
    Parse,
    /// Generic syntax error.
    Syntax,
    /// Timeouts.
    Timeout,
    /// Same errors as the previous roast.
    Repeat,
    /// Anything else.
    Default,
    /// Bonus faces, only picked at random.
    Disappointed,
    /// Bonus face.
    Confused,
    /// Bonus face.
    Exhausted,
    /// Bonus face.
    Annoyed,
    /// Bonus face.
    Sassy,
}

/// A face plus the compiler's remark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerArt {
    /// Category this face belongs to.
    pub category: ArtCategory,
    /// The face itself.
    pub face: &'static str,
    /// What the compiler says.
    pub caption: &'static str,
}

impl CompilerArt {
    /// Face, caption and signature as one block of text.
    pub fn render(&self) -> String {
        let mut out = String::from(self.face.trim_matches('\n'));
        out.push('\n');
        for line in self.caption.lines() {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("    - Compiler\n");
        out
    }
}

/// Position of the [`ArtCategory::Default`] face in [`COMPILER_ART`].
const DEFAULT_ART: usize = 4;

/// Every face, in table order.
pub const COMPILER_ART: &[CompilerArt] = &[
    CompilerArt {
        category: ArtCategory::Semicolon,
        face: r#"
   .-"      "-.
  /            \
 |              |
 |,  .-.  .-.  ,|
 | )(_o/  \o_)( |
 |/     /\     \|
 (_     ^^     _)
  \__|IIIIII|__/
   | \IIIIII/ |
   \          /
    `--------`
"#,
        caption: "\"Wow, a missing semicolon.\n Truly groundbreaking.\"",
    },
    CompilerArt {
        category: ArtCategory::Syntax,
        face: r#"
      .---.
     /     \
     \.@-@./
     /`\_/`\
    //  _  \\
   | \     )|_
  /`\_`>  <_/ \
  \__/'---'\__/
"#,
        caption: "\"ANOTHER SYNTAX ERROR?\n ARE YOU EVEN TRYING?\"",
    },
    CompilerArt {
        category: ArtCategory::Bracket,
        face: r#"
    _.-"""""-._
   /           \
  |             |
  |  \\  ||  // |
  |   \\_||_//  |
  |    ____     |
  |   |    |    |
  |    \  /     |
   \    ||     /
    `._ ||  _.'
       `"""`
"#,
        caption: "\"I can't believe you\n forgot a bracket... again.\"",
    },
    CompilerArt {
        category: ArtCategory::Undefined,
        face: r#"
    ,----.
   /      \
  |  O  O  |
  |    >   |
  |  \___/ |
  |        |
   \      /
    `----'
"#,
        caption: "\"HAHAHA! That variable\n doesn't even exist!\"",
    },
    CompilerArt {
        category: ArtCategory::Default,
        face: r#"
     _______
    /       \
   | (o) (o) |
   |   ___   |
   |  /   \  |
  /|  |   |  |\
 / |  | . |  | \
/  |  |___|  |  \
   \_________/
"#,
        caption: "\"Your code... it hurts...\n it hurts so much...\"",
    },
    CompilerArt {
        category: ArtCategory::Indent,
        face: r#"
    .--------.
   /          \
  |  -     -  |
  |  \  |  /  |
  |   \ - /   |
  |    ---    |
   \   ___   /
    \_______/
"#,
        caption: "\"I've seen toddlers write\n better code than this.\"",
    },
    CompilerArt {
        category: ArtCategory::Unexpected,
        face: r#"
    .--------.
   /          \
  |  O      O |
  |     ||    |
  |     ||    |
  |     ||    |
   \    ||   /
    `--------'
"#,
        caption: "\"What...? HOW...? WHY...?\n I'm speechless.\"",
    },
    CompilerArt {
        category: ArtCategory::Timeout,
        face: r#"
     .-------.
    /         \
   |  -     -  |
   |   \___/   |
   |           |
    \_________/
"#,
        caption: "\"Wake me up when you\n learn to code properly.\"",
    },
    CompilerArt {
        category: ArtCategory::Parse,
        face: r#"
    /|_/|
   ( o o )
   /)---(\
  //|. .|\\
 \_\|___//_/
  /       \
"#,
        caption: "\"Error detected. Human error.\n Always human error.\"",
    },
    CompilerArt {
        category: ArtCategory::Repeat,
        face: r#"
       /\
      /  \
     /    \
    | _  _ |
    |(.)(.)|
    |  --  |
    | \__/ |
     \    /
      \  /
       \/
"#,
        caption: "\"Oh look! You made the\n exact same error again!\"",
    },
    CompilerArt {
        category: ArtCategory::Disappointed,
        face: r#"
    .---------.
   /           \
  |  .-. .-.    |
  |  |_| |_|    |
  |   -___-     |
  |  _______    |
   \_________/
"#,
        caption: "\"I expected little,\n and I'm still disappointed.\"",
    },
    CompilerArt {
        category: ArtCategory::Confused,
        face: r#"
    .---------.
   /           \
  |  ?     ?    |
  |    ---      |
  |   _____     |
  |  /     \    |
   \_________/
"#,
        caption: "\"I genuinely have no idea\n what you were trying to do.\"",
    },
    CompilerArt {
        category: ArtCategory::Exhausted,
        face: r#"
    .---------.
   /           \
  |  x     x    |
  |    ---      |
  |  _______    |
  |             |
   \_________/
"#,
        caption: "\"I'm too tired to explain\n all the things wrong here.\"",
    },
    CompilerArt {
        category: ArtCategory::Annoyed,
        face: r#"
    /~~~~~\
   /       \
  |  >   <  |
  |    -    |
  |  -----  |
  |         |
   \_______/
"#,
        caption: "\"This is the 42nd error.\n I'm keeping count now.\"",
    },
    CompilerArt {
        category: ArtCategory::Sassy,
        face: r#"
    .---------.
   /           \
  |  ^     ^    |
  |    \_/      |
  |             |
  |  \_____/    |
   \_________/
"#,
        caption: "\"Did you try turning your\n brain on and off again?\"",
    },
];

// Checked in order; the first match wins.
static CATEGORY_PATTERNS: LazyLock<Vec<(ArtCategory, Regex)>> = LazyLock::new(|| {
    [
        (ArtCategory::Semicolon, r"(?i)semi-?colon|expected `?;"),
        (
            ArtCategory::Bracket,
            r"(?i)bracket|brace|paren|delimiter|unclosed|unmatched|expected `?[\)\]\}]",
        ),
        (
            ArtCategory::Undefined,
            r"(?i)undefined|undeclared|not defined|not found|cannot find|unresolved|unknown (name|identifier|variable)",
        ),
        (ArtCategory::Indent, r"(?i)indent"),
        (ArtCategory::Unexpected, r"(?i)unexpected"),
        (ArtCategory::Timeout, r"(?i)timed? ?out"),
        (ArtCategory::Parse, r"(?i)pars(e|ing)"),
        (ArtCategory::Syntax, r"(?i)syntax"),
    ]
    .into_iter()
    .filter_map(|(category, pattern)| Regex::new(pattern).ok().map(|re| (category, re)))
    .collect()
});

impl ArtCategory {
    /// Categorize a set of error messages. `None` when there are no messages.
    pub fn classify<S: AsRef<str>>(messages: &[S]) -> Option<Self> {
        if messages.is_empty() {
            return None;
        }
        let category = messages
            .iter()
            .find_map(|message| {
                CATEGORY_PATTERNS
                    .iter()
                    .find(|(_, re)| re.is_match(message.as_ref()))
                    .map(|(category, _)| *category)
            })
            .unwrap_or(ArtCategory::Default);
        Some(category)
    }
}

/// The face for `category`.
pub fn art_for(category: ArtCategory) -> &'static CompilerArt {
    COMPILER_ART
        .iter()
        .find(|art| art.category == category)
        .unwrap_or(&COMPILER_ART[DEFAULT_ART])
}

/// Picks faces for successive roasts, remembering the previous message set.
#[derive(Debug, Clone, Default)]
pub struct ArtSelector {
    last_messages: Option<Vec<String>>,
}

impl ArtSelector {
    /// Create a selector with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a face for a roast carrying `messages`.
    pub fn select(&mut self, messages: &[String], picker: &mut RoastPicker) -> &'static CompilerArt {
        let Some(category) = ArtCategory::classify(messages) else {
            return &COMPILER_ART[picker.index(COMPILER_ART.len())];
        };
        let repeated = self.last_messages.as_deref() == Some(messages);
        self.last_messages = Some(messages.to_vec());
        if repeated {
            art_for(ArtCategory::Repeat)
        } else {
            art_for(category)
        }
    }
}
