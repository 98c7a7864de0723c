//! Interactive topic selection.

use std::io::{BufRead, Write};

/// Topics offered in the interactive menu. The first one is the fallback.
pub const SUGGESTED_TOPICS: [&str; 5] = [
    "Artificial Intelligence and Machine Learning in 2025: Trends and Applications",
    "Blockchain and Web3: The Future of the Decentralized Internet",
    "Quantum Computing: The Next Technological Revolution",
    "Cybersecurity in the Digital Age: Challenges and Solutions",
    "Internet of Things (IoT): Connecting the Physical World",
];

/// How the operator's answer was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicChoice {
    /// A valid menu number (1-based).
    Suggested(usize),
    /// Free-form text.
    Custom(String),
    /// A number outside the menu; the default topic is used.
    OutOfRange,
    /// Nothing was entered; the default topic is used.
    Empty,
}

impl TopicChoice {
    /// Interprets one line of operator input.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::Empty;
        }
        if input.chars().all(|c| c.is_ascii_digit()) {
            return match input.parse::<usize>() {
                Ok(n) if (1..=SUGGESTED_TOPICS.len()).contains(&n) => Self::Suggested(n),
                _ => Self::OutOfRange,
            };
        }
        Self::Custom(input.to_string())
    }

    /// The topic this choice resolves to. Menu numbers outside the menu
    /// resolve to the default topic.
    pub fn topic(&self) -> String {
        let default = SUGGESTED_TOPICS[0];
        match self {
            Self::Suggested(n) => SUGGESTED_TOPICS
                .get(n.wrapping_sub(1))
                .copied()
                .unwrap_or(default)
                .to_string(),
            Self::Custom(text) => text.clone(),
            Self::OutOfRange | Self::Empty => default.to_string(),
        }
    }
}

/// Shows the menu on `out`, reads one line from `input` and resolves it.
pub fn prompt<R: BufRead, W: Write>(mut input: R, mut out: W) -> std::io::Result<String> {
    writeln!(out, "Suggested topics:")?;
    for (i, topic) in SUGGESTED_TOPICS.iter().enumerate() {
        writeln!(out, "   {}. {topic}", i + 1)?;
    }
    writeln!(out)?;
    writeln!(out, "Options:")?;
    writeln!(
        out,
        "   - Enter a number (1-{}) to pick a suggested topic",
        SUGGESTED_TOPICS.len()
    )?;
    writeln!(out, "   - Or type your own topic")?;
    write!(out, "\nYour choice: ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let choice = TopicChoice::parse(&line);
    match choice {
        TopicChoice::OutOfRange => writeln!(out, "\nInvalid number. Using the default topic.")?,
        TopicChoice::Empty => writeln!(out, "\nNo topic entered. Using the default topic.")?,
        _ => {}
    }
    Ok(choice.topic())
}
