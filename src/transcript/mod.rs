pub mod prefilter;

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::config::SnapshotConfig;
use crate::error::Result;

pub use prefilter::LinePrefilter;

/// Marker appended to text cut at the per-turn budget.
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "User"),
            Role::Assistant => write!(f, "Assistant"),
        }
    }
}

/// One textual turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

impl ConversationTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Budgets applied to an extracted conversation. Lengths are in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnLimits {
    pub max_turns: usize,
    pub max_turn_len: usize,
    pub max_total_len: usize,
}

impl Default for TurnLimits {
    fn default() -> Self {
        Self::from(&SnapshotConfig::default())
    }
}

impl From<&SnapshotConfig> for TurnLimits {
    fn from(config: &SnapshotConfig) -> Self {
        Self {
            max_turns: config.max_turns,
            max_turn_len: config.max_turn_len,
            max_total_len: config.max_total_len,
        }
    }
}

// Wire shape of one transcript line. Only what is needed is decoded.

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Content {
    Text(String),
    Blocks(Vec<Block>),
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Block {
    Typed {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default)]
        text: Option<String>,
    },
    Other(IgnoredAny),
}

impl Content {
    /// Text blocks only; tool calls and results are left out.
    fn text(&self) -> String {
        match self {
            Content::Text(s) => s.clone(),
            Content::Blocks(blocks) => blocks
                .iter()
                .filter_map(|b| match b {
                    Block::Typed { kind, text } if kind == "text" => {
                        text.as_deref().filter(|t| !t.is_empty())
                    }
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Content::Other(_) => String::new(),
        }
    }
}

/// Decode one line that passed the prefilter.
///
/// `None` covers malformed JSON, non-conversation entries, and turns with
/// no text. The returned text is not truncated.
pub fn decode_line(line: &str) -> Option<ConversationTurn> {
    let entry: Entry = match serde_json::from_str(line) {
        Ok(entry) => entry,
        Err(e) => {
            tracing::debug!("skipping malformed transcript line: {e}");
            return None;
        }
    };
    let role = match entry.kind.as_str() {
        "user" | "human" => Role::User,
        "assistant" => Role::Assistant,
        _ => return None,
    };
    let text = entry.message?.content?.text();
    if text.is_empty() {
        return None;
    }
    Some(ConversationTurn { role, text })
}

/// Cut `text` so the result, marker included, fits in `max_len` bytes.
///
/// Never splits a UTF-8 sequence.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }
    let (budget, marker) = if max_len >= ELLIPSIS.len() {
        (max_len - ELLIPSIS.len(), ELLIPSIS)
    } else {
        (max_len, "")
    };
    let mut cut = budget;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}{}", &text[..cut], marker)
}

/// Keep the last `max_turns`, then drop whole turns from the oldest end
/// until the total fits.
pub fn apply_limits(mut turns: Vec<ConversationTurn>, limits: &TurnLimits) -> Vec<ConversationTurn> {
    if turns.len() > limits.max_turns {
        turns.drain(..turns.len() - limits.max_turns);
    }
    let mut total: usize = turns.iter().map(|t| t.text.len()).sum();
    let mut drop = 0;
    while drop < turns.len() && total > limits.max_total_len {
        total -= turns[drop].text.len();
        drop += 1;
    }
    turns.drain(..drop);
    turns
}

/// Extract turns from any line-oriented reader.
pub fn extract_from_reader<R: BufRead>(reader: R, limits: &TurnLimits) -> Vec<ConversationTurn> {
    let prefilter = LinePrefilter::default();
    let mut turns = Vec::new();

    for (line_num, chunk) in reader.split(b'\n').enumerate() {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("transcript read stopped at line {}: {}", line_num + 1, e);
                break;
            }
        };
        let line = String::from_utf8_lossy(&bytes);
        if !prefilter.might_be_turn(&line) {
            continue;
        }
        if let Some(mut turn) = decode_line(&line) {
            turn.text = truncate_text(&turn.text, limits.max_turn_len);
            turns.push(turn);
        }
    }

    apply_limits(turns, limits)
}

/// Extract turns from a transcript file.
pub fn extract(path: &Path, limits: &TurnLimits) -> Result<Vec<ConversationTurn>> {
    let file = fs::File::open(path)?;
    Ok(extract_from_reader(BufReader::new(file), limits))
}
