use aho_corasick::AhoCorasick;

/// Markers of a line that may hold a user or assistant message.
const TURN_MARKERS: &[&str] = &[
    r#""type":"user""#,
    r#""type": "user""#,
    r#""type":"human""#,
    r#""type": "human""#,
    r#""type":"assistant""#,
    r#""type": "assistant""#,
];

/// Cheap first pass over raw transcript lines.
///
/// Rejects lines that cannot possibly be a conversation turn without paying
/// for a JSON decode. A pass here is not a promise: the decoder still
/// checks the real `type` field.
pub struct LinePrefilter {
    automaton: AhoCorasick,
}

impl LinePrefilter {
    pub fn new(markers: &[&str]) -> Self {
        let automaton = AhoCorasick::new(markers).expect("valid aho-corasick patterns");
        Self { automaton }
    }

    pub fn might_be_turn(&self, line: &str) -> bool {
        self.automaton.is_match(line)
    }
}

impl Default for LinePrefilter {
    fn default() -> Self {
        Self::new(TURN_MARKERS)
    }
}
