//! Session-scoped mapping between blank-node identity and wire labels.
//!
//! One encoder lives inside each sink and one decoder inside each source;
//! neither is shared across sessions, so the same label can stand for
//! unrelated blank nodes in two different streams. Tables grow with the
//! number of distinct blank nodes seen and are never evicted; a session is
//! bounded by the stream it serves.

use std::collections::HashMap;

/// Blank-node identity to label, write side.
#[derive(Debug, Default)]
pub struct LabelEncoder {
    labels: HashMap<String, String>,
}

impl LabelEncoder {
    pub fn new() -> Self {
        LabelEncoder::default()
    }

    /// Label for the blank node with id `id`, allocating `b{n}` on first
    /// sight and reusing it on every subsequent sight.
    pub fn label_for(&mut self, id: &str) -> &str {
        let fresh = self.labels.len();
        self.labels
            .entry(id.to_string())
            .or_insert_with(|| format!("b{fresh}"))
    }
}

/// Label to blank-node identity, read side.
#[derive(Debug, Default)]
pub struct LabelDecoder {
    ids: HashMap<String, String>,
}

impl LabelDecoder {
    pub fn new() -> Self {
        LabelDecoder::default()
    }

    /// Blank-node id for `label`, allocating a fresh identity on first
    /// sight of the label and reusing it afterwards. Distinct labels always
    /// map to distinct identities.
    pub fn id_for(&mut self, label: &str) -> &str {
        let fresh = self.ids.len();
        self.ids
            .entry(label.to_string())
            .or_insert_with(|| format!("b{fresh}"))
    }
}
