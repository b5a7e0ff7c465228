//! Word-level key sequence tracking

/// Index into an ordered list of keys for multi-key practice.
///
/// Knows nothing about which key was actually pressed; the driver decides
/// when to `advance`.
#[derive(Debug, Clone, Default)]
pub struct SequenceAdvancer {
    keys: Vec<char>,
    current_index: usize,
}

impl SequenceAdvancer {
    pub fn new(keys: impl IntoIterator<Item = char>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            current_index: 0,
        }
    }

    /// Key at the current index, `None` once every key has been passed
    pub fn highlighted_key(&self) -> Option<char> {
        self.keys.get(self.current_index).copied()
    }

    /// Step forward one key. Stops at the end of the list.
    pub fn advance(&mut self) {
        if self.current_index < self.keys.len() {
            self.current_index += 1;
            log::debug!("sequence advanced to {}/{}", self.current_index, self.keys.len());
        }
    }

    pub fn reset(&mut self) {
        self.current_index = 0;
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.keys.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn keys(&self) -> &[char] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
