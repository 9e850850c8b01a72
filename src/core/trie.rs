// --- File: src/core/trie.rs
use std::collections::BTreeMap;

#[derive(Clone)]
struct TrieNode {
    /// Child indices into the arena. BTreeMap keeps traversal order stable.
    children: BTreeMap<char, usize>,
    /// The full word, set only on terminal nodes.
    word: Option<String>,
}

impl TrieNode {
    fn new() -> Self {
        Self { children: BTreeMap::new(), word: None }
    }
}

/// Exact-prefix index over the dictionary.
///
/// Nodes live in a flat arena addressed by index; index 0 is the root.
/// Built once, read-only afterwards.
#[derive(Clone)]
pub struct PrefixTrie {
    nodes: Vec<TrieNode>,
    word_count: usize,
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixTrie {
    pub fn new() -> Self {
        Self { nodes: vec![TrieNode::new()], word_count: 0 }
    }

    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// O(k) in the word length. Inserting an existing word is a no-op.
    pub fn insert(&mut self, word: &str) {
        let mut node_idx = 0;
        for ch in word.chars() {
            let next_idx = if let Some(&id) = self.nodes[node_idx].children.get(&ch) {
                id
            } else {
                let new_node_id = self.nodes.len();
                self.nodes.push(TrieNode::new());
                self.nodes[node_idx].children.insert(ch, new_node_id);
                new_node_id
            };
            node_idx = next_idx;
        }
        let node = &mut self.nodes[node_idx];
        if node.word.is_none() {
            node.word = Some(word.to_string());
            self.word_count += 1;
        }
    }

    fn find_node(&self, prefix: &str) -> Option<usize> {
        let mut node_idx = 0;
        for ch in prefix.chars() {
            node_idx = *self.nodes[node_idx].children.get(&ch)?;
        }
        Some(node_idx)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.find_node(word)
            .is_some_and(|idx| self.nodes[idx].word.is_some())
    }

    /// Every word starting with `prefix`, depth-first with children in ascending
    /// character order. A missing prefix yields an empty list.
    pub fn search_prefix(&self, prefix: &str) -> Vec<String> {
        let Some(node_idx) = self.find_node(prefix) else {
            return vec![];
        };
        let mut words = Vec::new();
        self.collect_words(node_idx, &mut words);
        words
    }

    fn collect_words(&self, node_idx: usize, words: &mut Vec<String>) {
        let node = &self.nodes[node_idx];
        if let Some(word) = &node.word {
            words.push(word.clone());
        }
        for &child_idx in node.children.values() {
            self.collect_words(child_idx, words);
        }
    }
}
