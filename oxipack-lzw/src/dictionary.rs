//! LZW dictionaries.
//!
//! Encoding needs "string -> code" with longest-prefix search, decoding
//! needs "code -> string". The two directions live in independent
//! containers, each rebuilt from scratch for every call.

use crate::config::LzwConfig;
use oxipack_core::error::{OxiPackError, Result};

/// Child slot of a ternary search trie node.
#[derive(Debug, Clone, Copy)]
enum Link {
    Left,
    Mid,
    Right,
}

#[derive(Debug, Clone)]
struct TstNode {
    byte: u8,
    value: Option<u32>,
    left: Option<usize>,
    mid: Option<usize>,
    right: Option<usize>,
}

impl TstNode {
    fn new(byte: u8) -> Self {
        Self {
            byte,
            value: None,
            left: None,
            mid: None,
            right: None,
        }
    }
}

/// Ordered symbol table mapping non-empty byte strings to codes.
///
/// Implemented as a ternary search trie over an index arena, which gives
/// cheap longest-prefix queries without allocating per lookup.
#[derive(Debug, Clone, Default)]
pub struct PrefixDictionary {
    nodes: Vec<TstNode>,
    root: Option<usize>,
    len: usize,
}

impl PrefixDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dictionary seeded with the single-byte strings `0..R`,
    /// each mapped to its own byte value.
    pub fn with_alphabet(alphabet_size: u16) -> Self {
        let mut dict = Self::new();
        // Midpoint order keeps the first trie level balanced.
        dict.seed_range(0, alphabet_size as u32);
        dict
    }

    fn seed_range(&mut self, lo: u32, hi: u32) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        self.insert_unchecked(&[mid as u8], mid);
        self.seed_range(lo, mid);
        self.seed_range(mid + 1, hi);
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the dictionary holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Associate `key` with `code`, replacing any previous code.
    pub fn insert(&mut self, key: &[u8], code: u32) -> Result<()> {
        if key.is_empty() {
            return Err(OxiPackError::invalid_argument(
                "dictionary keys must be non-empty",
            ));
        }
        self.insert_unchecked(key, code);
        Ok(())
    }

    fn alloc(&mut self, byte: u8) -> usize {
        self.nodes.push(TstNode::new(byte));
        self.nodes.len() - 1
    }

    fn child_or_insert(&mut self, idx: usize, link: Link, byte: u8) -> usize {
        let node = &self.nodes[idx];
        let existing = match link {
            Link::Left => node.left,
            Link::Mid => node.mid,
            Link::Right => node.right,
        };
        if let Some(child) = existing {
            return child;
        }

        let child = self.alloc(byte);
        let node = &mut self.nodes[idx];
        match link {
            Link::Left => node.left = Some(child),
            Link::Mid => node.mid = Some(child),
            Link::Right => node.right = Some(child),
        }
        child
    }

    fn insert_unchecked(&mut self, key: &[u8], code: u32) {
        let mut idx = match self.root {
            Some(root) => root,
            None => {
                let root = self.alloc(key[0]);
                self.root = Some(root);
                root
            }
        };

        let mut depth = 0;
        loop {
            let c = key[depth];
            let byte = self.nodes[idx].byte;
            if c < byte {
                idx = self.child_or_insert(idx, Link::Left, c);
            } else if c > byte {
                idx = self.child_or_insert(idx, Link::Right, c);
            } else if depth + 1 < key.len() {
                depth += 1;
                idx = self.child_or_insert(idx, Link::Mid, key[depth]);
            } else {
                if self.nodes[idx].value.replace(code).is_none() {
                    self.len += 1;
                }
                return;
            }
        }
    }

    /// Look up the code for an exact key.
    pub fn get(&self, key: &[u8]) -> Option<u32> {
        if key.is_empty() {
            return None;
        }

        let mut current = self.root;
        let mut depth = 0;
        while let Some(idx) = current {
            let node = &self.nodes[idx];
            let c = key[depth];
            if c < node.byte {
                current = node.left;
            } else if c > node.byte {
                current = node.right;
            } else if depth + 1 < key.len() {
                depth += 1;
                current = node.mid;
            } else {
                return node.value;
            }
        }
        None
    }

    /// Find the longest key that is a prefix of `input`.
    ///
    /// Returns the prefix length and its code, or `None` if no key matches
    /// (only possible when the first byte lies outside the alphabet).
    pub fn longest_prefix(&self, input: &[u8]) -> Option<(usize, u32)> {
        let mut best = None;
        let mut current = self.root;
        let mut depth = 0;

        while let Some(idx) = current {
            if depth == input.len() {
                break;
            }
            let node = &self.nodes[idx];
            let c = input[depth];
            if c < node.byte {
                current = node.left;
            } else if c > node.byte {
                current = node.right;
            } else {
                depth += 1;
                if let Some(code) = node.value {
                    best = Some((depth, code));
                }
                current = node.mid;
            }
        }
        best
    }
}

/// Code-indexed string table used while decoding.
#[derive(Debug, Clone)]
pub struct DecodeTable {
    /// `entries[code]`; the sentinel slot stays empty.
    entries: Vec<Vec<u8>>,
    end_of_stream: u32,
}

impl DecodeTable {
    /// Create a table seeded with `0..R` and a reserved sentinel slot.
    pub fn new(config: &LzwConfig) -> Self {
        let mut entries = Vec::with_capacity(config.first_code() as usize);
        for byte in 0..config.alphabet_size {
            entries.push(vec![byte as u8]);
        }
        entries.push(Vec::new());
        Self {
            entries,
            end_of_stream: config.end_of_stream(),
        }
    }

    /// Code that the next pushed entry will receive.
    pub fn next_code(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Append a new entry at [`DecodeTable::next_code`].
    pub fn push(&mut self, entry: Vec<u8>) {
        self.entries.push(entry);
    }

    /// String for an assigned code; `None` for the sentinel or unassigned codes.
    pub fn get(&self, code: u32) -> Option<&[u8]> {
        if code == self.end_of_stream {
            return None;
        }
        self.entries.get(code as usize).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_alphabet() {
        let dict = PrefixDictionary::with_alphabet(256);
        assert_eq!(dict.len(), 256);
        for byte in 0..=255u8 {
            assert_eq!(dict.get(&[byte]), Some(byte as u32));
        }
    }

    #[test]
    fn test_small_alphabet_excludes_high_bytes() {
        let dict = PrefixDictionary::with_alphabet(128);
        assert_eq!(dict.get(&[127]), Some(127));
        assert_eq!(dict.get(&[128]), None);
        assert_eq!(dict.longest_prefix(&[200, 1]), None);
    }

    #[test]
    fn test_insert_and_get() {
        let mut dict = PrefixDictionary::with_alphabet(256);
        dict.insert(b"AB", 257).unwrap();
        dict.insert(b"ABC", 258).unwrap();

        assert_eq!(dict.get(b"AB"), Some(257));
        assert_eq!(dict.get(b"ABC"), Some(258));
        assert_eq!(dict.get(b"ABD"), None);
        assert_eq!(dict.get(b""), None);
        assert_eq!(dict.len(), 258);

        // Replacing a value keeps the count.
        dict.insert(b"AB", 300).unwrap();
        assert_eq!(dict.get(b"AB"), Some(300));
        assert_eq!(dict.len(), 258);
    }

    #[test]
    fn test_insert_empty_key() {
        let mut dict = PrefixDictionary::new();
        assert!(matches!(
            dict.insert(b"", 1),
            Err(OxiPackError::InvalidArgument { .. })
        ));
        assert!(dict.is_empty());
    }

    #[test]
    fn test_longest_prefix() {
        let mut dict = PrefixDictionary::with_alphabet(256);
        dict.insert(b"TO", 257).unwrap();
        dict.insert(b"TOBE", 258).unwrap();

        assert_eq!(dict.longest_prefix(b"TOBEORNOT"), Some((4, 258)));
        assert_eq!(dict.longest_prefix(b"TOB"), Some((2, 257)));
        assert_eq!(dict.longest_prefix(b"T"), Some((1, b'T' as u32)));
        assert_eq!(dict.longest_prefix(b"XYZ"), Some((1, b'X' as u32)));
        assert_eq!(dict.longest_prefix(b""), None);
    }

    #[test]
    fn test_decode_table() {
        let config = LzwConfig::DEFAULT;
        let mut table = DecodeTable::new(&config);

        assert_eq!(table.get(65), Some(&b"A"[..]));
        assert_eq!(table.get(256), None);
        assert_eq!(table.next_code(), 257);
        assert_eq!(table.get(257), None);

        table.push(b"AA".to_vec());
        assert_eq!(table.get(257), Some(&b"AA"[..]));
        assert_eq!(table.next_code(), 258);
    }
}
