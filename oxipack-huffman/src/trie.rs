//! Frequency-weighted binary trie for Huffman coding.
//!
//! The trie is built once per compression call, serialized as a preamble in
//! front of the payload, and rebuilt independently by the decoder.
//!
//! # Preamble Format
//!
//! Depth-first, one bit per node:
//!
//! - `1` + 8-bit symbol: leaf
//! - `0` + left subtree + right subtree: internal node

use oxipack_core::bitstream::{BitReader, BitWriter};
use oxipack_core::error::{OxiPackError, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::io::{Read, Write};

/// Number of distinct symbols (one byte).
pub const ALPHABET_SIZE: usize = 256;

/// Deepest node a 256-leaf trie can contain.
const MAX_DEPTH: usize = ALPHABET_SIZE - 1;

/// A node of the Huffman trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A symbol with its frequency.
    Leaf {
        /// The byte this leaf stands for.
        symbol: u8,
        /// Occurrences of `symbol` in the input.
        weight: u64,
    },
    /// Two subtrees; `weight` is the sum of their weights.
    Internal {
        /// Combined weight of both children.
        weight: u64,
        /// Subtree reached by a `0` bit.
        left: Box<HuffmanNode>,
        /// Subtree reached by a `1` bit.
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Weight of this node.
    pub fn weight(&self) -> u64 {
        match self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => *weight,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    fn merge(left: HuffmanNode, right: HuffmanNode) -> Self {
        Self::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Heap entry ordered by ascending weight, then by insertion order.
struct QueueItem {
    weight: u64,
    seq: usize,
    node: HuffmanNode,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Prefix-free code for every symbol of a trie.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Vec<bool>>>,
}

impl CodeTable {
    /// Code for `symbol`, or `None` if the symbol is not in the trie.
    ///
    /// A trie with a single leaf gives that leaf an empty code.
    pub fn get(&self, symbol: u8) -> Option<&[bool]> {
        self.codes[symbol as usize].as_deref()
    }

    /// Code for `symbol` rendered as a string of `'0'` and `'1'`.
    pub fn code_string(&self, symbol: u8) -> Option<String> {
        self.get(symbol)
            .map(|bits| bits.iter().map(|&b| if b { '1' } else { '0' }).collect())
    }

    /// Iterate over `(symbol, code)` for every coded symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_deref().map(|c| (symbol as u8, c)))
    }
}

/// Huffman trie built from symbol frequencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTrie {
    root: HuffmanNode,
}

impl HuffmanTrie {
    /// Build a trie from a 256-entry frequency table.
    ///
    /// Repeatedly merges the two lightest nodes until one remains. Equal
    /// weights are taken in insertion order (leaves by symbol, then merged
    /// nodes as they are created); this tie-break is not part of the format.
    /// With no symbol present the trie degenerates to a single leaf for
    /// symbol `0` with weight `0`.
    pub fn from_frequencies(freq: &[u64; ALPHABET_SIZE]) -> Self {
        let mut heap = BinaryHeap::new();
        let mut seq = 0;
        for (symbol, &weight) in freq.iter().enumerate() {
            if weight > 0 {
                heap.push(QueueItem {
                    weight,
                    seq,
                    node: HuffmanNode::Leaf {
                        symbol: symbol as u8,
                        weight,
                    },
                });
                seq += 1;
            }
        }

        loop {
            let Some(first) = heap.pop() else {
                return Self {
                    root: HuffmanNode::Leaf {
                        symbol: 0,
                        weight: 0,
                    },
                };
            };
            let Some(second) = heap.pop() else {
                return Self { root: first.node };
            };

            let node = HuffmanNode::merge(first.node, second.node);
            heap.push(QueueItem {
                weight: node.weight(),
                seq,
                node,
            });
            seq += 1;
        }
    }

    /// Tally byte frequencies in `data` and build a trie from them.
    pub fn from_data(data: &[u8]) -> Self {
        let mut freq = [0u64; ALPHABET_SIZE];
        for &byte in data {
            freq[byte as usize] += 1;
        }
        Self::from_frequencies(&freq)
    }

    /// Root node.
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Total weight (sum of all leaf weights).
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        fn count(node: &HuffmanNode) -> usize {
            match node {
                HuffmanNode::Leaf { .. } => 1,
                HuffmanNode::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }

    /// Derive codes by walking the trie: `0` for left, `1` for right.
    pub fn code_table(&self) -> CodeTable {
        fn walk(node: &HuffmanNode, prefix: &mut Vec<bool>, codes: &mut [Option<Vec<bool>>]) {
            match node {
                HuffmanNode::Leaf { symbol, .. } => codes[*symbol as usize] = Some(prefix.clone()),
                HuffmanNode::Internal { left, right, .. } => {
                    prefix.push(false);
                    walk(left, prefix, codes);
                    prefix.pop();
                    prefix.push(true);
                    walk(right, prefix, codes);
                    prefix.pop();
                }
            }
        }

        let mut codes = vec![None; ALPHABET_SIZE];
        walk(&self.root, &mut Vec::new(), &mut codes);
        CodeTable { codes }
    }

    /// Serialize the trie shape as a preamble.
    pub fn write_to<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        fn write_node<W: Write>(node: &HuffmanNode, writer: &mut BitWriter<W>) -> Result<()> {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    writer.write_bit(true)?;
                    writer.write_byte(*symbol)
                }
                HuffmanNode::Internal { left, right, .. } => {
                    writer.write_bit(false)?;
                    write_node(left, writer)?;
                    write_node(right, writer)
                }
            }
        }
        write_node(&self.root, writer)
    }

    /// Rebuild a trie from its preamble.
    ///
    /// Weights are not stored, so every node of the result has weight `0`.
    pub fn read_from<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        fn read_node<R: Read>(reader: &mut BitReader<R>, depth: usize) -> Result<HuffmanNode> {
            if depth > MAX_DEPTH {
                return Err(OxiPackError::corrupted(
                    reader.bits_read(),
                    "Huffman trie deeper than 255 levels",
                ));
            }

            let is_leaf = reader.read_bit().map_err(|e| e.truncated("Huffman trie"))?;
            if is_leaf {
                let symbol = reader
                    .read_byte()
                    .map_err(|e| e.truncated("Huffman trie"))?;
                return Ok(HuffmanNode::Leaf { symbol, weight: 0 });
            }

            let left = read_node(reader, depth + 1)?;
            let right = read_node(reader, depth + 1)?;
            Ok(HuffmanNode::merge(left, right))
        }

        Ok(Self {
            root: read_node(reader, 0)?,
        })
    }

    /// Decode one symbol by walking from the root, one bit per branch.
    ///
    /// A single-leaf trie consumes no bits.
    pub fn decode_symbol<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u8> {
        let mut node = &self.root;
        loop {
            match node {
                HuffmanNode::Leaf { symbol, .. } => return Ok(*symbol),
                HuffmanNode::Internal { left, right, .. } => {
                    let bit = reader
                        .read_bit()
                        .map_err(|e| e.truncated("Huffman payload"))?;
                    node = if bit { right } else { left };
                }
            }
        }
    }
}
