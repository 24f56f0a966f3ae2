// Copyright 2018 Niklas Fiekas <niklas.fiekas@backscattering.de>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Huffman trees and code books over arbitrary symbols.
//!
//! ```
//! use bit_vec::BitVec;
//! use huffman_text::tree::codebook;
//!
//! let weights = vec![("CG", 293), ("AG", 34), ("AT", 4), ("CT", 4), ("TG", 1)];
//! let (book, tree) = codebook(weights);
//!
//! // More frequent symbols are encoded with fewer bits.
//! assert!(book.get(&"CG").map_or(0, |cg| cg.len()) <
//!         book.get(&"TG").map_or(0, |tg| tg.len()));
//!
//! let mut buffer = BitVec::new();
//! let example = vec!["AT", "CG", "AT", "TG", "AG", "CT", "CT", "AG", "CG"];
//! for symbol in &example {
//!     book.encode(&mut buffer, symbol).unwrap();
//! }
//!
//! let decoded: Result<Vec<_>, _> = tree.decoder(&buffer).collect();
//! assert_eq!(decoded.unwrap(), example);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::hash_map;
use std::collections::BinaryHeap;
use std::collections::HashMap;
use std::hash::Hash;

use bit_vec::BitVec;
use log::trace;
use num_traits::ops::saturating::Saturating;

use crate::{DecodeError, EncodeError};

/// A binary tree used for decoding.
///
/// Nodes live in an arena and refer to their children by index, so the
/// whole tree is released at once when it is dropped.
#[derive(Debug, Clone)]
pub struct Tree<K, W> {
    root: usize,
    arena: Vec<Node<K, W>>,
}

#[derive(Debug, Clone)]
enum Node<K, W> {
    Leaf { symbol: K, weight: W },
    Branch { weight: W, left: usize, right: usize },
}

impl<K, W> Node<K, W> {
    fn weight(&self) -> &W {
        match *self {
            Node::Leaf { ref weight, .. } | Node::Branch { ref weight, .. } => weight,
        }
    }
}

impl<K: Clone, W> Tree<K, W> {
    /// An iterator decoding symbols from a source of bits.
    ///
    /// A `false` bit descends to the left child, a `true` bit to the right
    /// child. If there is only one symbol, each `false` bit decodes to that
    /// symbol.
    ///
    /// # Errors
    ///
    /// The iterator yields a single [`DecodeError`] and then stops if the
    /// bits are not a sequence of complete code words.
    ///
    /// [`DecodeError`]: ../enum.DecodeError.html
    pub fn decoder<I>(&self, iterable: I) -> Decoder<K, W, I>
    where
        I: IntoIterator,
        I::Item: Borrow<bool>,
    {
        Decoder {
            tree: self,
            iter: iterable.into_iter(),
            position: 0,
            done: false,
        }
    }
}

impl<K, W> Tree<K, W> {
    /// The number of nodes, leaves and branches.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// The combined weight of all symbols.
    pub fn root_weight(&self) -> Option<&W> {
        self.arena.get(self.root).map(Node::weight)
    }
}

/// Decodes symbols from a source of bits.
#[derive(Debug)]
pub struct Decoder<'a, K: 'a, W: 'a, I: IntoIterator> {
    tree: &'a Tree<K, W>,
    iter: I::IntoIter,
    position: usize,
    done: bool,
}

impl<'a, K, W, I> Decoder<'a, K, W, I>
where
    I: IntoIterator,
    I::Item: Borrow<bool>,
{
    fn next_bit(&mut self) -> Option<bool> {
        let bit = self.iter.next().map(|bit| *bit.borrow());
        if bit.is_some() {
            self.position += 1;
        }
        bit
    }

    fn walk(&mut self) -> Option<Result<&'a K, DecodeError>> {
        let tree = self.tree;
        let mut node = match tree.arena.get(tree.root) {
            Some(root) => root,
            None => {
                return self.next_bit().map(|_| Err(DecodeError::EmptyTree));
            }
        };

        if let Node::Leaf { ref symbol, .. } = *node {
            return match self.next_bit() {
                Some(false) => Some(Ok(symbol)),
                Some(true) => Some(Err(DecodeError::UnexpectedBit {
                    position: self.position - 1,
                })),
                None => None,
            };
        }

        let start = self.position;
        loop {
            match *node {
                Node::Leaf { ref symbol, .. } => return Some(Ok(symbol)),
                Node::Branch { left, right, .. } => {
                    let bit = match self.next_bit() {
                        Some(bit) => bit,
                        None if self.position == start => return None,
                        None => return Some(Err(DecodeError::Truncated { position: start })),
                    };

                    node = if bit {
                        &tree.arena[right]
                    } else {
                        &tree.arena[left]
                    };
                }
            }
        }
    }
}

impl<'a, K, W, I> Iterator for Decoder<'a, K, W, I>
where
    K: Clone,
    I: IntoIterator,
    I::Item: Borrow<bool>,
{
    type Item = Result<K, DecodeError>;

    fn next(&mut self) -> Option<Result<K, DecodeError>> {
        if self.done {
            return None;
        }

        let item = self.walk().map(|res| res.map(K::clone));
        match item {
            None | Some(Err(_)) => self.done = true,
            Some(Ok(_)) => (),
        }
        item
    }
}

/// A code book used for encoding.
#[derive(Debug, Clone)]
pub struct Book<K> {
    book: HashMap<K, BitVec>,
}

impl<K: Eq + Hash + Clone> Book<K> {
    /// Returns the code word for a given symbol.
    pub fn get<Q: ?Sized>(&self, k: &Q) -> Option<&BitVec>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.book.get(k)
    }

    /// Writes the code word for the given key to a bit vector.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if `k` is not in the code book. Nothing is
    /// written in that case.
    ///
    /// [`EncodeError`]: ../struct.EncodeError.html
    pub fn encode<Q: ?Sized>(&self, buffer: &mut BitVec, k: &Q) -> Result<(), EncodeError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        match self.book.get(k) {
            Some(code) => buffer.extend(code),
            None => return Err(EncodeError),
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.book.len()
    }

    pub fn is_empty(&self) -> bool {
        self.book.is_empty()
    }

    /// Iterates over symbols and their code words in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<K, BitVec> {
        self.book.iter()
    }

    fn with_capacity(num_symbols: usize) -> Book<K> {
        Book {
            book: HashMap::with_capacity(num_symbols),
        }
    }

    fn build<W>(&mut self, arena: &[Node<K, W>], node: &Node<K, W>, word: BitVec) {
        match *node {
            Node::Leaf { ref symbol, .. } => {
                self.book.insert(symbol.clone(), word);
            }
            Node::Branch { left, right, .. } => {
                let mut left_word = word.clone();
                left_word.push(false);
                self.build(arena, &arena[left], left_word);

                let mut right_word = word;
                right_word.push(true);
                self.build(arena, &arena[right], right_word);
            }
        }
    }
}

/// Constructs a [book](struct.Book.html) and [tree](struct.Tree.html) pair
/// from symbols and their weights.
///
/// The two lightest nodes are merged until a single root is left, the first
/// removed becoming the left child. Weights are summed with saturating
/// addition. Equal weights are taken in the order the symbols were given.
///
/// A lone symbol is never merged and gets the code word `0`.
pub fn codebook<K, W, T>(weights: T) -> (Book<K>, Tree<K, W>)
where
    K: Eq + Hash + Clone,
    W: Saturating + Clone + Ord,
    T: IntoIterator<Item = (K, W)>,
{
    let weights = weights.into_iter();
    let mut heap = BinaryHeap::with_capacity(weights.size_hint().0);
    let mut arena: Vec<Node<K, W>> = Vec::with_capacity(weights.size_hint().0 * 2);

    for (symbol, weight) in weights {
        heap.push(HeapData {
            weight: weight.clone(),
            id: arena.len(),
        });

        arena.push(Node::Leaf { symbol, weight });
    }

    let num_symbols = arena.len();

    while let Some(left) = heap.pop() {
        let right = match heap.pop() {
            Some(right) => right,
            None => {
                heap.push(left);
                break;
            }
        };

        let id = arena.len();

        let weight = left.weight.saturating_add(right.weight);
        trace!("merging nodes {} and {} into {}", left.id, right.id, id);

        heap.push(HeapData {
            weight: weight.clone(),
            id,
        });

        arena.push(Node::Branch {
            weight,
            left: left.id,
            right: right.id,
        });
    }

    let mut book = Book::with_capacity(num_symbols);

    match heap.pop() {
        Some(HeapData { id: root, .. }) => {
            match arena[root] {
                Node::Leaf { ref symbol, .. } => {
                    let mut word = BitVec::new();
                    word.push(false);
                    book.book.insert(symbol.clone(), word);
                }
                Node::Branch { .. } => book.build(&arena, &arena[root], BitVec::new()),
            }
            (book, Tree { root, arena })
        }
        None => (book, Tree { root: 0, arena }),
    }
}

#[derive(Eq, PartialEq)]
struct HeapData<W> {
    weight: W,
    id: usize,
}

impl<W: Ord> Ord for HeapData<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse ordering (smallest first in heap, then oldest node)
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl<W: Ord> PartialOrd for HeapData<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
