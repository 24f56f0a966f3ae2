// Copyright 2018 Niklas Fiekas <niklas.fiekas@backscattering.de>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Character counts of a text source.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Read};

/// A symbol of the text alphabet.
///
/// Line terminators are not ordinary characters: every `'\n'` in a source
/// is counted and coded as the synthetic [`Symbol::LineBreak`].
///
/// [`Symbol::LineBreak`]: enum.Symbol.html#variant.LineBreak
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Char(char),
    LineBreak,
}

impl Symbol {
    /// The symbol a character of the source is coded as.
    pub fn of(ch: char) -> Symbol {
        match ch {
            '\n' => Symbol::LineBreak,
            ch => Symbol::Char(ch),
        }
    }

    /// The character written when this symbol is decoded.
    pub fn to_char(self) -> char {
        match self {
            Symbol::Char(ch) => ch,
            Symbol::LineBreak => '\n',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Symbol::Char(ch) => write!(f, "{:?}", ch),
            Symbol::LineBreak => f.write_str("<line break>"),
        }
    }
}

/// Occurrence counts of the symbols of a text source.
///
/// Every symbol present has a count of at least one. Symbols that never
/// occurred are absent, in particular a source without any line feed has no
/// [`Symbol::LineBreak`] entry.
///
/// [`Symbol::LineBreak`]: enum.Symbol.html#variant.LineBreak
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frequencies {
    counts: BTreeMap<Symbol, u64>,
}

impl Frequencies {
    /// Counts the symbols of `text`.
    ///
    /// ```
    /// use huffman_text::{Frequencies, Symbol};
    ///
    /// let freqs = Frequencies::from_text("ab\nb");
    /// assert_eq!(freqs.get(Symbol::Char('a')), Some(1));
    /// assert_eq!(freqs.get(Symbol::Char('b')), Some(2));
    /// assert_eq!(freqs.get(Symbol::LineBreak), Some(1));
    /// assert_eq!(freqs.len(), 3);
    /// ```
    pub fn from_text(text: &str) -> Frequencies {
        let mut counts = BTreeMap::new();
        for ch in text.chars() {
            *counts.entry(Symbol::of(ch)).or_insert(0) += 1;
        }
        Frequencies { counts }
    }

    /// Reads a whole source and counts its symbols.
    ///
    /// # Errors
    ///
    /// Fails if the source cannot be read or is not valid UTF-8. Single-byte
    /// encodings such as Latin-1 are rejected rather than guessed at.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Frequencies> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Frequencies::from_text(&text))
    }

    /// The number of occurrences of `symbol`, `None` if it never occurred.
    pub fn get(&self, symbol: Symbol) -> Option<u64> {
        self.counts.get(&symbol).cloned()
    }

    /// The number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The total number of symbols in the source.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates over the counts in ascending symbol order.
    pub fn iter(&self) -> Iter {
        Iter {
            inner: self.counts.iter(),
        }
    }
}

/// Iterator over the entries of [`Frequencies`](struct.Frequencies.html).
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, Symbol, u64>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (Symbol, u64);

    fn next(&mut self) -> Option<(Symbol, u64)> {
        self.inner.next().map(|(&symbol, &count)| (symbol, count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}
