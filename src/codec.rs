// Copyright 2018 Niklas Fiekas <niklas.fiekas@backscattering.de>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Textual encoding and decoding with a code built from a text source.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use bit_vec::BitVec;
use log::{debug, warn};

use crate::frequency::{Frequencies, Symbol};
use crate::tree::{codebook, Book, Tree};
use crate::{DecodeError, EncodeError, Error};

/// A Huffman code for the characters of a text source.
///
/// The frequencies, the tree and the code book are built once when the
/// codec is constructed and never change afterwards, so a `TextCodec` can
/// be shared freely between threads.
///
/// Code words are written as strings of `'0'` and `'1'` characters.
///
/// ```
/// use huffman_text::TextCodec;
///
/// let codec = TextCodec::new("abracadabra\n");
/// assert_eq!(codec.code('a').len(), 1);
///
/// let bits = codec.encode("cab\nbar");
/// assert_eq!(codec.decode(&bits), "cab\nbar");
///
/// // z never occurred in the source.
/// assert_eq!(codec.encode("zebra"), "");
/// ```
#[derive(Debug, Clone)]
pub struct TextCodec {
    frequencies: Frequencies,
    book: Book<Symbol>,
    tree: Tree<Symbol, u64>,
}

impl TextCodec {
    /// Builds the code for the characters of `text`.
    pub fn new(text: &str) -> TextCodec {
        TextCodec::from_frequencies(Frequencies::from_text(text))
    }

    /// Reads a whole source and builds the code for its characters.
    ///
    /// A source that cannot be read, or that is not valid UTF-8, yields a
    /// codec without any symbols. Bytes of other encodings (Latin-1 for
    /// example) are not reinterpreted; transcode such sources to UTF-8 first.
    pub fn from_reader<R: Read>(reader: R) -> TextCodec {
        match Frequencies::from_reader(reader) {
            Ok(frequencies) => TextCodec::from_frequencies(frequencies),
            Err(err) => {
                warn!("unreadable source, building empty code: {}", err);
                TextCodec::default()
            }
        }
    }

    /// Builds the code for the characters of a text file.
    ///
    /// A missing or unreadable file, or one that is not valid UTF-8, yields
    /// a codec without any symbols.
    pub fn open<P: AsRef<Path>>(path: P) -> TextCodec {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => TextCodec::from_reader(file),
            Err(err) => {
                warn!("cannot open {}: {}", path.display(), err);
                TextCodec::default()
            }
        }
    }

    /// Builds the code for the given symbol counts.
    pub fn from_frequencies(frequencies: Frequencies) -> TextCodec {
        let (book, tree) = codebook(frequencies.iter());
        debug!(
            "built code for {} symbols ({} tree nodes, {} occurrences)",
            book.len(),
            tree.len(),
            frequencies.total()
        );

        TextCodec {
            frequencies,
            book,
            tree,
        }
    }

    /// The symbol counts of the source.
    pub fn frequencies(&self) -> &Frequencies {
        &self.frequencies
    }

    pub fn book(&self) -> &Book<Symbol> {
        &self.book
    }

    pub fn tree(&self) -> &Tree<Symbol, u64> {
        &self.tree
    }

    /// The number of distinct symbols with a code word.
    pub fn len(&self) -> usize {
        self.book.len()
    }

    pub fn is_empty(&self) -> bool {
        self.book.is_empty()
    }

    /// The code word of a character, or an empty string if the character
    /// never occurred in the source. `'\n'` asks for the code word of the
    /// line terminator.
    pub fn code(&self, ch: char) -> String {
        self.symbol_code(Symbol::of(ch))
    }

    /// The code word of a symbol, or an empty string if it is unknown.
    pub fn symbol_code(&self, symbol: Symbol) -> String {
        self.book.get(&symbol).map_or_else(String::new, to_digits)
    }

    /// Encodes `text`, returning an empty string if any of its characters
    /// has no code word.
    pub fn encode(&self, text: &str) -> String {
        self.try_encode(text).unwrap_or_default()
    }

    /// Encodes `text` as a string of `'0'` and `'1'`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if any character never occurred in the
    /// source the code was built from. Nothing is encoded in that case.
    ///
    /// [`EncodeError`]: struct.EncodeError.html
    pub fn try_encode(&self, text: &str) -> Result<String, EncodeError> {
        let mut buffer = BitVec::new();
        for ch in text.chars() {
            let symbol = Symbol::of(ch);
            self.book.encode(&mut buffer, &symbol).map_err(|err| {
                debug!("cannot encode {}: no code word", symbol);
                err
            })?;
        }
        Ok(to_digits(&buffer))
    }

    /// Reads and encodes a whole source, returning an empty string if the
    /// source cannot be read or cannot be encoded.
    pub fn encode_reader<R: Read>(&self, reader: R) -> String {
        self.try_encode_reader(reader).unwrap_or_else(|err| {
            debug!("encoding failed: {}", err);
            String::new()
        })
    }

    /// Reads and encodes a whole source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the source cannot be read or is not valid
    /// UTF-8 and [`Error::Encode`] if it has an unknown character.
    ///
    /// [`Error::Io`]: enum.Error.html#variant.Io
    /// [`Error::Encode`]: enum.Error.html#variant.Encode
    pub fn try_encode_reader<R: Read>(&self, mut reader: R) -> Result<String, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(self.try_encode(&text)?)
    }

    /// Encodes the contents of a text file, returning an empty string if
    /// the file cannot be read or cannot be encoded.
    pub fn encode_file<P: AsRef<Path>>(&self, path: P) -> String {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => self.encode_reader(file),
            Err(err) => {
                debug!("cannot open {}: {}", path.display(), err);
                String::new()
            }
        }
    }

    /// Decodes a string of `'0'` and `'1'`, returning an empty string if it
    /// is not a sequence of complete code words.
    pub fn decode(&self, digits: &str) -> String {
        self.try_decode(digits).unwrap_or_else(|err| {
            debug!("decoding failed: {}", err);
            String::new()
        })
    }

    /// Decodes a string of `'0'` and `'1'`. Line terminators are written as
    /// `'\n'`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if `digits` has a character other than `'0'`
    /// or `'1'`, ends inside a code word, or is not empty although the code
    /// has no symbols.
    ///
    /// [`DecodeError`]: enum.DecodeError.html
    pub fn try_decode(&self, digits: &str) -> Result<String, DecodeError> {
        let buffer = from_digits(digits)?;
        let mut text = String::with_capacity(buffer.len() / 2);
        for symbol in self.tree.decoder(&buffer) {
            text.push(symbol?.to_char());
        }
        Ok(text)
    }
}

impl Default for TextCodec {
    fn default() -> TextCodec {
        TextCodec::from_frequencies(Frequencies::default())
    }
}

fn to_digits(bits: &BitVec) -> String {
    bits.iter().map(|bit| if bit { '1' } else { '0' }).collect()
}

fn from_digits(digits: &str) -> Result<BitVec, DecodeError> {
    let mut bits = BitVec::with_capacity(digits.len());
    for (position, found) in digits.chars().enumerate() {
        match found {
            '0' => bits.push(false),
            '1' => bits.push(true),
            found => return Err(DecodeError::InvalidDigit { position, found }),
        }
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn is_prefix_free(codec: &TextCodec) -> bool {
        codec.book().iter().all(|(a, x)| {
            codec.book().iter().all(|(b, y)| {
                a == b || !(x.len() <= y.len() && x.iter().zip(y.iter()).all(|(p, q)| p == q))
            })
        })
    }

    #[test]
    fn test_round_trip() {
        init();
        let source = "the quick brown fox\njumps over\r\nthe lazy dog\n";
        let codec = TextCodec::new(source);
        let bits = codec.encode(source);
        assert!(!bits.is_empty());
        assert!(bits.chars().all(|c| c == '0' || c == '1'));
        assert_eq!(codec.decode(&bits), source);
    }

    #[test]
    fn test_codes() {
        init();
        let codec = TextCodec::new("aaaabbc\n");
        assert_eq!(codec.len(), 4);
        assert_eq!(codec.code('a'), "0");
        assert_eq!(codec.code('b').len(), 2);
        assert_eq!(codec.code('c').len(), 3);
        assert_eq!(codec.code('\n').len(), 3);
        assert_eq!(codec.code('\n'), codec.symbol_code(Symbol::LineBreak));
        assert_eq!(codec.code('z'), "");
        assert!(is_prefix_free(&codec));
    }

    #[test]
    fn test_optimal_length() {
        let source = "aaaaaaaabbbbccd";
        let codec = TextCodec::new(source);
        // 8 * 1 + 4 * 2 + 2 * 3 + 1 * 3
        assert_eq!(codec.encode(source).len(), 25);
    }

    #[test]
    fn test_single_symbol() {
        init();
        let codec = TextCodec::new("xxxxx");
        assert_eq!(codec.len(), 1);
        assert_eq!(codec.code('x'), "0");
        assert_eq!(codec.encode("xx"), "00");
        assert_eq!(codec.decode("000"), "xxx");
        assert_eq!(codec.decode("010"), "");
        assert_eq!(codec.try_decode("01"), Err(DecodeError::UnexpectedBit { position: 1 }));
    }

    #[test]
    fn test_unknown_symbol() {
        init();
        let codec = TextCodec::new("abc");
        assert_eq!(codec.encode("abd"), "");
        assert_eq!(codec.try_encode("abd"), Err(EncodeError));
        // No line feed in the source, so the terminator has no code word.
        assert_eq!(codec.encode("ab\nc"), "");
        assert!(!codec.encode("cab").is_empty());
    }

    #[test]
    fn test_invalid_digit() {
        init();
        let codec = TextCodec::new("abc");
        let mut bits = codec.encode("ab");
        bits.push('2');
        assert_eq!(codec.decode(&bits), "");
        assert_eq!(
            codec.try_decode("0x"),
            Err(DecodeError::InvalidDigit { position: 1, found: 'x' })
        );
    }

    #[test]
    fn test_truncated() {
        init();
        let codec = TextCodec::new("aaabbc");
        let code = codec.code('c');
        assert!(code.len() > 1);
        let mut bits = codec.encode("ab");
        bits.push_str(&code[..code.len() - 1]);
        assert_eq!(codec.decode(&bits), "");
        assert!(matches!(codec.try_decode(&bits), Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn test_empty_source() {
        init();
        let codec = TextCodec::new("");
        assert!(codec.is_empty());
        assert!(codec.tree().is_empty());
        assert_eq!(codec.encode(""), "");
        assert_eq!(codec.try_encode(""), Ok(String::new()));
        assert_eq!(codec.decode(""), "");
        assert_eq!(codec.try_decode(""), Ok(String::new()));
        assert_eq!(codec.decode("0"), "");
        assert_eq!(codec.try_decode("1"), Err(DecodeError::EmptyTree));
        assert_eq!(codec.encode("a"), "");
    }

    #[test]
    fn test_unreadable_source() {
        init();
        let codec = TextCodec::from_reader(&[b'a', 0xff][..]);
        assert!(codec.is_empty());

        // Latin-1 "café" is not UTF-8.
        let codec = TextCodec::from_reader(&[b'c', b'a', b'f', 0xe9][..]);
        assert!(codec.is_empty());
        assert_eq!(codec.decode("0"), "");

        let codec = TextCodec::open("/nonexistent/huffman-text/source.txt");
        assert!(codec.is_empty());

        let codec = TextCodec::new("ab");
        assert_eq!(codec.encode_reader(&[b'a', 0xff][..]), "");
        assert!(matches!(codec.try_encode_reader(&[0xff][..]), Err(Error::Io(_))));
        assert!(matches!(codec.try_encode_reader(&b"c"[..]), Err(Error::Encode(_))));
        assert_eq!(codec.encode_file("/nonexistent/huffman-text/source.txt"), "");
    }

    #[test]
    fn test_file() {
        init();
        let path = std::env::temp_dir().join(format!("huffman-text-{}.txt", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            file.write_all(b"one\ntwo\nthree\n").unwrap();
        }

        let codec = TextCodec::open(&path);
        assert_eq!(codec.frequencies().get(Symbol::LineBreak), Some(3));
        let bits = codec.encode_file(&path);
        assert_eq!(bits, codec.encode("one\ntwo\nthree\n"));
        assert_eq!(codec.decode(&bits), "one\ntwo\nthree\n");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_encode_other_text() {
        let codec = TextCodec::new("hello world\n");
        let bits = codec.encode("low\nword");
        assert_eq!(codec.decode(&bits), "low\nword");
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TextCodec>();
    }
}
