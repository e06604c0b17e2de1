//! LZSS dictionary coder.
//!
//! A sliding-window coder in the Storer-Szymanski family, kept bit-compatible
//! with the historical module format: a 4096-byte ring buffer initially
//! filled with spaces, matches of 3..=18 bytes, and a flag byte in front of
//! every eight items. A set flag bit marks a literal byte; a clear bit marks
//! a two-byte `(position, length)` pair with 12 position bits and 4 bits of
//! length minus the minimum match.
//!
//! The encoder finds matches with the classic binary-tree search over ring
//! positions: one tree root per possible first byte, and every ring position
//! linked as a node keyed by the 18-byte string starting there.

use quire_common::{Result, error::Error};

use crate::{BlockCodec, CodecKind};

/// Ring buffer size. Positions fit in 12 bits.
const RING_SIZE: usize = 4096;

const RING_MASK: usize = RING_SIZE - 1;

/// Longest match that a `(position, length)` pair can express.
const MAX_MATCH: usize = 18;

/// Shortest match worth a two-byte pair; shorter runs are sent as literals.
const MIN_MATCH: usize = 3;

/// Sentinel for vacant tree links.
const NOT_USED: u16 = RING_SIZE as u16;

pub struct LzssCodec;

impl BlockCodec for LzssCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Lzss
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(encode(data))
    }

    fn uncompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        decode(data)
    }
}

/// Match-finder state: the ring buffer plus the binary search trees.
///
/// `left`/`dad` are indexed by ring position; `right` additionally holds the
/// 256 per-first-byte tree roots at `RING_SIZE + 1 + byte`. Index
/// `RING_SIZE` is the shared scratch slot written through `NOT_USED` links.
struct MatchTree {
    /// Ring plus `MAX_MATCH - 1` mirrored bytes so string comparison never
    /// has to wrap.
    ring: Vec<u8>,
    dad: Vec<u16>,
    left: Vec<u16>,
    right: Vec<u16>,
    match_position: usize,
    match_length: usize,
}

impl MatchTree {
    fn new() -> MatchTree {
        MatchTree {
            ring: vec![b' '; RING_SIZE + MAX_MATCH - 1],
            dad: vec![NOT_USED; RING_SIZE + 1],
            left: vec![NOT_USED; RING_SIZE + 1],
            right: vec![NOT_USED; RING_SIZE + 257],
            match_position: 0,
            match_length: 0,
        }
    }

    fn root_of(&self, byte: u8) -> usize {
        RING_SIZE + 1 + byte as usize
    }

    /// Inserts the string starting at ring position `pos` and records the
    /// longest match against the strings already in the tree.
    ///
    /// A full-length match evicts the older node in favor of `pos`, since
    /// the older position will slide out of the window sooner.
    fn insert(&mut self, pos: usize) {
        debug_assert!(pos < RING_SIZE);

        let mut cmp = 1i32;
        let mut p = self.root_of(self.ring[pos]);

        self.left[pos] = NOT_USED;
        self.right[pos] = NOT_USED;
        self.match_length = 0;

        loop {
            if cmp >= 0 {
                if self.right[p] != NOT_USED {
                    p = self.right[p] as usize;
                } else {
                    self.right[p] = pos as u16;
                    self.dad[pos] = p as u16;
                    return;
                }
            } else if self.left[p] != NOT_USED {
                p = self.left[p] as usize;
            } else {
                self.left[p] = pos as u16;
                self.dad[pos] = p as u16;
                return;
            }

            // First bytes are equal by construction (same root), so compare
            // from the second byte on.
            let mut i = 1;
            while i < MAX_MATCH {
                cmp = self.ring[pos + i] as i32 - self.ring[p + i] as i32;
                if cmp != 0 {
                    break;
                }
                i += 1;
            }

            if i > self.match_length {
                self.match_position = p;
                self.match_length = i;
                if i >= MAX_MATCH {
                    break;
                }
            }
        }

        // Replace node p with pos.
        self.dad[pos] = self.dad[p];
        self.left[pos] = self.left[p];
        self.right[pos] = self.right[p];
        self.dad[self.left[p] as usize] = pos as u16;
        self.dad[self.right[p] as usize] = pos as u16;
        if self.right[self.dad[p] as usize] == p as u16 {
            self.right[self.dad[p] as usize] = pos as u16;
        } else {
            self.left[self.dad[p] as usize] = pos as u16;
        }
        self.dad[p] = NOT_USED;
    }

    /// Unlinks the node at ring position `node`, if present.
    fn delete(&mut self, node: usize) {
        debug_assert!(node < RING_SIZE);

        if self.dad[node] == NOT_USED {
            return;
        }

        let q;
        if self.right[node] == NOT_USED {
            q = self.left[node] as usize;
        } else if self.left[node] == NOT_USED {
            q = self.right[node] as usize;
        } else {
            let mut t = self.left[node] as usize;
            if self.right[t] != NOT_USED {
                while self.right[t] != NOT_USED {
                    t = self.right[t] as usize;
                }
                self.right[self.dad[t] as usize] = self.left[t];
                self.dad[self.left[t] as usize] = self.dad[t];
                self.left[t] = self.left[node];
                self.dad[self.left[node] as usize] = t as u16;
            }
            self.right[t] = self.right[node];
            self.dad[self.right[node] as usize] = t as u16;
            q = t;
        }

        self.dad[q] = self.dad[node];
        if self.right[self.dad[node] as usize] == node as u16 {
            self.right[self.dad[node] as usize] = q as u16;
        } else {
            self.left[self.dad[node] as usize] = q as u16;
        }
        self.dad[node] = NOT_USED;
    }
}

/// Compresses `input`. Empty input encodes to an empty buffer.
pub fn encode(input: &[u8]) -> Vec<u8> {
    if input.is_empty() {
        return Vec::new();
    }

    let mut tree = MatchTree::new();
    let mut out = Vec::with_capacity(input.len() / 2 + 17);

    // code_buf[0] collects the eight item flags; up to eight two-byte pairs
    // follow, hence the fixed 17-byte staging buffer.
    let mut code_buf = [0u8; 17];
    let mut code_pos = 1usize;
    let mut mask = 1u8;

    let mut s = 0usize;
    let mut r = RING_SIZE - MAX_MATCH;
    let mut read = input.len().min(MAX_MATCH);
    let mut len = read;
    tree.ring[r..r + len].copy_from_slice(&input[..len]);

    // Seed the tree with the space-prefixed strings just behind r, then the
    // string at r itself, which primes the first match.
    for i in 1..=MAX_MATCH {
        tree.insert(r - i);
    }
    tree.insert(r);

    loop {
        // The match may run past the bytes actually loaded near the end.
        let mut match_length = tree.match_length.min(len);
        let match_position = tree.match_position;

        if match_length < MIN_MATCH {
            match_length = 1;
            code_buf[0] |= mask;
            code_buf[code_pos] = tree.ring[r];
            code_pos += 1;
        } else {
            code_buf[code_pos] = match_position as u8;
            code_buf[code_pos + 1] =
                (((match_position >> 4) & 0xF0) | (match_length - MIN_MATCH)) as u8;
            code_pos += 2;
        }

        mask = mask.wrapping_shl(1);
        if mask == 0 {
            out.extend_from_slice(&code_buf[..code_pos]);
            code_buf[0] = 0;
            code_pos = 1;
            mask = 1;
        }

        let last_match_length = match_length;
        let mut i = 0;
        while i < last_match_length {
            let Some(&c) = input.get(read) else { break };
            read += 1;

            tree.delete(s);
            tree.ring[s] = c;
            if s < MAX_MATCH - 1 {
                // Mirror the front of the ring past its end so comparisons
                // can run straight through.
                tree.ring[s + RING_SIZE] = c;
            }
            s = (s + 1) & RING_MASK;
            r = (r + 1) & RING_MASK;
            tree.insert(r);
            i += 1;
        }

        // Input exhausted: drain the bytes still buffered in the ring.
        while i < last_match_length {
            tree.delete(s);
            s = (s + 1) & RING_MASK;
            r = (r + 1) & RING_MASK;
            len -= 1;
            if len != 0 {
                tree.insert(r);
            }
            i += 1;
        }

        if len == 0 {
            break;
        }
    }

    if code_pos > 1 {
        out.extend_from_slice(&code_buf[..code_pos]);
    }
    out
}

/// Decompresses `input`, rebuilding the ring buffer from the stream.
///
/// The stream has no length header; it ends at the first item boundary with
/// no bytes left. Unused high bits of a final flag byte land on that rule. A
/// `(position, length)` pair cut in half, though, can only be truncation and
/// fails.
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut ring = vec![b' '; RING_SIZE];
    let mut r = RING_SIZE - MAX_MATCH;
    let mut out = Vec::with_capacity(input.len() * 2);

    let mut pos = 0usize;
    let mut flags = 0u32;
    let mut flag_count = 0u32;

    loop {
        if flag_count > 0 {
            flags >>= 1;
            flag_count -= 1;
        } else {
            let Some(&f) = input.get(pos) else { break };
            pos += 1;
            flags = f as u32;
            // Seven shifts expose all eight bits.
            flag_count = 7;
        }

        if flags & 1 != 0 {
            let Some(&c) = input.get(pos) else { break };
            pos += 1;
            out.push(c);
            ring[r] = c;
            r = (r + 1) & RING_MASK;
        } else {
            let (Some(&c0), second) = (input.get(pos), input.get(pos + 1)) else {
                break;
            };
            let Some(&c1) = second else {
                return Err(Error::corrupt_data(
                    "lzss stream",
                    format!("position/length pair truncated at byte {}", pos),
                ));
            };
            pos += 2;

            let from = c0 as usize | ((c1 & 0xF0) as usize) << 4;
            let length = (c1 & 0x0F) as usize + MIN_MATCH;
            for k in 0..length {
                let b = ring[(from + k) & RING_MASK];
                out.push(b);
                ring[r] = b;
                r = (r + 1) & RING_MASK;
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(data: &[u8]) {
        let packed = encode(data);
        let unpacked = decode(&packed).unwrap();
        assert_eq!(unpacked, data, "round trip failed for {} bytes", data.len());
    }

    fn english_sample(min_len: usize) -> Vec<u8> {
        const WORDS: &[&str] = &[
            "and", "the", "of", "unto", "in", "that", "shall", "for", "his",
            "they", "all", "said", "with", "upon", "which", "their", "not",
            "them", "was", "when", "out", "then", "were", "from", "came",
            "king", "house", "children", "people", "land", "day", "man",
            "went", "before", "because", "great", "against", "made",
        ];
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        let mut text = String::new();
        while text.len() < min_len {
            for _ in 0..12 {
                text.push_str(WORDS[rng.usize(..WORDS.len())]);
                text.push(' ');
            }
            text.pop();
            text.push_str(".\n");
        }
        text.into_bytes()
    }

    #[test]
    fn empty_input_round_trips_to_empty() {
        assert!(encode(&[]).is_empty());
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn inputs_below_minimum_match_are_literals() {
        round_trip(b"a");
        round_trip(b"ab");
        // Two flags plus two literal bytes, no pairs possible.
        assert_eq!(encode(b"ab").len(), 3);
    }

    #[test]
    fn repetitive_input_compresses() {
        let data = vec![b'x'; 4000];
        let packed = encode(&data);
        assert!(packed.len() < data.len() / 4);
        assert_eq!(decode(&packed).unwrap(), data);
    }

    #[test]
    fn high_bytes_round_trip() {
        let mut rng = fastrand::Rng::with_seed(42);
        for len in [1usize, 17, 256, 4096, 9000] {
            let data: Vec<u8> = (0..len).map(|_| rng.u8(..)).collect();
            round_trip(&data);
        }
    }

    #[test]
    fn window_boundary_positions_round_trip() {
        // Long runs force matches at every ring position, including those
        // whose low position byte is >= 0x80.
        let mut data = Vec::new();
        for i in 0u32..3000 {
            data.extend_from_slice(format!("verse {} text;", i % 97).as_bytes());
        }
        round_trip(&data);
    }

    #[test]
    fn ten_thousand_byte_english_text_round_trips() {
        let text = english_sample(10_000);
        assert!(text.len() >= 10_000);
        let packed = encode(&text);
        assert!(packed.len() < text.len());
        assert_eq!(decode(&packed).unwrap(), text);
    }

    #[test]
    fn truncated_pair_is_corrupt() {
        // Flag byte announcing a pair, then only one of its two bytes.
        let err = decode(&[0x00, 0x12]).unwrap_err();
        assert!(matches!(
            err.kind(),
            quire_common::error::ErrorKind::CorruptData { .. }
        ));
    }

    #[test]
    fn trailing_flag_bits_terminate_cleanly() {
        // "ab" encodes to one flag byte and two literals; the six unused
        // flag bits must not trip the decoder.
        let packed = encode(b"ab");
        assert_eq!(decode(&packed).unwrap(), b"ab");
    }
}
