//! SHA-1 core and the keyed-hash variant sealing the EEPROM.
//!
//! The console authenticates the record with a two-pass HMAC whose secret key
//! never leaves the factory. Each hardware revision instead ships the 5-word
//! intermediate states that result from hashing the padded key block (the
//! "middle message" trick), so both passes start from a precomputed state
//! with one 512-bit block already consumed.

use byteorder::{BigEndian, ByteOrder};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::Display;

use crate::error::EepromError;

pub const DIGEST_SIZE: usize = 20;
const BLOCK_SIZE: usize = 64;

const SHA1_INIT: [u32; 5] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];
const K: [u32; 4] = [0x5A827999, 0x6ED9EBA1, 0x8F1BBCDC, 0xCA62C1D6];

/// Hardware revisions with defined keyed-hash tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum XboxVersion {
    /// Debug/development kernels. Hash tables exist, but retail EEPROM
    /// detection never probes this revision.
    #[strum(to_string = "debug")]
    Debug = 0x09,
    #[strum(to_string = "1.0")]
    V1_0 = 0x0A,
    #[strum(to_string = "1.1")]
    V1_1 = 0x0B,
    #[strum(to_string = "1.6")]
    V1_6 = 0x0C,
}

impl XboxVersion {
    /// Revisions probed by EEPROM auto-detection, in search order.
    pub const DETECTABLE: [XboxVersion; 3] =
        [XboxVersion::V1_0, XboxVersion::V1_1, XboxVersion::V1_6];

    /// Intermediate hash state for the inner HMAC pass.
    fn inner_state(self) -> [u32; 5] {
        match self {
            XboxVersion::Debug => [0x85F9E51A, 0xE04613D2, 0x6D86A50C, 0x77C32E3C, 0x4BD717A4],
            XboxVersion::V1_0 => [0x72127625, 0x336472B9, 0xBE609BEA, 0xF55E226B, 0x99958DAC],
            XboxVersion::V1_1 => [0x39B06E79, 0xC9BD25E8, 0xDBC6B498, 0x40B4389D, 0x86BBD7ED],
            XboxVersion::V1_6 => [0x8058763A, 0xF97D4E0E, 0x865A9762, 0x8A3D920D, 0x08995B2C],
        }
    }

    /// Intermediate hash state for the outer HMAC pass.
    fn outer_state(self) -> [u32; 5] {
        match self {
            XboxVersion::Debug => [0x5D7A9C6B, 0xE1922BEB, 0xB82CCDBC, 0x3137AB34, 0x486B52B3],
            XboxVersion::V1_0 => [0x76441D41, 0x4DE82659, 0x2E8EF85E, 0xB256FACA, 0xC4FE2DE8],
            XboxVersion::V1_1 => [0x9B49BED3, 0x84B430FC, 0x6B8749CD, 0xEBFE5FE5, 0xD96E7393],
            XboxVersion::V1_6 => [0x01075307, 0xA2F1E037, 0x1186EEEA, 0x88DA9992, 0x168A5609],
        }
    }
}

/// SHA-1 message hasher.
///
/// [`finalize`](Sha1::finalize) consumes the hasher, so a finished digest can
/// neither be extended nor finalized twice.
pub struct Sha1 {
    hash: [u32; 5],
    bit_count: u64,
    block: [u8; BLOCK_SIZE],
    block_len: usize,
}

impl Sha1 {
    pub fn new() -> Self {
        Self::with_state(SHA1_INIT, 0)
    }

    /// Start from a precomputed intermediate state with `bit_count` message
    /// bits already consumed.
    fn with_state(hash: [u32; 5], bit_count: u64) -> Self {
        Self {
            hash,
            bit_count,
            block: [0; BLOCK_SIZE],
            block_len: 0,
        }
    }

    /// Feed message bytes into the hash.
    pub fn input(&mut self, data: &[u8]) -> Result<(), EepromError> {
        self.bit_count = (data.len() as u64)
            .checked_mul(8)
            .and_then(|bits| self.bit_count.checked_add(bits))
            .ok_or(EepromError::MessageTooLong)?;

        for &byte in data {
            self.block[self.block_len] = byte;
            self.block_len += 1;
            if self.block_len == BLOCK_SIZE {
                self.process_block();
            }
        }
        Ok(())
    }

    /// Pad the message, append the bit length, and produce the digest.
    pub fn finalize(mut self) -> [u8; DIGEST_SIZE] {
        self.pad_message();

        let mut digest = [0u8; DIGEST_SIZE];
        for (i, word) in self.hash.iter().enumerate() {
            BigEndian::write_u32(&mut digest[i * 4..i * 4 + 4], *word);
        }
        digest
    }

    fn pad_message(&mut self) {
        let bit_count = self.bit_count;

        // The 0x80 marker always fits: a full block is compressed as soon as
        // it fills. If the 8-byte length no longer fits, spill into an extra
        // block.
        self.block[self.block_len] = 0x80;
        self.block_len += 1;
        if self.block_len > BLOCK_SIZE - 8 {
            self.block[self.block_len..].fill(0);
            self.process_block();
        }

        self.block[self.block_len..BLOCK_SIZE - 8].fill(0);
        BigEndian::write_u64(&mut self.block[BLOCK_SIZE - 8..], bit_count);
        self.process_block();
    }

    fn process_block(&mut self) {
        let mut w = [0u32; 80];
        for (t, word) in w.iter_mut().take(16).enumerate() {
            *word = BigEndian::read_u32(&self.block[t * 4..t * 4 + 4]);
        }
        for t in 16..80 {
            w[t] = (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = self.hash;
        for (t, &word) in w.iter().enumerate() {
            let (f, k) = match t {
                0..=19 => ((b & c) | (!b & d), K[0]),
                20..=39 => (b ^ c ^ d, K[1]),
                40..=59 => ((b & c) | (b & d) | (c & d), K[2]),
                _ => (b ^ c ^ d, K[3]),
            };
            let temp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(word)
                .wrapping_add(k);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;
        }

        self.hash[0] = self.hash[0].wrapping_add(a);
        self.hash[1] = self.hash[1].wrapping_add(b);
        self.hash[2] = self.hash[2].wrapping_add(c);
        self.hash[3] = self.hash[3].wrapping_add(d);
        self.hash[4] = self.hash[4].wrapping_add(e);

        self.block_len = 0;
    }
}

impl Default for Sha1 {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the Xbox keyed hash over `fields` concatenated in call order.
///
/// Both passes are seeded from `version`'s precomputed tables with the
/// virtual bit count preset to 512 (one key block pre-consumed), then padded
/// and finalized as usual.
pub fn xbox_hmac_sha1(
    version: XboxVersion,
    fields: &[&[u8]],
) -> Result<[u8; DIGEST_SIZE], EepromError> {
    let mut inner = Sha1::with_state(version.inner_state(), 512);
    for field in fields {
        inner.input(field)?;
    }
    let inner_digest = inner.finalize();

    let mut outer = Sha1::with_state(version.outer_state(), 512);
    outer.input(&inner_digest)?;
    Ok(outer.finalize())
}
