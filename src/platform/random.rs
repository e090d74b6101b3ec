//! Random byte generation from a word-oriented hardware source
//!
//! Hardware generators hand out one word per read. [`fill_block`] writes a
//! whole word at a time wherever a full word fits and the destination offset
//! is aligned to the word width, and falls back to single bytes (the low byte
//! of a fresh word) for misaligned heads and short tails.
//!
//! Multi-byte chunks are stored in native byte order. Consumers only rely on
//! the output being uniformly random, not on a particular byte layout.

/// Word type a [`WordSource`] produces
pub trait RandomWord: Copy {
    /// Width in bytes, also the alignment a chunk write requires
    const WIDTH: usize;

    /// Writes the word in native byte order; `out` is exactly `WIDTH` long
    fn write_native(self, out: &mut [u8]);

    /// Least significant byte, used for single-byte writes
    fn low_byte(self) -> u8;
}

macro_rules! impl_random_word {
    ($($ty:ty),*) => {
        $(
            impl RandomWord for $ty {
                const WIDTH: usize = core::mem::size_of::<$ty>();

                fn write_native(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }

                fn low_byte(self) -> u8 {
                    self as u8
                }
            }
        )*
    };
}

impl_random_word!(u8, u16, u32, u64);

/// A generator that produces one random word per read
pub trait WordSource {
    type Word: RandomWord;
    type Error;

    /// Reads one fresh word; never reuses a previous one
    fn next_word(&mut self) -> Result<Self::Word, Self::Error>;
}

impl<S: WordSource + ?Sized> WordSource for &mut S {
    type Word = S::Word;
    type Error = S::Error;

    fn next_word(&mut self) -> Result<Self::Word, Self::Error> {
        (**self).next_word()
    }
}

/// Overwrites every byte of `out` with output from `source`.
///
/// An empty buffer performs no reads.
pub fn fill_block<S: WordSource>(source: &mut S, out: &mut [u8]) -> Result<(), S::Error> {
    let width = S::Word::WIDTH;
    let mut offset = 0;

    while offset < out.len() {
        let rest = &mut out[offset..];
        let aligned = (rest.as_ptr() as usize) % width == 0;

        if aligned && rest.len() >= width {
            source.next_word()?.write_native(&mut rest[..width]);
            offset += width;
        } else {
            rest[0] = source.next_word()?.low_byte();
            offset += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use nanorand::{Rng, WyRand};

    /// Emits 1, 2, 3, ... with every byte of a word set to the counter, so
    /// each written byte identifies the read that produced it.
    #[derive(Default)]
    struct Counting {
        reads: u8,
    }

    impl WordSource for Counting {
        type Word = u32;
        type Error = Infallible;

        fn next_word(&mut self) -> Result<u32, Infallible> {
            self.reads += 1;
            Ok(u32::from_ne_bytes([self.reads; 4]))
        }
    }

    struct Seeded(WyRand);

    impl WordSource for Seeded {
        type Word = u64;
        type Error = Infallible;

        fn next_word(&mut self) -> Result<u64, Infallible> {
            Ok(self.0.generate::<u64>())
        }
    }

    struct Broken;

    impl WordSource for Broken {
        type Word = u32;
        type Error = &'static str;

        fn next_word(&mut self) -> Result<u32, &'static str> {
            Err("no entropy")
        }
    }

    #[repr(C, align(8))]
    struct Aligned([u8; 32]);

    #[test]
    fn empty_buffer_reads_nothing() {
        let mut source = Counting::default();
        fill_block(&mut source, &mut []).unwrap();
        assert_eq!(source.reads, 0);
    }

    #[test]
    fn aligned_multiple_uses_whole_words() {
        let mut buf = Aligned([0; 32]);
        let mut source = Counting::default();

        fill_block(&mut source, &mut buf.0[..16]).unwrap();

        assert_eq!(source.reads, 4);
        assert_eq!(&buf.0[..16], &[1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4]);
        assert!(buf.0[16..].iter().all(|&b| b == 0));
    }

    #[test]
    fn short_tail_is_filled_bytewise() {
        let mut buf = Aligned([0; 32]);
        let mut source = Counting::default();

        fill_block(&mut source, &mut buf.0[..7]).unwrap();

        // One word for bytes 0..4, then one read per tail byte
        assert_eq!(source.reads, 4);
        assert_eq!(&buf.0[..7], &[1, 1, 1, 1, 2, 3, 4]);
        assert_eq!(buf.0[7], 0);
    }

    #[test]
    fn misaligned_head_is_filled_bytewise() {
        let mut buf = Aligned([0; 32]);
        let mut source = Counting::default();

        fill_block(&mut source, &mut buf.0[1..10]).unwrap();

        // Bytes 1..4 single, 4..8 one word, 8..10 single
        assert_eq!(source.reads, 6);
        assert_eq!(&buf.0[..11], &[0, 1, 2, 3, 4, 4, 4, 4, 5, 6, 0]);
    }

    #[test]
    fn buffer_shorter_than_a_word() {
        let mut buf = Aligned([0; 32]);
        let mut source = Counting::default();

        fill_block(&mut source, &mut buf.0[..3]).unwrap();

        assert_eq!(source.reads, 3);
        assert_eq!(&buf.0[..4], &[1, 2, 3, 0]);
    }

    #[test]
    fn every_byte_is_written_for_any_length_and_offset() {
        for offset in 0..8 {
            for len in 0..=24 {
                let mut buf = Aligned([0; 32]);
                let mut source = Counting::default();

                fill_block(&mut source, &mut buf.0[offset..offset + len]).unwrap();

                let (before, rest) = buf.0.split_at(offset);
                let (filled, after) = rest.split_at(len);
                assert!(before.iter().all(|&b| b == 0), "offset {offset} len {len}");
                assert!(filled.iter().all(|&b| b != 0), "offset {offset} len {len}");
                assert!(after.iter().all(|&b| b == 0), "offset {offset} len {len}");
            }
        }
    }

    #[test]
    fn wide_words_follow_the_same_policy() {
        let mut buf = Aligned([0; 32]);
        let mut source = Seeded(WyRand::new_seed(0x5eed));

        fill_block(&mut source, &mut buf.0[..20]).unwrap();

        let mut expected = Seeded(WyRand::new_seed(0x5eed));
        let mut reference = [0u8; 20];
        for chunk in reference[..16].chunks_mut(8) {
            chunk.copy_from_slice(&expected.next_word().unwrap().to_ne_bytes());
        }
        for byte in &mut reference[16..] {
            *byte = expected.next_word().unwrap() as u8;
        }
        assert_eq!(&buf.0[..20], &reference);
    }

    #[test]
    fn source_error_is_propagated() {
        let mut buf = [0u8; 8];
        assert_eq!(fill_block(&mut Broken, &mut buf), Err("no entropy"));
    }
}
