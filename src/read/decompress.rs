//! APIs to decompress the container file's row blocks.
use std::io::Read;

use fallible_streaming_iterator::FallibleStreamingIterator;

use crate::error::{Error, Result};

use super::BlockStreamIterator;
use super::Compression;

/// Decompresses a block.
/// Returns whether the buffers where swapped.
fn decompress_block(
    block: &mut Vec<u8>,
    decompress: &mut Vec<u8>,
    compression: Option<Compression>,
) -> Result<bool> {
    match compression {
        None => {
            std::mem::swap(block, decompress);
            Ok(true)
        }
        #[cfg(feature = "compression")]
        Some(Compression::Deflate) => {
            decompress.clear();
            let mut decoder = libflate::deflate::Decoder::new(&block[..]);
            decoder.read_to_end(decompress)?;
            Ok(false)
        }
        #[cfg(feature = "compression")]
        Some(Compression::Snappy) => {
            // the last 4 bytes are a crc32 of the decompressed block
            let len = snap::raw::decompress_len(&block[..block.len() - 4])
                .map_err(|_| Error::OutOfSpec("invalid snappy-compressed block".to_string()))?;
            decompress.clear();
            decompress.resize(len, 0);
            snap::raw::Decoder::new()
                .decompress(&block[..block.len() - 4], decompress)
                .map_err(|_| Error::OutOfSpec("invalid snappy-compressed block".to_string()))?;
            Ok(false)
        }
        #[cfg(not(feature = "compression"))]
        Some(Compression::Deflate) => Err(Error::Other(
            "the file is deflate-encoded but feature 'compression' is not active".to_string(),
        )),
        #[cfg(not(feature = "compression"))]
        Some(Compression::Snappy) => Err(Error::Other(
            "the file is snappy-encoded but feature 'compression' is not active".to_string(),
        )),
    }
}

/// [`FallibleStreamingIterator`] of decompressed blocks of rows
pub struct Decompressor<R: Read> {
    blocks: BlockStreamIterator<R>,
    codec: Option<Compression>,
    buf: (Vec<u8>, usize),
    was_swapped: bool,
}

impl<R: Read> Decompressor<R> {
    /// Creates a new [`Decompressor`].
    pub fn new(blocks: BlockStreamIterator<R>, codec: Option<Compression>) -> Self {
        Self {
            blocks,
            codec,
            buf: (vec![], 0),
            was_swapped: false,
        }
    }

    /// Deconstructs itself into its internal reader
    pub fn into_inner(self) -> R {
        self.blocks.into_inner().0
    }
}

impl<R: Read> FallibleStreamingIterator for Decompressor<R> {
    type Error = Error;
    type Item = (Vec<u8>, usize);

    fn advance(&mut self) -> Result<()> {
        if self.was_swapped {
            std::mem::swap(self.blocks.buffer(), &mut self.buf.0);
        }
        self.blocks.advance()?;
        self.was_swapped = decompress_block(self.blocks.buffer(), &mut self.buf.0, self.codec)?;
        self.buf.1 = self.blocks.get().map(|(_, rows)| *rows).unwrap_or_default();
        Ok(())
    }

    fn get(&self) -> Option<&Self::Item> {
        if self.buf.1 > 0 {
            Some(&self.buf)
        } else {
            None
        }
    }
}
