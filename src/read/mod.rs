//! APIs to stream one column's values out of an Avro object container file.
use std::io::Read;

use avro_rs::Schema as AvroSchema;
use fallible_streaming_iterator::FallibleStreamingIterator;

mod block;
mod decompress;
mod deserialize;
mod header;
mod schema;
mod util;

pub use block::BlockStreamIterator;
pub use decompress::Decompressor;
pub use schema::{project, Projection};

use crate::datum::Datum;
use crate::error::Result;

/// Valid compressions
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Compression {
    /// Deflate
    Deflate,
    /// Snappy
    Snappy,
}

/// Reads the metadata from `reader` into the writer's [`AvroSchema`],
/// [`Compression`] and magic marker.
#[allow(clippy::type_complexity)]
pub fn read_metadata<R: Read>(
    reader: &mut R,
) -> Result<(AvroSchema, Option<Compression>, [u8; 16])> {
    header::read_schema(reader)
}

/// Single threaded, blocking reader of the projected column; [`Iterator`] of
/// [`Datum`].
///
/// Rows come out in the order they occur in the file. A clean end of the
/// stream ends the iterator; any mid-block failure is an error item.
pub struct ColumnReader<R: Read> {
    iter: Decompressor<R>,
    projection: Projection,
    offset: usize,
    remaining: usize,
}

impl<R: Read> ColumnReader<R> {
    /// Creates a new [`ColumnReader`].
    pub fn new(iter: Decompressor<R>, projection: Projection) -> Self {
        Self {
            iter,
            projection,
            offset: 0,
            remaining: 0,
        }
    }
}

impl<R: Read> Iterator for ColumnReader<R> {
    type Item = Result<Datum>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            match self.iter.next() {
                Ok(Some((_, rows))) => {
                    self.remaining = *rows;
                    self.offset = 0;
                }
                Ok(None) => return None,
                Err(error) => return Some(Err(error)),
            }
        }
        let (data, _) = self.iter.get()?;
        let block = &data[self.offset..];
        match deserialize::read_row(&self.projection, block) {
            Ok((datum, rest)) => {
                self.offset += block.len() - rest.len();
                self.remaining -= 1;
                Some(Ok(datum))
            }
            Err(error) => Some(Err(error)),
        }
    }
}
