//! Rendering of a [`Datum`] as one line of text.
use std::io::Write;

use crate::datum::Datum;
use crate::error::{Error, Result};

/// Longest byte-string value the renderer accepts, in bytes.
///
/// A value above this length is an error, never a truncation.
pub const MAX_VALUE_LENGTH: usize = 8192;

/// Text written for a null value.
pub const NULL_TEXT: &[u8] = b"NA";

fn lexical_to_bytes_mut<N: lexical_core::ToLexical>(n: N, buf: &mut Vec<u8>) {
    buf.clear();
    buf.reserve(N::FORMATTED_SIZE_DECIMAL);
    unsafe {
        // JUSTIFICATION
        //  Benefit
        //      Allows using the faster serializer lexical core and convert to string
        //  Soundness
        //      Length of buf is set as written length afterwards. lexical_core
        //      creates a ASCII string, so it is valid utf8
        let slice = std::slice::from_raw_parts_mut(buf.as_mut_ptr(), buf.capacity());
        let len = lexical_core::write(n, slice).len();
        buf.set_len(len);
    }
}

/// Writes `datum` to `out` as one newline-terminated line.
/// # Error
/// This function errors iff a byte-string is longer than
/// [`MAX_VALUE_LENGTH`], or the write itself fails.
pub fn write_line<W: Write>(datum: &Datum, out: &mut W) -> Result<()> {
    let mut buf = vec![];
    match datum {
        Datum::Null => out.write_all(NULL_TEXT)?,
        Datum::Int(value) => {
            lexical_to_bytes_mut(*value, &mut buf);
            out.write_all(&buf)?;
        }
        Datum::Float(value) => {
            lexical_to_bytes_mut(*value, &mut buf);
            out.write_all(&buf)?;
        }
        Datum::Bytes(bytes) => {
            if bytes.len() > MAX_VALUE_LENGTH {
                return Err(Error::Render(format!(
                    "value of length {} exceeds the maximum of {} bytes",
                    bytes.len(),
                    MAX_VALUE_LENGTH
                )));
            }
            out.write_all(bytes)?;
        }
    }
    out.write_all(b"\n")?;
    Ok(())
}
