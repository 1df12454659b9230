use std::collections::HashMap;
use std::io::Read;

use avro_rs::Schema as AvroSchema;

use crate::error::{Error, Result};

use super::util;
use super::Compression;

const MAGIC: [u8; 4] = [b'O', b'b', b'j', 1u8];

fn read_magic<R: Read>(reader: &mut R) -> Result<()> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(Error::OutOfSpec(
            "the file does not start with the Avro object container magic".to_string(),
        ));
    }
    Ok(())
}

fn read_binary<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let len = util::zigzag_i64(reader)? as usize;
    let mut buf = vec![];
    reader.take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(Error::OutOfSpec(
            "the header ended in the middle of an entry".to_string(),
        ));
    }
    Ok(buf)
}

fn read_header<R: Read>(reader: &mut R) -> Result<HashMap<String, Vec<u8>>> {
    let mut items = HashMap::new();
    loop {
        let len = util::zigzag_i64(reader)?;
        if len == 0 {
            break;
        }
        // a negative count is followed by the total size of the block in bytes
        let len = if len < 0 {
            let _ = util::zigzag_i64(reader)?;
            -len
        } else {
            len
        };
        for _ in 0..len {
            let key = read_binary(reader)?;
            let key = String::from_utf8(key).map_err(|_| {
                Error::OutOfSpec("the metadata keys are not valid utf8".to_string())
            })?;
            let value = read_binary(reader)?;
            items.insert(key, value);
        }
    }
    Ok(items)
}

fn read_file_marker<R: Read>(reader: &mut R) -> Result<[u8; 16]> {
    let mut marker = [0u8; 16];
    reader.read_exact(&mut marker)?;
    Ok(marker)
}

/// Deserializes the metadata map into the writer [`AvroSchema`] and optional [`Compression`].
fn deserialize_header(
    header: HashMap<String, Vec<u8>>,
) -> Result<(AvroSchema, Option<Compression>)> {
    let json = header
        .get("avro.schema")
        .and_then(|bytes| serde_json::from_slice(bytes.as_ref()).ok())
        .ok_or_else(|| {
            Error::Schema("the header does not declare a writer schema under 'avro.schema'".to_string())
        })?;
    let schema = AvroSchema::parse(&json)?;

    let compression = header.get("avro.codec").and_then(|bytes| {
        let bytes: &[u8] = bytes.as_ref();
        match bytes {
            b"snappy" => Some(Compression::Snappy),
            b"deflate" => Some(Compression::Deflate),
            _ => None,
        }
    });
    Ok((schema, compression))
}

/// Reads the header from `reader`, returning the writer's [`AvroSchema`],
/// [`Compression`] and the file's sync marker.
/// # Error
/// This function errors iff the header is not a valid avro file header.
pub(crate) fn read_schema<R: Read>(
    reader: &mut R,
) -> Result<(AvroSchema, Option<Compression>, [u8; 16])> {
    read_magic(reader)?;
    let header = read_header(reader)?;
    let (schema, compression) = deserialize_header(header)?;
    let marker = read_file_marker(reader)?;
    Ok((schema, compression, marker))
}
