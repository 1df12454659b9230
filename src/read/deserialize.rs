//! Decoding of one row: the fields around the projected column are walked
//! over, the projected column is materialized into a [`Datum`].
use avro_rs::Schema as AvroSchema;

use crate::datum::Datum;
use crate::error::{Error, Result};

use super::schema::Projection;
use super::util;

fn take(block: &[u8], n: usize) -> Result<(&[u8], &[u8])> {
    if n > block.len() {
        return Err(Error::OutOfSpec(
            "a block ended in the middle of a value".to_string(),
        ));
    }
    Ok(block.split_at(n))
}

fn skip_binary(mut block: &[u8]) -> Result<&[u8]> {
    let len = util::zigzag_i64(&mut block)? as usize;
    Ok(take(block, len)?.1)
}

/// Advances `block` past one value of type `schema` without materializing it.
fn skip<'a>(schema: &AvroSchema, mut block: &'a [u8]) -> Result<&'a [u8]> {
    match schema {
        AvroSchema::Null => {}
        AvroSchema::Boolean => block = take(block, 1)?.1,
        AvroSchema::Int
        | AvroSchema::Long
        | AvroSchema::Date
        | AvroSchema::TimeMillis
        | AvroSchema::TimeMicros
        | AvroSchema::TimestampMillis
        | AvroSchema::TimestampMicros
        | AvroSchema::Enum { .. } => {
            util::zigzag_i64(&mut block)?;
        }
        AvroSchema::Float => block = take(block, 4)?.1,
        AvroSchema::Double => block = take(block, 8)?.1,
        AvroSchema::Bytes | AvroSchema::String | AvroSchema::Uuid => block = skip_binary(block)?,
        AvroSchema::Fixed { size, .. } => block = take(block, *size)?.1,
        AvroSchema::Duration => block = take(block, 12)?.1,
        AvroSchema::Decimal { inner, .. } => block = skip(inner, block)?,
        AvroSchema::Union(union) => {
            let index = util::zigzag_i64(&mut block)? as usize;
            let variant = union.variants().get(index).ok_or_else(|| {
                Error::OutOfSpec(format!("union index {} has no corresponding branch", index))
            })?;
            block = skip(variant, block)?;
        }
        AvroSchema::Array(items) => loop {
            let len = util::zigzag_i64(&mut block)?;
            if len == 0 {
                break;
            }
            if len < 0 {
                // a negative count is followed by the total size of the block in bytes
                let bytes = util::zigzag_i64(&mut block)? as usize;
                block = take(block, bytes)?.1;
            } else {
                for _ in 0..len {
                    block = skip(items, block)?;
                }
            }
        },
        AvroSchema::Map(values) => loop {
            let len = util::zigzag_i64(&mut block)?;
            if len == 0 {
                break;
            }
            if len < 0 {
                let bytes = util::zigzag_i64(&mut block)? as usize;
                block = take(block, bytes)?.1;
            } else {
                for _ in 0..len {
                    block = skip_binary(block)?;
                    block = skip(values, block)?;
                }
            }
        },
        AvroSchema::Record { fields, .. } => {
            for field in fields {
                block = skip(&field.schema, block)?;
            }
        }
    }
    Ok(block)
}

/// Reads one value of type `schema` into a [`Datum`].
///
/// Unions are resolved through their branch list, so both `[<type>, "null"]`
/// and `["null", <type>]` column layouts decode.
fn read_datum<'a>(schema: &AvroSchema, mut block: &'a [u8]) -> Result<(Datum, &'a [u8])> {
    Ok(match schema {
        AvroSchema::Null => (Datum::Null, block),
        AvroSchema::Int => {
            let value = util::zigzag_i64(&mut block)? as i32;
            (Datum::Int(value), block)
        }
        AvroSchema::Float => {
            let (bytes, rest) = take(block, 4)?;
            let value = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            (Datum::Float(value), rest)
        }
        AvroSchema::Bytes => {
            let len = util::zigzag_i64(&mut block)? as usize;
            let (bytes, rest) = take(block, len)?;
            (Datum::Bytes(bytes.to_vec()), rest)
        }
        AvroSchema::Union(union) => {
            let index = util::zigzag_i64(&mut block)? as usize;
            let variant = union.variants().get(index).ok_or_else(|| {
                Error::OutOfSpec(format!("union index {} has no corresponding branch", index))
            })?;
            return read_datum(variant, block);
        }
        other => return Err(Error::Render(format!("type {:?} is not handled", other))),
    })
}

/// Decodes one row, returning the projected column's [`Datum`] and the rest
/// of the block.
pub(crate) fn read_row<'a>(
    projection: &Projection,
    mut block: &'a [u8],
) -> Result<(Datum, &'a [u8])> {
    for schema in projection.before() {
        block = skip(schema, block)?;
    }
    let (datum, mut block) = read_datum(projection.target(), block)?;
    for schema in projection.after() {
        block = skip(schema, block)?;
    }
    Ok((datum, block))
}
