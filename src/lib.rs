//! `vcfcat` extracts a single column from an Avro-encoded VCF file and
//! prints its values, one per line.
//!
//! The container file embeds the writer schema of its rows. [`read::project`]
//! narrows that schema to one field, [`read::ColumnReader`] decodes only that
//! field's bytes out of every row, and [`render::write_line`] turns each
//! decoded [`datum::Datum`] into one text line.

pub mod datum;
pub mod error;
pub mod read;
pub mod render;
