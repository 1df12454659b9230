use std::collections::HashMap;

use avro_rs::schema::{Name, RecordField, RecordFieldOrder};
use avro_rs::Schema as AvroSchema;

use crate::error::{Error, Result};

/// A writer schema narrowed to a single column.
///
/// Holds the one-field record schema describing what gets materialized per
/// row, together with the types of the writer's other fields so their bytes
/// can be walked over without being materialized.
#[derive(Debug, Clone)]
pub struct Projection {
    /// Record schema with the projected field only; its name and type are the
    /// writer's, its record name is a fresh identity.
    pub schema: AvroSchema,
    before: Vec<AvroSchema>,
    target: AvroSchema,
    after: Vec<AvroSchema>,
}

impl Projection {
    /// Types of the writer's fields declared before the projected one.
    pub(crate) fn before(&self) -> &[AvroSchema] {
        &self.before
    }

    /// Type of the projected field.
    pub(crate) fn target(&self) -> &AvroSchema {
        &self.target
    }

    /// Types of the writer's fields declared after the projected one.
    pub(crate) fn after(&self) -> &[AvroSchema] {
        &self.after
    }
}

/// Narrows `writer` down to the single field named `column`.
///
/// The match is case-sensitive and exact. Decoding a row against the
/// resulting [`Projection`] touches every field's bytes but materializes
/// only the projected column, making the per-row cost proportional to one
/// column rather than the whole row.
/// # Error
/// This function errors iff `writer` is not a record, or no field of it is
/// named `column`.
pub fn project(writer: &AvroSchema, column: &str) -> Result<Projection> {
    let fields = if let AvroSchema::Record { fields, .. } = writer {
        fields
    } else {
        return Err(Error::Schema(
            "the writer schema is not a record".to_string(),
        ));
    };
    let position = fields
        .iter()
        .position(|field| field.name == column)
        .ok_or_else(|| Error::Schema(format!("no column '{}' in the writer schema", column)))?;

    let target = fields[position].schema.clone();
    let mut lookup = HashMap::new();
    lookup.insert(column.to_string(), 0);
    let schema = AvroSchema::Record {
        name: Name::new("projection"),
        doc: None,
        fields: vec![RecordField {
            name: column.to_string(),
            doc: None,
            default: None,
            schema: target.clone(),
            order: RecordFieldOrder::Ascending,
            position: 0,
        }],
        lookup,
    };

    Ok(Projection {
        schema,
        before: fields[..position]
            .iter()
            .map(|field| field.schema.clone())
            .collect(),
        target,
        after: fields[position + 1..]
            .iter()
            .map(|field| field.schema.clone())
            .collect(),
    })
}
