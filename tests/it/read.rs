use avro_rs::types::{Record, Value};
use avro_rs::{Codec, Schema as AvroSchema, Writer};

use vcfcat::datum::Datum;
use vcfcat::error::{Error, Result};
use vcfcat::read;
use vcfcat::render;

pub(super) fn schema() -> AvroSchema {
    let raw_schema = r#"
    {
        "namespace": "vcf.avro",
        "type": "record",
        "name": "VCF",
        "fields": [
            {"name": "CHROM", "type": ["bytes", "null"]},
            {"name": "POS", "type": ["int", "null"]},
            {"name": "QUAL", "type": ["float", "null"]},
            {"name": "INFO_AF", "type": [{"type": "array", "items": "float"}, "null"]},
            {"name": "INFO_DP", "type": ["int", "null"]}
        ]
    }"#;
    AvroSchema::parse_str(raw_schema).unwrap()
}

fn nullable(value: Option<Value>) -> Value {
    match value {
        Some(value) => Value::Union(Box::new(value)),
        None => Value::Union(Box::new(Value::Null)),
    }
}

/// Three variant rows, with nulls in the second one.
pub(super) fn write_rows(codec: Codec) -> Vec<u8> {
    let schema = schema();
    let mut writer = Writer::with_codec(&schema, Vec::new(), codec);

    let mut record = Record::new(writer.schema()).unwrap();
    record.put("CHROM", nullable(Some(Value::Bytes(b"20".to_vec()))));
    record.put("POS", nullable(Some(Value::Int(14370))));
    record.put("QUAL", nullable(Some(Value::Float(29.0))));
    record.put(
        "INFO_AF",
        nullable(Some(Value::Array(vec![Value::Float(0.5)]))),
    );
    record.put("INFO_DP", nullable(Some(Value::Int(5))));
    writer.append(record).unwrap();

    let mut record = Record::new(writer.schema()).unwrap();
    record.put("CHROM", nullable(Some(Value::Bytes(b"20".to_vec()))));
    record.put("POS", nullable(Some(Value::Int(17330))));
    record.put("QUAL", nullable(None));
    record.put("INFO_AF", nullable(None));
    record.put("INFO_DP", nullable(None));
    writer.append(record).unwrap();

    let mut record = Record::new(writer.schema()).unwrap();
    record.put("CHROM", nullable(Some(Value::Bytes(b"X".to_vec()))));
    record.put("POS", nullable(Some(Value::Int(1110696))));
    record.put("QUAL", nullable(Some(Value::Float(67.5))));
    record.put(
        "INFO_AF",
        nullable(Some(Value::Array(vec![
            Value::Float(0.333),
            Value::Float(0.667),
        ]))),
    );
    record.put("INFO_DP", nullable(Some(Value::Int(-3))));
    writer.append(record).unwrap();

    writer.into_inner().unwrap()
}

pub(super) fn extract(mut avro: &[u8], column: &str) -> Result<Vec<Datum>> {
    let file = &mut avro;

    let (writer_schema, codec, file_marker) = read::read_metadata(file)?;
    let projection = read::project(&writer_schema, column)?;

    let reader = read::ColumnReader::new(
        read::Decompressor::new(read::BlockStreamIterator::new(file, file_marker), codec),
        projection,
    );
    reader.collect()
}

fn lines(avro: &[u8], column: &str) -> Result<Vec<u8>> {
    let mut out = vec![];
    for datum in extract(avro, column)? {
        render::write_line(&datum, &mut out)?;
    }
    Ok(out)
}

#[test]
fn extracts_nullable_int_column() -> Result<()> {
    let data = write_rows(Codec::Null);
    assert_eq!(
        extract(&data, "INFO_DP")?,
        vec![Datum::Int(5), Datum::Null, Datum::Int(-3)]
    );
    assert_eq!(lines(&data, "INFO_DP")?, b"5\nNA\n-3\n".to_vec());
    Ok(())
}

#[test]
fn extracts_byte_string_column() -> Result<()> {
    let data = write_rows(Codec::Null);
    assert_eq!(
        extract(&data, "CHROM")?,
        vec![
            Datum::Bytes(b"20".to_vec()),
            Datum::Bytes(b"20".to_vec()),
            Datum::Bytes(b"X".to_vec())
        ]
    );
    Ok(())
}

#[test]
fn extracts_float_column() -> Result<()> {
    let data = write_rows(Codec::Null);
    let expected = vec![Datum::Float(29.0), Datum::Null, Datum::Float(67.5)];
    assert_eq!(extract(&data, "QUAL")?, expected);

    // the decimal text of a float parses back to the same value
    let lines = lines(&data, "QUAL")?;
    let text = std::str::from_utf8(&lines).unwrap();
    let values = text
        .lines()
        .filter(|line| *line != "NA")
        .map(|line| line.parse::<f32>().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(values, vec![29.0, 67.5]);
    Ok(())
}

#[test]
fn deflate_and_null_codecs_decode_identically() -> Result<()> {
    let plain = extract(&write_rows(Codec::Null), "POS")?;
    let deflated = extract(&write_rows(Codec::Deflate), "POS")?;
    assert_eq!(plain, deflated);
    assert_eq!(
        plain,
        vec![
            Datum::Int(14370),
            Datum::Int(17330),
            Datum::Int(1110696)
        ]
    );
    Ok(())
}

#[test]
fn preserves_row_order_across_blocks() -> Result<()> {
    let schema = schema();
    let mut writer = Writer::new(&schema, Vec::new());
    for pos in 0..1000i32 {
        let mut record = Record::new(writer.schema()).unwrap();
        record.put("CHROM", nullable(Some(Value::Bytes(b"1".to_vec()))));
        record.put("POS", nullable(Some(Value::Int(pos))));
        record.put("QUAL", nullable(None));
        record.put("INFO_AF", nullable(None));
        record.put("INFO_DP", nullable(None));
        writer.append(record).unwrap();
        if pos % 100 == 99 {
            writer.flush().unwrap();
        }
    }
    let data = writer.into_inner().unwrap();

    let datums = extract(&data, "POS")?;
    assert_eq!(datums.len(), 1000);
    for (pos, datum) in datums.iter().enumerate() {
        assert_eq!(datum, &Datum::Int(pos as i32));
    }
    Ok(())
}

#[test]
fn missing_column_fails_before_any_row() {
    let data = write_rows(Codec::Null);
    // the match is case-sensitive and exact
    assert!(matches!(extract(&data, "info_dp"), Err(Error::Schema(_))));
    assert!(matches!(extract(&data, "DP"), Err(Error::Schema(_))));
}

#[test]
fn array_column_is_not_renderable() {
    let data = write_rows(Codec::Null);
    assert!(matches!(extract(&data, "INFO_AF"), Err(Error::Render(_))));
}

#[test]
fn truncated_file_is_an_error() {
    let data = write_rows(Codec::Null);
    let result = extract(&data[..data.len() - 5], "POS");
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn projection_narrows_to_one_field() -> Result<()> {
    let writer_schema = schema();
    let projection = read::project(&writer_schema, "POS")?;
    match &projection.schema {
        AvroSchema::Record { fields, .. } => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].name, "POS");
            assert!(matches!(fields[0].schema, AvroSchema::Union(_)));
        }
        other => panic!("projection is not a record: {:?}", other),
    }
    Ok(())
}

#[test]
fn non_record_writer_schema_is_rejected() {
    assert!(matches!(
        read::project(&AvroSchema::Int, "POS"),
        Err(Error::Schema(_))
    ));
}
