use vcfcat::datum::Datum;
use vcfcat::error::{Error, Result};
use vcfcat::render::{write_line, MAX_VALUE_LENGTH, NULL_TEXT};

fn line(datum: &Datum) -> Result<Vec<u8>> {
    let mut out = vec![];
    write_line(datum, &mut out)?;
    Ok(out)
}

#[test]
fn null_renders_as_na() -> Result<()> {
    assert_eq!(NULL_TEXT, &b"NA"[..]);
    assert_eq!(line(&Datum::Null)?, b"NA\n".to_vec());
    Ok(())
}

#[test]
fn integers_render_as_decimal_text() -> Result<()> {
    assert_eq!(line(&Datum::Int(5))?, b"5\n".to_vec());
    assert_eq!(line(&Datum::Int(-3))?, b"-3\n".to_vec());
    assert_eq!(line(&Datum::Int(0))?, b"0\n".to_vec());
    Ok(())
}

#[test]
fn integers_round_trip() -> Result<()> {
    for value in &[i32::min_value(), -1, 0, 1, i32::max_value()] {
        let line = line(&Datum::Int(*value))?;
        let text = std::str::from_utf8(&line).unwrap().trim_end();
        assert_eq!(text.parse::<i32>().unwrap(), *value);
    }
    Ok(())
}

#[test]
fn floats_round_trip() -> Result<()> {
    for value in &[0.0f32, 2.5, -1.25, 29.0, 3.4e38, 1.1754944e-38] {
        let line = line(&Datum::Float(*value))?;
        let text = std::str::from_utf8(&line).unwrap().trim_end();
        assert_eq!(text.parse::<f32>().unwrap().to_bits(), value.to_bits());
    }
    Ok(())
}

#[test]
fn byte_strings_render_verbatim() -> Result<()> {
    assert_eq!(line(&Datum::Bytes(b"ACGT".to_vec()))?, b"ACGT\n".to_vec());
    assert_eq!(line(&Datum::Bytes(vec![]))?, b"\n".to_vec());
    Ok(())
}

#[test]
fn byte_string_at_the_limit_is_not_truncated() -> Result<()> {
    let bytes = vec![b'A'; MAX_VALUE_LENGTH];
    let line = line(&Datum::Bytes(bytes))?;
    assert_eq!(line.len(), MAX_VALUE_LENGTH + 1);
    assert_eq!(line[MAX_VALUE_LENGTH], b'\n');
    Ok(())
}

#[test]
fn byte_string_above_the_limit_is_an_error() {
    let bytes = vec![b'A'; MAX_VALUE_LENGTH + 1];
    let result = line(&Datum::Bytes(bytes));
    assert!(matches!(result, Err(Error::Render(_))));
}
