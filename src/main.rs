use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::process;

use vcfcat::error::{Error, Result};
use vcfcat::read;
use vcfcat::render;

fn parse_args(args: &[String]) -> Option<(&str, &str)> {
    match args {
        [_, filename, column] => Some((filename.as_str(), column.as_str())),
        _ => None,
    }
}

fn run(filename: &str, column: &str) -> Result<()> {
    let file = File::open(filename)
        .map_err(|error| Error::Other(format!("Error opening file '{}': {}", filename, error)))?;
    let mut file = BufReader::new(file);

    let (writer_schema, codec, file_marker) = read::read_metadata(&mut file)?;
    let projection = read::project(&writer_schema, column)?;

    let blocks = read::BlockStreamIterator::new(file, file_marker);
    let rows = read::ColumnReader::new(read::Decompressor::new(blocks, codec), projection);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for datum in rows {
        render::write_line(&datum?, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let (filename, column) = match parse_args(&args) {
        Some(parsed) => parsed,
        None => {
            let program = args.first().map(String::as_str).unwrap_or("vcfcat");
            eprintln!("usage: {} <FILENAME> <COLUMN>", program);
            process::exit(1);
        }
    };
    if let Err(error) = run(filename, column) {
        eprintln!("vcfcat:{}", error);
        process::exit(1);
    }
}
