// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV parsing with strict UTF-8 decoding, and atomic CSV output

mod csv_parser;
mod csv_writer;

pub use csv_parser::CsvParser;
pub use csv_writer::CsvWriter;
