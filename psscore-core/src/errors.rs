use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Table {table} is missing the following required columns: {}", .columns.join(", "))]
    MissingColumns { table: String, columns: Vec<String> },

    #[error("Malformed row {line} in {table}: expected {expected} columns, found {found}")]
    MalformedRow {
        table: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Splice type {splice_type} requires {field}, but it is missing for {variant}")]
    IncompleteEnrichment {
        variant: String,
        splice_type: String,
        field: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for psscore-core operations.
pub type Result<T> = std::result::Result<T, ModelError>;
