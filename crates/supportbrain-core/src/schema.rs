/// Arrow schema definitions for the triage prediction log.
pub mod triage_log {
    use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
    use std::sync::Arc;

    pub const TIMESTAMP: &str = "timestamp";
    pub const SUBJECT: &str = "subject";
    pub const TICKET_TYPE: &str = "ticket_type";
    pub const PRIORITY: &str = "priority";
    pub const QUEUE: &str = "queue";
    pub const AUTO_QUEUE: &str = "auto_queue";
    pub const ACTION: &str = "action";

    /// Column order of the log, as written to disk.
    pub const COLUMNS: [&str; 7] = [
        TIMESTAMP,
        SUBJECT,
        TICKET_TYPE,
        PRIORITY,
        QUEUE,
        AUTO_QUEUE,
        ACTION,
    ];

    /// Longest subject prefix kept in a log row, in characters.
    pub const SUBJECT_MAX_CHARS: usize = 100;

    /// Timestamp layout of the `timestamp` column.
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Schema for one row per processed ticket.
    ///
    /// `priority` and `queue` hold the resolved values (auto-applied if
    /// present, else predicted). Timestamps are stored as formatted local
    /// time strings so the file reads the same in a spreadsheet.
    pub fn schema() -> Schema {
        Schema::new(vec![
            Field::new(TIMESTAMP, DataType::Utf8, false),
            Field::new(SUBJECT, DataType::Utf8, true),
            Field::new(TICKET_TYPE, DataType::Utf8, true),
            Field::new(PRIORITY, DataType::Utf8, true),
            Field::new(QUEUE, DataType::Utf8, true),
            Field::new(AUTO_QUEUE, DataType::Boolean, false),
            Field::new(ACTION, DataType::Utf8, true),
        ])
    }

    pub fn schema_ref() -> SchemaRef {
        Arc::new(schema())
    }
}
