mod writer;

pub use writer::{GraphRecord, write_graph, write_report_json, write_report_jsonl};
