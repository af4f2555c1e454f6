use std::path::Path;

use catalyst_graph::io::Format;

/// Output format implied by a file extension.
pub fn output(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jsonl" | "ndjson" => Some(Format::JsonLines),
        "json" => Some(Format::Json),
        "dot" | "gv" => Some(Format::Dot),
        _ => None,
    }
}
