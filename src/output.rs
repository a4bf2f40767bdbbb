use std::path::Path;

use anyhow::Context;

use crate::normalize::NormalizedEntry;

/// Newest first, comparing parsed instants. `sort_by` is stable, so
/// same-instant entries keep the order their feeds were processed in.
pub fn sort_entries(entries: &mut [NormalizedEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Serialize the collection as a pretty-printed JSON array, fully
/// replacing any previous output file.
pub fn write_entries<P: AsRef<Path>>(path: P, entries: &[NormalizedEntry]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(entries)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write output file {}", path.display()))?;
    Ok(())
}
