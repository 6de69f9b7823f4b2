//! Shape parsing utilities.

use anyhow::Context;

/// Parse a shape string like "64x64", "4,4,2" or "128" into dimensions.
/// `x`, `,` and whitespace all separate dimensions.
pub fn parse_dims(s: &str) -> anyhow::Result<Vec<usize>> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty dims string");
    }

    s.split(|c: char| c == 'x' || c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .with_context(|| format!("Invalid dimension value: {part}"))
        })
        .collect()
}
