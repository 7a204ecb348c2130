//! Output filename sequencing.
//!
//! Results land next to each other as `mimiq.gif`, `mimiq1.gif`,
//! `mimiq2.gif`, ... — the next name is the highest existing numeric suffix
//! plus one. Ordering is purely numeric, so `mimiq9` < `mimiq10`.

use std::path::Path;

/// Compute the next non-colliding file name (without extension) for
/// `prefix` given the raw directory entries at the destination.
///
/// - no entry starts with `prefix`: bare `prefix`
/// - entries match but none has a numeric suffix: `prefix1`
/// - otherwise: `prefix` + (highest numeric suffix + 1)
pub fn next_file_name(entries: &[String], prefix: &str) -> String {
    let stems: Vec<String> = entries
        .iter()
        .filter_map(|name| {
            Path::new(name)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .filter(|stem| stem.starts_with(prefix))
        .collect();

    if stems.is_empty() {
        return prefix.to_string();
    }

    let last_increment = stems
        .iter()
        .filter_map(|stem| stem[prefix.len()..].parse::<u64>().ok())
        .max();

    match last_increment {
        Some(number) => format!("{prefix}{}", number + 1),
        None => format!("{prefix}1"),
    }
}
