//! Jellyfin connection and library-scan helpers.

use vidarr_api_models::{JellyfinLibrary, ScanProgress};

/// Scan completion as a whole percentage, clamped to `0..=100`.
#[must_use]
pub fn scan_percent(progress: &ScanProgress) -> u32 {
    let ratio = progress.progress.clamp(0.0, 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (ratio * 100.0).round() as u32
    }
}

/// Libraries sorted by display name for stable rendering.
#[must_use]
pub fn sorted_libraries(mut libraries: Vec<JellyfinLibrary>) -> Vec<JellyfinLibrary> {
    libraries.sort_by(|left, right| left.name.cmp(&right.name));
    libraries
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn percent_clamps_out_of_range_ratios() {
        let progress = |ratio: f32| ScanProgress {
            running: true,
            progress: ratio,
            current_library: None,
        };
        assert_eq!(scan_percent(&progress(0.42)), 42);
        assert_eq!(scan_percent(&progress(-0.5)), 0);
        assert_eq!(scan_percent(&progress(7.0)), 100);
    }

    #[test]
    fn libraries_sort_by_name() {
        let library = |name: &str| JellyfinLibrary {
            id: Uuid::nil(),
            name: name.to_string(),
            enabled: true,
            item_count: 0,
            last_scan: None,
        };
        let sorted = sorted_libraries(vec![library("Shows"), library("Anime"), library("Movies")]);
        let names: Vec<&str> = sorted.iter().map(|lib| lib.name.as_str()).collect();
        assert_eq!(names, vec!["Anime", "Movies", "Shows"]);
    }
}
