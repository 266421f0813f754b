//! Shared constants for diaryx-tree.

/// Minimum number of concurrent file reads regardless of CPU count.
pub const MIN_PARALLELISM: usize = 10;

/// Multiplier applied to CPU core count for default read concurrency.
pub const PARALLELISM_CORE_MULTIPLIER: usize = 2;

/// Default CPU core count when detection fails.
///
/// Used as a fallback when `std::thread::available_parallelism()` returns an error.
pub const FALLBACK_CORE_COUNT: usize = 4;

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "DIARYX_CONFIG";

/// Directory under the home directory holding user configuration.
pub const CONFIG_DIR_NAME: &str = ".diaryx";

/// Extensions (without the dot) treated as Markdown by default.
pub const DEFAULT_MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Extensions appended to extension-less import references, after the bare form.
pub const REFERENCE_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Default read concurrency: `max(MIN_PARALLELISM, cores × PARALLELISM_CORE_MULTIPLIER)`.
pub fn default_parallelism() -> usize {
    let cores = std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(FALLBACK_CORE_COUNT);
    usize::max(MIN_PARALLELISM, cores * PARALLELISM_CORE_MULTIPLIER)
}
