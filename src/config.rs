use std::sync::OnceLock;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_env_u8(name: &str, default: u8) -> u8 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

static PARALLEL_MIN_MODULES: OnceLock<usize> = OnceLock::new();

/// Total module count (n*n) at which the shape renderer switches to rayon
pub(crate) fn parallel_min_modules() -> usize {
    *PARALLEL_MIN_MODULES.get_or_init(|| parse_env_usize("QRSTYLE_PARALLEL_MIN_MODULES", 1600))
}

static CAPTION_HEIGHT: OnceLock<u32> = OnceLock::new();

/// Default caption band height in pixels
pub(crate) fn caption_height() -> u32 {
    *CAPTION_HEIGHT.get_or_init(|| parse_env_u32("QRSTYLE_CAPTION_HEIGHT", 60).clamp(16, 400))
}

static DARK_THRESHOLD: OnceLock<u8> = OnceLock::new();

/// Luma below this value counts as a dark module
pub(crate) fn dark_threshold() -> u8 {
    *DARK_THRESHOLD.get_or_init(|| parse_env_u8("QRSTYLE_DARK_THRESHOLD", 128).max(1))
}

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

pub(crate) fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var("QRSTYLE_DEBUG").is_ok())
}
