//! QR layout modules
//!
//! Geometry that every styling stage shares:
//! - Module grid location (module size from the encoder's module count)
//! - Protected zones (finder, timing, alignment, version info)

/// Module grid locator
pub mod grid;
/// Function-module exclusion zones
pub mod protected;

pub use grid::{MIN_MODULE_PX, ModuleGrid};
pub use protected::{FINDER_ZONE_MODULES, FinderCorner, FinderZone, ProtectedZoneSet};
