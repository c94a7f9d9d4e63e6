//! Conversion engine: extension discovery, lenient JSON, slot resolution and
//! plist output (no TUI dependencies).

mod color;
mod convert;
mod fuzzy;
mod palette;
mod plist;
mod resolve;
mod sanitize;
mod scan;

pub use color::*;
pub use convert::*;
pub use fuzzy::*;
pub use palette::*;
pub use plist::*;
pub use resolve::*;
pub use sanitize::*;
pub use scan::*;
