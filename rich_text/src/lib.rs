//! # Rich Text
//!
//! Converts an HTML fragment into plain text plus a gap-free sequence of
//! character-range style runs.
//!
//! ## Pipeline
//!
//! 1. **Decode**: escaped angle brackets, ampersands and quotes are unescaped
//!    so custom tags escaped by an editor become real markup
//! 2. **Extract**: `<code>` elements are optionally pulled out into a side list
//! 3. **Replace**: replacing custom tags become literal text
//! 4. **Track**: a fold over the walk events of the remaining tree yields the
//!    plain text and one [`StyleRun`] per text node
//!
//! Offsets are counted in `char`s of the plain text.

pub mod markup;
pub mod render;
pub mod styles;
pub mod tags;

pub use markup::*;
pub use render::*;
pub use styles::*;
pub use tags::*;
