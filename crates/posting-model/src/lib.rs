//! PKN Posting Model
//!
//! Defines the data contracts for one marketing graphic:
//! - **Format:** The five fixed aspect ratios and their exact pixel sizes
//! - **Posting:** The complete declarative configuration of a graphic
//! - **Carousel:** Ordered slides and active-slide resolution
//! - **Patch / Presets:** Immutable updates and one-way preset application
//! - **Viewport:** Display scaling for previews, kept apart from export sizing
//!
//! Every pixel computation in the workspace derives from [`Format::dimensions`].

pub mod carousel;
pub mod fingerprint;
pub mod format;
pub mod patch;
pub mod posting;
pub mod presets;
pub mod viewport;

pub use carousel::*;
pub use fingerprint::*;
pub use format::*;
pub use patch::*;
pub use posting::*;
pub use presets::*;
pub use viewport::*;
