//! Card system: templates, instances, and the template pool.
//!
//! ## Key Types
//!
//! - `DeckCategory`: Which of the three weapon decks a card belongs to
//! - `Difficulty`: Weighting mode for deck builds
//! - `CardTemplate`: Static card data shared by every copy
//! - `CardInstance`: One physical copy with its own identity
//! - `TemplatePool`: Ordered template list supplied by the caller

pub mod category;
pub mod definition;
pub mod instance;
pub mod pool;

pub use category::{DeckCategory, Difficulty};
pub use definition::{CardTemplate, WeaponKind};
pub use instance::{CardInstance, InstanceId};
pub use pool::TemplatePool;
