//! Card system: elements, templates, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier of a catalog card (the host's item id)
//! - `Element`: Element with its dominance cycle
//! - `CardTemplate`: Static card data from the catalog
//! - `Card`: Runtime copy of a card inside a battle
//! - `CardCatalog` / `CardRegistry`: Template lookup

pub mod definition;
pub mod element;
pub mod instance;
pub mod registry;

pub use definition::{CardId, CardStats, CardTemplate};
pub use element::{Element, ElementMatchup};
pub use instance::Card;
pub use registry::{CardCatalog, CardRegistry};
