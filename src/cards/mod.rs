//! Card system: definitions, catalog and the built-in card set.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `Card`: Static card data (name, text, keywords, ordered effects)
//! - `CardCatalog`: Card definition lookup
//!
//! Decks, hands and discard piles store `CardId`s; the engine resolves them
//! through the catalog when a card is played.

pub mod catalog;
pub mod definition;
pub mod registry;

pub use catalog::{standard_catalog, standard_deck};
pub use definition::{Card, CardId, EffectList, Keyword, Keywords};
pub use registry::CardCatalog;
