// Section layout and ordering engine.
// Decides which sections appear, in which region, and in what order.
// Pure data transformation: no I/O, no shared state, and no operation here can fail.

pub mod editor;
pub mod key;
pub mod layout;
pub mod order;
pub mod reconcile;
pub mod registry;

#[cfg(test)]
mod invariants;

pub use editor::{EditCommand, EditReport};
pub use reconcile::reconcile;
