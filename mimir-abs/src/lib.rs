/*!

Backend-agnostic abstractions shared by the mimir grounding engine: dense interned
indices, a natural-number bitset, a closed-interval numeric bounds type, and a logging
facade. None of these types know anything about PDDL — they are the same kind of
foundation-layer crate the teacher repository (`mod2-abs`) provides for `mod2-lib`.

*/

pub mod index;
pub mod index_set;
pub mod interval;
#[macro_use]
pub mod log;
pub mod nat_set;

pub use index::Index;
pub use index_set::InternTable;
pub use interval::{Bounds, Comparator};
pub use nat_set::NatSet;

/// Interned string type for names (predicates, functions, objects, variables). Same
/// choice the teacher makes (`mod2_abs::IString = string_cache::DefaultAtom`) for a
/// global, thread-shareable string cache.
pub type IString = string_cache::DefaultAtom;
