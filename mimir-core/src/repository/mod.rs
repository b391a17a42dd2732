/*!

The `Repository` is Mimir's content-addressed interning store (spec §4.1): every
syntactic entity — objects, variables, predicates, atoms, literals, function
skeletons, function terms, numeric expressions, numeric constraints, conjunctive
conditions, conjunctive/conditional effects, action schemas, axioms, and their
ground counterparts — is created through a `get_or_create_*` factory that returns a
dense, stable [`mimir_abs::Index`]-backed handle; two structurally-equal entities
always share one handle.

Each entity kind owns its own [`Table`], the same "each entity kind owns its own
storage slab + lookup index" design the teacher's `mod2_abs::IndexSet` /
`mod2_lib::core::hash_cons_set::HashConsSet` use, specialized here to the case where
the key *is* the full identifying-field tuple (no separate pointer/hash split is
needed since nothing here is behind a GC-managed pointer).

Cross-references between entities (a literal's atom, an atom's terms, a condition's
literals, ...) are plain `Index`-based handles, not owning pointers — the "arenas +
indices" resolution to cyclic references the design notes (spec §9) call for.

*/

pub mod terms;
pub mod predicate;
pub mod function;
pub mod atom;
pub mod literal;
pub mod numeric;
pub mod condition;
pub mod effect;
pub mod schema;
pub mod ground;

use mimir_abs::InternTable;
use std::hash::Hash;

pub use terms::{Object, ObjectId, Term, Variable, VariableId};
pub use predicate::{Predicate, PredicateId, PredicateKind};
pub use function::{FunctionKind, FunctionSkeleton, FunctionSkeletonId, FunctionTerm, FunctionTermId};
pub use atom::{Atom, AtomId};
pub use literal::{Literal, LiteralId};
pub use numeric::{AssignOp, Expr, ExprId, NumericConstraint, NumericConstraintId, NumericEffect, NumericEffectId};
pub use condition::{ConjunctiveCondition, ConjunctiveConditionId};
pub use effect::{ConditionalEffect, ConditionalEffectId, ConjunctiveEffect, ConjunctiveEffectId};
pub use schema::{ActionSchema, ActionSchemaId, Axiom, AxiomId};
pub use ground::{GroundAtom, GroundAtomId, GroundFunction, GroundFunctionId, GroundLiteral, GroundLiteralId};

/// Declares a dense handle type wrapping [`mimir_abs::Index`]. Identity equality on the
/// handle implies structural equality of the entity it denotes (spec §3 invariant).
#[macro_export]
macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $name(pub mimir_abs::Index);

        impl $name {
            #[inline]
            pub fn from_usize(index: usize) -> Self {
                $name(mimir_abs::Index::from_usize(index))
            }

            #[inline]
            pub fn as_usize(&self) -> usize {
                self.0.as_usize()
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

/// A per-kind interning table: `get_or_create` dedups by structural key and returns a
/// dense handle; `get` dereferences. `get` on an out-of-range index is a programming
/// error, caught by the `debug_assert!` inside [`mimir_abs::Index::as_usize`].
pub struct Table<Record>
where
    Record: Hash + Clone + Eq,
{
    inner: InternTable<Record>,
}

impl<Record> Default for Table<Record>
where
    Record: Hash + Clone + Eq,
{
    fn default() -> Self {
        Self { inner: InternTable::new() }
    }
}

impl<Record> Table<Record>
where
    Record: Hash + Clone + Eq,
{
    pub fn get_or_create(&mut self, record: Record) -> usize {
        self.inner.get_or_insert(record)
    }

    pub fn get(&self, index: usize) -> &Record {
        self.inner.get(index).expect("Table::get index out of range")
    }

    pub fn count(&self) -> usize {
        self.inner.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.inner.iter()
    }

    /// Looks up an already-interned record's index without inserting. Used to resolve
    /// a fully-ground (no-variable) entity — e.g. a `GroundAtom`/`GroundFunction` built
    /// on the fly from a concrete object tuple — back to its handle, read-only.
    pub fn index_of(&self, record: &Record) -> Option<usize> {
        self.inner.index_of(record)
    }
}

/// The interning store. One fresh `Repository` backs a `Domain`/`Problem` pair; the
/// translator re-interns into a second, fresh `Repository` to guarantee that two
/// semantically-equivalent translated entities share a handle (spec §4.3).
#[derive(Default)]
pub struct Repository {
    pub objects: Table<Object>,
    pub variables: Table<Variable>,
    pub predicates: Table<Predicate>,
    pub function_skeletons: Table<FunctionSkeleton>,
    pub atoms: Table<Atom>,
    pub literals: Table<Literal>,
    pub function_terms: Table<FunctionTerm>,
    pub exprs: Table<Expr>,
    pub numeric_constraints: Table<NumericConstraint>,
    pub numeric_effects: Table<NumericEffect>,
    pub conditions: Table<ConjunctiveCondition>,
    pub effects: Table<ConjunctiveEffect>,
    pub conditional_effects: Table<ConditionalEffect>,
    pub action_schemas: Table<ActionSchema>,
    pub axioms: Table<Axiom>,
    pub ground_atoms: Table<GroundAtom>,
    pub ground_literals: Table<GroundLiteral>,
    pub ground_functions: Table<GroundFunction>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }
}
