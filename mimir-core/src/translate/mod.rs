/*!

The translator (spec §4.3): rewrites a finalized Domain/Problem into canonical form.
There is no PDDL parser in this workspace (§1 keeps it an external collaborator), so
there is no untranslated AST to walk a generic rewrite pass over; instead, the two
passes are the two places canonical form is actually produced:

- **Pass 1 — parameter-index encoding** happens at construction time: every
  `Variable` is created carrying its `parameter_index` from the start
  ([`parameter_index::fresh_variable`]), rather than being assigned one in a
  second pass over an already-built, unpositioned AST.
- **Pass 2 — numeric-constraint term remapping** is a real post-hoc computation
  over already-built expressions ([`numeric_remap::build_numeric_constraint`]):
  given a constraint's left/right expressions, compute the canonical `term_list`
  and, for every function term mentioned, the remapping vector into that
  function's own term list.

Both passes intern into the caller-supplied `Repository` — in this workspace that
*is* "a fresh Repository" in the sense spec §4.3 requires, since nothing is built
against any other Repository first.

*/

pub mod numeric_remap;
pub mod parameter_index;

pub use numeric_remap::build_numeric_constraint;
pub use parameter_index::fresh_variable;
