/*!

Pass 1 (spec §4.3): assigning each variable its column position within its enclosing
action schema or axiom.

*/

use crate::repository::{Repository, Variable, VariableId};
use mimir_abs::IString;

/// Interns (or looks up) the variable named `name` at column `parameter_index` within
/// its enclosing schema/axiom. Two calls with the same `(name, parameter_index)` pair
/// share one handle, matching the Repository's general intern-stability guarantee
/// (spec §8.1) — but note `name` only disambiguates for debugging/printing: the
/// `parameter_index` alone is what every downstream component keys off.
pub fn fresh_variable(repository: &mut Repository, name: IString, parameter_index: u32) -> VariableId {
    VariableId::from_usize(repository.variables.get_or_create(Variable { name, parameter_index }))
}
