/*!

Pass 2 (spec §4.3): computing a numeric constraint's canonical `term_list` and, for
every function term its expressions mention, the remapping vector from that term
list into the function term's own.

*/

use crate::repository::{Expr, ExprId, FunctionTermId, NumericConstraint, NumericConstraintId, Repository, Term};
use mimir_abs::Comparator;
use std::collections::HashSet;

fn collect_function_terms(repository: &Repository, expr: ExprId, out: &mut Vec<FunctionTermId>) {
    match repository.exprs.get(expr.as_usize()) {
        Expr::Constant(_) => {}
        Expr::Neg(inner) => collect_function_terms(repository, *inner, out),
        Expr::Binary { lhs, rhs, .. } => {
            collect_function_terms(repository, *lhs, out);
            collect_function_terms(repository, *rhs, out);
        }
        Expr::Nary { operands, .. } => {
            for operand in operands {
                collect_function_terms(repository, *operand, out);
            }
        }
        Expr::FunctionTerm(function_term) => out.push(*function_term),
    }
}

/// Builds (and interns) a `NumericConstraint` from an already-built `lhs`/`rhs`
/// expression pair: computes the deduplicated `term_list` (spec §3 "the union of all
/// terms mentioned in `lhs_expr ∪ rhs_expr` with duplicates removed, in a canonical
/// order") and, for every distinct function term found, a remapping vector of length
/// `|term_list|` (spec §4.3 Pass 2).
pub fn build_numeric_constraint(repository: &mut Repository, comparator: Comparator, lhs: ExprId, rhs: ExprId) -> NumericConstraintId {
    let mut function_term_ids = Vec::new();
    collect_function_terms(repository, lhs, &mut function_term_ids);
    collect_function_terms(repository, rhs, &mut function_term_ids);
    let mut seen = HashSet::new();
    function_term_ids.retain(|id| seen.insert(*id));

    let mut term_list: Vec<Term> = Vec::new();
    for &function_term in &function_term_ids {
        for &term in &repository.function_terms.get(function_term.as_usize()).terms {
            if !term_list.contains(&term) {
                term_list.push(term);
            }
        }
    }

    let function_remaps: Vec<(FunctionTermId, Vec<Option<u32>>)> = function_term_ids
        .iter()
        .map(|&function_term| {
            let own_terms = &repository.function_terms.get(function_term.as_usize()).terms;
            let remap = term_list.iter().map(|c| own_terms.iter().position(|t| t == c).map(|p| p as u32)).collect();
            (function_term, remap)
        })
        .collect();

    NumericConstraintId::from_usize(repository.numeric_constraints.get_or_create(NumericConstraint {
        comparator,
        lhs,
        rhs,
        term_list,
        function_remaps,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{FunctionSkeleton, FunctionTerm, Term, VariableId};
    use mimir_abs::IString;

    #[test]
    fn remap_maps_shared_columns_and_marks_absent() {
        let mut repo = Repository::new();
        let fuel = crate::repository::FunctionSkeletonId::from_usize(
            repo.function_skeletons.get_or_create(FunctionSkeleton { name: IString::from("fuel"), arity: 1 }),
        );

        // `(fuel ?truck)` vs a constraint over `?truck` alone.
        let truck = VariableId::from_usize(repo.variables.get_or_create(crate::repository::Variable {
            name: IString::from("?truck"),
            parameter_index: 0,
        }));

        let function_term = FunctionTermId::from_usize(repo.function_terms.get_or_create(FunctionTerm {
            skeleton: fuel,
            terms: vec![Term::Variable(truck, 0)],
        }));

        let lhs = ExprId::from_usize(repo.exprs.get_or_create(Expr::FunctionTerm(function_term)));
        let rhs = ExprId::from_usize(repo.exprs.get_or_create(Expr::Constant(ordered_float::OrderedFloat(5.0))));

        let constraint_id = build_numeric_constraint(&mut repo, Comparator::Ge, lhs, rhs);
        let constraint = repo.numeric_constraints.get(constraint_id.as_usize());

        assert_eq!(constraint.term_list, vec![Term::Variable(truck, 0)]);
        let remap = constraint.remap_for(function_term).unwrap();
        assert_eq!(remap, &[Some(0)]);
    }
}
