/*!

Mimir's lifted PDDL grounding and successor-generation engine (spec §2 "System
overview").

A finalized `Domain`/`Problem` pair, built against one shared `Repository`, is handed
to [`Grounder::new`]; the grounder then precomputes every static consistency graph and
the axiom stratification once, and exposes the five operations a search loop drives:
[`Grounder::initial_state`], [`Grounder::applicable_actions`], [`Grounder::successor`],
[`Grounder::is_goal`], [`Grounder::cost`].

There is no PDDL parser in this workspace (spec §1 keeps it an external collaborator):
a `Repository` is populated directly through the `get_or_create_*` factories on its
[`repository::Table`]s, and a `Domain`/`Problem` is assembled through
[`domain::DomainBuilder`] / [`problem::ProblemBuilder`].

*/

pub mod assignment_set;
pub mod axiom_evaluator;
pub mod binding_generator;
pub mod condition_eval;
pub mod config;
pub mod consistency_graph;
pub mod domain;
pub mod error;
pub mod ground;
pub mod grounder;
pub mod problem;
pub mod repository;
pub mod state;
pub mod stratify;
pub mod translate;

pub use config::Options;
pub use domain::{Domain, DomainBuilder};
pub use error::{MimirError, Result};
pub use ground::{GroundAction, GroundActionId, GroundAxiom, GroundAxiomId};
pub use grounder::Grounder;
pub use problem::{Problem, ProblemBuilder};
pub use repository::Repository;
pub use state::{State, StateHandle};
