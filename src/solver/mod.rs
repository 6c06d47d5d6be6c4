pub mod backtracking;
pub mod constraint;
pub mod csp;
pub mod domain;
pub mod dual;
pub mod heuristics;
pub mod inference;
pub mod min_conflicts;
pub mod stats;
pub mod value;
pub mod variable;
pub mod work_list;
