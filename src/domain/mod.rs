pub mod assignment;
pub mod filters;
pub mod transitions;
