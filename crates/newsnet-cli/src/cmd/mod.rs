pub mod analyze;
pub mod completions;
pub mod edgelist;
