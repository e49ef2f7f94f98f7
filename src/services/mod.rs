pub mod indexing;
pub mod search;
