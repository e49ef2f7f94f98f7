pub mod content;
pub mod responses;
pub mod storage;
