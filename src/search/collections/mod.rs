pub mod frontier;
pub mod search_data;
