pub mod constants;
pub mod export;
pub mod mat;
pub mod merge;
pub mod satmerge_errors;
pub mod table;
