pub mod app;
pub mod domain;
pub mod error;
pub mod kegg;
pub mod output;
pub mod writer;
