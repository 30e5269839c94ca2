pub mod action;
pub mod extract;
pub mod ingest;
pub mod lexicon;
pub mod observation;
pub mod story;
pub mod text;
