pub mod datasets;
pub mod run;
