pub mod analyze;
pub mod conf;
pub mod run;
