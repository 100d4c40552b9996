pub mod badge;
pub mod cli;
pub mod error;
pub mod github;
pub mod istanbul;
pub mod model;
pub mod publish;
pub mod report;
pub mod summarize;
