pub mod cli {
    pub mod parser;
}
pub mod config;
pub mod generator;
pub mod github {
    pub mod client;
    pub mod error;
    pub mod issues;
}
pub mod logging;
pub mod output;
pub mod prompt;
pub mod run;
