pub mod config;
pub mod fetch;
pub mod install;
pub mod output;
pub mod paths;
pub mod prompt;
pub mod stamp;
pub mod verify;
