#![doc = "The `taskhub` library crate."]
#![doc = ""]
#![doc = "Holds the domain models, authentication machinery, routing configuration,"]
#![doc = "and error handling for the task manager backend. The binary (`main.rs`)"]
#![doc = "wires these pieces into an HTTP application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
