//! Client for the Sociopedika portal: session handling, the HTTP contract
//! with the backend, and the view state of every screen that fetches data.

pub mod client;
pub mod config;
pub mod error;
pub mod navigation;
pub mod resource;
pub mod session_store;
pub mod state;

pub mod models {
    pub mod session;
    pub mod theory;
    pub mod user;
}

pub mod repositories {
    pub mod theory;
    pub mod user;
}

pub mod services {
    pub mod admin;
    pub mod auth;
    pub mod catalog;
    pub mod favorites;
    pub mod profile;
    pub mod search;
}

pub mod middleware_layer {
    pub mod auth;
}

pub mod validation {
    pub mod auth;
}

pub use config::Config;
pub use error::{ApiError, Result};
pub use state::Portal;
