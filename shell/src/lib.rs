//! Terminal host for the tracker core: a clap command line, a ureq
//! transport and plain-text rendering of the page views.

pub mod cli;
pub mod pages;
pub mod render;
pub mod transport;

pub use cli::Cli;
pub use pages::Shell;
