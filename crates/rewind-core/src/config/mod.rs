pub mod rewind_config;

pub use rewind_config::RewindConfig;
