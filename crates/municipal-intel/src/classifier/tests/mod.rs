mod common;
mod configuration;
