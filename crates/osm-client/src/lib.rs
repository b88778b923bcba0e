// Library entry point for the osm-report binary and integration tests

pub mod config;
pub mod osm;

#[cfg(test)]
mod testutil;
