//! Shared helpers for integration tests
#![allow(dead_code)]

use terrain_analyzer_core::{AnalyzerConfig, ContainerRect, TerrainAnalyzer};
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Default-sized session, seeded, with a 400×200 container at the origin
pub fn session(seed: u64) -> TerrainAnalyzer {
    let mut analyzer = TerrainAnalyzer::new(AnalyzerConfig::default(), Some(seed))
        .expect("default config is valid");
    analyzer.set_container(ContainerRect::new(0.0, 0.0, 400.0, 200.0));
    analyzer
}
