//! Shared test setup: tracing subscriber and a small reference model.

use std::env;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{ModelArena, ModelBuilder};

static TEST_SETUP: Once = Once::new();

/// Two regions; only USA carries a carbon model.
pub const SAMPLE_MODEL: &str = r#"<world>
    <region name="USA">
        <object-meta-info name="gdp-scale"><value>1.2</value></object-meta-info>
        <carbon-box-model>
            <carbon-box name="soil">
                <stock period="0">40</stock>
                <stock period="1">41.5</stock>
                <stock period="3">42</stock>
                <carbon-flow target="atmosphere"><fraction>0.1</fraction></carbon-flow>
            </carbon-box>
            <carbon-box name="vegetation">
                <stock period="3">7.25</stock>
                <carbon-flow target="soil"><fraction>0.3</fraction></carbon-flow>
                <carbon-flow target="atmosphere"><fraction>0.05</fraction></carbon-flow>
            </carbon-box>
        </carbon-box-model>
    </region>
    <region name="Canada">
        <carbon-box-model>
            <carbon-box name="soil">
                <stock period="3">99</stock>
            </carbon-box>
        </carbon-box-model>
    </region>
</world>
"#;

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

/// Build [`SAMPLE_MODEL`].
pub fn sample_model() -> ModelArena {
    ModelBuilder::new()
        .build_from_str(SAMPLE_MODEL)
        .expect("sample model is valid")
}

fn setup_test_logging() {
    // RUST_LOG wins, otherwise everything from this crate
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ccreport=trace"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else if let Err(e) = subscriber.try_init() {
        eprintln!("Error: Failed to set up logging: {}", e);
    }
    debug!("RUST_LOG={:?}", env::var("RUST_LOG").ok());
}
