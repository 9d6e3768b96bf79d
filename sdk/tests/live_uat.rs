//! Live checks against the UAT host.
//!
//! Skipped unless `THERANGE_USERNAME` and `THERANGE_PASSWORD` are set.

use therange_sdk::{Config, Credentials, OrderFeedRequest, TheRangeManager};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("therange_sdk=debug")),
        )
        .with_test_writer()
        .try_init();
}

#[test]
fn test_live_login_and_order_feed() {
    let Some(credentials) = Credentials::from_env() else {
        eprintln!("THERANGE_USERNAME/THERANGE_PASSWORD not set; skipping live UAT test");
        return;
    };
    init_tracing();

    let manager = TheRangeManager::with_config(credentials, Config::uat()).unwrap();
    manager.authenticate().unwrap();
    assert!(manager.auth().is_authenticated());
    assert!(manager.auth().session_token().is_some());

    let orders = manager
        .order_feed()
        .get_orders(&OrderFeedRequest::new())
        .unwrap();
    assert!(orders.is_object() || orders.is_array());
}
