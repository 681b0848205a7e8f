pub mod config_route;
pub mod search_test_route;
pub mod status_report;
pub mod status_route;
