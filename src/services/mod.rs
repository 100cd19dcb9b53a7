pub mod export_service;
pub mod navigation_service;
pub mod platform_service;
pub mod report_service;
pub mod submission_service;
pub mod user_service;
