pub(crate) mod activity_service;
pub(crate) mod auth_service;
pub(crate) mod blog_service;

#[cfg(test)]
mod scenario_tests;
