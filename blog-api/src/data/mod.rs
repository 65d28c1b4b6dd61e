pub(crate) mod activity_repository;
pub(crate) mod post_repository;
pub(crate) mod repositories;
pub(crate) mod user_repository;

#[cfg(test)]
pub(crate) mod in_memory;
