// Library for tests to access modules

pub mod bandwidth;
pub mod collector;
pub mod command;
pub mod config;
pub mod docker_repo;
pub mod models;
pub mod procfs_repo;
pub mod routes;
pub mod version;
pub mod worker;
