// Docker container listing via the docker CLI

use crate::command::CommandRunner;
use crate::models::{ContainerHealth, ContainerStatus};
use std::sync::Arc;
use tracing::instrument;

/// Tab-separated `docker ps` template; keeps parsing to a line split instead of JSON.
pub const PS_FORMAT: &str = "{{.ID}}\t{{.Image}}\t{{.Names}}\t{{.Status}}\t{{.State}}";

pub struct DockerRepo {
    runner: Arc<dyn CommandRunner>,
    program: String,
}

impl DockerRepo {
    pub fn new(runner: Arc<dyn CommandRunner>, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// Running containers; empty when the CLI is missing, fails, or prints nothing.
    #[instrument(skip(self), fields(repo = "docker", operation = "list_containers"))]
    pub fn list_containers(&self) -> Vec<ContainerStatus> {
        match self.runner.run(&self.program, &["ps", "--format", PS_FORMAT]) {
            Ok(out) => parse_ps_output(&out),
            Err(e) => {
                tracing::debug!(error = %e, "docker ps unavailable");
                Vec::new()
            }
        }
    }
}

/// One container per line; lines with an empty id are dropped, missing columns are empty.
pub fn parse_ps_output(output: &str) -> Vec<ContainerStatus> {
    output
        .lines()
        .filter_map(|line| {
            let mut cols = line.trim_end_matches('\r').split('\t');
            let mut next = || cols.next().unwrap_or_default().to_string();
            let id = next();
            if id.is_empty() {
                return None;
            }
            let image = next();
            let names = next();
            let status = next();
            let state = next();
            let health = ContainerHealth::from_status(&status);
            Some(ContainerStatus {
                id,
                image,
                names,
                status,
                state,
                health,
            })
        })
        .collect()
}
