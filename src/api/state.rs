//! Shared state handed to every request handler.

use crate::orchestrator::Orchestrator;

pub struct ApiState {
    pub orchestrator: Orchestrator,
}

impl ApiState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }
}
