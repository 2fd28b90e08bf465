use letterverse_world::{AgentId, DimensionId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortalError {
    #[error("destination dimension {0} is not loaded")]
    MissingDimension(DimensionId),
    #[error("agent {0} is not in the world")]
    UnknownAgent(AgentId),
    #[error("no '{0}' block is registered")]
    MissingBlock(&'static str),
}
