//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::ConnectionId;

/// Errors related to Value Object validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("connection id cannot be empty")]
    ConnectionIdEmpty,

    /// ConnectionId too long error
    #[error("connection id cannot exceed {max} characters (got {actual})")]
    ConnectionIdTooLong { max: usize, actual: usize },

    /// RoomName validation error
    #[error("room name cannot be empty or whitespace-only")]
    RoomNameEmpty,

    /// RoomName too long error
    #[error("room name cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// MessageContent validation error
    #[error("message cannot be empty")]
    MessageContentEmpty,

    /// MessageContent too long error
    #[error("message cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },
}

/// Errors related to registry operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Membership mutation addressed to a connection that was never
    /// registered, or that has already been unregistered.
    #[error("unknown connection: {0}")]
    UnknownConnection(ConnectionId),
}
