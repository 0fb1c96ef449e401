//! LLM-backed model implementations.

pub mod gateway;

pub use gateway::GatewayModel;
