//! The consumed collaborator contract: how the capture pipeline talks to the
//! scene graph and its rendering engine.

pub mod host;
