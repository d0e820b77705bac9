pub mod entity;
pub mod error;
pub mod interaction;
pub mod session;
pub mod simulation;
pub mod world;

pub use error::{InteractionError, InteractionResult};
pub use interaction::{InteractionContext, InteractionController};
pub use session::{Session, SessionConfig, SessionStatus, TickReport};
