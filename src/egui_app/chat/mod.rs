//! One-to-one chat
//!
//! - **`stomp`** - STOMP frame codec
//! - **`transport`** - WebSocket session that turns topic traffic into
//!   change signals
//! - **`room`** - channel naming and the loaded history for one pair

pub mod room;
pub mod stomp;
pub mod transport;

pub use room::ChatRoom;
pub use transport::{ChatSignal, ChatTransport};
