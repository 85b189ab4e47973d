//! Reference-counted native event listeners
//!
//! Host code adds any number of handlers per [`HandlerType`]; the native
//! emitter only ever sees one listener per tracked type, attached while at
//! least one handler of that type exists.
//!
//! ```text
//! add_handler ─► AddHandlerEvent ─► EventItemManager ─► EventItem ─► attach_listener
//! remove_handler ─► RemoveHandlerEvent ─► EventItemManager ─► EventItem ─► detach_listener
//! ```

mod handlers;
mod item;
mod manager;
mod types;

pub use handlers::{EventHandler, EventManager, HandlerRegistration};
pub use item::{Emitter, EventItem, EventListenerGuard, HandlerCounter, ItemState};
pub use manager::EventItemManager;
pub use types::{AddHandlerEvent, HandlerType, RemoveHandlerEvent};
