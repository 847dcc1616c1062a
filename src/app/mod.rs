//! Application layer: state, events, and the actions they produce.
//!
//! ```text
//! key / timer / web result → Event → handle_event → AppState → Vec<Action> → host
//!                              ↑                                                │
//!                              └──────────── WebRequestResult, Timer ───────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects for the host to execute
//! - [`handler`]: Event dispatch and response handling
//! - [`state`]: Central state and the search/pagination controller
//! - [`search`]: Raw input, debounced term and page
//! - [`debounce`]: Generation-counted debounce over host timers
//! - [`mutation`]: Create and delete requests in flight
//! - [`form`]: Create-note modal
//! - [`notification`]: Toast notifications
//! - [`modes`]: Keyboard input modes

pub mod actions;
pub mod debounce;
pub mod form;
pub mod handler;
pub mod modes;
pub mod mutation;
pub mod notification;
pub mod search;
pub mod state;

pub use actions::Action;
pub use debounce::Debouncer;
pub use form::NoteForm;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use mutation::{MutationOrchestrator, PendingMutation};
pub use notification::{Notification, NotificationKind};
pub use search::{EmptySearchPolicy, SearchQuery};
pub use state::{AppState, QueryOptions};
