//! The board interaction core: turns pointer and drag input on squares into
//! hover, selection, annotation, and move-commit decisions.

pub mod controller;
pub mod drop_target;
pub mod promotion;
pub mod session;
pub mod state;
pub mod view;

pub use controller::MouseButton;
pub use promotion::Viewport;
pub use session::{BoardEvent, BoardSession, Host};
pub use state::{Intent, InteractionState, Selection};
pub use view::{Decoration, SquareView};
