//! UI components.
//!
//! Each component implements [`Component`](crate::tui::component::Component)
//! and, where it consumes input, [`EventHandler`](crate::tui::component::EventHandler).

pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;
pub mod plan_strip;
pub mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use landing::Landing;
pub use message::{CompletionBanner, MessageBubble};
pub use message_list::{MessageList, MessageListState};
pub use plan_strip::PlanStrip;
pub use title_bar::TitleBar;
