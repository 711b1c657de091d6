//! Presentational components
//!
//! Components are pure functions from read-only input to a [`Node`] tree.
//! They never touch the filesystem or the network and never fail; the
//! generator serializes their output into the page templates.

mod bio;
mod category_nav;
mod comments;
mod more_button;
mod node;
mod post_card;
mod post_cards_column;

pub use bio::Bio;
pub use category_nav::{CategoryNav, ALL_CATEGORY};
pub use comments::Comments;
pub use more_button::MoreButton;
pub use node::{Element, Node};
pub use post_card::{CardRenderer, PostCard};
pub use post_cards_column::{PostCardsColumn, DEFAULT_PAGE_SIZE};
