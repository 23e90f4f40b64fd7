//! Site, card and theme data types.

pub mod card;
pub mod site;
pub mod theme;
