//! Form-driven handlers backing the HTML page.
//!
//! Actions that change the list answer with a `303 See Other` back to `/`;
//! the inline editors (`/update/...`) answer with the updated item as JSON.

pub mod delete;
pub mod page;
pub mod update;

use axum::response::Redirect;

pub(crate) fn back_to_index() -> Redirect { Redirect::to("/") }
