//! Backoffice Core - paginated browsing and CRUD orchestration for the
//! backoffice dashboard
//!
//! This library holds everything between a rendering shell and the
//! backoffice API: page-window fetching with stale-response discipline,
//! query parameter composition, the list/detail/create/edit view-state
//! machine and the pagination strip math. Shells drive an
//! [`browser::EntityBrowser`] per collection and render from its
//! accessors.

pub mod adapters;
pub mod browser;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod identity;
pub mod logging;
pub mod models;
pub mod mutation;
pub mod pagination;
pub mod prelude;
pub mod query;
pub mod repository;
pub mod view_state;
