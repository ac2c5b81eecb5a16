//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types from the backoffice-core
//! library, providing a convenient way to import the most frequently
//! used items.
//!
//! # Usage
//!
//! ```ignore
//! use backoffice_core::prelude::*;
//! ```
//!
//! This will import:
//! - The browser and its repositories (EntityBrowser, EntityRepository)
//! - Adapters (HttpRepository, InMemoryRepository)
//! - Entity types (Customer, Product, Order, Supplier, Category)
//! - Query and window types (QueryDescriptor, Pagination, PageWindow)
//! - Coordination types (FetchCoordinator, MutationCoordinator, ViewState)
//! - Configuration and errors (CoreConfig, RepoError)

// Browsing surface
pub use crate::browser::EntityBrowser;
pub use crate::repository::{EntityRepository, PageWindow};

// Adapters
pub use crate::adapters::{HttpRepository, InMemoryRepository};

// Entity types
pub use crate::models::{
    Category, CategoryDraft, Customer, CustomerDraft, Entity, Order, OrderDraft, OrderStatus,
    Product, ProductDraft, Supplier, SupplierDraft,
};

// Query and window composition
pub use crate::pagination::{PaginationMeta, DEFAULT_MAX_VISIBLE};
pub use crate::query::{Pagination, QueryDescriptor, SearchSpec};

// Coordination
pub use crate::fetch::{FetchCoordinator, ResolveOutcome};
pub use crate::mutation::{MutationCoordinator, MutationKind, MutationStatus};
pub use crate::view_state::{EditOrigin, ViewState};

// Configuration and errors
pub use crate::config::CoreConfig;
pub use crate::error::RepoError;
