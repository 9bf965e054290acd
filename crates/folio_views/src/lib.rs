//! Behaviour behind the interactive parts of the articles pages: the
//! debounced search box, the read tracker and the pagination bar.

pub mod debounce;
pub mod pagination;
pub mod read_tracker;
pub mod search;

pub use debounce::Debouncer;
pub use pagination::{NavItem, NavLink, PaginationNav};
pub use read_tracker::{ReadTracker, READ_DELAY};
pub use search::{search_params, SearchBox, SEARCH_DEBOUNCE};
