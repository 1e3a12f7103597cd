//! # Userdesk Directory
//!
//! Client for the users directory: keyword search, the user list table and
//! the user detail editor.
//!
//! ```rust,no_run
//! use userdesk_directory::{DirectoryConfig, HttpDirectoryApi, SearchBar, SearchOutcome, TableList};
//!
//! # async fn example() -> Result<(), userdesk_directory::DirectoryError> {
//! let api = HttpDirectoryApi::new(&DirectoryConfig::default())?;
//! let mut table = TableList::user_list();
//! let mut bar = SearchBar::new(table.api_url());
//!
//! bar.set_term("john");
//! table.apply(bar.search(&api).await);
//! for row in table.rows() {
//!     println!("{}", row.join(" | "));
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod detail;
pub mod error;
pub mod model;
pub mod search;
pub mod table;

// Mock directory API (enabled by default for tests)
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use api::{DirectoryApi, HttpDirectoryApi, search_url};
pub use config::DirectoryConfig;
pub use detail::{Notice, UserDetailEditor};
pub use error::{DirectoryError, Result};
pub use model::{Address, Bank, Coordinates, UserProfile, UserSummary};
pub use search::{SearchBar, SearchOutcome};
pub use table::{Column, TableList};
