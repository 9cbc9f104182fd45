//! got - lazily constructed, memoized dependencies
//!
//! A [`Container`] caches the result of each [`Handle`]'s factory the first
//! time it is resolved with [`from`] and replays it afterwards. Factories
//! receive the container and resolve their own dependencies from it, so object
//! graphs assemble themselves through ordinary calls. Tests swap in fakes with
//! [`mock`].
//!
//! ```
//! use std::sync::{Arc, LazyLock};
//! use got::{Container, Handle};
//!
//! struct Db {
//!     url: String,
//! }
//!
//! struct Repo {
//!     db: Arc<Db>,
//! }
//!
//! static DB: LazyLock<Handle<Arc<Db>>> = LazyLock::new(|| {
//!     Handle::new(|_| Arc::new(Db { url: "prod".to_string() }))
//! });
//!
//! static REPO: LazyLock<Handle<Arc<Repo>>> =
//!     LazyLock::new(|| Handle::new(|c| Arc::new(Repo { db: DB.from(c) })));
//!
//! let c = Container::new();
//! got::mock(&c, &*DB, Arc::new(Db { url: "test".to_string() }));
//!
//! let repo = REPO.from(&c);
//! assert_eq!(repo.db.url, "test");
//! assert!(Arc::ptr_eq(&repo, &REPO.from(&c)));
//! ```
//!
//! Concurrent first resolutions of one handle may run its factory more than
//! once; exactly one result is committed and returned to every caller.
//! Circular dependencies are not detected and recurse until the stack is
//! exhausted.

pub mod config;
pub mod container;
pub mod error;
pub mod handle;
pub mod resolve;

pub use config::ContainerConfig;
pub use container::Container;
pub use error::{GotError, GotResult};
pub use handle::{using, using2, Constructor, Constructor2, Handle, Handle2, HandleId};
pub use resolve::{from, from2, mock, mock2};
