//! rotinet-web: HTTP front end.
//!
//! Serves the network view (`/`), the node detail view and the genome-browser
//! view, a small JSON API, and the CORS-enabled asset server igv.js reads
//! reference files from.

pub mod assets;
pub mod error;
pub mod handlers;
pub mod hub_image;
pub mod link;
pub mod query;
pub mod router;
pub mod session;
pub mod state;
pub mod templates;
