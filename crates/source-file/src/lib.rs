//! Dictionary sources fed from a TabSeparated file inside a cluster node.
//!
//! All three adapters create `/<table>.tsv` in the node and append one line
//! per row to it. They differ in how the system under test reads the file:
//!
//! - [`FileSource`] reads it directly,
//! - [`ExecutableSource`] runs a command that prints it,
//! - [`HttpSource`] fetches it from a `tsv-http-server` started in the node.

mod executable;
mod feed;
mod file;
mod http;

pub use executable::{ExecutableMode, ExecutableSource};
pub use feed::{tsv_path, TsvFeed};
pub use file::FileSource;
pub use http::{
    HttpScheme, HttpServerAssets, HttpSource, API_KEY_HEADER, CONTAINER_CERT_PATH,
    CONTAINER_SERVER_PATH,
};

/// Format name every file-fed fragment declares.
pub const TSV_FORMAT: &str = "TabSeparated";
