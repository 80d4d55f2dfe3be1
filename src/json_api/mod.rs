//! # JSON API
//!
//! Describe a print job as JSON and run it against an [`Encoder`](crate::Encoder).
//!
//! Every command maps to one encoder call. Table cells and box contents are
//! either a string or a nested command list rendered into the cell.
//!
//! ## Example
//!
//! ```
//! use starline::json_api::Job;
//!
//! let json = r#"{
//!     "options": {"width": 32},
//!     "commands": [
//!         {"type": "initialize"},
//!         {"type": "align", "value": "center"},
//!         {"type": "bold", "value": true},
//!         {"type": "line", "value": "HELLO"},
//!         {"type": "bold", "value": false},
//!         {"type": "table",
//!          "columns": [{"width": 20}, {"width": 12, "align": "right"}],
//!          "rows": [["Espresso", "4.50"]]},
//!         {"type": "cut"}
//!     ]
//! }"#;
//!
//! let job = Job::from_json(json).unwrap();
//! let bytes = job.encode_with(|_| unreachable!("no images")).unwrap();
//! assert!(!bytes.is_empty());
//! ```

mod convert;
mod schema;

pub use convert::JobError;
pub use schema::{Cell, Command, Job};
