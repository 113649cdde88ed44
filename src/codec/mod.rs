//! JSON codec used to render arguments and results in log lines.
//!
//! The codec produces a stable, diff-friendly text form: object keys are sorted
//! lexicographically and null fields are dropped. Encoding never fails from the
//! caller's point of view; a value that cannot be rendered yields `None` and a
//! warning on the `tracing` facade.
//!
//! # Examples
//!
//! ```
//! use logprint::codec::Codec;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Order {
//!     id: u64,
//!     note: Option<String>,
//! }
//!
//! let codec = Codec::shared();
//! let text = codec.encode(&Order { id: 7, note: None }).unwrap();
//! assert_eq!(text, r#"{"id":7}"#);
//!
//! let back: Order = codec.decode(&text).unwrap();
//! assert_eq!(back, Order { id: 7, note: None });
//! ```

pub mod json_codec;

pub use json_codec::{root_name, Codec, CodecConfig};
