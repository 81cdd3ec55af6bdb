//! Binary value codec for wirepack.
//!
//! This crate ties together the cursor and schema crates to turn [`Value`]s
//! into compact byte sequences and back.
//!
//! # Features
//!
//! - Schema-driven encoding: no field names, fixed arities, bit-packed fields
//! - Self-describing encoding for dynamically typed data
//! - Unsigned and sign-magnitude varints with arbitrary-precision tiers
//! - Exact decimals
//! - Decode limits for untrusted input
//!
//! # Design Principles
//!
//! - **Deterministic** - Same inputs produce the same bytes.
//! - **Stateless** - No caches or globals; the cursor is the only mutable state.
//! - **Caller-provided buffers** - Encoding never allocates the output.
//!
//! # Example
//!
//! ```
//! use codec::{read_value, write_value, Value};
//! use cursor::Cursor;
//! use schema::Schema;
//!
//! let schema = Schema::tuple([Schema::uint8(), Schema::string()]);
//! let value = Value::Array(vec![Value::Int(7), Value::from("abc")]);
//!
//! let mut cursor = Cursor::new([0u8; 16]);
//! write_value(&mut cursor, &schema, &value).unwrap();
//! assert_eq!(cursor.written(), [7, 3, b'a', b'b', b'c']);
//!
//! cursor.reset();
//! assert_eq!(read_value(&mut cursor, &schema).unwrap(), value);
//! ```

pub mod atoms;
mod conform;
pub mod dynamic;
mod error;
mod limits;
mod typed;
mod value;

pub use atoms::{read_atom, write_atom};
pub use conform::conforms;
pub use dynamic::{is_classifiable, read_dynamic, read_dynamic_with_limits, write_dynamic};
pub use error::{CodecError, CodecResult, LimitKind};
pub use limits::DecodeLimits;
pub use typed::{read_value, read_value_with_limits, write_value};
pub use value::Value;
