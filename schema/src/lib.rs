//! Schema model for the wirepack binary format.
//!
//! A [`Schema`] describes the shape of a value and selects the encoding of
//! every part of it. Schemas carry no behavior of their own; the codec crate
//! interprets them.
//!
//! - Atom kinds for fixed-width, varint, decimal, bit-packed and string scalars
//! - Composite shapes: arrays, tuples, objects, records, enums, nullables, unions
//! - Structural validation
//! - Deterministic schema fingerprinting
//!
//! # Example
//!
//! ```
//! use schema::{Property, Schema};
//!
//! let person = Schema::object([
//!     Property::new("name", Schema::string()),
//!     Property::new("age", Schema::uint8()),
//! ]);
//! person.validate().unwrap();
//! ```

mod atom;
mod error;
mod hash;
mod primitive;
mod schema;

pub use atom::{AtomKind, MAX_BIT_WIDTH, SMALL_VARINT_LIMIT};
pub use error::{SchemaError, SchemaResult};
pub use hash::schema_hash;
pub use primitive::Primitive;
pub use schema::{Property, Schema};
