//! Limits for decoding untrusted input.

use crate::error::{CodecError, CodecResult, LimitKind};

/// Bounds enforced while decoding.
///
/// Every count read from the wire is checked against these limits before any
/// allocation is made for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum nesting depth of composite values.
    pub max_depth: usize,
    /// Maximum number of elements or entries in one array, object or record.
    pub max_collection_len: usize,
    /// Maximum number of characters in one string.
    pub max_string_len: usize,
    /// Maximum number of bytes in one arbitrary-precision varint.
    pub max_varint_bytes: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_collection_len: 1 << 20,
            max_string_len: 1 << 24,
            max_varint_bytes: 1 << 12,
        }
    }
}

impl DecodeLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_depth: 16,
            max_collection_len: 256,
            max_string_len: 1024,
            max_varint_bytes: 64,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
            max_collection_len: usize::MAX,
            max_string_len: usize::MAX,
            max_varint_bytes: usize::MAX,
        }
    }

    pub(crate) fn check_depth(&self, depth: usize) -> CodecResult<()> {
        check(LimitKind::Depth, self.max_depth, depth)
    }

    pub(crate) fn check_collection_len(&self, len: usize) -> CodecResult<()> {
        check(LimitKind::CollectionLen, self.max_collection_len, len)
    }

    pub(crate) fn check_string_len(&self, len: usize) -> CodecResult<()> {
        check(LimitKind::StringLen, self.max_string_len, len)
    }

    pub(crate) fn check_varint_len(&self, len: usize) -> CodecResult<()> {
        check(LimitKind::VarintLen, self.max_varint_bytes, len)
    }
}

fn check(kind: LimitKind, limit: usize, actual: usize) -> CodecResult<()> {
    if actual > limit {
        return Err(CodecError::LimitsExceeded {
            kind,
            limit,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_are_reasonable() {
        let limits = DecodeLimits::default();
        assert!(limits.max_depth >= 64);
        assert!(limits.max_collection_len >= 1024);
        assert!(limits.max_string_len >= limits.max_collection_len);
    }

    #[test]
    fn testing_limits_smaller() {
        let test_limits = DecodeLimits::for_testing();
        let default_limits = DecodeLimits::default();
        assert!(test_limits.max_depth < default_limits.max_depth);
        assert!(test_limits.max_collection_len < default_limits.max_collection_len);
        assert!(test_limits.max_string_len < default_limits.max_string_len);
        assert!(test_limits.max_varint_bytes < default_limits.max_varint_bytes);
    }

    #[test]
    fn unlimited_limits() {
        let limits = DecodeLimits::unlimited();
        assert_eq!(limits.max_depth, usize::MAX);
        assert_eq!(limits.max_string_len, usize::MAX);
    }

    #[test]
    fn checks_report_the_exceeded_limit() {
        let limits = DecodeLimits::for_testing();
        assert!(limits.check_collection_len(256).is_ok());
        assert_eq!(
            limits.check_collection_len(257),
            Err(CodecError::LimitsExceeded {
                kind: LimitKind::CollectionLen,
                limit: 256,
                actual: 257,
            })
        );
        assert!(limits.check_depth(17).is_err());
        assert!(limits.check_string_len(1024).is_ok());
        assert!(limits.check_varint_len(64).is_ok());
        assert!(limits.check_varint_len(65).is_err());
    }
}
