//! HTTP Range request parsing module
//!
//! Single `bytes` ranges only; anything else is served in full.

/// Inclusive byte range, already clamped to the file size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub const fn content_length(self) -> usize {
        self.end - self.start + 1
    }
}

/// What to send for a request's `Range` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No usable Range header, send the whole file
    Full,
    /// Send 206 with this slice
    Partial(ByteRange),
    /// Send 416
    Unsatisfiable,
}

/// Interpret a `Range` header against a file of `size` bytes
///
/// Supported forms are `bytes=a-b`, `bytes=a-` and `bytes=-n`.
/// Malformed headers and multi-range requests fall back to [`RangeOutcome::Full`].
pub fn evaluate_range(header: Option<&str>, size: usize) -> RangeOutcome {
    let Some(spec) = header.and_then(|h| h.trim().strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };
    if spec.contains(',') {
        return RangeOutcome::Full;
    }
    let Some((first, last)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (first, last) = (first.trim(), last.trim());

    if first.is_empty() {
        // Suffix: the last n bytes
        return match last.parse::<usize>() {
            Ok(0) => RangeOutcome::Unsatisfiable,
            Ok(_) if size == 0 => RangeOutcome::Unsatisfiable,
            Ok(n) => RangeOutcome::Partial(ByteRange {
                start: size.saturating_sub(n),
                end: size - 1,
            }),
            Err(_) => RangeOutcome::Full,
        };
    }

    let Ok(start) = first.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if last.is_empty() {
        size - 1
    } else {
        match last.parse::<usize>() {
            Ok(end) if end < start => return RangeOutcome::Unsatisfiable,
            Ok(end) => end.min(size - 1),
            Err(_) => return RangeOutcome::Full,
        }
    };

    RangeOutcome::Partial(ByteRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_header() {
        assert_eq!(evaluate_range(None, 100), RangeOutcome::Full);
    }

    #[test]
    fn test_closed_range() {
        let outcome = evaluate_range(Some("bytes=0-9"), 100);
        assert_eq!(outcome, RangeOutcome::Partial(ByteRange { start: 0, end: 9 }));
        if let RangeOutcome::Partial(range) = outcome {
            assert_eq!(range.content_length(), 10);
        }
    }

    #[test]
    fn test_open_range() {
        assert_eq!(
            evaluate_range(Some("bytes=50-"), 100),
            RangeOutcome::Partial(ByteRange { start: 50, end: 99 })
        );
    }

    #[test]
    fn test_end_is_clamped() {
        assert_eq!(
            evaluate_range(Some("bytes=90-500"), 100),
            RangeOutcome::Partial(ByteRange { start: 90, end: 99 })
        );
    }

    #[test]
    fn test_suffix_range() {
        assert_eq!(
            evaluate_range(Some("bytes=-20"), 100),
            RangeOutcome::Partial(ByteRange { start: 80, end: 99 })
        );
        assert_eq!(
            evaluate_range(Some("bytes=-500"), 100),
            RangeOutcome::Partial(ByteRange { start: 0, end: 99 })
        );
    }

    #[test]
    fn test_unsatisfiable() {
        assert_eq!(evaluate_range(Some("bytes=200-"), 100), RangeOutcome::Unsatisfiable);
        assert_eq!(evaluate_range(Some("bytes=20-10"), 100), RangeOutcome::Unsatisfiable);
        assert_eq!(evaluate_range(Some("bytes=-0"), 100), RangeOutcome::Unsatisfiable);
        assert_eq!(evaluate_range(Some("bytes=0-"), 0), RangeOutcome::Unsatisfiable);
    }

    #[test]
    fn test_ignored_headers() {
        assert_eq!(evaluate_range(Some("bytes=a-b"), 100), RangeOutcome::Full);
        assert_eq!(evaluate_range(Some("bytes=0-9,20-29"), 100), RangeOutcome::Full);
        assert_eq!(evaluate_range(Some("items=0-9"), 100), RangeOutcome::Full);
        assert_eq!(evaluate_range(Some("bytes=5"), 100), RangeOutcome::Full);
    }
}
