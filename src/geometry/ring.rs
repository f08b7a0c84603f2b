//! Index walks around a closed vertex ring

/// Iterator over ring indices from `from` to `to`, both inclusive, wrapping
/// past the last vertex back to zero.
///
/// `RingWalk::new(5, 3, 1)` yields `3, 4, 0, 1`.
#[derive(Debug, Clone)]
pub struct RingWalk {
    len: usize,
    next: usize,
    remaining: usize,
}

impl RingWalk {
    pub fn new(len: usize, from: usize, to: usize) -> Self {
        if len == 0 {
            return Self {
                len,
                next: 0,
                remaining: 0,
            };
        }
        let from = from % len;
        let to = to % len;
        Self {
            len,
            next: from,
            remaining: (to + len - from) % len + 1,
        }
    }
}

impl Iterator for RingWalk {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        self.next = (self.next + 1) % self.len;
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RingWalk {}
