// SPDX: CC0-1.0

pub mod page;
pub mod scan;
pub mod shell;
pub mod slider;
pub mod translate;
pub mod typeset;

use core::fmt;

pub type Number = f64;

pub const BASE_SAMPLES: usize = 500;
pub const SAMPLES_PER_UNIT: usize = 500;

/// Plotting range, ascending by construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    start: Number,
    end: Number,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpanErr {
    NotFinite,
    NotAscending,
}

impl fmt::Display for SpanErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite => write!(f, "Range must be a real number"),
            Self::NotAscending => write!(f, "Range must end after it starts"),
        }
    }
}

impl Span {
    pub fn new(start: Number, end: Number) -> Result<Self, SpanErr> {
        if !start.is_finite() || !end.is_finite() {
            Err(SpanErr::NotFinite)
        } else if end <= start {
            Err(SpanErr::NotAscending)
        } else {
            Ok(Self { start, end })
        }
    }

    pub const fn start(&self) -> Number {
        self.start
    }

    pub const fn end(&self) -> Number {
        self.end
    }

    pub fn len(&self) -> Number {
        self.end - self.start
    }

    // resolution scales with the span so wide ranges still render smoothly
    pub fn sample_count(&self) -> usize {
        BASE_SAMPLES + SAMPLES_PER_UNIT * self.len().ceil() as usize
    }

    pub fn samples(&self) -> Vec<Number> {
        let count = self.sample_count();
        let step = self.len() / (count - 1) as Number;
        (0..count)
            .map(|i| {
                if i == count - 1 {
                    // land exactly on the far endpoint
                    self.end
                } else {
                    self.start + step * i as Number
                }
            })
            .collect()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_backwards_and_empty_ranges() {
        assert_eq!(Span::new(3.0, 0.0), Err(SpanErr::NotAscending));
        assert_eq!(Span::new(2.0, 2.0), Err(SpanErr::NotAscending));
        assert_eq!(Span::new(0.0, Number::NAN), Err(SpanErr::NotFinite));
        assert_eq!(Span::new(Number::INFINITY, 0.0), Err(SpanErr::NotFinite));
        assert!(Span::new(-1.0, 1.0).is_ok());
    }

    #[test]
    fn count_scales_with_span() {
        let span = Span::new(0.0, 3.0).unwrap();
        assert_eq!(span.sample_count(), 2000);

        // fractional spans round up a whole extra block
        let span = Span::new(0.0, 2.5).unwrap();
        assert_eq!(span.sample_count(), 2000);

        let span = Span::new(-0.5, 0.25).unwrap();
        assert_eq!(span.sample_count(), 1000);
    }

    #[test]
    fn samples_are_even_and_inclusive() {
        let span = Span::new(0.0, 3.0).unwrap();
        let xs = span.samples();
        assert_eq!(xs.len(), 2000);
        assert_eq!(xs[0], 0.0);
        assert_eq!(*xs.last().unwrap(), 3.0);

        let step = 3.0 / 1999.0;
        for pair in xs.windows(2) {
            assert!((pair[1] - pair[0] - step).abs() < 1e-12);
        }
    }
}
