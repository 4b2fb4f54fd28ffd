use std::fmt;
use std::time::{Duration, Instant};

use derive_more::{Add, AddAssign, Display};

/// A duration expressed as a floating-point number of milliseconds.
///
/// Unlike [`Duration`], this can represent the "undefined" average of zero samples (NaN), which
/// is what a run of zero jobs produces. It is displayed rounded to six significant digits.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use job_lab::Millis;
///
/// let millis = Millis::from(Duration::from_micros(2_500));
/// assert_eq!(millis.to_string(), "2.5ms");
/// ```
#[derive(Add, AddAssign, Clone, Copy, Debug, Default, Display, PartialEq, PartialOrd)]
#[display("{}ms", significant(*_0))]
pub struct Millis(f64);

impl Millis {
    /// Zero milliseconds.
    pub const ZERO: Self = Self(0.0);

    /// Creates a value from a raw number of milliseconds.
    #[must_use]
    pub const fn new(millis: f64) -> Self {
        Self(millis)
    }

    /// The raw number of milliseconds.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// The value converted to seconds.
    #[must_use]
    pub fn as_secs_f64(self) -> f64 {
        self.0 / 1000.0
    }

    /// Divides the value into `count` equal parts.
    ///
    /// Dividing by zero yields NaN (or an infinity for a non-zero value) instead of panicking.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "job counts large enough to lose precision are not realistic"
    )]
    pub fn divided_by(self, count: u64) -> Self {
        Self(self.0 / count as f64)
    }
}

impl From<Duration> for Millis {
    #[expect(
        clippy::cast_precision_loss,
        reason = "durations long enough to lose precision are not realistic"
    )]
    fn from(value: Duration) -> Self {
        // Whole seconds and the sub-second part are converted separately so that whole
        // milliseconds stay exact.
        Self(value.as_secs() as f64 * 1000.0 + f64::from(value.subsec_nanos()) / 1_000_000.0)
    }
}

/// Returns the absolute number of milliseconds between two instants.
///
/// The order of the arguments does not matter and the result is never negative.
///
/// # Examples
///
/// ```
/// use std::fmt;
/// use std::time::{Duration, Instant};
///
/// use job_lab::ms_between;
///
/// let earlier = Instant::now();
/// let later = earlier + Duration::from_millis(3);
///
/// assert_eq!(ms_between(earlier, later), ms_between(later, earlier));
/// assert_eq!(ms_between(earlier, later).get(), 3.0);
/// ```
#[must_use]
pub fn ms_between(t1: Instant, t2: Instant) -> Millis {
    let difference = t2
        .saturating_duration_since(t1)
        .max(t1.saturating_duration_since(t2));

    Millis::from(difference)
}

const SIGNIFICANT_DIGITS: i32 = 6;

// Smaller decimal exponents switch to exponent notation, as do those of SIGNIFICANT_DIGITS and up.
const MIN_FIXED_EXPONENT: i32 = -4;

/// Displays a floating-point number rounded to six significant digits without trailing zeros,
/// switching to exponent notation for very large and very small magnitudes.
pub(crate) fn significant(value: f64) -> Significant {
    Significant(value)
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Significant(f64);

impl fmt::Display for Significant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;

        if value == 0.0 || !value.is_finite() {
            return write!(f, "{value}");
        }

        let precision = usize::try_from(SIGNIFICANT_DIGITS - 1).expect("constant is positive");

        // The exponent is taken after rounding, so 999999.5 becomes 1e6 rather than 1000000.
        let scientific = format!("{value:.precision$e}");
        let (mantissa, exponent) = scientific
            .split_once('e')
            .expect("exponent notation always contains an exponent");
        let exponent: i32 = exponent
            .parse()
            .expect("exponent notation always has an integer exponent");

        if (MIN_FIXED_EXPONENT..SIGNIFICANT_DIGITS).contains(&exponent) {
            let decimals = usize::try_from(SIGNIFICANT_DIGITS - 1 - exponent)
                .expect("exponent is below the significant digit count");

            f.write_str(trim_fraction(&format!("{value:.decimals$}")))
        } else {
            write!(f, "{}e{exponent}", trim_fraction(mantissa))
        }
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
