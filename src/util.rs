/// Checks that a numerical value is in the closed interval `[a,b]` and returns early
/// with an [`Error::InvalidConfiguration`](crate::error::Error::InvalidConfiguration) if not
///
/// `NaN` is always rejected.
///
/// ### Example
/// ```ignore
/// let value = 2.0;
/// ensure_interval!(value, 0.0, 1.0);
/// ```
/// This will return the error "invalid configuration: `value` = 2 must be in the interval \[0, 1\]"
#[macro_export]
macro_rules! ensure_interval {
    ($var:expr, $a:expr, $b:expr) => {
        if !($var >= $a && $var <= $b) {
            return Err($crate::error::Error::InvalidConfiguration(format!(
                "`{}` = {} must be in the interval [{}, {}]",
                stringify!($var),
                $var,
                $a,
                $b,
            )));
        }
    };
}

/// Checks that a numerical value is finite and returns early with an
/// [`Error::InvalidConfiguration`](crate::error::Error::InvalidConfiguration) if not
#[macro_export]
macro_rules! ensure_finite {
    ($var:expr) => {
        if !$var.is_finite() {
            return Err($crate::error::Error::InvalidConfiguration(format!(
                "`{}` = {} must be a finite number",
                stringify!($var),
                $var,
            )));
        }
    };
}

/// Index of the greatest score; the lowest index wins ties regardless of iteration order
///
/// **Returns** `None` for an empty iterator
pub(crate) fn argmax(scores: impl IntoIterator<Item = (usize, f64)>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, score) in scores {
        best = match best {
            Some((j, top)) if score < top || (score == top && j < i) => Some((j, top)),
            _ => Some((i, score)),
        };
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};

    fn check(alpha: f64) -> Result<()> {
        ensure_interval!(alpha, 0.0, 1.0);
        Ok(())
    }

    #[test]
    fn ensure_interval_bounds() {
        assert!(check(0.0).is_ok());
        assert!(check(1.0).is_ok());
        assert!(matches!(check(1.5), Err(Error::InvalidConfiguration(_))));
        assert!(matches!(check(f64::NAN), Err(Error::InvalidConfiguration(_))));
    }

    fn check_finite(bonus: f64) -> Result<()> {
        ensure_finite!(bonus);
        Ok(())
    }

    #[test]
    fn ensure_finite_rejects_nan_and_infinity() {
        assert!(check_finite(-5.0).is_ok());
        assert!(matches!(check_finite(f64::NAN), Err(Error::InvalidConfiguration(_))));
        assert!(matches!(check_finite(f64::INFINITY), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn argmax_prefers_lowest_index() {
        assert_eq!(argmax([(0, 1.0), (1, 3.0), (2, 3.0)]), Some(1));
        assert_eq!(argmax([(4, -1.0), (7, -1.0)]), Some(4));
        assert_eq!(argmax([(7, -1.0), (4, -1.0)]), Some(4));
        assert_eq!(argmax(std::iter::empty()), None);
    }
}
