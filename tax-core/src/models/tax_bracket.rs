use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One progressive rate tier: income in `[min, max)` is taxed at `rate`.
///
/// `max` is `None` for the open-ended top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min: Decimal,
    #[serde(default)]
    pub max: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min: Decimal,
        max: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self { min, max, rate }
    }

    /// Width of the bracket, or `None` when it has no upper bound.
    ///
    /// A width too large to represent counts as unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.max.and_then(|max| max.checked_sub(self.min))
    }
}

/// Reasons a bracket schedule is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketError {
    #[error("no tax brackets provided")]
    Empty,

    #[error("bracket {index} has a negative lower bound {min}")]
    NegativeMin { index: usize, min: Decimal },

    #[error("bracket {index} has rate {rate} outside 0..=1")]
    RateOutOfRange { index: usize, rate: Decimal },

    #[error("bracket {index} upper bound {max} is not above its lower bound {min}")]
    Inverted {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    #[error("bracket {index} is open-ended but is not the last bracket")]
    OpenEndedBeforeLast { index: usize },

    #[error("last bracket must be open-ended, found upper bound {max}")]
    BoundedLast { max: Decimal },

    #[error("bracket {index} ends at {max} but the next bracket starts at {next_min}")]
    NotContiguous {
        index: usize,
        max: Decimal,
        next_min: Decimal,
    },
}

/// Checks that `brackets` tile `[0, ∞)`-style ranges in ascending order.
///
/// The tax engine trusts its input; bracket sources call this before
/// handing a schedule out so that gaps, overlaps, and out-of-order data
/// are reported instead of silently mis-allocating income.
pub fn check_brackets(brackets: &[TaxBracket]) -> Result<(), BracketError> {
    let Some(last) = brackets.last() else {
        return Err(BracketError::Empty);
    };

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.min < Decimal::ZERO {
            return Err(BracketError::NegativeMin {
                index,
                min: bracket.min,
            });
        }
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(BracketError::RateOutOfRange {
                index,
                rate: bracket.rate,
            });
        }
        if let Some(max) = bracket.max {
            if max <= bracket.min {
                return Err(BracketError::Inverted {
                    index,
                    min: bracket.min,
                    max,
                });
            }
        }
    }

    for (index, pair) in brackets.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        match current.max {
            None => return Err(BracketError::OpenEndedBeforeLast { index }),
            Some(max) if max != next.min => {
                return Err(BracketError::NotContiguous {
                    index,
                    max,
                    next_min: next.min,
                });
            }
            Some(_) => {}
        }
    }

    match last.max {
        Some(max) => Err(BracketError::BoundedLast { max }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn schedule() -> Vec<TaxBracket> {
        vec![
            TaxBracket::new(dec!(0), Some(dec!(50197)), dec!(0.15)),
            TaxBracket::new(dec!(50197), Some(dec!(100392)), dec!(0.205)),
            TaxBracket::new(dec!(100392), None, dec!(0.26)),
        ]
    }

    #[test]
    fn deserializes_missing_max_as_open_ended() {
        let bracket: TaxBracket = serde_json::from_str(r#"{"min": 221708, "rate": 0.33}"#).unwrap();

        assert_eq!(bracket, TaxBracket::new(dec!(221708), None, dec!(0.33)));
    }

    #[test]
    fn deserializes_null_max_as_open_ended() {
        let bracket: TaxBracket =
            serde_json::from_str(r#"{"min": 0, "max": null, "rate": 0.1}"#).unwrap();

        assert_eq!(bracket.max, None);
    }

    #[test]
    fn width_is_none_for_open_ended_bracket() {
        let brackets = schedule();

        assert_eq!(brackets[0].width(), Some(dec!(50197)));
        assert_eq!(brackets[2].width(), None);
    }

    #[test]
    fn width_past_decimal_range_is_unbounded() {
        let bracket = TaxBracket::new(dec!(-1), Some(Decimal::MAX), dec!(0.1));

        assert_eq!(bracket.width(), None);
    }

    #[test]
    fn check_accepts_contiguous_schedule() {
        assert_eq!(check_brackets(&schedule()), Ok(()));
    }

    #[test]
    fn check_accepts_single_open_bracket() {
        let brackets = vec![TaxBracket::new(dec!(0), None, dec!(0.1))];

        assert_eq!(check_brackets(&brackets), Ok(()));
    }

    #[test]
    fn check_rejects_empty_schedule() {
        assert_eq!(check_brackets(&[]), Err(BracketError::Empty));
    }

    #[test]
    fn check_rejects_negative_min() {
        let brackets = vec![TaxBracket::new(dec!(-1), None, dec!(0.1))];

        assert_eq!(
            check_brackets(&brackets),
            Err(BracketError::NegativeMin {
                index: 0,
                min: dec!(-1)
            })
        );
    }

    #[test]
    fn check_rejects_rate_above_one() {
        let mut brackets = schedule();
        brackets[1].rate = dec!(1.5);

        assert_eq!(
            check_brackets(&brackets),
            Err(BracketError::RateOutOfRange {
                index: 1,
                rate: dec!(1.5)
            })
        );
    }

    #[test]
    fn check_rejects_inverted_bounds() {
        let mut brackets = schedule();
        brackets[0].max = Some(dec!(0));

        assert!(matches!(
            check_brackets(&brackets),
            Err(BracketError::Inverted { index: 0, .. })
        ));
    }

    #[test]
    fn check_rejects_gap_between_brackets() {
        let mut brackets = schedule();
        brackets[1].min = dec!(60000);

        assert_eq!(
            check_brackets(&brackets),
            Err(BracketError::NotContiguous {
                index: 0,
                max: dec!(50197),
                next_min: dec!(60000)
            })
        );
    }

    #[test]
    fn check_rejects_descending_order() {
        let mut brackets = schedule();
        brackets.swap(0, 1);

        assert!(matches!(
            check_brackets(&brackets),
            Err(BracketError::NotContiguous { index: 0, .. })
        ));
    }

    #[test]
    fn check_rejects_open_bracket_in_the_middle() {
        let mut brackets = schedule();
        brackets[1].max = None;

        assert_eq!(
            check_brackets(&brackets),
            Err(BracketError::OpenEndedBeforeLast { index: 1 })
        );
    }

    #[test]
    fn check_rejects_bounded_last_bracket() {
        let mut brackets = schedule();
        brackets[2].max = Some(dec!(155625));

        assert_eq!(
            check_brackets(&brackets),
            Err(BracketError::BoundedLast { max: dec!(155625) })
        );
    }
}
