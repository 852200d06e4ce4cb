//! Power sources
//!
//! A run either holds a constant power or sweeps through a list of step
//! powers. The sequencer is stateless; the run controller owns the position.

use tracing::warn;

/// Cycles through a non-empty list of step powers, wrapping after the last
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequencer {
    steps: Vec<u8>,
}

impl StepSequencer {
    /// Create a sequencer, or `None` if the list is empty
    pub fn new(steps: Vec<u8>) -> Option<Self> {
        if steps.is_empty() {
            None
        } else {
            Some(Self { steps })
        }
    }

    /// Return the power at `position` and the position for the next call
    pub fn next(&self, position: usize) -> (u8, usize) {
        let index = position % self.steps.len();
        (self.steps[index], (index + 1) % self.steps.len())
    }

    /// Number of steps in one sweep
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; empty lists are rejected by [`StepSequencer::new`]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step powers
    pub fn steps(&self) -> &[u8] {
        &self.steps
    }
}

/// The power for one emission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerReading {
    /// Requested power (%)
    pub power: u8,
    /// Set when the power came from a step list
    pub step: Option<u8>,
    /// Step position to use after this reading
    pub next_position: usize,
}

/// Where the requested power comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PowerSource {
    /// Same power for every emission
    Constant(u8),
    /// Powers taken from a repeating step list
    Stepped(StepSequencer),
}

impl PowerSource {
    /// Build a source from an optional step list, falling back to `fixed`
    /// when the list is missing or empty
    pub fn from_steps(fixed: u8, steps: Option<Vec<u8>>) -> Self {
        match steps {
            Some(steps) => match StepSequencer::new(steps) {
                Some(sequencer) => PowerSource::Stepped(sequencer),
                None => {
                    warn!("Empty step list, using fixed power {}%", fixed);
                    PowerSource::Constant(fixed)
                }
            },
            None => PowerSource::Constant(fixed),
        }
    }

    /// Power for the given step position
    pub fn power_at(&self, position: usize) -> PowerReading {
        match self {
            PowerSource::Constant(power) => PowerReading {
                power: *power,
                step: None,
                next_position: position,
            },
            PowerSource::Stepped(sequencer) => {
                let (power, next_position) = sequencer.next(position);
                PowerReading {
                    power,
                    step: Some(power),
                    next_position,
                }
            }
        }
    }

    /// Whether powers come from a step list
    pub fn is_stepped(&self) -> bool {
        matches!(self, PowerSource::Stepped(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequencer_wraps() {
        let seq = StepSequencer::new(vec![10, 30, 50]).unwrap();

        let mut position = 0;
        let mut powers = Vec::new();
        for _ in 0..5 {
            let (power, next) = seq.next(position);
            powers.push(power);
            position = next;
        }

        assert_eq!(powers, vec![10, 30, 50, 10, 30]);
    }

    #[test]
    fn test_sequencer_single_step() {
        let seq = StepSequencer::new(vec![80]).unwrap();
        assert_eq!(seq.next(0), (80, 0));
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn test_sequencer_rejects_empty() {
        assert!(StepSequencer::new(Vec::new()).is_none());
    }

    #[test]
    fn test_sequencer_out_of_range_position() {
        let seq = StepSequencer::new(vec![10, 20]).unwrap();
        assert_eq!(seq.next(5), (20, 0));
    }

    #[test]
    fn test_empty_steps_fall_back_to_constant() {
        let source = PowerSource::from_steps(20, Some(Vec::new()));
        assert_eq!(source, PowerSource::Constant(20));
        assert!(!source.is_stepped());
    }

    #[test]
    fn test_constant_source() {
        let source = PowerSource::from_steps(35, None);
        let reading = source.power_at(3);
        assert_eq!(
            reading,
            PowerReading {
                power: 35,
                step: None,
                next_position: 3
            }
        );
    }

    #[test]
    fn test_stepped_source_flags_step() {
        let source = PowerSource::from_steps(20, Some(vec![40, 60]));
        assert!(source.is_stepped());

        let first = source.power_at(0);
        assert_eq!(first.power, 40);
        assert_eq!(first.step, Some(40));

        let second = source.power_at(first.next_position);
        assert_eq!(second.power, 60);
        assert_eq!(second.step, Some(60));
        assert_eq!(second.next_position, 0);
    }
}
