use rand::Rng;

use crate::types::Outcome;

/// Source of uniform random digits 0-9 for the non-deterministic strategies.
pub trait DigitSource {
    fn next_digit(&mut self) -> u8;
}

impl<R: Rng + ?Sized> DigitSource for R {
    fn next_digit(&mut self) -> u8 {
        self.gen_range(0..=9)
    }
}

/// Uniform Big/Small drawn by classifying a random digit.
pub fn random_outcome(source: &mut dyn DigitSource) -> Outcome {
    Outcome::classify(source.next_digit())
}

/// Replays a fixed digit sequence, cycling when exhausted.
#[cfg(test)]
pub struct ScriptedDigits {
    digits: Vec<u8>,
    pos: usize,
}

#[cfg(test)]
impl ScriptedDigits {
    pub fn new(digits: &[u8]) -> Self {
        Self {
            digits: digits.to_vec(),
            pos: 0,
        }
    }

    pub fn drawn(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
impl DigitSource for ScriptedDigits {
    fn next_digit(&mut self) -> u8 {
        let digit = self.digits[self.pos % self.digits.len()];
        self.pos += 1;
        digit
    }
}
