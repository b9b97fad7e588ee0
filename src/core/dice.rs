//! Injected randomness
//!
//! Every random decision in the rules goes through [`Dice`]. Any
//! `rand::RngCore` is a `Dice`, so engines run on a seeded `ChaCha8Rng` in
//! play and on [`ScriptedDice`] in tests that need an exact roll sequence.
//! Real RNGs draw integers with `gen_range`; the float-scaling defaults only
//! serve scripted rolls.

use std::collections::VecDeque;

use rand::{Rng, RngCore};

pub trait Dice {
    /// Uniform draw in `[0, 1)`
    fn roll(&mut self) -> f64;

    /// Uniform float in `[low, high)`
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + self.roll() * (high - low)
    }

    /// True with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.roll() < p
    }

    /// Uniform integer in `[low, high]`
    fn int_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        let span = high - low;
        let offset = (self.roll() * (span as f64 + 1.0)) as u32;
        low + offset.min(span)
    }

    /// Uniform index into a slice of `len` items
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.roll() * len as f64) as usize).min(len - 1)
    }
}

impl<R: RngCore> Dice for R {
    fn roll(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn int_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.gen_range(low..=high)
    }

    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.gen_range(0..len)
    }
}

/// Replays a fixed list of rolls, then repeats `fallback` forever
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: 0.5,
        }
    }

    /// Every roll returns `value`
    pub fn constant(value: f64) -> Self {
        Self {
            rolls: VecDeque::new(),
            fallback: value,
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn push(&mut self, roll: f64) {
        self.rolls.push_back(roll);
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> f64 {
        let value = self.rolls.pop_front().unwrap_or(self.fallback);
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
