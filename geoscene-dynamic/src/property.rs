//! Time-varying property providers

use geoscene_core::{Color, SceneTime, Vector3f};
use std::any::Any;
use std::rc::Rc;

/// A value provider parameterized by scene time.
///
/// `sample` returns `None` when the property has no value at the given
/// time; callers decide whether that means "fall back to a default" or
/// "leave the target unchanged".
pub trait Property: 'static {
    type Output;

    /// Sample the property at `time`
    fn sample(&self, time: SceneTime) -> Option<Self::Output>;

    /// Downcasting support for value-equality checks
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a property, cloned freely within one frame loop
pub type PropertyRef<T> = Rc<dyn Property<Output = T>>;

/// A property whose value never changes
#[derive(Debug, Clone)]
pub struct ConstantProperty<T> {
    value: T,
}

impl<T: Clone + 'static> ConstantProperty<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// Convenience constructor returning a shared handle
    pub fn shared(value: T) -> PropertyRef<T> {
        Rc::new(Self::new(value))
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: Clone + 'static> Property for ConstantProperty<T> {
    type Output = T;

    fn sample(&self, _time: SceneTime) -> Option<T> {
        Some(self.value.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Values that support linear interpolation between samples
pub trait InterpolatableValue: Clone + 'static {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl InterpolatableValue for f32 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t as f32
    }
}

impl InterpolatableValue for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl InterpolatableValue for Vector3f {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t as f32
    }
}

impl InterpolatableValue for Color {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Color::lerp(self, other, t as f32)
    }
}

/// A property interpolated linearly between timestamped samples.
///
/// Sampling outside the timespan covered by the samples yields `None`.
pub struct SampledProperty<T> {
    samples: Vec<(SceneTime, T)>,
}

impl<T: InterpolatableValue> SampledProperty<T> {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Insert a sample, keeping the sample list ordered by time.
    /// A sample at an existing time replaces the previous value.
    pub fn add_sample(&mut self, time: SceneTime, value: T) {
        match self
            .samples
            .binary_search_by(|(t, _)| t.seconds().total_cmp(&time.seconds()))
        {
            Ok(i) => self.samples[i].1 = value,
            Err(i) => self.samples.insert(i, (time, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl<T: InterpolatableValue> Default for SampledProperty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: InterpolatableValue> Property for SampledProperty<T> {
    type Output = T;

    fn sample(&self, time: SceneTime) -> Option<T> {
        let (first, last) = (self.samples.first()?, self.samples.last()?);
        if time < first.0 || time > last.0 {
            return None;
        }
        let after = self.samples.partition_point(|(t, _)| *t <= time);
        let (t0, v0) = &self.samples[after - 1];
        if after == self.samples.len() {
            return Some(v0.clone());
        }
        let (t1, v1) = &self.samples[after];
        let span = t0.seconds_until(*t1);
        if span <= 0.0 {
            return Some(v0.clone());
        }
        Some(v0.lerp(v1, t0.seconds_until(time) / span))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A stepwise property: each interval's value holds from its start time
/// until the next interval begins. Sampling before the first interval
/// yields `None`; the last interval extends forever.
pub struct IntervalProperty<T> {
    intervals: Vec<(SceneTime, T)>,
}

impl<T: Clone + 'static> IntervalProperty<T> {
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Set the value holding from `start` onwards
    pub fn add_interval(&mut self, start: SceneTime, value: T) {
        match self
            .intervals
            .binary_search_by(|(t, _)| t.seconds().total_cmp(&start.seconds()))
        {
            Ok(i) => self.intervals[i].1 = value,
            Err(i) => self.intervals.insert(i, (start, value)),
        }
    }
}

impl<T: Clone + 'static> Default for IntervalProperty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Property for IntervalProperty<T> {
    type Output = T;

    fn sample(&self, time: SceneTime) -> Option<T> {
        let after = self.intervals.partition_point(|(t, _)| *t <= time);
        after
            .checked_sub(1)
            .map(|i| self.intervals[i].1.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Value equality between two shared properties: reference identity, or
/// both being constants with equal values. Time-varying properties are
/// only ever equal to themselves.
pub fn property_eq<T: Clone + PartialEq + 'static>(a: &PropertyRef<T>, b: &PropertyRef<T>) -> bool {
    if Rc::ptr_eq(a, b) {
        return true;
    }
    match (
        a.as_any().downcast_ref::<ConstantProperty<T>>(),
        b.as_any().downcast_ref::<ConstantProperty<T>>(),
    ) {
        (Some(a), Some(b)) => a.value() == b.value(),
        _ => false,
    }
}
