#![forbid(unsafe_code)]

//! Content rings and the rotation policy.
//!
//! A [`Ring`] is the finite backing sequence for one window: the message
//! list repeated `repeats` times, stored as an arena plus a head index.
//! Rotating a ring advances the head, so the old front element becomes the
//! tail without moving anything.
//!
//! A [`RingSet`] owns the rings of every window and only exposes whole-set
//! rotation. All rings therefore share one element count, one message order,
//! and one phase at every observable point.
//!
//! # Invariants
//!
//! 1. Every ring holds `repeats * messages.len()` elements for its lifetime.
//! 2. After [`RingSet::rotate`], every head has advanced by exactly one
//!    position (mod length).
//! 3. [`RingSet::current_threshold`] is never below 1.
//!
//! # Failure Modes
//!
//! - Empty message list: a single placeholder message stands in for it.
//! - Empty ring (zero repeats): rotation is a no-op.
//! - Zero measured width: the threshold clamps to 1.

use crate::measure::Measure;

/// Default number of times the message list is replicated per ring.
pub const DEFAULT_REPEATS: usize = 5;

/// Text shown when there are no messages yet.
pub const DEFAULT_PLACEHOLDER: &str = "LOADING…";

/// One rendered item of a ring.
///
/// Identity is positional: two elements showing the same text are distinct
/// when their slots differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element {
    /// Position in the ring as first mounted (`0..len`).
    pub slot: usize,
    /// Index into the ring set's message list.
    pub message: usize,
}

/// Circular buffer of elements backing one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    arena: Vec<Element>,
    head: usize,
}

impl Ring {
    /// Lay out `message_count` messages, repeated `repeats` times.
    #[must_use]
    pub fn new(message_count: usize, repeats: usize) -> Self {
        let arena = (0..repeats)
            .flat_map(|_| 0..message_count)
            .enumerate()
            .map(|(slot, message)| Element { slot, message })
            .collect();
        Self { arena, head: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Arena index of the current front element.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// The element currently entering from the left edge.
    #[inline]
    pub fn front(&self) -> Option<Element> {
        self.arena.get(self.head).copied()
    }

    /// The `index`-th element in visible order.
    pub fn get(&self, index: usize) -> Option<Element> {
        if index >= self.arena.len() {
            return None;
        }
        Some(self.arena[(self.head + index) % self.arena.len()])
    }

    /// Elements in visible order, front first, one pass.
    pub fn iter(&self) -> impl Iterator<Item = Element> + '_ {
        let (tail, front) = self.arena.split_at(self.head);
        front.iter().chain(tail.iter()).copied()
    }

    /// Elements in visible order, repeated forever. Empty for an empty ring.
    ///
    /// A rotation of a periodic sequence is itself periodic, so this is the
    /// lane as seen from the current front.
    pub fn cycle(&self) -> impl Iterator<Item = Element> + '_ {
        let (tail, front) = self.arena.split_at(self.head);
        front.iter().chain(tail.iter()).copied().cycle()
    }

    fn advance(&mut self) {
        if !self.arena.is_empty() {
            self.head = (self.head + 1) % self.arena.len();
        }
    }
}

/// Clamp `round(width + gap)` to at least 1.
///
/// Non-finite inputs collapse to 1 so the motion loop always terminates.
#[inline]
pub fn clamp_threshold(width: f64, gap: f64) -> f64 {
    let threshold = (width + gap).round();
    if threshold.is_finite() && threshold >= 1.0 {
        threshold
    } else {
        1.0
    }
}

/// The rings of every window, rotated in lockstep.
#[derive(Debug, Clone)]
pub struct RingSet {
    messages: Vec<String>,
    placeholder: bool,
    rings: Vec<Ring>,
    rotations: u64,
}

impl RingSet {
    /// Build `window_count` identical rings (at least one, the reference).
    #[must_use]
    pub fn new(
        messages: &[String],
        placeholder: &str,
        repeats: usize,
        window_count: usize,
    ) -> Self {
        let (messages, placeholder) = if messages.is_empty() {
            (vec![placeholder.to_string()], true)
        } else {
            (messages.to_vec(), false)
        };
        let ring = Ring::new(messages.len(), repeats);
        Self {
            rings: vec![ring; window_count.max(1)],
            messages,
            placeholder,
            rotations: 0,
        }
    }

    /// Move the front element of every ring to its tail.
    pub fn rotate(&mut self) {
        for ring in &mut self.rings {
            ring.advance();
        }
        self.rotations = self.rotations.wrapping_add(1);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            rotation = self.rotations,
            front = self.front_text().unwrap_or_default(),
            "lane rotated"
        );
    }

    /// Width of the reference ring's front element plus `gap`, at least 1.
    pub fn current_threshold(&self, measure: &impl Measure, gap: f64) -> f64 {
        let width = self.front_text().map_or(0.0, |text| measure.width(text));
        #[cfg(feature = "tracing")]
        if width.is_nan() || width <= 0.0 {
            tracing::debug!(width, gap, "front element has no width yet");
        }
        clamp_threshold(width, gap)
    }

    /// Text of the reference ring's front element.
    pub fn front_text(&self) -> Option<&str> {
        self.reference().front().map(|e| self.text(e))
    }

    /// The ring whose front element defines the threshold.
    #[inline]
    pub fn reference(&self) -> &Ring {
        &self.rings[0]
    }

    #[inline]
    pub fn ring(&self, index: usize) -> Option<&Ring> {
        self.rings.get(index)
    }

    #[inline]
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Number of rings (one per window).
    #[inline]
    pub fn window_count(&self) -> usize {
        self.rings.len()
    }

    /// Elements per ring.
    #[inline]
    pub fn ring_len(&self) -> usize {
        self.reference().len()
    }

    /// The effective message list (the placeholder when input was empty).
    #[inline]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Whether the placeholder stands in for an empty message list.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Text shown by `element`.
    #[inline]
    pub fn text(&self, element: Element) -> &str {
        self.messages
            .get(element.message)
            .map_or("", String::as_str)
    }

    /// Total rotations applied since mount.
    #[inline]
    pub fn rotations(&self) -> u64 {
        self.rotations
    }
}
