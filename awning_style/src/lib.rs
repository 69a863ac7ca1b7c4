// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Awning Style: class-name mapping and overlay state classes.
//!
//! Overlay surfaces describe their look with *logical* class names — a base
//! class, the resolved compass position's token, and state tokens like
//! `open` or `unplaced`. Embedders that scope or hash their class names pass
//! a [`ClassMap`] translating logical names to concrete ones; names without
//! a mapping resolve to themselves, so an empty map is a valid identity
//! configuration.
//!
//! Style resolution is deliberately decoupled from geometry: nothing in this
//! crate knows about rectangles, viewports, or placement. The positioning
//! kernels hand over plain string tokens and this crate only translates and
//! orders them.
//!
//! ## Minimal example
//!
//! ```
//! use awning_style::{ClassMap, StateClasses, class_list};
//!
//! let mut map = ClassMap::new();
//! map.insert("overlay", "st1__overlay");
//!
//! let classes = class_list(
//!     &map,
//!     "overlay",
//!     Some("bottomRight"),
//!     StateClasses::OPEN | StateClasses::UNPLACED,
//! );
//! assert_eq!(classes, ["st1__overlay", "bottomRight", "open", "unplaced"]);
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;

/// Lookup table from logical class names to concrete ones.
///
/// Unmapped names resolve to themselves.
#[derive(Clone, Debug, Default)]
pub struct ClassMap {
    map: HashMap<String, String>,
}

impl ClassMap {
    /// An empty (identity) map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `logical` to `concrete`.
    pub fn insert(&mut self, logical: &str, concrete: &str) {
        self.map.insert(logical.to_string(), concrete.to_string());
    }

    /// Resolve a logical name, falling back to the name itself.
    #[must_use]
    pub fn resolve<'a>(&'a self, logical: &'a str) -> &'a str {
        self.map.get(logical).map_or(logical, String::as_str)
    }

    /// Number of explicit mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the map holds no explicit mappings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ClassMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (logical, concrete) in iter {
            map.insert(logical, concrete);
        }
        map
    }
}

bitflags::bitflags! {
    /// State classes a surface can carry in addition to its position class.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StateClasses: u8 {
        /// The surface is currently shown.
        const OPEN = 0b0000_0001;
        /// The surface is mounted but not yet positioned; embedders keep it
        /// invisible so it is never flashed at the wrong spot.
        const UNPLACED = 0b0000_0010;
        /// The surface is stacked above other floating content.
        const ON_TOP = 0b0000_0100;
    }
}

impl StateClasses {
    /// The logical tokens for the set flags, in declaration order.
    #[must_use]
    pub fn tokens(self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.contains(Self::OPEN) {
            out.push("open");
        }
        if self.contains(Self::UNPLACED) {
            out.push("unplaced");
        }
        if self.contains(Self::ON_TOP) {
            out.push("onTop");
        }
        out
    }
}

/// Build the ordered concrete class list for a surface: the base class, the
/// position token (when placed), then the state tokens, each resolved
/// through `map`.
#[must_use]
pub fn class_list(
    map: &ClassMap,
    base: &str,
    position: Option<&str>,
    states: StateClasses,
) -> Vec<String> {
    let mut out = Vec::new();
    out.push(map.resolve(base).to_string());
    if let Some(position) = position {
        out.push(map.resolve(position).to_string());
    }
    for token in states.tokens() {
        out.push(map.resolve(token).to_string());
    }
    out
}
